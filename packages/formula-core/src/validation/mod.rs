pub mod params;
pub mod query;

pub use params::validate_config;
pub use query::validate_query;
