pub mod cache;
pub mod shared;

pub use cache::HistoryCache;
pub use shared::SharedHistory;

/// チャットプラットフォームのユーザーID
pub type UserId = i64;
