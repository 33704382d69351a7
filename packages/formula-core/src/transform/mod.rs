pub mod borders;
pub mod decode;
pub mod encode;
pub mod normalize;
pub mod pad;
pub mod params;
pub mod resize;
pub mod trim;

pub use borders::{Borders, calculate_borders};
pub use decode::decode_image;
pub use encode::encode_image;
pub use normalize::{NormalizedImage, normalize, normalize_to_bytes};
pub use pad::expand;
pub use params::{NormalizerConfig, OutputFormat};
pub use resize::{calculate_downscaled_dimensions, downscale_to_fit, resize_image};
pub use trim::{BoundingBox, content_bounds, trim_background};
