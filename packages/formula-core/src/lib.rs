pub mod constants;
pub mod errors;
pub mod history;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{
    MAX_EMITTED_DIMENSION, MAX_PIXELS, MAX_QUERY_LENGTH, MAX_TRACKED_USERS,
    MINIMUM_BORDER_FRACTION, WIDE_RATIO_THRESHOLD,
};
pub use errors::{MediaError, TransformError};
pub use history::{HistoryCache, SharedHistory, UserId};
pub use transform::{
    Borders, BoundingBox, NormalizedImage, NormalizerConfig, OutputFormat, calculate_borders,
    decode_image, encode_image, normalize, normalize_to_bytes,
};
pub use validation::{validate_config, validate_query};
