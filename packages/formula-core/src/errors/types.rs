use thiserror::Error;

/// 処理全体の統合エラー型
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

/// 画像正規化エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// 背景以外のピクセルが一つもない
    #[error("image has no content besides background")]
    EmptyContent,

    #[error("degenerate image geometry ({width}x{height})")]
    DegenerateGeometry { width: u64, height: u64 },

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
