use bytes::Bytes;
use std::time::Duration;

use formula_core::{NormalizerConfig, OutputFormat, TransformError, decode_image, normalize_to_bytes};

use crate::compiler::{CompileError, FormulaCompiler};

/// レンダリング設定
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub normalizer: NormalizerConfig,
    pub output_format: OutputFormat,
    pub timeout: Duration,
}

/// 表示可能な画像
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("rendering timed out after {0:?}")]
    Timeout(Duration),

    #[error("render task failed: {0}")]
    Task(String),
}

/// 数式をコンパイルし、チャット表示向けに整えた画像を返す。
///
/// コンパイルから正規化までの全体に settings.timeout の制限をかける。
/// 正規化は CPU 負荷が高いためブロッキングスレッドで実行する。
pub async fn render_formula(
    compiler: &dyn FormulaCompiler,
    formula: &str,
    settings: &RenderSettings,
) -> Result<RenderedImage, RenderError> {
    let pipeline = async {
        let page = compiler.compile(formula).await?;

        let normalizer = settings.normalizer;
        let format = settings.output_format;
        let (bytes, (width, height)) = tokio::task::spawn_blocking(move || -> Result<_, TransformError> {
            let img = decode_image(&page)?;
            normalize_to_bytes(&img, &normalizer, format)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

        Ok::<_, RenderError>(RenderedImage {
            bytes: Bytes::from(bytes),
            width,
            height,
            content_type: format.content_type(),
        })
    };

    tokio::time::timeout(settings.timeout, pipeline)
        .await
        .map_err(|_| RenderError::Timeout(settings.timeout))?
}
