use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// バイト列から画像をデコードする
///
/// フォーマットはバイト列の先頭から推測する
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, TransformError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to guess format: {e}")))?;

    // デコード前に寸法を確認し、メモリ枯渇を防ぐ
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to read dimensions: {e}")))?;
    validate_source_dimensions(width, height)?;

    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to guess format: {e}")))?
        .decode()
        .map_err(|e| TransformError::ProcessingFailed(format!("decode failed: {e}")))?;

    Ok(img)
}

fn validate_source_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::DegenerateGeometry {
            width: width.into(),
            height: height.into(),
        });
    }
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}
