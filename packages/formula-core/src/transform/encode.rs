use crate::errors::TransformError;
use crate::transform::params::OutputFormat;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// 画像を可逆圧縮でエンコードする
pub fn encode_image(img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Png => {
            img.write_to(&mut buf, ImageFormat::Png)
                .map_err(|e| TransformError::ProcessingFailed(format!("PNG encode failed: {e}")))?;
        }
        OutputFormat::WebP => {
            // WebP エンコーダは RGB8 / RGBA8 のみ対応
            let encoder = WebPEncoder::new_lossless(&mut buf);
            let result = if img.color().has_alpha() {
                img.to_rgba8().write_with_encoder(encoder)
            } else {
                img.to_rgb8().write_with_encoder(encoder)
            };
            result.map_err(|e| TransformError::ProcessingFailed(format!("WebP encode failed: {e}")))?;
        }
    }

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png() {
        let img = DynamicImage::new_rgb8(10, 10);
        let data = encode_image(&img, OutputFormat::Png).unwrap();

        assert!(!data.is_empty());
        // PNG マジックナンバー確認
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_webp() {
        let img = DynamicImage::new_rgba8(10, 10);
        let data = encode_image(&img, OutputFormat::WebP).unwrap();

        assert!(!data.is_empty());
        // WebP は RIFF コンテナ
        assert_eq!(&data[0..4], b"RIFF");
    }

    #[test]
    fn test_png_is_lossless() {
        let mut img = image::RgbImage::new(4, 4);
        img.put_pixel(1, 2, image::Rgb([12, 34, 56]));
        let img = DynamicImage::ImageRgb8(img);

        let data = encode_image(&img, OutputFormat::Png).unwrap();
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.to_rgb8(), img.to_rgb8());
    }
}
