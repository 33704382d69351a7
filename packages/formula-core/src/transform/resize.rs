use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbaImage;

/// 最大寸法に収まる縮小後の寸法を計算する
///
/// どちらかの辺が max_dimension を超える場合のみ縮小する（拡大はしない）。
/// 倍率は max_dimension / max(幅, 高さ) で、結果は切り捨て（最小1px）
pub fn calculate_downscaled_dimensions(
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Option<(u32, u32)> {
    if width <= max_dimension && height <= max_dimension {
        return None;
    }

    let scale = max_dimension as f64 / width.max(height) as f64;
    let new_w = (width as f64 * scale) as u32;
    let new_h = (height as f64 * scale) as u32;

    Some((new_w.clamp(1, max_dimension), new_h.clamp(1, max_dimension)))
}

/// 画像をリサイズする
///
/// fast_image_resize の Lanczos3 フィルタを使用
pub fn resize_image(
    img: &RgbaImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbaImage, TransformError> {
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    let src_image = Image::from_vec_u8(
        img.width(),
        img.height(),
        img.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| TransformError::ProcessingFailed(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x4);

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec()).ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}

/// 最大寸法を超えている場合のみ縮小する
pub fn downscale_to_fit(img: RgbaImage, max_dimension: u32) -> Result<RgbaImage, TransformError> {
    match calculate_downscaled_dimensions(img.width(), img.height(), max_dimension) {
        Some((w, h)) => {
            tracing::debug!(
                from_width = img.width(),
                from_height = img.height(),
                to_width = w,
                to_height = h,
                "downscaling"
            );
            resize_image(&img, w, h)
        }
        None => Ok(img),
    }
}
