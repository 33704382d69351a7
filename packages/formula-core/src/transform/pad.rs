use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use crate::transform::borders::Borders;
use image::{Rgba, RgbaImage, imageops};

/// 余白の塗りつぶし色
pub const FILL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 画像の四辺に余白を追加する
///
/// 左右に borders.width、上下に borders.height ずつ FILL_COLOR で広げる。
/// 広げた後の総ピクセル数が MAX_PIXELS を超える場合は確保前にエラーを返す
pub fn expand(img: &RgbaImage, borders: Borders) -> Result<RgbaImage, TransformError> {
    let new_w = img.width() as u64 + 2 * borders.width as u64;
    let new_h = img.height() as u64 + 2 * borders.height as u64;

    let (Ok(width), Ok(height)) = (u32::try_from(new_w), u32::try_from(new_h)) else {
        return Err(TransformError::DegenerateGeometry {
            width: new_w,
            height: new_h,
        });
    };

    if new_w * new_h > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }

    let mut canvas = RgbaImage::from_pixel(width, height, FILL_COLOR);
    imageops::replace(
        &mut canvas,
        img,
        borders.width as i64,
        borders.height as i64,
    );
    Ok(canvas)
}
