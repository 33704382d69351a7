use crate::errors::TransformError;
use image::{Rgba, RgbaImage, imageops};

/// 差分に掛けるコントラスト係数
const CONTRAST_SCALE: f32 = 2.0;

/// 差分に加えるオフセット（背景付近のノイズを打ち消す）
const CONTRAST_OFFSET: f32 = -100.0;

/// 前景ピクセルを囲む矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 背景との差分にコントラスト調整を適用する
///
/// 差分画像を自身と加算して係数で割り、オフセットを加えて 0..=255 に丸める
fn adjusted_difference(pixel: u8, background: u8) -> u8 {
    let diff = pixel.abs_diff(background) as f32;
    ((diff + diff) / CONTRAST_SCALE + CONTRAST_OFFSET).clamp(0.0, 255.0) as u8
}

fn is_foreground(pixel: &Rgba<u8>, background: &Rgba<u8>) -> bool {
    pixel
        .0
        .iter()
        .zip(background.0.iter())
        .any(|(&p, &b)| adjusted_difference(p, b) > 0)
}

/// 背景色と異なるピクセルを全て含む最小の矩形を求める
///
/// 前景が存在しない場合は None
pub fn content_bounds(img: &RgbaImage, background: Rgba<u8>) -> Option<BoundingBox> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if !is_foreground(pixel, &background) {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// 余白を取り除き、数式が描かれた領域だけを切り出す
///
/// 背景色は左上 (0,0) のピクセルから取得する
pub fn trim_background(img: &RgbaImage) -> Result<RgbaImage, TransformError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(TransformError::DegenerateGeometry {
            width: img.width().into(),
            height: img.height().into(),
        });
    }

    let background = *img.get_pixel(0, 0);
    let bbox = content_bounds(img, background).ok_or(TransformError::EmptyContent)?;

    tracing::debug!(
        x = bbox.x,
        y = bbox.y,
        width = bbox.width,
        height = bbox.height,
        "content bounds"
    );

    Ok(imageops::crop_imm(img, bbox.x, bbox.y, bbox.width, bbox.height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn canvas_with_rect(w: u32, h: u32, x: u32, y: u32, rw: u32, rh: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(w, h, WHITE);
        for py in y..y + rh {
            for px in x..x + rw {
                img.put_pixel(px, py, BLACK);
            }
        }
        img
    }

    #[test]
    fn test_adjusted_difference() {
        assert_eq!(adjusted_difference(255, 255), 0);
        // 差分 100 以下はノイズとして 0 になる
        assert_eq!(adjusted_difference(155, 255), 0);
        assert_eq!(adjusted_difference(154, 255), 1);
        assert_eq!(adjusted_difference(0, 255), 155);
    }

    #[test]
    fn test_content_bounds_minimal() {
        let img = canvas_with_rect(600, 100, 280, 40, 40, 20);
        let bbox = content_bounds(&img, WHITE).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x: 280,
                y: 40,
                width: 40,
                height: 20
            }
        );
    }

    #[test]
    fn test_content_bounds_ignores_noise() {
        let mut img = canvas_with_rect(50, 50, 10, 10, 5, 5);
        // 背景に近い薄いグレーは前景として扱わない
        img.put_pixel(0, 49, Rgba([200, 200, 200, 255]));
        img.put_pixel(49, 0, Rgba([160, 160, 160, 255]));

        let bbox = content_bounds(&img, WHITE).unwrap();
        assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (10, 10, 5, 5));
    }

    #[test]
    fn test_content_bounds_single_channel() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        img.put_pixel(7, 3, Rgba([255, 0, 255, 255]));

        let bbox = content_bounds(&img, WHITE).unwrap();
        assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (7, 3, 1, 1));
    }

    #[test]
    fn test_trim_uses_top_left_as_background() {
        // 黒背景に白い矩形
        let mut img = RgbaImage::from_pixel(30, 30, BLACK);
        for y in 5..8 {
            for x in 10..20 {
                img.put_pixel(x, y, WHITE);
            }
        }

        let trimmed = trim_background(&img).unwrap();
        assert_eq!(trimmed.dimensions(), (10, 3));
    }

    #[test]
    fn test_trim_empty_content() {
        let img = RgbaImage::from_pixel(40, 40, WHITE);
        assert!(matches!(
            trim_background(&img),
            Err(TransformError::EmptyContent)
        ));
    }

    #[test]
    fn test_trim_zero_sized() {
        let img = RgbaImage::new(0, 10);
        assert!(matches!(
            trim_background(&img),
            Err(TransformError::DegenerateGeometry { .. })
        ));
    }
}
