use crate::errors::TransformError;
use crate::transform::borders::calculate_borders;
use crate::transform::encode::encode_image;
use crate::transform::pad::expand;
use crate::transform::params::{NormalizerConfig, OutputFormat};
use crate::transform::resize::downscale_to_fit;
use crate::transform::trim::trim_background;
use image::{ColorType, DynamicImage};

/// 正規化済みの画像
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
}

impl NormalizedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// レンダリング結果の画像をチャット表示向けに整える。
///
/// 1. 背景の余白を取り除く（背景色は左上のピクセル）
/// 2. アスペクト比が 1:3〜3:1 に収まるよう余白を計算する
/// 3. 白で余白を追加する
/// 4. 最大寸法を超える場合は縮小する
///
/// 同じ入力に対して常に同じ結果を返し、共有状態を持たない。
/// 出力を再度渡すと余白が付け直されるため、入力と一致はしない。
pub fn normalize(
    img: &DynamicImage,
    config: &NormalizerConfig,
) -> Result<NormalizedImage, TransformError> {
    let color = img.color();
    let rgba = img.to_rgba8();

    let trimmed = trim_background(&rgba)?;
    let borders = calculate_borders(trimmed.width(), trimmed.height(), config);
    tracing::debug!(
        width = trimmed.width(),
        height = trimmed.height(),
        width_border = borders.width,
        height_border = borders.height,
        "applying borders"
    );

    let bordered = expand(&trimmed, borders)?;
    let resized = downscale_to_fit(bordered, config.max_dimension)?;
    let (width, height) = resized.dimensions();

    // 入力のチャンネル構成を保つ（パレット画像はデコード時に RGB(A) になっている）
    let resized = DynamicImage::ImageRgba8(resized);
    let image = match color {
        ColorType::L8 | ColorType::L16 => resized.into_luma8().into(),
        ColorType::La8 | ColorType::La16 => resized.into_luma_alpha8().into(),
        c if c.has_alpha() => resized,
        _ => resized.into_rgb8().into(),
    };

    Ok(NormalizedImage {
        image,
        width,
        height,
    })
}

/// 正規化してからエンコードし、(バイト列, (幅, 高さ)) を返す
pub fn normalize_to_bytes(
    img: &DynamicImage,
    config: &NormalizerConfig,
    format: OutputFormat,
) -> Result<(Vec<u8>, (u32, u32)), TransformError> {
    let normalized = normalize(img, config)?;
    let bytes = encode_image(&normalized.image, format)?;
    Ok((bytes, normalized.dimensions()))
}
