use crate::transform::params::NormalizerConfig;

/// 各辺に追加する余白（左右それぞれ width、上下それぞれ height）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub width: u32,
    pub height: u32,
}

/// 計算した余白を整数に切り捨てる。負の値は 0 に丸める
fn to_border(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u32
    } else {
        0
    }
}

/// 横長の場合、もう一方の軸の余白を比率がちょうど ratio になるように求める
fn complementary_border(long_side: f64, long_border: f64, short_side: f64, ratio: f64) -> f64 {
    (((long_side + 2.0 * long_border) / ratio).floor() - short_side) / 2.0
}

/// 切り出し後の寸法から余白を計算する
///
/// - 横長（w/h > ratio）: 幅に最小余白を付け、高さは比率が ratio:1 になるように決める
/// - 許容範囲内: 両軸とも最小余白
/// - 縦長（w/h < 1/ratio）: 高さに最小余白を付け、幅は比率が 1:ratio になるように決める
pub fn calculate_borders(width: u32, height: u32, config: &NormalizerConfig) -> Borders {
    if width == 0 || height == 0 {
        return Borders::default();
    }

    let (w, h) = (width as f64, height as f64);
    let fraction = config.border_fraction;
    let ratio = config.wide_ratio;
    let aspect = w / h;

    let (width_border, height_border) = if aspect > ratio {
        let width_border = w * fraction;
        (width_border, complementary_border(w, width_border, h, ratio).floor())
    } else if aspect >= 1.0 / ratio {
        (w * fraction, h * fraction)
    } else {
        let height_border = h * fraction;
        (complementary_border(h, height_border, w, ratio).floor(), height_border)
    };

    if width_border < 0.0 || height_border < 0.0 {
        tracing::debug!(
            width,
            height,
            width_border,
            height_border,
            "negative border clamped to zero"
        );
    }

    Borders {
        width: to_border(width_border),
        height: to_border(height_border),
    }
}
