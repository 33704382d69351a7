use crate::constants::{MAX_EMITTED_DIMENSION, MINIMUM_BORDER_FRACTION, WIDE_RATIO_THRESHOLD};

/// 出力フォーマット（いずれも可逆圧縮）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    WebP,
}

impl OutputFormat {
    /// 文字列から OutputFormat を作成
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }
}

/// 正規化パラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerConfig {
    /// 各辺に追加する余白の割合
    pub border_fraction: f64,
    /// 横長とみなすアスペクト比（縦長の閾値はその逆数）
    pub wide_ratio: f64,
    /// 出力画像の最大寸法
    pub max_dimension: u32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            border_fraction: MINIMUM_BORDER_FRACTION,
            wide_ratio: WIDE_RATIO_THRESHOLD,
            max_dimension: MAX_EMITTED_DIMENSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_str("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_str("webp"), Some(OutputFormat::WebP));
        assert_eq!(OutputFormat::from_str("jpeg"), None);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::WebP.content_type(), "image/webp");
    }

    #[test]
    fn test_default_config() {
        let config = NormalizerConfig::default();
        assert_eq!(config.border_fraction, 0.2);
        assert_eq!(config.wide_ratio, 3.0);
        assert_eq!(config.max_dimension, 1280);
    }
}
