use formula_core::{
    MAX_EMITTED_DIMENSION, MAX_TRACKED_USERS, MINIMUM_BORDER_FRACTION, NormalizerConfig,
    OutputFormat, WIDE_RATIO_THRESHOLD, validate_config,
};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TYPST_BIN: &str = "typst";
const DEFAULT_RENDER_PPI: u32 = 400;
const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 20;

/// サービス全体の設定
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub typst_bin: String,
    pub render_ppi: u32,
    pub render_timeout: Duration,
    pub normalizer: NormalizerConfig,
    pub output_format: OutputFormat,
    pub max_tracked_users: usize,
    pub image_host: Option<ImageHostConfig>,
}

/// 画像ホスト（imgbb 互換 API）の接続情報
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub url: String,
    pub api_key: String,
}

impl Config {
    /// 環境変数から Config を作成する
    ///
    /// すべて任意。画像ホストは IMAGE_HOST_URL と IMAGE_HOST_KEY の
    /// 両方が設定されている場合のみ有効になる
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から Config を作成する
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let normalizer = NormalizerConfig {
            border_fraction: parse_or(&lookup, "MINIMUM_BORDER_FRACTION", MINIMUM_BORDER_FRACTION)?,
            wide_ratio: parse_or(&lookup, "WIDE_RATIO_THRESHOLD", WIDE_RATIO_THRESHOLD)?,
            max_dimension: parse_or(&lookup, "MAX_EMITTED_DIMENSION", MAX_EMITTED_DIMENSION)?,
        };
        validate_config(&normalizer).map_err(|e| e.to_string())?;

        let output_format = match lookup("OUTPUT_FORMAT") {
            Some(value) => OutputFormat::from_str(&value)
                .ok_or_else(|| format!("OUTPUT_FORMAT must be png or webp, got {value:?}"))?,
            None => OutputFormat::Png,
        };

        let image_host = match (lookup("IMAGE_HOST_URL"), lookup("IMAGE_HOST_KEY")) {
            (Some(url), Some(api_key)) => Some(ImageHostConfig { url, api_key }),
            (Some(_), None) => return Err("IMAGE_HOST_KEY is not set".to_string()),
            _ => None,
        };

        Ok(Self {
            listen_addr: parse_or(
                &lookup,
                "LISTEN_ADDR",
                SocketAddr::from_str(DEFAULT_LISTEN_ADDR).map_err(|e| e.to_string())?,
            )?,
            typst_bin: lookup("TYPST_BIN").unwrap_or_else(|| DEFAULT_TYPST_BIN.to_string()),
            render_ppi: parse_or(&lookup, "RENDER_PPI", DEFAULT_RENDER_PPI)?,
            render_timeout: Duration::from_secs(parse_or(
                &lookup,
                "RENDER_TIMEOUT_SECS",
                DEFAULT_RENDER_TIMEOUT_SECS,
            )?),
            normalizer,
            output_format,
            max_tracked_users: parse_or(&lookup, "MAX_TRACKED_USERS", MAX_TRACKED_USERS)?,
            image_host,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| format!("{name} is invalid ({value:?}): {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.typst_bin, "typst");
        assert_eq!(config.render_ppi, 400);
        assert_eq!(config.render_timeout, Duration::from_secs(20));
        assert_eq!(config.normalizer, NormalizerConfig::default());
        assert_eq!(config.output_format, OutputFormat::Png);
        assert_eq!(config.max_tracked_users, 100);
        assert!(config.image_host.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LISTEN_ADDR", "127.0.0.1:3000"),
            ("MAX_EMITTED_DIMENSION", "2048"),
            ("MINIMUM_BORDER_FRACTION", "0.1"),
            ("MAX_TRACKED_USERS", "5"),
            ("OUTPUT_FORMAT", "webp"),
            ("IMAGE_HOST_URL", "https://api.imgbb.com/1/upload"),
            ("IMAGE_HOST_KEY", "secret"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.normalizer.max_dimension, 2048);
        assert_eq!(config.normalizer.border_fraction, 0.1);
        assert_eq!(config.max_tracked_users, 5);
        assert_eq!(config.output_format, OutputFormat::WebP);
        assert_eq!(config.image_host.unwrap().api_key, "secret");
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("RENDER_PPI", "lots")]).is_err());
        assert!(config_from(&[("MINIMUM_BORDER_FRACTION", "1.5")]).is_err());
        assert!(config_from(&[("OUTPUT_FORMAT", "jpeg")]).is_err());
        assert!(config_from(&[("IMAGE_HOST_URL", "https://example.com")]).is_err());
    }
}
