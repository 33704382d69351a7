use crate::errors::TransformError;
use crate::transform::NormalizerConfig;

/// 正規化パラメータを検証する
pub fn validate_config(config: &NormalizerConfig) -> Result<(), TransformError> {
    let fraction = config.border_fraction;
    if !fraction.is_finite() || !(0.0..1.0).contains(&fraction) {
        return Err(TransformError::InvalidParams(format!(
            "border fraction must be in [0, 1), got {fraction}"
        )));
    }

    let ratio = config.wide_ratio;
    if !ratio.is_finite() || ratio < 1.0 {
        return Err(TransformError::InvalidParams(format!(
            "wide ratio must be at least 1, got {ratio}"
        )));
    }

    if config.max_dimension == 0 {
        return Err(TransformError::InvalidParams(
            "max dimension must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl FnOnce(&mut NormalizerConfig)) -> NormalizerConfig {
        let mut config = NormalizerConfig::default();
        f(&mut config);
        config
    }

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&NormalizerConfig::default()).is_ok());
        assert!(validate_config(&with(|c| c.border_fraction = 0.0)).is_ok());
        assert!(validate_config(&with(|c| c.wide_ratio = 1.0)).is_ok());
    }

    #[test]
    fn test_invalid_fraction() {
        assert!(validate_config(&with(|c| c.border_fraction = -0.1)).is_err());
        assert!(validate_config(&with(|c| c.border_fraction = 1.0)).is_err());
        assert!(validate_config(&with(|c| c.border_fraction = f64::NAN)).is_err());
    }

    #[test]
    fn test_invalid_ratio_and_dimension() {
        assert!(validate_config(&with(|c| c.wide_ratio = 0.5)).is_err());
        assert!(validate_config(&with(|c| c.wide_ratio = f64::INFINITY)).is_err());
        assert!(validate_config(&with(|c| c.max_dimension = 0)).is_err());
    }
}
