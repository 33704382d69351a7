use crate::constants::MAX_QUERY_LENGTH;
use crate::errors::MediaError;

/// クエリ文字列を検証する
pub fn validate_query(query: &str) -> Result<(), MediaError> {
    // 空文字・空白のみは描画するものがない
    if query.trim().is_empty() {
        return Err(MediaError::Validation("query is empty".to_string()));
    }

    if query.len() > MAX_QUERY_LENGTH {
        return Err(MediaError::Validation(format!(
            "query is too long (max {MAX_QUERY_LENGTH} bytes)"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_queries() {
        assert!(validate_query("x^2").is_ok());
        assert!(validate_query("sum_(n=1)^oo 1/n^s").is_ok());
        assert!(validate_query("0").is_ok());
    }

    #[test]
    fn test_empty_query() {
        assert!(validate_query("").is_err());
        assert!(validate_query("   \n").is_err());
    }

    #[test]
    fn test_too_long_query() {
        let query = "a".repeat(MAX_QUERY_LENGTH + 1);
        assert!(validate_query(&query).is_err());
        assert!(validate_query(&query[1..]).is_ok());
    }
}
