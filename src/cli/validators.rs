//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse a finite float.
fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() {
        return Err(format!("'{s}' is not a finite number"));
    }

    Ok(value)
}

/// Parse and validate a non-negative float (frequencies, durations).
pub fn parse_non_negative(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;

    if value < 0.0 {
        return Err(format!("value must not be negative, got {value}"));
    }

    Ok(value)
}

/// Parse a loudness threshold in dB. Negative values are expected.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_threshold_db(s: &str) -> Result<f32, String> {
    parse_finite(s).map(|value| value as f32)
}

/// Parse and validate a strictly positive sample count.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid positive integer"))?;

    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_non_negative_valid() {
        assert_eq!(parse_non_negative("4000").ok(), Some(4000.0));
        assert_eq!(parse_non_negative("0.3").ok(), Some(0.3));
        assert_eq!(parse_non_negative("0").ok(), Some(0.0));
    }

    #[test]
    fn test_parse_non_negative_invalid() {
        assert!(parse_non_negative("-1").is_err());
        assert!(parse_non_negative("inf").is_err());
        assert!(parse_non_negative("NaN").is_err());
        let err = parse_non_negative("abc").unwrap_err();
        assert!(err.contains("not a valid number"));
    }

    #[test]
    fn test_parse_threshold_accepts_negative() {
        assert_eq!(parse_threshold_db("-41").ok(), Some(-41.0));
        assert_eq!(parse_threshold_db("-12.5").ok(), Some(-12.5));
        assert!(parse_threshold_db("loud").is_err());
    }

    #[test]
    fn test_parse_positive_usize() {
        assert_eq!(parse_positive_usize("2048").ok(), Some(2048));
        assert!(parse_positive_usize("0").is_err());
        assert!(parse_positive_usize("-5").is_err());
        assert!(parse_positive_usize("1.5").is_err());
    }
}
