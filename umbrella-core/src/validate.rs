use crate::error::{Result, UmbrellaError};

/// Returns `value` unchanged unless it is empty.
pub fn validate_non_empty(name: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(UmbrellaError::invalid(format!("{name} is empty")));
    }
    Ok(value.to_string())
}

/// Returns `value` unchanged unless it is zero, negative or NaN.
pub fn validate_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_nan() || value <= 0.0 {
        return Err(UmbrellaError::invalid(format!(
            "{name}: {value} is not a positive value"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_passes_through() {
        assert_eq!(validate_non_empty("city", "Ribeirão Preto").unwrap(), "Ribeirão Preto");
        assert_eq!(validate_non_empty("city", " ").unwrap(), " ");
    }

    #[test]
    fn empty_is_rejected() {
        let err = validate_non_empty("city", "").unwrap_err();
        assert!(matches!(err, UmbrellaError::InvalidArgument(_)));
        assert!(err.to_string().contains("city is empty"));
    }

    #[test]
    fn positive_passes_through() {
        assert_eq!(validate_positive("limit", 1.0).unwrap(), 1.0);
        assert_eq!(validate_positive("limit", 0.001).unwrap(), 0.001);
    }

    #[test]
    fn non_positive_is_rejected() {
        for bad in [0.0, -1.0, -0.0, f64::NAN, f64::NEG_INFINITY] {
            let err = validate_positive("timeout", bad).unwrap_err();
            assert!(matches!(err, UmbrellaError::InvalidArgument(_)), "{bad} accepted");
        }
    }
}
