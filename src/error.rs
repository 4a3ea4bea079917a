use thiserror::Error;

/// Errors that can occur while evaluating site curves or estimating yield.
#[derive(Error, Debug)]
pub enum YieldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Site index (or breast-height height) below 1.3 m.
    #[error("Site index too low: {0}")]
    LessThan13(String),

    /// Unknown or unimplemented site curve.
    #[error("Curve error: {0}")]
    CurveError(String),

    /// Iteration diverged, or the age lies outside the curve's valid range.
    #[error("No answer: {0}")]
    NoAnswer(String),

    #[error("Growth intercept minimum: {0}")]
    GrowthInterceptMinimum(String),

    #[error("Growth intercept maximum: {0}")]
    GrowthInterceptMaximum(String),

    #[error("Growth intercept with total age: {0}")]
    GrowthInterceptTotal(String),

    #[error("Age type error: {0}")]
    AgeType(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Missing coefficients: {0}")]
    MissingCoefficients(String),

    #[error("No bracketing interval: {0}")]
    NoBracketing(String),

    #[error("Too many evaluations: {0}")]
    TooManyEvaluations(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = YieldError::from(io_err);
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_less_than_13_display() {
        let err = YieldError::LessThan13("site index 1.2".to_string());
        assert_eq!(err.to_string(), "Site index too low: site index 1.2");
    }

    #[test]
    fn test_curve_error_display() {
        let err = YieldError::CurveError("unknown curve".to_string());
        assert_eq!(err.to_string(), "Curve error: unknown curve");
    }

    #[test]
    fn test_no_answer_display() {
        let err = YieldError::NoAnswer("site > 999".to_string());
        assert_eq!(err.to_string(), "No answer: site > 999");
    }

    #[test]
    fn test_processing_error_display() {
        let err = YieldError::Processing("logit 90 exceeds 88".to_string());
        assert_eq!(err.to_string(), "Processing error: logit 90 exceeds 88");
    }

    #[test]
    fn test_missing_coefficients_display() {
        let err = YieldError::MissingCoefficients("EMP070 1 F IDF".to_string());
        assert_eq!(err.to_string(), "Missing coefficients: EMP070 1 F IDF");
    }

    #[test]
    fn test_json_error_from_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json{{{");
        let json_err = result.unwrap_err();
        let err: YieldError = json_err.into();
        assert!(matches!(err, YieldError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_toml_error_from_conversion() {
        let result: Result<toml::Value, _> = toml::from_str("= nope");
        let err: YieldError = result.unwrap_err().into();
        assert!(matches!(err, YieldError::Toml(_)));
    }

    #[test]
    fn test_error_is_debug() {
        let err = YieldError::NoBracketing("[-0.6, 0.5]".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NoBracketing"));
    }
}
