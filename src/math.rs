//! Guarded numeric primitives shared by the site curves and the estimators.
//!
//! The estimators work in single precision, so the exponent guard trips at
//! the point where `f32::exp` would overflow.

use crate::error::YieldError;

/// Largest logit accepted by [`safe_exponent`].
pub const MAX_EXPONENT: f32 = 88.0;

/// `exp(x)`, failing when `x > 88`.
pub fn safe_exponent(logit: f32) -> Result<f32, YieldError> {
    if logit > MAX_EXPONENT {
        return Err(YieldError::Processing(format!(
            "logit {logit} exceeds {MAX_EXPONENT}"
        )));
    }
    Ok(logit.exp())
}

/// Logistic function `e^x / (1 + e^x)` built on [`safe_exponent`].
pub fn exponent_ratio(logit: f32) -> Result<f32, YieldError> {
    let exp = safe_exponent(logit)?;
    Ok(exp / (1.0 + exp))
}

/// Logistic function with the argument saturated to `[-cap, cap]`. Never fails.
pub fn ratio(arg: f32, cap: f32) -> f32 {
    let x = clamp(arg, -cap, cap);
    let exp = x.exp();
    exp / (1.0 + exp)
}

/// Clamp `x` into `[lo, hi]`.
///
/// Unlike `f32::clamp` this accepts `lo > hi`, in which case the lower bound wins.
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(x))
}

/// `x^y`, or 0 when `x <= 0`.
pub fn ppow(x: f64, y: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        x.powf(y)
    }
}

/// Natural log with non-positive arguments replaced by `ln(0.00001)`.
pub fn llog(x: f64) -> f64 {
    if x <= 0.0 {
        0.00001_f64.ln()
    } else {
        x.ln()
    }
}
