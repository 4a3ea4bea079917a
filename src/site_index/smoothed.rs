//! Site curves with the juvenile segment replaced by a power curve through
//! breast height, so heights rise smoothly from the seedling stage.

use tracing::debug;

use crate::error::YieldError;

use super::age::AgeType;
use super::height::index_to_height;
use super::SiteIndexEquation;

/// Last breast-height age tried when looking for the blend point.
const MAX_BLEND_BREAST_AGE: f64 = 25.0;

/// Power curve `seedling_height + k0 * (t - seedling_age)^k1` joining the
/// seedling stage to the site curve at `blend_age` (total years).
#[derive(Debug, Clone, Copy, PartialEq)]
struct SeedlingCurve {
    k0: f64,
    k1: f64,
    blend_age: f64,
}

/// Curves whose `pi` follows the fractional part of years to breast height.
fn fractional_pi(equation: SiteIndexEquation) -> bool {
    use SiteIndexEquation::*;
    matches!(equation, PliThrower | SwGoudiePlaac | SwGoudieNatac | FdcBruceac | HwcWileyac)
}

fn seedling_curve(
    equation: SiteIndexEquation,
    site_index: f64,
    y2bh: f64,
    pi: f64,
    seedling_age: f64,
    seedling_height: f64,
) -> Result<SeedlingCurve, YieldError> {
    let mut breast_age = 2.0;
    loop {
        let blend_age = breast_age + y2bh.trunc();
        let height = index_to_height(equation, blend_age, AgeType::Total, site_index, y2bh, pi)?;
        let k1 = ((1.3 - seedling_height) / (height - seedling_height)).ln()
            / ((y2bh - seedling_age) / (blend_age - seedling_age)).ln();
        if k1 >= 1.0 {
            let k0 = (1.3 - seedling_height) / (y2bh - seedling_age).powf(k1);
            return Ok(SeedlingCurve { k0, k1, blend_age });
        }
        breast_age += 1.0;
        if breast_age >= MAX_BLEND_BREAST_AGE {
            return Err(YieldError::NoAnswer(format!(
                "{equation}: no juvenile blend before breast-height age {MAX_BLEND_BREAST_AGE}"
            )));
        }
    }
}

/// Height (m) at `age` like [`index_to_height`], with the years before the
/// blend age following a power curve that passes through 1.3 m at
/// `years_to_breast_height`.
///
/// The blend age is the first total age, two or more years past breast
/// height, at which the power curve is at least linear. From there on the
/// site curve is returned unchanged. A non-zero `seedling_age` adds a linear
/// ramp up to `seedling_height` before the power curve takes over.
pub fn index_to_height_smoothed(
    equation: SiteIndexEquation,
    age: f64,
    age_type: AgeType,
    site_index: f64,
    years_to_breast_height: f64,
    seedling_age: f64,
    seedling_height: f64,
) -> Result<f64, YieldError> {
    if site_index < 1.3 {
        return Err(YieldError::LessThan13(format!(
            "Site index < 1.3m: {site_index}"
        )));
    }
    let y2bh = years_to_breast_height;
    if y2bh < 0.0 {
        return Err(YieldError::NoAnswer(format!(
            "Years to breast height {y2bh} is negative"
        )));
    }
    if seedling_age >= y2bh || seedling_height >= 1.3 || seedling_age < 0.0 {
        return Err(YieldError::Validation(format!(
            "Seedling ({seedling_age} years, {seedling_height} m) must come before breast height"
        )));
    }

    let total_age = match age_type {
        AgeType::Breast => age + y2bh,
        AgeType::Total => age,
    };
    if total_age < 0.0 {
        return Err(YieldError::NoAnswer(format!(
            "Total age {total_age} is negative for {equation}"
        )));
    }
    if total_age < 0.00001 {
        return Ok(0.0);
    }

    let pi = if fractional_pi(equation) {
        y2bh.fract()
    } else {
        0.5
    };
    let curve = seedling_curve(equation, site_index, y2bh, pi, seedling_age, seedling_height)?;
    debug!(
        %equation,
        site_index,
        y2bh,
        k0 = curve.k0,
        k1 = curve.k1,
        blend_age = curve.blend_age,
        "smoothed juvenile curve"
    );

    let height = if seedling_age > 0.0 && total_age < seedling_age {
        seedling_height / seedling_age * total_age
    } else if total_age < curve.blend_age {
        seedling_height + curve.k0 * (total_age - seedling_age).powf(curve.k1)
    } else {
        index_to_height(equation, total_age, AgeType::Total, site_index, y2bh, pi)?
    };
    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SiteIndexEquation::*;

    fn bruce_y2bh(site_index: f64) -> f64 {
        13.25 - site_index / 6.096
    }

    #[test]
    fn test_continuous_at_blend_age() {
        for (eq, si) in [(FdcBruce, 30.0), (FdcBruce, 18.0), (FdcBruceac, 30.0)] {
            let y2bh = bruce_y2bh(si);
            let pi = if fractional_pi(eq) { y2bh.fract() } else { 0.5 };
            let curve = seedling_curve(eq, si, y2bh, pi, 0.0, 0.0).unwrap();
            let before = index_to_height_smoothed(
                eq,
                curve.blend_age - 1e-6,
                AgeType::Total,
                si,
                y2bh,
                0.0,
                0.0,
            )
            .unwrap();
            let at =
                index_to_height_smoothed(eq, curve.blend_age, AgeType::Total, si, y2bh, 0.0, 0.0)
                    .unwrap();
            assert!((before - at).abs() < 1e-4, "{eq} {si}: {before} vs {at}");
        }
    }

    #[test]
    fn test_bruce_blend_point() {
        // SI 30: breast height at 8.33 years, blend at total age 10.
        let y2bh = bruce_y2bh(30.0);
        let curve = seedling_curve(FdcBruce, 30.0, y2bh, 0.5, 0.0, 0.0).unwrap();
        assert_eq!(curve.blend_age, 10.0);
        assert!((curve.k1 - 3.1166).abs() < 1e-3, "k1 {}", curve.k1);
    }

    #[test]
    fn test_passes_breast_height_at_y2bh() {
        let y2bh = bruce_y2bh(30.0);
        let h = index_to_height_smoothed(FdcBruce, y2bh, AgeType::Total, 30.0, y2bh, 0.0, 0.0)
            .unwrap();
        assert!((h - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_site_curve_after_blend() {
        let y2bh = bruce_y2bh(30.0);
        let smoothed =
            index_to_height_smoothed(FdcBruce, 40.0, AgeType::Total, 30.0, y2bh, 0.0, 0.0).unwrap();
        let plain = index_to_height(FdcBruce, 40.0, AgeType::Total, 30.0, y2bh, 0.5).unwrap();
        assert_eq!(smoothed, plain);
    }

    #[test]
    fn test_breast_age_input_adds_y2bh() {
        let y2bh = bruce_y2bh(30.0);
        let by_breast =
            index_to_height_smoothed(FdcBruce, 1.0, AgeType::Breast, 30.0, y2bh, 0.0, 0.0).unwrap();
        let by_total =
            index_to_height_smoothed(FdcBruce, 1.0 + y2bh, AgeType::Total, 30.0, y2bh, 0.0, 0.0)
                .unwrap();
        assert_eq!(by_breast, by_total);
    }

    #[test]
    fn test_seedling_ramp() {
        let y2bh = bruce_y2bh(30.0);
        let h = index_to_height_smoothed(FdcBruce, 1.0, AgeType::Total, 30.0, y2bh, 2.0, 0.2)
            .unwrap();
        assert!((h - 0.1).abs() < 1e-12);
        let at_seedling =
            index_to_height_smoothed(FdcBruce, 2.0, AgeType::Total, 30.0, y2bh, 2.0, 0.2).unwrap();
        assert!((at_seedling - 0.2).abs() < 1e-12);
        let at_breast =
            index_to_height_smoothed(FdcBruce, y2bh, AgeType::Total, 30.0, y2bh, 2.0, 0.2).unwrap();
        assert!((at_breast - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_rising_through_juvenile_years() {
        let y2bh = bruce_y2bh(30.0);
        let mut last = 0.0;
        for year in 1..=20 {
            let h = index_to_height_smoothed(
                FdcBruce,
                f64::from(year),
                AgeType::Total,
                30.0,
                y2bh,
                0.0,
                0.0,
            )
            .unwrap();
            assert!(h > last, "year {year}: {h} <= {last}");
            last = h;
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let err = index_to_height_smoothed(FdcBruce, 10.0, AgeType::Total, 1.2, 8.0, 0.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, YieldError::LessThan13(_)));
        let err = index_to_height_smoothed(FdcBruce, -10.0, AgeType::Breast, 30.0, 8.0, 0.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, YieldError::NoAnswer(_)));
        let err = index_to_height_smoothed(FdcBruce, 10.0, AgeType::Total, 30.0, 8.0, 9.0, 0.5)
            .unwrap_err();
        assert!(matches!(err, YieldError::Validation(_)));
        assert_eq!(
            index_to_height_smoothed(FdcBruce, 0.0, AgeType::Total, 30.0, 8.0, 0.0, 0.0).unwrap(),
            0.0
        );
    }
}
