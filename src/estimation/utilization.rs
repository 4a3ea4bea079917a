use tracing::debug;

use crate::error::YieldError;
use crate::math::{exponent_ratio, safe_exponent};
use crate::models::{ControlMap, UtilizationClass, UtilizationVector};

/// Fill `output` band by band from `input`.
///
/// For each band, a `skip` input writes `default` and moves on; otherwise the
/// band is computed with `per_class` when `target` is [`UtilizationClass::All`]
/// or the band itself, and left untouched when it is not. The skip test runs
/// before the target test, so skipped bands are reset even outside the target.
pub fn estimate_utilization<F, S>(
    input: &UtilizationVector,
    output: &mut UtilizationVector,
    target: UtilizationClass,
    mut per_class: F,
    skip: S,
    default: f32,
) -> Result<(), YieldError>
where
    F: FnMut(UtilizationClass, f32) -> Result<f32, YieldError>,
    S: Fn(f32) -> bool,
{
    for uc in UtilizationClass::BANDS {
        let value = input[uc];
        if skip(value) {
            output[uc] = default;
            continue;
        }
        if target != UtilizationClass::All && target != uc {
            continue;
        }
        output[uc] = per_class(uc, value)?;
    }
    Ok(())
}

/// Scale the bands so they sum to `all`; returns the factor used.
pub fn normalize_bands(v: &mut UtilizationVector) -> Result<f32, YieldError> {
    let sum = v.sum_of_bands();
    if sum <= 0.0 {
        return Err(YieldError::Processing(format!(
            "Total volume {sum} was not positive."
        )));
    }
    let k = v.all / sum;
    v.scale_bands(k);
    Ok(k)
}

/// EMP070. Split `base_area.all` into the four bands.
///
/// Each band's share of the base area above it is a logistic in the
/// species dq (`dq^0.25` for the first band); the bands are the successive
/// differences of that cascade, so they always sum to the total.
pub fn estimate_base_area_by_utilization(
    control: &ControlMap,
    bec: &str,
    quad_mean_diameter: &UtilizationVector,
    base_area: &mut UtilizationVector,
    genus: &str,
) -> Result<(), YieldError> {
    let dq = quad_mean_diameter.all;
    // Base area above each band's upper limit.
    let mut above = UtilizationVector::with_all(base_area.all);

    for uc in [UtilizationClass::U75, UtilizationClass::U125, UtilizationClass::U175] {
        let [a0, a1] = *control.basal_area_utilization(uc, genus, bec)?;
        let logit = if uc == UtilizationClass::U75 {
            a0 + a1 * dq.powf(0.25)
        } else {
            a0 + a1 * dq
        };
        let previous = uc.previous().unwrap_or(UtilizationClass::All);
        above[uc] = above[previous] * exponent_ratio(logit)?;

        if uc == UtilizationClass::U75 && dq < UtilizationClass::U125.low_bound() {
            let ba12_max =
                (1.0 - ((quad_mean_diameter.u75 - 7.4) / (dq - 7.4)).powi(2)) * above.all;
            above.u75 = above.u75.min(ba12_max);
        }
    }

    base_area.u75 = base_area.all - above.u75;
    base_area.u125 = above.u75 - above.u125;
    base_area.u175 = above.u125 - above.u175;
    base_area.o225 = above.u175;
    Ok(())
}

/// EMP071. Estimate each band's dq from the species dq.
pub fn estimate_quad_mean_diameter_by_utilization(
    control: &ControlMap,
    bec: &str,
    quad_mean_diameter: &mut UtilizationVector,
    genus: &str,
) -> Result<(), YieldError> {
    let dq07 = quad_mean_diameter.all;
    let low = UtilizationClass::U75.low_bound();

    for uc in UtilizationClass::BANDS {
        let [a0, a1, a2, a3] = *control.quad_mean_diameter_utilization(uc, genus, bec)?;
        match uc {
            UtilizationClass::U75 => {
                if dq07 < low + 0.0001 {
                    quad_mean_diameter.all = low;
                    quad_mean_diameter.u75 = low;
                } else {
                    let logit = a1 / a0 * (dq07 - low);
                    let estimate = low + a0 * (1.0 - safe_exponent(logit)?).powf(a2);
                    quad_mean_diameter.u75 = estimate.min(dq07);
                }
            }
            UtilizationClass::U125 | UtilizationClass::U175 => {
                let logit = a0 + a1 * (dq07 / low).powf(a2);
                quad_mean_diameter[uc] = uc.low_bound() + 5.0 * exponent_ratio(logit)?;
            }
            _ => {
                let logit = a2 + a1 * dq07.powf(a3);
                quad_mean_diameter.o225 = UtilizationClass::O225
                    .low_bound()
                    .max(dq07 + a0 * (1.0 - exponent_ratio(logit)?));
            }
        }
        debug!(%uc, genus, dq = quad_mean_diameter[uc], "band quadratic mean diameter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::fixtures::make_control;
    use proptest::prelude::*;

    fn band_dq(dq07: f32) -> UtilizationVector {
        let control = make_control();
        let mut dq = UtilizationVector::with_all(dq07);
        estimate_quad_mean_diameter_by_utilization(&control, "CWH", &mut dq, "F").unwrap();
        dq
    }

    #[test]
    fn test_skip_writes_default_outside_target() {
        let input = UtilizationVector::from_bands([0.0, 2.0, 0.0, 4.0]);
        let mut output = UtilizationVector::from_bands([9.0, 9.0, 9.0, 9.0]);
        estimate_utilization(
            &input,
            &mut output,
            UtilizationClass::U125,
            |_, x| Ok(x * 10.0),
            |x| x <= 0.0,
            0.0,
        )
        .unwrap();
        assert_eq!(output.bands(), [0.0, 20.0, 0.0, 9.0]);
    }

    #[test]
    fn test_all_target_visits_every_band() {
        let input = UtilizationVector::from_bands([1.0, 2.0, 3.0, 4.0]);
        let mut output = UtilizationVector::default();
        let mut seen = Vec::new();
        estimate_utilization(
            &input,
            &mut output,
            UtilizationClass::All,
            |uc, x| {
                seen.push(uc);
                Ok(x + 1.0)
            },
            |_| false,
            0.0,
        )
        .unwrap();
        assert_eq!(seen, UtilizationClass::BANDS.to_vec());
        assert_eq!(output.bands(), [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_per_class_error_propagates() {
        let input = UtilizationVector::from_bands([1.0, 1.0, 1.0, 1.0]);
        let mut output = UtilizationVector::default();
        let result = estimate_utilization(
            &input,
            &mut output,
            UtilizationClass::All,
            |_, _| Err(YieldError::Processing("boom".to_string())),
            |_| false,
            0.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_bands() {
        let mut v = UtilizationVector::from_bands([1.0, 1.0, 1.0, 1.0]);
        v.all = 8.0;
        let k = normalize_bands(&mut v).unwrap();
        assert!((k - 2.0).abs() < 1e-6);
        assert!((v.sum_of_bands() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_rejects_empty_bands() {
        let mut v = UtilizationVector::with_all(5.0);
        assert!(matches!(normalize_bands(&mut v), Err(YieldError::Processing(_))));
    }

    #[test]
    fn test_band_dq_within_band_limits() {
        let dq = band_dq(20.0);
        assert!(dq.u75 > 7.5 && dq.u75 <= 20.0, "u75 {}", dq.u75);
        assert!(dq.u125 >= 12.5 && dq.u125 <= 17.5);
        assert!(dq.u175 >= 17.5 && dq.u175 <= 22.5);
        assert!(dq.o225 >= 22.5);
        assert_eq!(dq.all, 20.0);
    }

    #[test]
    fn test_small_stand_dq_short_circuits() {
        let dq = band_dq(7.5);
        assert_eq!(dq.u75, 7.5);
        assert_eq!(dq.all, 7.5);
    }

    #[test]
    fn test_first_band_never_exceeds_stand_dq() {
        let dq = band_dq(8.0);
        assert!(dq.u75 <= 8.0);
    }

    #[test]
    fn test_missing_bec_fails() {
        let control = make_control();
        let mut dq = UtilizationVector::with_all(20.0);
        let err =
            estimate_quad_mean_diameter_by_utilization(&control, "IDF", &mut dq, "F").unwrap_err();
        assert!(matches!(err, YieldError::MissingCoefficients(_)));
    }

    #[test]
    fn test_base_area_bands_sum_to_total() {
        let control = make_control();
        let dq = band_dq(20.0);
        let mut ba = UtilizationVector::with_all(30.0);
        estimate_base_area_by_utilization(&control, "CWH", &dq, &mut ba, "F").unwrap();
        assert!((ba.sum_of_bands() - 30.0).abs() < 1e-4);
        assert!(ba.bands().iter().all(|&b| b >= 0.0));
    }

    #[test]
    fn test_small_dq_caps_first_cascade_step() {
        let control = make_control();
        let dq = band_dq(10.0);
        let mut ba = UtilizationVector::with_all(10.0);
        estimate_base_area_by_utilization(&control, "CWH", &dq, &mut ba, "F").unwrap();
        let ba12_max = (1.0 - ((dq.u75 - 7.4) / (10.0 - 7.4)).powi(2)) * 10.0;
        assert!(10.0 - ba.u75 <= ba12_max + 1e-5);
    }

    proptest! {
        #[test]
        fn prop_base_area_conserved(dq07 in 7.6f32..60.0, total in 0.5f32..80.0) {
            let control = make_control();
            let dq = band_dq(dq07);
            let mut ba = UtilizationVector::with_all(total);
            estimate_base_area_by_utilization(&control, "CWH", &dq, &mut ba, "H").unwrap();
            prop_assert!((ba.sum_of_bands() - total).abs() <= 1e-4 * total.max(1.0));
        }
    }
}
