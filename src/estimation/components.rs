//! Make per-band base area, density and diameter agree with the layer totals.

use tracing::debug;

use crate::error::YieldError;
use crate::models::{UtilizationClass, UtilizationVector};

use super::density::{quad_mean_diameter, trees_per_hectare};

/// Bands base area may be moved out of, largest first.
const MODE_1_DONOR_BANDS: [UtilizationClass; 3] = [
    UtilizationClass::O225,
    UtilizationClass::U175,
    UtilizationClass::U125,
];

const MAX_MODE_2_ROUNDS: usize = 4;

/// Reconcile band base area, trees per hectare and diameter with the totals.
///
/// Three modes are tried in turn:
/// 1. every band at its lower diameter bound still has too few trees, so the
///    bands drop to their lower bounds and base area moves down a band;
/// 2. the band diameters are scaled by a common factor, pinning the worst
///    bound violator each round;
/// 3. when the unpinned remainder runs out, the whole layer goes to the band
///    containing the total diameter.
pub fn reconcile_components(
    base_area: &mut UtilizationVector,
    trees_per_hectare_util: &mut UtilizationVector,
    quad_mean_diameter_util: &mut UtilizationVector,
) -> Result<(), YieldError> {
    if base_area.all == 0.0 {
        for uc in UtilizationClass::BANDS {
            trees_per_hectare_util[uc] = 0.0;
            base_area[uc] = 0.0;
        }
        return Ok(());
    }

    let ba_sum = base_area.sum_of_bands();
    if (ba_sum - base_area.all).abs() > 0.00003 * ba_sum {
        return Err(YieldError::Processing(format!(
            "Band base areas sum to {ba_sum}, expected {}",
            base_area.all
        )));
    }

    let low = UtilizationClass::U75.low_bound();
    let dq0 = quad_mean_diameter(base_area.all, trees_per_hectare_util.all);
    if dq0 < low {
        return Err(YieldError::Processing(format!(
            "Quadratic mean diameter {dq0} from total base area and density is below {low} cm"
        )));
    }

    let tph_sum_high: f32 = UtilizationClass::BANDS
        .iter()
        .map(|&uc| trees_per_hectare(base_area[uc], uc.low_bound()))
        .sum();

    if tph_sum_high < trees_per_hectare_util.all {
        reconcile_mode_1(base_area, trees_per_hectare_util, quad_mean_diameter_util, tph_sum_high);
        Ok(())
    } else {
        reconcile_mode_2_check(base_area, trees_per_hectare_util, quad_mean_diameter_util)
    }
}

fn reconcile_mode_1(
    base_area: &mut UtilizationVector,
    tph: &mut UtilizationVector,
    dq: &mut UtilizationVector,
    tph_sum_high: f32,
) {
    debug!(tph_sum_high, tph_all = tph.all, "component reconciliation mode 1");
    let mut tph_need = tph.all - tph_sum_high;

    for uc in UtilizationClass::BANDS {
        dq[uc] = uc.low_bound();
    }

    for uc in MODE_1_DONOR_BANDS {
        let Some(prev) = uc.previous() else { continue };
        let tph_avail = trees_per_hectare(base_area[uc], prev.low_bound())
            - trees_per_hectare(base_area[uc], uc.low_bound());

        if tph_avail < tph_need {
            base_area[prev] += base_area[uc];
            base_area[uc] = 0.0;
            tph_need -= tph_avail;
        } else {
            let moved = base_area[uc] * tph_need / tph_avail;
            base_area[prev] += moved;
            base_area[uc] -= moved;
            break;
        }
    }

    for uc in UtilizationClass::BANDS {
        tph[uc] = trees_per_hectare(base_area[uc], dq[uc]);
    }
}

fn reconcile_mode_2_check(
    base_area: &mut UtilizationVector,
    tph: &mut UtilizationVector,
    dq: &mut UtilizationVector,
) -> Result<(), YieldError> {
    let tph_sum = tph.sum_of_bands();
    if (tph_sum - tph.all).abs() / tph_sum > 0.00001 {
        return reconcile_mode_2(base_area, tph, dq);
    }
    for uc in UtilizationClass::BANDS {
        if base_area[uc] > 0.0 {
            if tph[uc] <= 0.0 {
                return reconcile_mode_2(base_area, tph, dq);
            }
            let wanted = quad_mean_diameter(base_area[uc], tph[uc]);
            let dq_band = dq[uc];
            let in_band = dq_band >= uc.low_bound() && dq_band <= uc.high_bound();
            if in_band && (wanted - dq_band).abs() < 0.00001 {
                return Ok(());
            }
        }
    }
    Ok(())
}

fn reconcile_mode_2(
    base_area: &mut UtilizationVector,
    tph: &mut UtilizationVector,
    dq: &mut UtilizationVector,
) -> Result<(), YieldError> {
    let mut base_area_fixed = 0.0_f32;
    let mut tph_fixed = 0.0_f32;
    let mut limited = UtilizationClass::BANDS.map(|_| false);
    let mut dq_trial = UtilizationVector::default();
    let mut rounds = 0;

    loop {
        rounds += 1;
        if rounds > MAX_MODE_2_ROUNDS {
            return Err(YieldError::Processing(format!(
                "Mode 2 component reconciliation iterations exceeded {MAX_MODE_2_ROUNDS}"
            )));
        }

        let sum: f32 = UtilizationClass::BANDS
            .iter()
            .zip(limited)
            .filter(|&(&uc, lim)| base_area[uc] != 0.0 && !lim)
            .map(|(&uc, _)| base_area[uc] / (dq[uc] * dq[uc]))
            .sum();

        let ba_all = base_area.all - base_area_fixed;
        let tph_all = tph.all - tph_fixed;
        if ba_all <= 0.0 || tph_all <= 0.0 {
            reconcile_mode_3(base_area, tph, dq);
            return Ok(());
        }

        let dq_all = quad_mean_diameter(ba_all, tph_all);
        let sqrt_k = (dq_all * dq_all / ba_all * sum).sqrt();

        for (uc, lim) in UtilizationClass::BANDS.into_iter().zip(limited) {
            if !lim && base_area[uc] > 0.0 {
                dq_trial[uc] = dq[uc] * sqrt_k;
            }
        }

        // (band index, amount, pinned to low bound)
        let mut worst: Option<(usize, f32, bool)> = None;
        for (i, uc) in UtilizationClass::BANDS.into_iter().enumerate() {
            let trial = dq_trial[uc];
            if base_area[uc] > 0.0 && trial < uc.low_bound() {
                let amount = 1.0 - trial / uc.low_bound();
                if amount > worst.map_or(0.0, |w| w.1) {
                    worst = Some((i, amount, true));
                }
            }
            if trial > uc.high_bound() {
                let amount = trial / uc.high_bound() - 1.0;
                if amount > worst.map_or(0.0, |w| w.1) {
                    worst = Some((i, amount, false));
                }
            }
        }

        let Some((i, amount, low)) = worst else { break };
        let uc = UtilizationClass::BANDS[i];
        dq_trial[uc] = if low { uc.low_bound() } else { uc.high_bound() };
        debug!(%uc, amount, low, "pinning band diameter");

        limited[i] = true;
        base_area_fixed += base_area[uc];
        tph_fixed += trees_per_hectare(base_area[uc], dq_trial[uc]);
    }

    for uc in UtilizationClass::BANDS {
        dq[uc] = dq_trial[uc];
        tph[uc] = trees_per_hectare(base_area[uc], dq[uc]);
    }

    let ba_sum = base_area.sum_of_bands();
    let tph_sum = tph.sum_of_bands();
    if (ba_sum - base_area.all).abs() > 0.0002 * ba_sum {
        return Err(YieldError::Processing("Failed to reconcile base area".to_string()));
    }
    if (tph_sum - tph.all).abs() > 0.0002 * tph_sum {
        return Err(YieldError::Processing("Failed to reconcile trees per hectare".to_string()));
    }
    Ok(())
}

fn reconcile_mode_3(
    base_area: &mut UtilizationVector,
    tph: &mut UtilizationVector,
    dq: &mut UtilizationVector,
) {
    for uc in UtilizationClass::BANDS {
        base_area[uc] = 0.0;
        tph[uc] = 0.0;
        dq[uc] = uc.low_bound() + 2.5;
    }

    let uc = UtilizationClass::BANDS
        .into_iter()
        .find(|uc| dq.all < uc.high_bound())
        .unwrap_or(UtilizationClass::O225);
    debug!(%uc, dq = dq.all, "component reconciliation mode 3");

    base_area[uc] = base_area.all;
    tph[uc] = tph.all;
    dq[uc] = dq.all;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_band_tph(
        ba: &UtilizationVector,
        dq: &UtilizationVector,
        all: f32,
    ) -> UtilizationVector {
        let mut tph = UtilizationVector::with_all(all);
        for uc in UtilizationClass::BANDS {
            tph[uc] = trees_per_hectare(ba[uc], dq[uc]);
        }
        tph
    }

    fn make_dq(bands: [f32; 4], all: f32) -> UtilizationVector {
        let mut dq = UtilizationVector::from_bands(bands);
        dq.all = all;
        dq
    }

    #[test]
    fn test_zero_base_area_clears_bands() {
        let mut ba = UtilizationVector::default();
        ba.u125 = 3.0;
        let mut tph = UtilizationVector::from_bands([10.0, 20.0, 0.0, 0.0]);
        let mut dq = make_dq([10.0, 15.0, 20.0, 25.0], 12.0);
        reconcile_components(&mut ba, &mut tph, &mut dq).unwrap();
        assert_eq!(ba.bands(), [0.0; 4]);
        assert_eq!(tph.bands(), [0.0; 4]);
    }

    #[test]
    fn test_band_base_area_must_match_total() {
        let mut ba = UtilizationVector::from_bands([2.0, 3.0, 5.0, 10.0]);
        ba.all = 25.0;
        let mut dq = make_dq([10.0, 15.0, 20.0, 30.0], 20.0);
        let mut tph = make_band_tph(&ba, &dq, 800.0);
        let err = reconcile_components(&mut ba, &mut tph, &mut dq).unwrap_err();
        assert!(matches!(err, YieldError::Processing(_)));
    }

    #[test]
    fn test_total_diameter_below_minimum() {
        let mut ba = UtilizationVector::from_bands([2.0, 3.0, 5.0, 10.0]);
        let mut dq = make_dq([10.0, 15.0, 20.0, 30.0], 7.0);
        let mut tph = make_band_tph(&ba, &dq, 6000.0);
        let err = reconcile_components(&mut ba, &mut tph, &mut dq).unwrap_err();
        assert!(err.to_string().contains("below"));
    }

    #[test]
    fn test_mode_1_moves_base_area_down() {
        let mut ba = UtilizationVector::from_bands([2.0, 3.0, 5.0, 10.0]);
        let mut dq = make_dq([10.0, 15.0, 20.0, 30.0], 13.0);
        let mut tph = make_band_tph(&ba, &dq, 1500.0);
        reconcile_components(&mut ba, &mut tph, &mut dq).unwrap();

        assert_eq!(dq.bands(), [7.5, 12.5, 17.5, 22.5]);
        assert_eq!(ba.o225, 0.0);
        assert!((ba.sum_of_bands() - 20.0).abs() < 1e-4);
        assert!((tph.sum_of_bands() - 1500.0).abs() < 0.1, "tph {}", tph.sum_of_bands());
    }

    #[test]
    fn test_mode_2_scales_diameters() {
        let mut ba = UtilizationVector::from_bands([2.0, 3.0, 5.0, 10.0]);
        let original = make_dq([10.0, 15.0, 20.0, 30.0], 16.8);
        let mut dq = original;
        let mut tph = make_band_tph(&ba, &dq, 900.0);
        reconcile_components(&mut ba, &mut tph, &mut dq).unwrap();

        assert!((tph.sum_of_bands() - 900.0).abs() < 0.2);
        let factor = dq.u75 / original.u75;
        assert!(factor < 1.0);
        for uc in UtilizationClass::BANDS {
            assert!((dq[uc] / original[uc] - factor).abs() < 1e-4);
            assert!(dq[uc] >= uc.low_bound() && dq[uc] <= uc.high_bound());
        }
    }

    #[test]
    fn test_mode_2_pins_violators() {
        let mut ba = UtilizationVector::from_bands([2.0, 3.0, 5.0, 10.0]);
        let mut dq = make_dq([12.0, 17.0, 22.0, 40.0], 23.8);
        let mut tph = make_band_tph(&ba, &dq, 450.0);
        reconcile_components(&mut ba, &mut tph, &mut dq).unwrap();

        assert_eq!(dq.u75, 12.5);
        assert_eq!(dq.u125, 17.5);
        assert_eq!(dq.u175, 22.5);
        assert!(dq.o225 > 40.0);
        assert!((tph.sum_of_bands() - 450.0).abs() < 0.1);
    }

    #[test]
    fn test_consistent_bands_left_alone() {
        let mut ba = UtilizationVector::from_bands([2.0, 3.0, 5.0, 10.0]);
        let mut dq = make_dq([10.0, 15.0, 20.0, 30.0], 0.0);
        let mut tph = make_band_tph(&ba, &dq, 0.0);
        tph.all = tph.sum_of_bands();
        dq.all = quad_mean_diameter(ba.all, tph.all);
        let before = (ba, tph, dq);
        reconcile_components(&mut ba, &mut tph, &mut dq).unwrap();
        assert_eq!((ba, tph, dq), before);
    }

    #[test]
    fn test_mode_3_reassigns_whole_layer() {
        // All trees in the first band, but the layer dq is just over its top.
        let mut ba = UtilizationVector::from_bands([20.0, 0.0, 0.0, 0.0]);
        let mut dq = make_dq([12.4, 0.0, 0.0, 0.0], 12.6);
        let mut tph = make_band_tph(&ba, &dq, trees_per_hectare(20.0, 12.6));
        reconcile_components(&mut ba, &mut tph, &mut dq).unwrap();

        assert_eq!(ba.bands(), [0.0, 20.0, 0.0, 0.0]);
        assert_eq!(tph.u125, tph.all);
        assert_eq!(dq.u125, 12.6);
        assert_eq!(dq.u75, 10.0);
        assert_eq!(dq.o225, 25.0);
    }
}
