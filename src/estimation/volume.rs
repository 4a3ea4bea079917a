//! Volume estimators: whole stem, close utilization, and the net-of-decay,
//! waste and breakage reductions, each band by band.

use crate::error::YieldError;
use crate::math::{clamp, ratio};
use crate::models::{ControlMap, Region, UtilizationClass, UtilizationVector};

use super::utilization::{estimate_utilization, normalize_bands};

/// EMP090. Whole-stem volume per tree (m³) from lorey height and dq.
pub fn estimate_whole_stem_volume_per_tree(
    control: &ControlMap,
    volume_group: i32,
    lorey_height: f32,
    quad_mean_diameter: f32,
) -> Result<f32, YieldError> {
    let c = control.whole_stem_volume(volume_group)?;
    let dq = quad_mean_diameter;
    let hl = lorey_height;

    let log_mean_volume = c[0]
        + c[1] * dq.ln()
        + c[2] * hl.ln()
        + c[3] * dq
        + c[4] / dq
        + c[5] * hl
        + c[6] * dq * dq
        + c[7] * hl * dq
        + c[8] * hl / dq;

    Ok(log_mean_volume.exp())
}

/// EMP091. Whole-stem volume by band from base area.
///
/// `adjust` is added to the logit of the `target` band only. With target
/// [`UtilizationClass::All`] the bands are then scaled to sum to
/// `whole_stem.all`.
#[allow(clippy::too_many_arguments)]
pub fn estimate_whole_stem_volume(
    control: &ControlMap,
    target: UtilizationClass,
    adjust: f32,
    volume_group: i32,
    lorey_height: f32,
    quad_mean_diameter: &UtilizationVector,
    base_area: &UtilizationVector,
    whole_stem: &mut UtilizationVector,
) -> Result<(), YieldError> {
    let dq_sp = quad_mean_diameter.all;

    estimate_utilization(
        base_area,
        whole_stem,
        target,
        |uc, ba| {
            let [a0, a1, a2, a3] = *control.whole_stem_utilization(uc, volume_group)?;
            let species_term = if uc != UtilizationClass::O225 {
                a3 * dq_sp.ln()
            } else {
                a3 * dq_sp
            };
            let mut arg =
                a0 + a1 * lorey_height.ln() + a2 * quad_mean_diameter[uc].ln() + species_term;
            if uc == target {
                arg += adjust;
            }
            Ok(ba * arg.exp())
        },
        |x| x <= 0.0,
        0.0,
    )?;

    if target == UtilizationClass::All {
        normalize_bands(whole_stem)?;
    }
    Ok(())
}

/// EMP092. Close-utilization volume as a logistic share of whole-stem volume.
#[allow(clippy::too_many_arguments)]
pub fn estimate_close_utilization_volume(
    control: &ControlMap,
    target: UtilizationClass,
    adjust: &UtilizationVector,
    volume_group: i32,
    lorey_height: f32,
    quad_mean_diameter: &UtilizationVector,
    whole_stem: &UtilizationVector,
    close_utilization: &mut UtilizationVector,
) -> Result<(), YieldError> {
    estimate_utilization(
        whole_stem,
        close_utilization,
        target,
        |uc, ws| {
            let [a0, a1, a2] = *control.close_utilization(uc, volume_group)?;
            let arg = a0 + a1 * quad_mean_diameter[uc] + a2 * lorey_height + adjust[uc];
            Ok(ws * ratio(arg, 7.0))
        },
        |_| false,
        0.0,
    )?;

    if target == UtilizationClass::All {
        close_utilization.set_all_to_sum();
    }
    Ok(())
}

/// EMP093. Close-utilization volume net of decay.
///
/// Bands below 22.5 cm use the species dq; the top band uses its own.
#[allow(clippy::too_many_arguments)]
pub fn estimate_net_decay_volume(
    control: &ControlMap,
    genus: &str,
    region: Region,
    target: UtilizationClass,
    adjust: &UtilizationVector,
    decay_group: i32,
    breast_height_age: f32,
    quad_mean_diameter: &UtilizationVector,
    close_utilization: &UtilizationVector,
    net_decay: &mut UtilizationVector,
) -> Result<(), YieldError> {
    let dq_sp = quad_mean_diameter.all;
    let age_term = 20.0_f64.max(breast_height_age as f64).ln() as f32;
    let modifier = control.decay_modifier(genus, region)?;

    estimate_utilization(
        close_utilization,
        net_decay,
        target,
        |uc, cu| {
            let [a0, a1, a2] = *control.net_decay(uc, decay_group)?;
            let dq = if uc != UtilizationClass::O225 {
                dq_sp
            } else {
                quad_mean_diameter[uc]
            };
            let arg = a0 + a1 * dq.ln() + a2 * age_term + adjust[uc] + modifier;
            Ok(cu * ratio(arg, 8.0))
        },
        |_| false,
        0.0,
    )?;

    if target == UtilizationClass::All {
        net_decay.set_all_to_sum();
    }
    Ok(())
}

/// EMP094. Net-of-decay volume further reduced by waste.
///
/// The waste fraction never exceeds the decay fraction. A non-zero
/// `adjust` then shifts the resulting share of net-decay volume on the
/// logit scale.
#[allow(clippy::too_many_arguments)]
pub fn estimate_net_decay_and_waste_volume(
    control: &ControlMap,
    region: Region,
    target: UtilizationClass,
    adjust: &UtilizationVector,
    genus: &str,
    lorey_height: f32,
    quad_mean_diameter: &UtilizationVector,
    close_utilization: &UtilizationVector,
    net_decay: &UtilizationVector,
    net_decay_waste: &mut UtilizationVector,
) -> Result<(), YieldError> {
    estimate_utilization(
        net_decay,
        net_decay_waste,
        target,
        |uc, nd| {
            if nd.is_nan() || nd <= 0.0 {
                return Ok(0.0);
            }
            let [mut a0, a1, a2, a3, a4, a5] = *control.net_decay_waste(genus)?;
            if uc == UtilizationClass::O225 {
                a0 += a5;
            }
            let cu = close_utilization[uc];
            let frd = 1.0 - nd / cu;

            let mut arg = a0 + a1 * frd + a3 * quad_mean_diameter[uc].ln() + a4 * lorey_height.ln();
            arg += control.waste_modifier(genus, region)?;
            let arg = clamp(arg, -10.0, 10.0);

            let frw = (1.0 - (a2 * frd).exp()) * arg.exp() / (1.0 + arg.exp()) * (1.0 - frd);
            let frw = frd.min(frw);

            let mut result = cu * (1.0 - frd - frw);

            if adjust[uc] != 0.0 {
                let share = result / nd;
                if share < 1.0 && share > 0.0 {
                    let logit = clamp((share / (1.0 - share)).ln() + adjust[uc], -10.0, 10.0);
                    result = logit.exp() / (1.0 + logit.exp()) * nd;
                }
            }
            Ok(result)
        },
        |_| false,
        0.0,
    )?;

    if target == UtilizationClass::All {
        net_decay_waste.set_all_to_sum();
    }
    Ok(())
}

/// EMP095. Net-of-decay-and-waste volume less breakage.
///
/// Breakage is a clamped percentage of close-utilization volume and never
/// removes more than the band holds.
pub fn estimate_net_decay_waste_and_breakage_volume(
    control: &ControlMap,
    target: UtilizationClass,
    breakage_group: i32,
    quad_mean_diameter: &UtilizationVector,
    close_utilization: &UtilizationVector,
    net_decay_waste: &UtilizationVector,
    net_decay_waste_breakage: &mut UtilizationVector,
) -> Result<(), YieldError> {
    let [a1, a2, a3, a4] = *control.breakage(breakage_group)?;

    estimate_utilization(
        net_decay_waste,
        net_decay_waste_breakage,
        target,
        |uc, net_waste| {
            if net_waste <= 0.0 {
                return Ok(0.0);
            }
            let percent_broken = clamp(a1 + a2 * quad_mean_diameter[uc].ln(), a3, a4);
            let broken = (percent_broken / 100.0 * close_utilization[uc]).min(net_waste);
            Ok(net_waste - broken)
        },
        |_| false,
        0.0,
    )?;

    if target == UtilizationClass::All {
        net_decay_waste_breakage.set_all_to_sum();
    }
    Ok(())
}
