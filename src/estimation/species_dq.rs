use std::collections::HashMap;

use tracing::debug;

use crate::error::YieldError;
use crate::math::clamp;
use crate::models::{ComponentSizeLimits, ControlMap, Region};

use super::density::{quad_mean_diameter, trees_per_hectare};

/// Base-area-to-density constant of the two-component split.
const SPLIT_CONSTANT: f32 = 0.004_417_865;

/// EMP060. Quadratic mean diameter of one species in a mixed layer.
///
/// The layer is split into the target species and "the rest"; the ratio of
/// their diameters is a log-linear function of their lorey heights and the
/// layer dq, and the density split follows from a quadratic in the target's
/// trees per hectare. The result is limited by the EMP061 size limits.
///
/// `fractions` maps each genus of the layer to its base-area fraction.
#[allow(clippy::too_many_arguments)]
pub fn estimate_quad_mean_diameter_for_species(
    control: &ControlMap,
    genus: &str,
    lorey_height: f32,
    fractions: &HashMap<String, f32>,
    region: Region,
    stand_quad_mean_diameter: f32,
    stand_base_area: f32,
    stand_trees_per_hectare: f32,
    stand_lorey_height: f32,
) -> Result<f32, YieldError> {
    let min_dq = stand_quad_mean_diameter.min(7.6);
    let fraction = *fractions
        .get(genus)
        .ok_or_else(|| YieldError::Validation(format!("Genus {genus} is not part of the layer")))?;

    if fraction >= 1.0 || stand_quad_mean_diameter < min_dq {
        return Ok(stand_quad_mean_diameter);
    }

    let rows = control.species_quad_mean_diameter();
    let ((_, first), rest) = rows.split_first().ok_or_else(|| {
        YieldError::MissingCoefficients("species_quad_mean_diameter is empty".to_string())
    })?;
    let [mut a0, mut a1, a2] = *first;
    let fraction_other = 1.0 - fraction;

    for (other, coe) in rest {
        if other == genus {
            a0 += coe[0];
            a1 += coe[1];
        } else {
            let other_fraction = fractions.get(other).copied().unwrap_or(0.0);
            if other_fraction > 0.0 {
                let mult = -other_fraction / fraction_other;
                a0 += mult * coe[0];
                // Sign flip on the height term is part of the fitted model.
                a1 -= mult * coe[1];
            }
        }
    }

    let hl1 = lorey_height.max(4.0);
    let hl2 = (stand_lorey_height - lorey_height * fraction) / fraction_other;
    let height_ratio = clamp((hl1 - 3.0) / (hl2 - 3.0), 0.05, 20.0);

    let r = (a0 + a1 * height_ratio.ln() + a2 * stand_quad_mean_diameter.ln()).exp();

    let ba1 = fraction * stand_base_area;
    let ba2 = stand_base_area - ba1;

    let tph1 = if (r - 1.0).abs() < 0.0005 {
        fraction * stand_trees_per_hectare
    } else {
        let aa = (r - 1.0) * SPLIT_CONSTANT;
        let bb = SPLIT_CONSTANT * (1.0 - r) * stand_trees_per_hectare + ba1 + ba2 * r;
        let cc = -ba1 * stand_trees_per_hectare;
        let term = bb * bb - 4.0 * aa * cc;
        if term <= 0.0 {
            return Err(YieldError::Processing(format!(
                "Term for trees per hectare of species {genus} was {term} but should be positive"
            )));
        }
        let tph1 = (-bb + term.sqrt()) / (2.0 * aa);
        if tph1 <= 0.0 || tph1 > stand_trees_per_hectare {
            return Err(YieldError::Processing(format!(
                "Trees per hectare of species {genus} was {tph1}, \
                 outside (0, {stand_trees_per_hectare}]"
            )));
        }
        tph1
    };

    let dq1 = quad_mean_diameter(ba1, tph1);
    let tph2 = stand_trees_per_hectare - tph1;
    let dq2 = quad_mean_diameter(ba2, tph2);
    debug!(genus, r, dq1, dq2, "species quadratic mean diameter before limits");

    let limits = control.component_size_limits(genus, region)?;
    Ok(clamp_species_quad_mean_diameter(
        &limits,
        stand_trees_per_hectare,
        min_dq,
        lorey_height,
        ba1,
        ba2,
        dq1,
        tph2,
        dq2,
    ))
}

/// Keep the species and the remainder within their diameter limits.
#[allow(clippy::too_many_arguments)]
fn clamp_species_quad_mean_diameter(
    limits: &ComponentSizeLimits,
    stand_trees_per_hectare: f32,
    min_dq: f32,
    lorey_height: f32,
    ba1: f32,
    ba2: f32,
    mut dq1: f32,
    mut tph2: f32,
    mut dq2: f32,
) -> f32 {
    if dq2 < min_dq {
        // The remainder is too small; shrink the species instead.
        dq2 = min_dq;
        tph2 = trees_per_hectare(ba2, dq2);
        dq1 = quad_mean_diameter(ba1, stand_trees_per_hectare - tph2);
    }

    let dq_min = min_dq.max(limits.min_quad_mean_diameter_lorey_height_ratio * lorey_height);
    let dq_max = limits
        .quad_mean_diameter_maximum
        .min(limits.max_quad_mean_diameter_lorey_height_ratio * lorey_height)
        .max(7.6);

    // Both limit branches carry the remainder density over as `tph - tph2`.
    if dq1 < dq_min {
        dq1 = dq_min;
        tph2 = stand_trees_per_hectare - tph2;
    }
    if dq1 > dq_max {
        dq1 = dq_max;
        tph2 = stand_trees_per_hectare - tph2;
        dq2 = if tph2 > 0.0 && ba2 > 0.0 {
            quad_mean_diameter(ba2, tph2)
        } else {
            1000.0
        };
        if dq2 < min_dq {
            dq2 = min_dq;
            tph2 = trees_per_hectare(ba2, dq2);
            dq1 = quad_mean_diameter(ba1, stand_trees_per_hectare - tph2);
        }
    }
    dq1
}
