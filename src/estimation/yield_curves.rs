//! Stand-level base-area and diameter yield curves for the primary layer.

use crate::error::YieldError;
use crate::math::clamp;
use crate::models::{ControlMap, Stand};

/// Ratio of empirical to full stocking.
pub const EMPIRICAL_OCCUPANCY: f32 = 0.85;

fn capped_age(breast_height_age: f32, age_cap: i32) -> f32 {
    if age_cap > 0 {
        breast_height_age.min(age_cap as f32 * 100.0)
    } else {
        breast_height_age
    }
}

/// EMP106. Base area yield (m²/ha) for the primary layer.
///
/// `age_cap` (centuries, 0 for none) limits the age fed to the curve.
/// With `full_occupancy` the empirical estimate is scaled up to full stocking
/// after the upper bound is applied.
pub fn estimate_base_area_yield(
    coefficients: &[f32; 7],
    age_cap: i32,
    dominant_height: f32,
    breast_height_age: f32,
    veteran_base_area: Option<f32>,
    full_occupancy: bool,
    upper_bound_base_area: f32,
) -> Result<f32, YieldError> {
    let age = capped_age(breast_height_age, age_cap);
    if age <= 0.0 {
        return Err(YieldError::Processing(format!(
            "Age was not positive: {age}"
        )));
    }
    let tr_age = age.ln();
    let [a0, a1, a2, a3, a4, a5, a6] = *coefficients;

    let a00 = (a0 + a1 * tr_age).max(0.0);
    let ap = (a3 + a4 * tr_age).max(0.0);

    let mut bap = if dominant_height <= a2 {
        0.0
    } else {
        let bap = a00
            * (dominant_height - a2).powf(ap)
            * (a5 * dominant_height + a6 * veteran_base_area.unwrap_or(0.0)).exp();
        bap.min(upper_bound_base_area)
    };

    if full_occupancy {
        bap /= EMPIRICAL_OCCUPANCY;
    }
    Ok(bap)
}

/// EMP107. Quadratic mean diameter yield (cm, trees 7.5 cm and over).
pub fn estimate_quad_mean_diameter_yield(
    coefficients: &[f32; 5],
    age_cap: i32,
    dominant_height: f32,
    breast_height_age: f32,
    upper_bound_quad_mean_diameter: f32,
) -> Result<f32, YieldError> {
    if dominant_height <= 5.0 {
        return Ok(7.6);
    }
    let age = capped_age(breast_height_age, age_cap);
    if age <= 0.0 {
        return Err(YieldError::Processing(format!(
            "Primary breast height age must be positive but was {age}"
        )));
    }
    let tr_age = age.ln();
    let [c0, k1, k2, k3, k4] = *coefficients;
    let c1 = (k1 + k2 * tr_age).max(0.0);
    let c2 = (k3 + k4 * tr_age).max(0.0);

    let dq = c0 + c1 * (dominant_height - 5.0).powf(c2);
    Ok(clamp(dq, 7.6, upper_bound_quad_mean_diameter))
}

/// Sum `per_genus(genus) * fraction` over the stand's species.
fn weighted_coefficients<const N: usize>(
    stand: &Stand,
    per_genus: impl Fn(&str) -> Result<[f32; N], YieldError>,
) -> Result<[f32; N], YieldError> {
    let mut sum = [0.0_f32; N];
    for sp in &stand.species {
        let coe = per_genus(&sp.genus)?;
        for (s, c) in sum.iter_mut().zip(coe) {
            *s += c * sp.fraction;
        }
    }
    Ok(sum)
}

/// EMP106 coefficients for a stand, weighted by species fraction.
pub fn base_area_yield_coefficients(
    control: &ControlMap,
    stand: &Stand,
) -> Result<[f32; 7], YieldError> {
    let decay_bec = stand.decay_bec();
    let mut coe = weighted_coefficients(stand, |genus| {
        control.basal_area_yield(decay_bec, genus).copied()
    })?;
    if coe[5] > 0.0 {
        coe[5] = 0.0;
    }
    Ok(coe)
}

/// EMP107 coefficients for a stand, weighted by species fraction.
pub fn quad_mean_diameter_yield_coefficients(
    control: &ControlMap,
    stand: &Stand,
) -> Result<[f32; 5], YieldError> {
    let decay_bec = stand.decay_bec();
    weighted_coefficients(stand, |genus| {
        control.quad_mean_diameter_yield(decay_bec, genus).copied()
    })
}
