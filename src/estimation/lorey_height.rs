//! Lorey-height estimators relating the primary species to the layer's lead
//! height, and non-primary species to either.

use tracing::debug;

use crate::error::YieldError;
use crate::models::{ControlMap, HeightSource, Region};

fn check_height(height: f32, what: &str) -> Result<(), YieldError> {
    if height < 1.3 {
        return Err(YieldError::LessThan13(format!("{what} {height} is below 1.3 m")));
    }
    Ok(())
}

/// Ratio of primary lorey height to lead height above breast height, falling
/// off with the primary species' density (stems over 7.5 cm).
fn height_multiplier(
    control: &ControlMap,
    genus: &str,
    region: Region,
    trees_per_hectare_primary: f32,
) -> Result<f32, YieldError> {
    let [a0, a1, a2] = *control.lorey_height_primary(genus, region)?;
    Ok(a0 - a1 + a1 * (a2 * (trees_per_hectare_primary - 100.0)).exp())
}

/// EMP050 method 1. Primary-species lorey height from the lead species'
/// dominant height.
pub fn estimate_primary_lorey_height(
    control: &ControlMap,
    genus: &str,
    region: Region,
    lead_height: f32,
    trees_per_hectare_primary: f32,
) -> Result<f32, YieldError> {
    check_height(lead_height, "Lead height")?;
    let multiplier = height_multiplier(control, genus, region, trees_per_hectare_primary)?;
    Ok(1.3 + (lead_height - 1.3) * multiplier)
}

/// EMP050 method 2. The inverse of [`estimate_primary_lorey_height`].
pub fn estimate_lead_height(
    control: &ControlMap,
    genus: &str,
    region: Region,
    primary_height: f32,
    trees_per_hectare_primary: f32,
) -> Result<f32, YieldError> {
    check_height(primary_height, "Primary lorey height")?;
    let multiplier = height_multiplier(control, genus, region, trees_per_hectare_primary)?;
    if multiplier <= 0.0 {
        return Err(YieldError::Processing(format!(
            "EMP050 height multiplier {multiplier} for {genus} {region} is not positive"
        )));
    }
    Ok(1.3 + (primary_height - 1.3) / multiplier)
}

/// EMP051. Primary-species lorey height from the lead height when the
/// density is not yet known.
pub fn estimate_primary_lorey_height_initial(
    control: &ControlMap,
    genus: &str,
    region: Region,
    lead_height: f32,
) -> Result<f32, YieldError> {
    check_height(lead_height, "Lead height")?;
    let [a, b] = *control.lorey_height_primary_initial(genus, region)?;
    Ok(1.3 + a * (lead_height - 1.3).powf(b))
}

/// EMP053. Lorey height of a non-primary species in the primary layer.
///
/// The coefficient row decides whether the curve runs off the lead height or
/// the primary species' lorey height.
pub fn estimate_non_primary_lorey_height(
    control: &ControlMap,
    genus: &str,
    primary_genus: &str,
    region: Region,
    lead_height: f32,
    primary_height: f32,
) -> Result<f32, YieldError> {
    let row = control.lorey_height_non_primary(genus, primary_genus, region)?;
    let height = match row.source {
        HeightSource::Lead => lead_height,
        HeightSource::Primary => primary_height,
    };
    check_height(height, "Reference height")?;
    let [a, b] = row.coefficients;
    let estimate = 1.3 + a * (height - 1.3).powf(b);
    debug!(genus, primary_genus, source = ?row.source, height, estimate, "EMP053");
    Ok(estimate)
}
