//! Utilization components of every species of a primary layer, and the
//! layer totals built from them.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::YieldError;
use crate::models::{
    ControlMap, DebugSettings, SpeciesStand, Stand, UtilizationClass, UtilizationVector,
};
use crate::reconcile::reconcile_stand_diameters;

use super::components::reconcile_components;
use super::density::{quad_mean_diameter, trees_per_hectare};
use super::utilization::{
    estimate_base_area_by_utilization, estimate_quad_mean_diameter_by_utilization,
};
use super::volume::{
    estimate_close_utilization_volume, estimate_net_decay_and_waste_volume,
    estimate_net_decay_volume, estimate_net_decay_waste_and_breakage_volume,
    estimate_whole_stem_volume, estimate_whole_stem_volume_per_tree,
};
use super::yield_curves::{
    base_area_yield_coefficients, estimate_base_area_yield, estimate_quad_mean_diameter_yield,
    quad_mean_diameter_yield_coefficients,
};

/// The eight utilization vectors of a species or layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSet {
    pub base_area: UtilizationVector,
    pub trees_per_hectare: UtilizationVector,
    pub quad_mean_diameter: UtilizationVector,
    pub whole_stem_volume: UtilizationVector,
    pub close_utilization_volume: UtilizationVector,
    pub net_decay_volume: UtilizationVector,
    pub net_decay_waste_volume: UtilizationVector,
    pub net_decay_waste_breakage_volume: UtilizationVector,
}

impl UtilizationSet {
    /// Rows for display: `(name, vector)` in processing order.
    pub fn rows(&self) -> [(&'static str, &UtilizationVector); 8] {
        [
            ("Base area (m²/ha)", &self.base_area),
            ("Trees/ha", &self.trees_per_hectare),
            ("Quad mean dia. (cm)", &self.quad_mean_diameter),
            ("Whole stem (m³/ha)", &self.whole_stem_volume),
            ("Close util. (m³/ha)", &self.close_utilization_volume),
            ("Net decay (m³/ha)", &self.net_decay_volume),
            ("Net decay+waste (m³/ha)", &self.net_decay_waste_volume),
            ("Net d+w+breakage (m³/ha)", &self.net_decay_waste_breakage_volume),
        ]
    }

    /// Recompute every diameter from the summed base area and density.
    fn refresh_quad_mean_diameter(&mut self) {
        for uc in std::iter::once(UtilizationClass::All).chain(UtilizationClass::BANDS) {
            self.quad_mean_diameter[uc] =
                quad_mean_diameter(self.base_area[uc], self.trees_per_hectare[uc]);
        }
    }
}

fn add_vector(lhs: &mut UtilizationVector, rhs: &UtilizationVector) {
    for (uc, value) in rhs.iter() {
        lhs[uc] += value;
    }
}

impl AddAssign<&UtilizationSet> for UtilizationSet {
    /// Sums everything, diameters included; callers recompute those.
    fn add_assign(&mut self, rhs: &UtilizationSet) {
        add_vector(&mut self.base_area, &rhs.base_area);
        add_vector(&mut self.trees_per_hectare, &rhs.trees_per_hectare);
        add_vector(&mut self.quad_mean_diameter, &rhs.quad_mean_diameter);
        add_vector(&mut self.whole_stem_volume, &rhs.whole_stem_volume);
        add_vector(&mut self.close_utilization_volume, &rhs.close_utilization_volume);
        add_vector(&mut self.net_decay_volume, &rhs.net_decay_volume);
        add_vector(&mut self.net_decay_waste_volume, &rhs.net_decay_waste_volume);
        add_vector(&mut self.net_decay_waste_breakage_volume, &rhs.net_decay_waste_breakage_volume);
    }
}

/// Estimated components of one species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesUtilization {
    pub genus: String,
    /// Share of the layer base area after estimation
    pub fraction: f32,
    pub lorey_height: f32,
    pub utilization: UtilizationSet,
}

/// Stand-level yield curve values (EMP106/EMP107).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub dominant_height: f32,
    pub breast_height_age: f32,
    /// m²/ha
    pub base_area: f32,
    /// cm
    pub quad_mean_diameter: f32,
}

/// Estimated components of a whole primary layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandUtilization {
    pub stand_id: String,
    /// Adjustment found by diameter reconciliation, when it ran
    pub diameter_adjustment: Option<f32>,
    pub species: Vec<SpeciesUtilization>,
    pub totals: UtilizationSet,
    /// Base-area-weighted lorey height (m)
    pub lorey_height: f32,
    pub yield_estimate: Option<YieldEstimate>,
}

/// Species diameters: as stated when every species has one, otherwise all
/// reconciled against the layer density.
fn species_quad_mean_diameters(
    control: &ControlMap,
    stand: &Stand,
) -> Result<(Vec<f32>, Option<f32>), YieldError> {
    let stated: Option<Vec<f32>> = stand.species.iter().map(|s| s.quad_mean_diameter).collect();
    match stated {
        Some(dqs) => Ok((dqs, None)),
        None => {
            let reconciled = reconcile_stand_diameters(control, stand)?;
            let dqs = reconciled.species.iter().map(|s| s.quad_mean_diameter).collect();
            Ok((dqs, Some(reconciled.adjustment)))
        }
    }
}

fn compute_species(
    control: &ControlMap,
    stand: &Stand,
    sp: &SpeciesStand,
    base_area: f32,
    dq: f32,
    breast_height_age: f32,
) -> Result<UtilizationSet, YieldError> {
    let hl = sp.lorey_height;
    let tph = trees_per_hectare(base_area, dq);
    debug!(genus = %sp.genus, hl, dq, base_area, tph, "computing utilization components");

    let mut set = UtilizationSet {
        base_area: UtilizationVector::with_all(base_area),
        trees_per_hectare: UtilizationVector::with_all(tph),
        quad_mean_diameter: UtilizationVector::with_all(dq),
        ..UtilizationSet::default()
    };

    let mean_volume = estimate_whole_stem_volume_per_tree(control, sp.volume_group, hl, dq)?;
    set.whole_stem_volume.all = tph * mean_volume;

    estimate_quad_mean_diameter_by_utilization(
        control,
        &stand.bec,
        &mut set.quad_mean_diameter,
        &sp.genus,
    )?;
    estimate_base_area_by_utilization(
        control,
        &stand.bec,
        &set.quad_mean_diameter,
        &mut set.base_area,
        &sp.genus,
    )?;
    for uc in UtilizationClass::BANDS {
        set.trees_per_hectare[uc] =
            trees_per_hectare(set.base_area[uc], set.quad_mean_diameter[uc]);
    }
    reconcile_components(
        &mut set.base_area,
        &mut set.trees_per_hectare,
        &mut set.quad_mean_diameter,
    )?;

    let all = UtilizationClass::All;
    let adjust = &sp.adjustments;
    estimate_whole_stem_volume(
        control,
        all,
        0.0,
        sp.volume_group,
        hl,
        &set.quad_mean_diameter,
        &set.base_area,
        &mut set.whole_stem_volume,
    )?;
    estimate_close_utilization_volume(
        control,
        all,
        &adjust.close_utilization,
        sp.volume_group,
        hl,
        &set.quad_mean_diameter,
        &set.whole_stem_volume,
        &mut set.close_utilization_volume,
    )?;
    estimate_net_decay_volume(
        control,
        &sp.genus,
        stand.region,
        all,
        &adjust.net_decay,
        sp.decay_group,
        breast_height_age,
        &set.quad_mean_diameter,
        &set.close_utilization_volume,
        &mut set.net_decay_volume,
    )?;
    estimate_net_decay_and_waste_volume(
        control,
        stand.region,
        all,
        &adjust.net_decay_waste,
        &sp.genus,
        hl,
        &set.quad_mean_diameter,
        &set.close_utilization_volume,
        &set.net_decay_volume,
        &mut set.net_decay_waste_volume,
    )?;
    estimate_net_decay_waste_and_breakage_volume(
        control,
        all,
        sp.breakage_group,
        &set.quad_mean_diameter,
        &set.close_utilization_volume,
        &set.net_decay_waste_volume,
        &mut set.net_decay_waste_breakage_volume,
    )?;

    Ok(set)
}

/// Stand yield curves (EMP106/EMP107), when the stand carries a base-area group,
/// a dominant height and a breast-height age.
pub fn estimate_stand_yield(
    control: &ControlMap,
    stand: &Stand,
) -> Result<Option<YieldEstimate>, YieldError> {
    let Some(group) = stand.basal_area_group else {
        return Ok(None);
    };
    let (Some(dominant_height), Some(breast_height_age)) =
        (stand.resolve_dominant_height()?, stand.resolve_breast_height_age()?)
    else {
        return Ok(None);
    };

    let age_cap = control.debug.get(DebugSettings::YIELD_AGE_CAP);
    let (max_base_area, max_quad_mean_diameter) = control.upper_bounds(group)?;

    let base_area = estimate_base_area_yield(
        &base_area_yield_coefficients(control, stand)?,
        age_cap,
        dominant_height,
        breast_height_age,
        stand.veteran_base_area,
        false,
        max_base_area,
    )?;
    let quad_mean_diameter = estimate_quad_mean_diameter_yield(
        &quad_mean_diameter_yield_coefficients(control, stand)?,
        age_cap,
        dominant_height,
        breast_height_age,
        max_quad_mean_diameter,
    )?;

    Ok(Some(YieldEstimate {
        dominant_height,
        breast_height_age,
        base_area,
        quad_mean_diameter,
    }))
}

/// Run the utilization estimators for every species of `stand` and sum the
/// results into layer totals.
pub fn compute_utilization_components(
    control: &ControlMap,
    stand: &Stand,
) -> Result<StandUtilization, YieldError> {
    stand.validate()?;
    debug!(stand = %stand.id, species = stand.species.len(), "computing primary layer components");

    let (dqs, diameter_adjustment) = species_quad_mean_diameters(control, stand)?;
    let breast_height_age = stand.resolve_breast_height_age()?.unwrap_or(0.0);

    let mut species = Vec::with_capacity(stand.species.len());
    let mut totals = UtilizationSet::default();
    for (sp, dq) in stand.species.iter().zip(dqs) {
        let base_area = stand.species_base_area(sp);
        let set = compute_species(control, stand, sp, base_area, dq, breast_height_age)?;
        totals += &set;
        species.push(SpeciesUtilization {
            genus: sp.genus.clone(),
            fraction: sp.fraction,
            lorey_height: sp.lorey_height,
            utilization: set,
        });
    }
    totals.refresh_quad_mean_diameter();

    let total_ba = totals.base_area.all;
    let mut lorey_height = 0.0;
    if total_ba > 0.0 {
        for sp in &mut species {
            sp.fraction = sp.utilization.base_area.all / total_ba;
            lorey_height += sp.lorey_height * sp.utilization.base_area.all;
        }
        lorey_height /= total_ba;
    }

    Ok(StandUtilization {
        stand_id: stand.id.clone(),
        diameter_adjustment,
        species,
        totals,
        lorey_height,
        yield_estimate: estimate_stand_yield(control, stand)?,
    })
}
