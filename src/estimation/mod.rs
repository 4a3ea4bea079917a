//! Per-species utilization-class estimators and the stand yield curves.

mod components;
mod density;
mod lorey_height;
mod pipeline;
mod species_dq;
mod utilization;
mod volume;
mod yield_curves;

pub use components::reconcile_components;
pub use density::{base_area, quad_mean_diameter, trees_per_hectare, PI_40K};
pub use lorey_height::{
    estimate_lead_height, estimate_non_primary_lorey_height, estimate_primary_lorey_height,
    estimate_primary_lorey_height_initial,
};
pub use pipeline::{
    compute_utilization_components, estimate_stand_yield, SpeciesUtilization, StandUtilization,
    UtilizationSet, YieldEstimate,
};
pub use species_dq::estimate_quad_mean_diameter_for_species;
pub use utilization::{
    estimate_base_area_by_utilization, estimate_quad_mean_diameter_by_utilization,
    estimate_utilization, normalize_bands,
};
pub use volume::{
    estimate_close_utilization_volume, estimate_net_decay_and_waste_volume,
    estimate_net_decay_volume, estimate_net_decay_waste_and_breakage_volume,
    estimate_whole_stem_volume, estimate_whole_stem_volume_per_tree,
};
pub use yield_curves::{
    base_area_yield_coefficients, estimate_base_area_yield, estimate_quad_mean_diameter_yield,
    quad_mean_diameter_yield_coefficients, EMPIRICAL_OCCUPANCY,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{ControlMap, Region, SpeciesStand, Stand, VolumeAdjustments};

    pub fn make_control() -> ControlMap {
        ControlMap::from_toml_str(include_str!("../../data/control.toml")).unwrap()
    }

    pub fn make_species(genus: &str, fraction: f32, lorey_height: f32) -> SpeciesStand {
        SpeciesStand {
            genus: genus.to_string(),
            fraction,
            lorey_height,
            quad_mean_diameter: None,
            volume_group: 1,
            decay_group: 1,
            breakage_group: 1,
            adjustments: VolumeAdjustments::default(),
        }
    }

    /// Coastal CWH stand, Douglas-fir leading with hemlock and cedar.
    pub fn make_stand() -> Stand {
        Stand {
            id: "CWH-1".to_string(),
            bec: "CWH".to_string(),
            decay_bec: None,
            region: Region::Coast,
            age_breast_height: Some(55.0),
            dominant_height: Some(28.0),
            base_area: 40.0,
            trees_per_hectare: 800.0,
            lorey_height: 24.0,
            veteran_base_area: None,
            basal_area_group: Some(1),
            site: None,
            species: vec![
                make_species("F", 0.5, 26.0),
                make_species("H", 0.3, 22.0),
                make_species("C", 0.2, 21.0),
            ],
        }
    }
}
