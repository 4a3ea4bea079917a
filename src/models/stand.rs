use serde::{Deserialize, Serialize};

use crate::error::YieldError;
use crate::site_index::{index_to_height, years_to_breast_height, AgeType, SiteIndexEquation};

use super::{Region, UtilizationVector};

/// Site curve used to derive a stand's dominant height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteCurve {
    /// Site index equation
    pub equation: SiteIndexEquation,
    /// Site index (m at breast-height age 50)
    pub site_index: f64,
    /// Total age in years
    pub age_total: f64,
    /// Years to breast height; recomputed from the equation when absent
    pub years_to_breast_height: Option<f64>,
}

impl SiteCurve {
    pub fn years_to_breast_height(&self) -> Result<f64, YieldError> {
        match self.years_to_breast_height {
            Some(y) => Ok(y),
            None => years_to_breast_height(self.equation, self.site_index),
        }
    }

    /// Dominant height at `age_total` along the curve.
    pub fn height(&self) -> Result<f64, YieldError> {
        let y2bh = self.years_to_breast_height()?;
        index_to_height(
            self.equation,
            self.age_total,
            AgeType::Total,
            self.site_index,
            y2bh,
            0.5,
        )
    }

    pub fn breast_height_age(&self) -> Result<f64, YieldError> {
        Ok(self.age_total - self.years_to_breast_height()?)
    }
}

/// Adjustments added to the volume logits, one per band.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeAdjustments {
    pub close_utilization: UtilizationVector,
    pub net_decay: UtilizationVector,
    pub net_decay_waste: UtilizationVector,
}

/// One species (genus) of the primary layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesStand {
    /// Genus code, e.g. "F" or "PL"
    pub genus: String,
    /// Fraction of the layer's base area held by this genus (0.0 - 1.0)
    pub fraction: f32,
    /// Lorey height in metres
    pub lorey_height: f32,
    /// Quadratic mean diameter (cm) if already known
    pub quad_mean_diameter: Option<f32>,
    pub volume_group: i32,
    pub decay_group: i32,
    pub breakage_group: i32,
    #[serde(default)]
    pub adjustments: VolumeAdjustments,
}

/// A primary layer ready for estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stand {
    /// Polygon identifier
    pub id: String,
    /// Growth BEC zone alias, e.g. "CWH"
    pub bec: String,
    /// Decay BEC zone alias; defaults to `bec`
    pub decay_bec: Option<String>,
    pub region: Region,
    /// Breast-height age in years
    pub age_breast_height: Option<f32>,
    /// Dominant height in metres
    pub dominant_height: Option<f32>,
    /// Base area (m²/ha) of trees 7.5 cm and over
    pub base_area: f32,
    /// Trees per hectare, 7.5 cm and over
    pub trees_per_hectare: f32,
    /// Lorey height in metres
    pub lorey_height: f32,
    /// Base area of the veteran layer above this one
    pub veteran_base_area: Option<f32>,
    /// Group selecting the yield-curve upper bounds
    pub basal_area_group: Option<i32>,
    pub site: Option<SiteCurve>,
    pub species: Vec<SpeciesStand>,
}

impl Stand {
    pub fn decay_bec(&self) -> &str {
        self.decay_bec.as_deref().unwrap_or(&self.bec)
    }

    /// Species base area from its fraction of the layer.
    pub fn species_base_area(&self, species: &SpeciesStand) -> f32 {
        species.fraction * self.base_area
    }

    /// Quadratic mean diameter of the whole layer.
    pub fn quad_mean_diameter(&self) -> f32 {
        crate::estimation::quad_mean_diameter(self.base_area, self.trees_per_hectare)
    }

    /// The stated dominant height, else the site curve's height.
    pub fn resolve_dominant_height(&self) -> Result<Option<f32>, YieldError> {
        if let Some(h) = self.dominant_height {
            return Ok(Some(h));
        }
        match &self.site {
            Some(site) => Ok(Some(site.height()? as f32)),
            None => Ok(None),
        }
    }

    /// The stated breast-height age, else the site curve's.
    pub fn resolve_breast_height_age(&self) -> Result<Option<f32>, YieldError> {
        if let Some(age) = self.age_breast_height {
            return Ok(Some(age));
        }
        match &self.site {
            Some(site) => Ok(Some(site.breast_height_age()? as f32)),
            None => Ok(None),
        }
    }

    /// Validate layer totals and species fractions.
    pub fn validate(&self) -> Result<(), YieldError> {
        if self.species.is_empty() {
            return Err(YieldError::Validation(format!(
                "Stand {}: no species",
                self.id
            )));
        }
        if !(self.base_area > 0.0) {
            return Err(YieldError::Validation(format!(
                "Stand {}: base area must be positive, got {}",
                self.id, self.base_area
            )));
        }
        if !(self.trees_per_hectare > 0.0) {
            return Err(YieldError::Validation(format!(
                "Stand {}: trees per hectare must be positive, got {}",
                self.id, self.trees_per_hectare
            )));
        }
        if !(self.lorey_height > 0.0) {
            return Err(YieldError::Validation(format!(
                "Stand {}: lorey height must be positive, got {}",
                self.id, self.lorey_height
            )));
        }
        for sp in &self.species {
            if !(sp.fraction > 0.0 && sp.fraction <= 1.0) {
                return Err(YieldError::Validation(format!(
                    "Stand {}, genus {}: fraction must be in (0, 1], got {}",
                    self.id, sp.genus, sp.fraction
                )));
            }
            if !(sp.lorey_height > 0.0) {
                return Err(YieldError::Validation(format!(
                    "Stand {}, genus {}: lorey height must be positive, got {}",
                    self.id, sp.genus, sp.lorey_height
                )));
            }
        }
        let total: f32 = self.species.iter().map(|s| s.fraction).sum();
        if (total - 1.0).abs() > 0.01 {
            return Err(YieldError::Validation(format!(
                "Stand {}: species fractions sum to {total}, expected 1",
                self.id
            )));
        }
        for (i, sp) in self.species.iter().enumerate() {
            if self.species[..i].iter().any(|s| s.genus == sp.genus) {
                return Err(YieldError::Validation(format!(
                    "Stand {}: genus {} listed twice",
                    self.id, sp.genus
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_species(genus: &str, fraction: f32) -> SpeciesStand {
        SpeciesStand {
            genus: genus.to_string(),
            fraction,
            lorey_height: 20.0,
            quad_mean_diameter: None,
            volume_group: 1,
            decay_group: 1,
            breakage_group: 1,
            adjustments: VolumeAdjustments::default(),
        }
    }

    fn make_stand(species: Vec<SpeciesStand>) -> Stand {
        Stand {
            id: "TEST-1".to_string(),
            bec: "CWH".to_string(),
            decay_bec: None,
            region: Region::Coast,
            age_breast_height: Some(45.0),
            dominant_height: Some(24.0),
            base_area: 30.0,
            trees_per_hectare: 600.0,
            lorey_height: 21.0,
            veteran_base_area: None,
            basal_area_group: Some(1),
            site: None,
            species,
        }
    }

    #[test]
    fn test_valid_stand() {
        let stand = make_stand(vec![make_species("F", 0.7), make_species("H", 0.3)]);
        assert!(stand.validate().is_ok());
        assert_eq!(stand.decay_bec(), "CWH");
        assert!((stand.species_base_area(&stand.species[0]) - 21.0).abs() < 1e-4);
    }

    #[test]
    fn test_fractions_must_sum_to_one() {
        let stand = make_stand(vec![make_species("F", 0.5), make_species("H", 0.3)]);
        let err = stand.validate().unwrap_err();
        assert!(err.to_string().contains("sum to"));
    }

    #[test]
    fn test_duplicate_genus_rejected() {
        let stand = make_stand(vec![make_species("F", 0.5), make_species("F", 0.5)]);
        assert!(stand.validate().is_err());
    }

    #[test]
    fn test_zero_base_area_rejected() {
        let mut stand = make_stand(vec![make_species("F", 1.0)]);
        stand.base_area = 0.0;
        assert!(matches!(stand.validate(), Err(YieldError::Validation(_))));
    }

    #[test]
    fn test_empty_species_rejected() {
        let stand = make_stand(vec![]);
        assert!(stand.validate().is_err());
    }

    #[test]
    fn test_dominant_height_from_site_curve() {
        let mut stand = make_stand(vec![make_species("F", 1.0)]);
        stand.dominant_height = None;
        stand.age_breast_height = None;
        stand.site = Some(SiteCurve {
            equation: SiteIndexEquation::FdcBruce,
            site_index: 30.0,
            age_total: 60.0,
            years_to_breast_height: None,
        });
        let h = stand.resolve_dominant_height().unwrap().unwrap();
        assert!(h > 25.0 && h < 40.0, "height {h}");
        let age = stand.resolve_breast_height_age().unwrap().unwrap();
        assert!((age - (60.0 - (13.25 - 30.0 / 6.096)) as f32).abs() < 1e-3);
    }

    #[test]
    fn test_stated_values_win_over_site_curve() {
        let stand = make_stand(vec![make_species("F", 1.0)]);
        assert_eq!(stand.resolve_dominant_height().unwrap(), Some(24.0));
        assert_eq!(stand.resolve_breast_height_age().unwrap(), Some(45.0));
    }

    #[test]
    fn test_stand_json_roundtrip() {
        let stand = make_stand(vec![make_species("F", 1.0)]);
        let json = serde_json::to_string(&stand).unwrap();
        let back: Stand = serde_json::from_str(&json).unwrap();
        assert_eq!(back.species.len(), 1);
        assert_eq!(back.region, Region::Coast);
    }
}
