use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::YieldError;

use super::UtilizationClass;

/// Coastal or interior half of the province; selects modifier and limit rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Coast,
    Interior,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Coast => write!(f, "coast"),
            Region::Interior => write!(f, "interior"),
        }
    }
}

impl FromStr for Region {
    type Err = YieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coast" | "c" => Ok(Region::Coast),
            "interior" | "i" => Ok(Region::Interior),
            _ => Err(YieldError::Validation(format!(
                "Unknown region '{s}'. Use: coast or interior"
            ))),
        }
    }
}

/// Numbered debug switches, addressed from 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugSettings {
    #[serde(default)]
    pub modes: Vec<i32>,
}

impl DebugSettings {
    /// Reconciliation fails instead of guessing when this mode is set to 2.
    pub const NO_BRACKETING_POLICY: usize = 1;
    /// Yield curve age cap, in centuries. 0 disables the cap.
    pub const YIELD_AGE_CAP: usize = 2;

    /// Value of debug mode `mode` (1-based); unset modes read as 0.
    pub fn get(&self, mode: usize) -> i32 {
        mode.checked_sub(1)
            .and_then(|i| self.modes.get(i))
            .copied()
            .unwrap_or(0)
    }
}

/// Diameter and height limits for one genus in one region (EMP061).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentSizeLimits {
    /// Maximum lorey height (m)
    pub lorey_height_maximum: f32,
    /// Maximum quadratic mean diameter (cm)
    pub quad_mean_diameter_maximum: f32,
    /// Lower bound on dq / lorey height
    pub min_quad_mean_diameter_lorey_height_ratio: f32,
    /// Upper bound on dq / lorey height
    pub max_quad_mean_diameter_lorey_height_ratio: f32,
}

#[derive(Debug, Deserialize)]
struct ClassGenusBecRow {
    class: UtilizationClass,
    genus: String,
    bec: String,
    coefficients: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ClassGroupRow {
    class: UtilizationClass,
    group: i32,
    coefficients: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct GroupRow {
    group: i32,
    coefficients: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct GenusRow {
    genus: String,
    coefficients: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct BecGenusRow {
    bec: String,
    genus: String,
    coefficients: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct GenusRegionRow {
    genus: String,
    region: Region,
    coefficients: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct NonPrimaryHeightRow {
    genus: String,
    primary: String,
    region: Region,
    equation: u8,
    coefficients: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ModifierRow {
    genus: String,
    region: Region,
    value: f32,
}

#[derive(Debug, Deserialize)]
struct LimitsRow {
    genus: String,
    region: Region,
    #[serde(flatten)]
    limits: ComponentSizeLimits,
}

/// Which layer height drives a non-primary species' lorey height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightSource {
    /// Dominant height of the lead species.
    Lead,
    /// Lorey height of the primary species.
    Primary,
}

/// EMP053 row: `1.3 + a * (h - 1.3)^b` over the height named by `source`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonPrimaryHeightCoefficients {
    pub source: HeightSource,
    pub coefficients: [f32; 2],
}

/// On-disk layout of the control file: one array of tables per coefficient family.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ControlFile {
    debug: DebugSettings,
    species_quad_mean_diameter: Vec<GenusRow>,
    component_size_limits: Vec<LimitsRow>,
    basal_area_utilization: Vec<ClassGenusBecRow>,
    quad_mean_diameter_utilization: Vec<ClassGenusBecRow>,
    whole_stem_volume: Vec<GroupRow>,
    whole_stem_utilization: Vec<ClassGroupRow>,
    close_utilization: Vec<ClassGroupRow>,
    net_decay: Vec<ClassGroupRow>,
    net_decay_waste: Vec<GenusRow>,
    breakage: Vec<GroupRow>,
    basal_area_yield: Vec<BecGenusRow>,
    quad_mean_diameter_yield: Vec<BecGenusRow>,
    upper_bounds: Vec<GroupRow>,
    lorey_height_primary: Vec<GenusRegionRow>,
    lorey_height_primary_initial: Vec<GenusRegionRow>,
    lorey_height_non_primary: Vec<NonPrimaryHeightRow>,
    decay_modifiers: Vec<ModifierRow>,
    waste_modifiers: Vec<ModifierRow>,
}

type ClassGenusBecKey = (UtilizationClass, String, String);

/// Read-only coefficient tables consumed by the estimators.
///
/// Built from TOML; every lookup fails with
/// [`YieldError::MissingCoefficients`] when its key is absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "ControlFile")]
pub struct ControlMap {
    pub debug: DebugSettings,
    species_quad_mean_diameter: Vec<(String, [f32; 3])>,
    component_size_limits: HashMap<(String, Region), ComponentSizeLimits>,
    basal_area_utilization: HashMap<ClassGenusBecKey, [f32; 2]>,
    quad_mean_diameter_utilization: HashMap<ClassGenusBecKey, [f32; 4]>,
    whole_stem_volume: HashMap<i32, [f32; 9]>,
    whole_stem_utilization: HashMap<(UtilizationClass, i32), [f32; 4]>,
    close_utilization: HashMap<(UtilizationClass, i32), [f32; 3]>,
    net_decay: HashMap<(UtilizationClass, i32), [f32; 3]>,
    net_decay_waste: HashMap<String, [f32; 6]>,
    breakage: HashMap<i32, [f32; 4]>,
    basal_area_yield: HashMap<(String, String), [f32; 7]>,
    quad_mean_diameter_yield: HashMap<(String, String), [f32; 5]>,
    upper_bounds: HashMap<i32, [f32; 2]>,
    lorey_height_primary: HashMap<(String, Region), [f32; 3]>,
    lorey_height_primary_initial: HashMap<(String, Region), [f32; 2]>,
    lorey_height_non_primary: HashMap<(String, String, Region), NonPrimaryHeightCoefficients>,
    decay_modifiers: HashMap<(String, Region), f32>,
    waste_modifiers: HashMap<(String, Region), f32>,
}

fn fixed<const N: usize>(values: Vec<f32>, table: &str) -> Result<[f32; N], YieldError> {
    let len = values.len();
    <[f32; N]>::try_from(values).map_err(|_| {
        YieldError::Validation(format!(
            "{table}: expected {N} coefficients, found {len}"
        ))
    })
}

fn insert_unique<K, V>(
    map: &mut HashMap<K, V>,
    key: K,
    value: V,
    table: &str,
) -> Result<(), YieldError>
where
    K: std::hash::Hash + Eq + fmt::Debug,
{
    if map.contains_key(&key) {
        return Err(YieldError::Validation(format!(
            "{table}: duplicate entry for {key:?}"
        )));
    }
    map.insert(key, value);
    Ok(())
}

fn missing(table: &str, key: impl fmt::Debug) -> YieldError {
    YieldError::MissingCoefficients(format!("{table}: no entry for {key:?}"))
}

impl TryFrom<ControlFile> for ControlMap {
    type Error = YieldError;

    fn try_from(file: ControlFile) -> Result<Self, Self::Error> {
        let mut map = ControlMap {
            debug: file.debug,
            ..ControlMap::default()
        };

        for row in file.species_quad_mean_diameter {
            if map.species_quad_mean_diameter.iter().any(|(g, _)| *g == row.genus) {
                return Err(YieldError::Validation(format!(
                    "species_quad_mean_diameter: duplicate entry for {:?}",
                    row.genus
                )));
            }
            let coe = fixed(row.coefficients, "species_quad_mean_diameter")?;
            map.species_quad_mean_diameter.push((row.genus, coe));
        }
        for row in file.component_size_limits {
            insert_unique(
                &mut map.component_size_limits,
                (row.genus, row.region),
                row.limits,
                "component_size_limits",
            )?;
        }
        for row in file.basal_area_utilization {
            let coe = fixed(row.coefficients, "basal_area_utilization")?;
            let key = (row.class, row.genus, row.bec);
            insert_unique(&mut map.basal_area_utilization, key, coe, "basal_area_utilization")?;
        }
        for row in file.quad_mean_diameter_utilization {
            let coe = fixed(row.coefficients, "quad_mean_diameter_utilization")?;
            let key = (row.class, row.genus, row.bec);
            insert_unique(
                &mut map.quad_mean_diameter_utilization,
                key,
                coe,
                "quad_mean_diameter_utilization",
            )?;
        }
        for row in file.whole_stem_volume {
            let coe = fixed(row.coefficients, "whole_stem_volume")?;
            insert_unique(&mut map.whole_stem_volume, row.group, coe, "whole_stem_volume")?;
        }
        for row in file.whole_stem_utilization {
            let coe = fixed(row.coefficients, "whole_stem_utilization")?;
            insert_unique(
                &mut map.whole_stem_utilization,
                (row.class, row.group),
                coe,
                "whole_stem_utilization",
            )?;
        }
        for row in file.close_utilization {
            let coe = fixed(row.coefficients, "close_utilization")?;
            insert_unique(
                &mut map.close_utilization,
                (row.class, row.group),
                coe,
                "close_utilization",
            )?;
        }
        for row in file.net_decay {
            let coe = fixed(row.coefficients, "net_decay")?;
            insert_unique(&mut map.net_decay, (row.class, row.group), coe, "net_decay")?;
        }
        for row in file.net_decay_waste {
            let coe = fixed(row.coefficients, "net_decay_waste")?;
            insert_unique(&mut map.net_decay_waste, row.genus, coe, "net_decay_waste")?;
        }
        for row in file.breakage {
            let coe = fixed(row.coefficients, "breakage")?;
            insert_unique(&mut map.breakage, row.group, coe, "breakage")?;
        }
        for row in file.basal_area_yield {
            let coe = fixed(row.coefficients, "basal_area_yield")?;
            let key = (row.bec, row.genus);
            insert_unique(&mut map.basal_area_yield, key, coe, "basal_area_yield")?;
        }
        for row in file.quad_mean_diameter_yield {
            let coe = fixed(row.coefficients, "quad_mean_diameter_yield")?;
            insert_unique(
                &mut map.quad_mean_diameter_yield,
                (row.bec, row.genus),
                coe,
                "quad_mean_diameter_yield",
            )?;
        }
        for row in file.upper_bounds {
            let coe = fixed(row.coefficients, "upper_bounds")?;
            insert_unique(&mut map.upper_bounds, row.group, coe, "upper_bounds")?;
        }
        for row in file.lorey_height_primary {
            let coe = fixed(row.coefficients, "lorey_height_primary")?;
            insert_unique(
                &mut map.lorey_height_primary,
                (row.genus, row.region),
                coe,
                "lorey_height_primary",
            )?;
        }
        for row in file.lorey_height_primary_initial {
            let coe = fixed(row.coefficients, "lorey_height_primary_initial")?;
            insert_unique(
                &mut map.lorey_height_primary_initial,
                (row.genus, row.region),
                coe,
                "lorey_height_primary_initial",
            )?;
        }
        for row in file.lorey_height_non_primary {
            let source = match row.equation {
                1 => HeightSource::Lead,
                2 => HeightSource::Primary,
                other => {
                    return Err(YieldError::Validation(format!(
                        "lorey_height_non_primary: equation must be 1 or 2, found {other}"
                    )));
                }
            };
            let coefficients = fixed(row.coefficients, "lorey_height_non_primary")?;
            insert_unique(
                &mut map.lorey_height_non_primary,
                (row.genus, row.primary, row.region),
                NonPrimaryHeightCoefficients { source, coefficients },
                "lorey_height_non_primary",
            )?;
        }
        for row in file.decay_modifiers {
            let key = (row.genus, row.region);
            insert_unique(&mut map.decay_modifiers, key, row.value, "decay_modifiers")?;
        }
        for row in file.waste_modifiers {
            let key = (row.genus, row.region);
            insert_unique(&mut map.waste_modifiers, key, row.value, "waste_modifiers")?;
        }

        Ok(map)
    }
}

impl ControlMap {
    /// Parse a control map from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, YieldError> {
        Ok(toml::from_str(content)?)
    }

    /// EMP060 coefficients in control-file genus order.
    pub fn species_quad_mean_diameter(&self) -> &[(String, [f32; 3])] {
        &self.species_quad_mean_diameter
    }

    /// EMP061
    pub fn component_size_limits(
        &self,
        genus: &str,
        region: Region,
    ) -> Result<ComponentSizeLimits, YieldError> {
        self.component_size_limits
            .get(&(genus.to_string(), region))
            .copied()
            .ok_or_else(|| missing("component_size_limits", (genus, region)))
    }

    pub fn basal_area_utilization(
        &self,
        uc: UtilizationClass,
        genus: &str,
        bec: &str,
    ) -> Result<&[f32; 2], YieldError> {
        self.basal_area_utilization
            .get(&(uc, genus.to_string(), bec.to_string()))
            .ok_or_else(|| missing("basal_area_utilization", (uc, genus, bec)))
    }

    pub fn quad_mean_diameter_utilization(
        &self,
        uc: UtilizationClass,
        genus: &str,
        bec: &str,
    ) -> Result<&[f32; 4], YieldError> {
        self.quad_mean_diameter_utilization
            .get(&(uc, genus.to_string(), bec.to_string()))
            .ok_or_else(|| missing("quad_mean_diameter_utilization", (uc, genus, bec)))
    }

    pub fn whole_stem_volume(&self, volume_group: i32) -> Result<&[f32; 9], YieldError> {
        self.whole_stem_volume
            .get(&volume_group)
            .ok_or_else(|| missing("whole_stem_volume", volume_group))
    }

    pub fn whole_stem_utilization(
        &self,
        uc: UtilizationClass,
        volume_group: i32,
    ) -> Result<&[f32; 4], YieldError> {
        self.whole_stem_utilization
            .get(&(uc, volume_group))
            .ok_or_else(|| missing("whole_stem_utilization", (uc, volume_group)))
    }

    pub fn close_utilization(
        &self,
        uc: UtilizationClass,
        volume_group: i32,
    ) -> Result<&[f32; 3], YieldError> {
        self.close_utilization
            .get(&(uc, volume_group))
            .ok_or_else(|| missing("close_utilization", (uc, volume_group)))
    }

    pub fn net_decay(
        &self,
        uc: UtilizationClass,
        decay_group: i32,
    ) -> Result<&[f32; 3], YieldError> {
        self.net_decay
            .get(&(uc, decay_group))
            .ok_or_else(|| missing("net_decay", (uc, decay_group)))
    }

    pub fn net_decay_waste(&self, genus: &str) -> Result<&[f32; 6], YieldError> {
        self.net_decay_waste
            .get(genus)
            .ok_or_else(|| missing("net_decay_waste", genus))
    }

    pub fn breakage(&self, breakage_group: i32) -> Result<&[f32; 4], YieldError> {
        self.breakage
            .get(&breakage_group)
            .ok_or_else(|| missing("breakage", breakage_group))
    }

    pub fn basal_area_yield(&self, decay_bec: &str, genus: &str) -> Result<&[f32; 7], YieldError> {
        self.basal_area_yield
            .get(&(decay_bec.to_string(), genus.to_string()))
            .ok_or_else(|| missing("basal_area_yield", (decay_bec, genus)))
    }

    pub fn quad_mean_diameter_yield(
        &self,
        decay_bec: &str,
        genus: &str,
    ) -> Result<&[f32; 5], YieldError> {
        self.quad_mean_diameter_yield
            .get(&(decay_bec.to_string(), genus.to_string()))
            .ok_or_else(|| missing("quad_mean_diameter_yield", (decay_bec, genus)))
    }

    /// `(maximum basal area, maximum quadratic mean diameter)` for a base-area group.
    pub fn upper_bounds(&self, basal_area_group: i32) -> Result<(f32, f32), YieldError> {
        self.upper_bounds
            .get(&basal_area_group)
            .map(|c| (c[0], c[1]))
            .ok_or_else(|| missing("upper_bounds", basal_area_group))
    }

    /// EMP050
    pub fn lorey_height_primary(
        &self,
        genus: &str,
        region: Region,
    ) -> Result<&[f32; 3], YieldError> {
        self.lorey_height_primary
            .get(&(genus.to_string(), region))
            .ok_or_else(|| missing("lorey_height_primary", (genus, region)))
    }

    /// EMP051
    pub fn lorey_height_primary_initial(
        &self,
        genus: &str,
        region: Region,
    ) -> Result<&[f32; 2], YieldError> {
        self.lorey_height_primary_initial
            .get(&(genus.to_string(), region))
            .ok_or_else(|| missing("lorey_height_primary_initial", (genus, region)))
    }

    /// EMP053, keyed by the species and the layer's primary species.
    pub fn lorey_height_non_primary(
        &self,
        genus: &str,
        primary: &str,
        region: Region,
    ) -> Result<NonPrimaryHeightCoefficients, YieldError> {
        self.lorey_height_non_primary
            .get(&(genus.to_string(), primary.to_string(), region))
            .copied()
            .ok_or_else(|| missing("lorey_height_non_primary", (genus, primary, region)))
    }

    pub fn decay_modifier(&self, genus: &str, region: Region) -> Result<f32, YieldError> {
        self.decay_modifiers
            .get(&(genus.to_string(), region))
            .copied()
            .ok_or_else(|| missing("decay_modifiers", (genus, region)))
    }

    pub fn waste_modifier(&self, genus: &str, region: Region) -> Result<f32, YieldError> {
        self.waste_modifiers
            .get(&(genus.to_string(), region))
            .copied()
            .ok_or_else(|| missing("waste_modifiers", (genus, region)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_CONTROL: &str = r#"
[debug]
modes = [2, 3]

[[species_quad_mean_diameter]]
genus = "F"
coefficients = [0.1, 0.2, 0.3]

[[species_quad_mean_diameter]]
genus = "C"
coefficients = [0.4, 0.5, 0.6]

[[component_size_limits]]
genus = "F"
region = "coast"
lorey_height_maximum = 49.4
quad_mean_diameter_maximum = 153.3
min_quad_mean_diameter_lorey_height_ratio = 0.726
max_quad_mean_diameter_lorey_height_ratio = 3.647

[[basal_area_utilization]]
class = "U75"
genus = "F"
bec = "CWH"
coefficients = [-1.5, 0.8]

[[upper_bounds]]
group = 7
coefficients = [76.8, 45.2]

[[decay_modifiers]]
genus = "F"
region = "interior"
value = 0.25
"#;

    #[test]
    fn test_debug_settings_one_based() {
        let d = DebugSettings { modes: vec![2, 3] };
        assert_eq!(d.get(1), 2);
        assert_eq!(d.get(2), 3);
        assert_eq!(d.get(9), 0);
        assert_eq!(d.get(0), 0);
    }

    #[test]
    fn test_region_parse() {
        assert_eq!("Coast".parse::<Region>().unwrap(), Region::Coast);
        assert_eq!("i".parse::<Region>().unwrap(), Region::Interior);
        assert!("north".parse::<Region>().is_err());
    }

    #[test]
    fn test_parse_small_control() {
        let map = ControlMap::from_toml_str(SMALL_CONTROL).unwrap();
        assert_eq!(map.debug.get(DebugSettings::NO_BRACKETING_POLICY), 2);

        let genera: Vec<&str> = map
            .species_quad_mean_diameter()
            .iter()
            .map(|(g, _)| g.as_str())
            .collect();
        assert_eq!(genera, vec!["F", "C"]);

        let limits = map.component_size_limits("F", Region::Coast).unwrap();
        assert!((limits.quad_mean_diameter_maximum - 153.3).abs() < 1e-4);

        let coe = map
            .basal_area_utilization(UtilizationClass::U75, "F", "CWH")
            .unwrap();
        assert_eq!(coe, &[-1.5, 0.8]);

        assert_eq!(map.upper_bounds(7).unwrap(), (76.8, 45.2));
        assert_eq!(map.decay_modifier("F", Region::Interior).unwrap(), 0.25);
    }

    #[test]
    fn test_missing_key_is_missing_coefficients() {
        let map = ControlMap::from_toml_str(SMALL_CONTROL).unwrap();
        let err = map.component_size_limits("H", Region::Coast).unwrap_err();
        assert!(matches!(err, YieldError::MissingCoefficients(_)));
        let err = map.breakage(3).unwrap_err();
        assert!(matches!(err, YieldError::MissingCoefficients(_)));
    }

    #[test]
    fn test_wrong_coefficient_count_rejected() {
        let bad = r#"
[[breakage]]
group = 1
coefficients = [1.0, 2.0]
"#;
        let err = ControlMap::from_toml_str(bad).unwrap_err();
        assert!(err.to_string().contains("expected 4 coefficients"));
    }

    #[test]
    fn test_duplicate_rows_rejected() {
        let bad = r#"
[[upper_bounds]]
group = 1
coefficients = [1.0, 2.0]

[[upper_bounds]]
group = 1
coefficients = [3.0, 4.0]
"#;
        let err = ControlMap::from_toml_str(bad).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_lorey_height_tables() {
        let control = r#"
[[lorey_height_primary]]
genus = "F"
region = "coast"
coefficients = [0.95, 0.12, -0.0012]

[[lorey_height_non_primary]]
genus = "H"
primary = "F"
region = "coast"
equation = 2
coefficients = [0.9, 0.98]
"#;
        let map = ControlMap::from_toml_str(control).unwrap();
        assert_eq!(map.lorey_height_primary("F", Region::Coast).unwrap(), &[0.95, 0.12, -0.0012]);
        let coe = map.lorey_height_non_primary("H", "F", Region::Coast).unwrap();
        assert_eq!(coe.source, HeightSource::Primary);
        assert_eq!(coe.coefficients, [0.9, 0.98]);
        let err = map.lorey_height_non_primary("F", "H", Region::Coast).unwrap_err();
        assert!(matches!(err, YieldError::MissingCoefficients(_)));
        let err = map.lorey_height_primary_initial("F", Region::Coast).unwrap_err();
        assert!(matches!(err, YieldError::MissingCoefficients(_)));
    }

    #[test]
    fn test_unknown_height_equation_rejected() {
        let bad = r#"
[[lorey_height_non_primary]]
genus = "H"
primary = "F"
region = "coast"
equation = 3
coefficients = [0.9, 0.98]
"#;
        let err = ControlMap::from_toml_str(bad).unwrap_err();
        assert!(err.to_string().contains("equation must be 1 or 2"));
    }

    #[test]
    fn test_unknown_table_rejected() {
        assert!(ControlMap::from_toml_str("[[mystery]]\nx = 1\n").is_err());
    }

    #[test]
    fn test_empty_control_is_valid() {
        let map = ControlMap::from_toml_str("").unwrap();
        assert!(map.species_quad_mean_diameter().is_empty());
        assert_eq!(map.debug.get(1), 0);
    }
}
