use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::YieldError;

/// Diameter-at-breast-height class that a stand aggregate is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtilizationClass {
    /// Trees under 7.5 cm.
    Small,
    /// Every tree of 7.5 cm and over.
    All,
    U75,
    U125,
    U175,
    O225,
}

impl UtilizationClass {
    /// The four size bands making up [`UtilizationClass::All`], smallest first.
    pub const BANDS: [UtilizationClass; 4] = [
        UtilizationClass::U75,
        UtilizationClass::U125,
        UtilizationClass::U175,
        UtilizationClass::O225,
    ];

    /// Numeric index: -1 for small, 0 for all, 1..=4 for the bands.
    pub fn index(self) -> i32 {
        match self {
            UtilizationClass::Small => -1,
            UtilizationClass::All => 0,
            UtilizationClass::U75 => 1,
            UtilizationClass::U125 => 2,
            UtilizationClass::U175 => 3,
            UtilizationClass::O225 => 4,
        }
    }

    /// Lower diameter limit in centimetres.
    pub fn low_bound(self) -> f32 {
        match self {
            UtilizationClass::Small => 0.0,
            UtilizationClass::All | UtilizationClass::U75 => 7.5,
            UtilizationClass::U125 => 12.5,
            UtilizationClass::U175 => 17.5,
            UtilizationClass::O225 => 22.5,
        }
    }

    /// Upper diameter limit in centimetres (open classes use 10000).
    pub fn high_bound(self) -> f32 {
        match self {
            UtilizationClass::Small => 7.5,
            UtilizationClass::U75 => 12.5,
            UtilizationClass::U125 => 17.5,
            UtilizationClass::U175 => 22.5,
            UtilizationClass::All | UtilizationClass::O225 => 10000.0,
        }
    }

    /// The class before this one in index order.
    pub fn previous(self) -> Option<UtilizationClass> {
        match self {
            UtilizationClass::Small => None,
            UtilizationClass::All => Some(UtilizationClass::Small),
            UtilizationClass::U75 => Some(UtilizationClass::All),
            UtilizationClass::U125 => Some(UtilizationClass::U75),
            UtilizationClass::U175 => Some(UtilizationClass::U125),
            UtilizationClass::O225 => Some(UtilizationClass::U175),
        }
    }

    pub fn is_band(self) -> bool {
        self.index() > 0
    }

    /// Short label used in tables, e.g. `7.5-12.5`.
    pub fn label(self) -> &'static str {
        match self {
            UtilizationClass::Small => "<7.5",
            UtilizationClass::All => ">=7.5",
            UtilizationClass::U75 => "7.5-12.5",
            UtilizationClass::U125 => "12.5-17.5",
            UtilizationClass::U175 => "17.5-22.5",
            UtilizationClass::O225 => ">22.5",
        }
    }
}

impl fmt::Display for UtilizationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UtilizationClass::Small => "SMALL",
            UtilizationClass::All => "ALL",
            UtilizationClass::U75 => "U75",
            UtilizationClass::U125 => "U125",
            UtilizationClass::U175 => "U175",
            UtilizationClass::O225 => "O225",
        };
        write!(f, "{name}")
    }
}

impl FromStr for UtilizationClass {
    type Err = YieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SMALL" | "-1" => Ok(UtilizationClass::Small),
            "ALL" | "0" => Ok(UtilizationClass::All),
            "U75" | "1" => Ok(UtilizationClass::U75),
            "U125" | "2" => Ok(UtilizationClass::U125),
            "U175" | "3" => Ok(UtilizationClass::U175),
            "O225" | "4" => Ok(UtilizationClass::O225),
            _ => Err(YieldError::Validation(format!(
                "Unknown utilization class '{s}'. Use: SMALL, ALL, U75, U125, U175, O225"
            ))),
        }
    }
}

/// One value per utilization class.
///
/// The bands are expected to sum to `all` only after an estimator stores or
/// normalises the total; intermediate states may not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationVector {
    pub small: f32,
    pub all: f32,
    pub u75: f32,
    pub u125: f32,
    pub u175: f32,
    pub o225: f32,
}

impl UtilizationVector {
    /// A vector holding only the `all` value.
    pub fn with_all(all: f32) -> Self {
        Self {
            all,
            ..Self::default()
        }
    }

    /// Build from the four bands, setting `all` to their sum.
    pub fn from_bands(bands: [f32; 4]) -> Self {
        let mut v = Self {
            u75: bands[0],
            u125: bands[1],
            u175: bands[2],
            o225: bands[3],
            ..Self::default()
        };
        v.set_all_to_sum();
        v
    }

    pub fn bands(&self) -> [f32; 4] {
        [self.u75, self.u125, self.u175, self.o225]
    }

    pub fn sum_of_bands(&self) -> f32 {
        self.bands().iter().sum()
    }

    /// Overwrite `all` with the sum of the bands and return it.
    pub fn set_all_to_sum(&mut self) -> f32 {
        self.all = self.sum_of_bands();
        self.all
    }

    /// Multiply each band by `factor`, leaving `small` and `all` alone.
    pub fn scale_bands(&mut self, factor: f32) {
        for uc in UtilizationClass::BANDS {
            self[uc] *= factor;
        }
    }

    /// `(class, value)` pairs in index order, small first.
    pub fn iter(&self) -> impl Iterator<Item = (UtilizationClass, f32)> + '_ {
        [UtilizationClass::Small, UtilizationClass::All]
            .into_iter()
            .chain(UtilizationClass::BANDS)
            .map(move |uc| (uc, self[uc]))
    }
}

impl Index<UtilizationClass> for UtilizationVector {
    type Output = f32;

    fn index(&self, uc: UtilizationClass) -> &f32 {
        match uc {
            UtilizationClass::Small => &self.small,
            UtilizationClass::All => &self.all,
            UtilizationClass::U75 => &self.u75,
            UtilizationClass::U125 => &self.u125,
            UtilizationClass::U175 => &self.u175,
            UtilizationClass::O225 => &self.o225,
        }
    }
}

impl IndexMut<UtilizationClass> for UtilizationVector {
    fn index_mut(&mut self, uc: UtilizationClass) -> &mut f32 {
        match uc {
            UtilizationClass::Small => &mut self.small,
            UtilizationClass::All => &mut self.all,
            UtilizationClass::U75 => &mut self.u75,
            UtilizationClass::U125 => &mut self.u125,
            UtilizationClass::U175 => &mut self.u175,
            UtilizationClass::O225 => &mut self.o225,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_indices() {
        let idx: Vec<i32> = UtilizationClass::BANDS.iter().map(|uc| uc.index()).collect();
        assert_eq!(idx, vec![1, 2, 3, 4]);
        assert!(!UtilizationClass::All.is_band());
        assert!(UtilizationClass::O225.is_band());
    }

    #[test]
    fn test_previous_chain() {
        assert_eq!(UtilizationClass::U75.previous(), Some(UtilizationClass::All));
        assert_eq!(UtilizationClass::O225.previous(), Some(UtilizationClass::U175));
        assert_eq!(UtilizationClass::Small.previous(), None);
    }

    #[test]
    fn test_low_bounds() {
        assert_eq!(UtilizationClass::U125.low_bound(), 12.5);
        assert_eq!(UtilizationClass::O225.low_bound(), 22.5);
        assert_eq!(UtilizationClass::All.low_bound(), 7.5);
    }

    #[test]
    fn test_parse_and_display() {
        for uc in UtilizationClass::BANDS {
            assert_eq!(uc.to_string().parse::<UtilizationClass>().unwrap(), uc);
        }
        assert_eq!("2".parse::<UtilizationClass>().unwrap(), UtilizationClass::U125);
        assert!("U999".parse::<UtilizationClass>().is_err());
    }

    #[test]
    fn test_from_bands_sets_total() {
        let v = UtilizationVector::from_bands([1.0, 2.0, 3.0, 4.0]);
        assert!((v.all - 10.0).abs() < 1e-6);
        assert_eq!(v[UtilizationClass::U175], 3.0);
    }

    #[test]
    fn test_scale_bands_leaves_total() {
        let mut v = UtilizationVector::from_bands([1.0, 1.0, 1.0, 1.0]);
        v.small = 0.5;
        v.scale_bands(2.0);
        assert_eq!(v.all, 4.0);
        assert_eq!(v.small, 0.5);
        assert!((v.sum_of_bands() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_index_mut() {
        let mut v = UtilizationVector::with_all(5.0);
        v[UtilizationClass::O225] = 2.5;
        assert_eq!(v.o225, 2.5);
        assert_eq!(v.iter().count(), 6);
    }

    #[test]
    fn test_class_serde_names() {
        let json = serde_json::to_string(&UtilizationClass::O225).unwrap();
        assert_eq!(json, "\"O225\"");
        let back: UtilizationClass = serde_json::from_str("\"U125\"").unwrap();
        assert_eq!(back, UtilizationClass::U125);
    }
}
