use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::YieldError;

use super::SiteIndexEquation;

/// Which origin an age is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeType {
    /// Years since germination.
    Total,
    /// Years since the stand reached breast height (1.3 m).
    Breast,
}

impl fmt::Display for AgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeType::Total => write!(f, "total"),
            AgeType::Breast => write!(f, "breast"),
        }
    }
}

impl FromStr for AgeType {
    type Err = YieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "total" | "t" => Ok(AgeType::Total),
            "breast" | "b" | "bh" | "breast-height" => Ok(AgeType::Breast),
            _ => Err(YieldError::AgeType(format!(
                "Unknown age type '{s}'. Use: total or breast"
            ))),
        }
    }
}

/// Snap years-to-breast-height onto the half-year grid (`trunc(y) + 0.5`).
pub fn half_year(years_to_breast_height: f64) -> f64 {
    years_to_breast_height.trunc() + 0.5
}

/// Curves whose breast-height origin sits half a year after `years_to_breast_height`.
fn has_half_year_offset(equation: SiteIndexEquation) -> bool {
    use SiteIndexEquation::*;
    matches!(
        equation,
        AcbHuangac
            | ActThrowerac
            | AtNigh
            | BaKurucz82ac
            | BaNigh
            | BlChenac
            | BpCurtisac
            | CwcKuruczac
            | CwiNigh
            | DrNigh
            | EpNigh
            | FdcBrucenigh
            | FdcBruceac
            | FdcNighta
            | FdiThrowerac
            | HmMeansac
            | HwcWileyac
            | HwiNigh
            | LwNigh
            | PjHuang
            | PjHuangac
            | PliNighta2004
            | PliNighta98
            | PliThrownigh
            | PliThrower
            | PwCurtisac
            | PyHannac
            | PyNigh
            | SbNigh
            | SeChenac
            | SeNighta
            | SwGoudieNatac
            | SwGoudiePlaac
            | SwGoudnigh
            | SwNighta2004
            | SwNighta
            | SsNigh
    )
}

/// Convert an age between total and breast-height origins for `equation`.
///
/// A total age below `years_to_breast_height` yields a negative breast-height
/// age, which the site curves treat as juvenile. A negative total age has no
/// answer.
pub fn age_to_age(
    equation: SiteIndexEquation,
    age: f64,
    from: AgeType,
    to: AgeType,
    years_to_breast_height: f64,
) -> Result<f64, YieldError> {
    let offset = if has_half_year_offset(equation) {
        years_to_breast_height - 0.5
    } else {
        years_to_breast_height
    };

    match (from, to) {
        (AgeType::Breast, AgeType::Total) => {
            let total = age + offset;
            if total < 0.0 {
                return Err(YieldError::NoAnswer(format!(
                    "Total age {total} is negative for {equation}"
                )));
            }
            Ok(total)
        }
        (AgeType::Total, AgeType::Breast) => Ok(age - offset),
        _ => Err(YieldError::AgeType(format!(
            "Cannot convert {from} age to {to} age"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_year() {
        assert_eq!(half_year(8.33), 8.5);
        assert_eq!(half_year(8.0), 8.5);
        assert_eq!(half_year(8.99), 8.5);
    }

    #[test]
    fn test_plain_conversion() {
        let bh = age_to_age(SiteIndexEquation::FdcBruce, 50.0, AgeType::Total, AgeType::Breast, 8.5)
            .unwrap();
        assert!((bh - 41.5).abs() < 1e-12);
        let total =
            age_to_age(SiteIndexEquation::FdcBruce, bh, AgeType::Breast, AgeType::Total, 8.5)
                .unwrap();
        assert!((total - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_half_year_offset_conversion() {
        let bh = age_to_age(SiteIndexEquation::SsNigh, 50.0, AgeType::Total, AgeType::Breast, 8.5)
            .unwrap();
        assert!((bh - 42.0).abs() < 1e-12);
        let total =
            age_to_age(SiteIndexEquation::SsNigh, 42.0, AgeType::Breast, AgeType::Total, 8.5)
                .unwrap();
        assert!((total - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_juvenile_age_is_negative() {
        let bh = age_to_age(SiteIndexEquation::FdcKing, 3.0, AgeType::Total, AgeType::Breast, 8.5)
            .unwrap();
        assert!(bh < 0.0);
    }

    #[test]
    fn test_breast_to_total_negative_is_no_answer() {
        let err =
            age_to_age(SiteIndexEquation::FdcBruce, -20.0, AgeType::Breast, AgeType::Total, 8.5)
                .unwrap_err();
        assert!(matches!(err, YieldError::NoAnswer(_)));
        let total =
            age_to_age(SiteIndexEquation::FdcBruce, -8.5, AgeType::Breast, AgeType::Total, 8.5)
                .unwrap();
        assert_eq!(total, 0.0);
    }

    #[test]
    fn test_same_type_is_error() {
        let err = age_to_age(SiteIndexEquation::FdcKing, 3.0, AgeType::Total, AgeType::Total, 8.5)
            .unwrap_err();
        assert!(matches!(err, YieldError::AgeType(_)));
    }

    #[test]
    fn test_age_type_parse() {
        assert_eq!("TOTAL".parse::<AgeType>().unwrap(), AgeType::Total);
        assert_eq!("bh".parse::<AgeType>().unwrap(), AgeType::Breast);
        assert!("stump".parse::<AgeType>().is_err());
    }
}
