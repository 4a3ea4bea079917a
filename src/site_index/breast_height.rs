//! Years from seed to breast height, per site curve.

use crate::error::YieldError;
use crate::math::{llog, ppow};

use super::age::half_year;
use super::SiteIndexEquation;

/// Bruce (1981) seed-to-breast-height years, borrowed by several coastal curves.
fn bruce(site_index: f64) -> f64 {
    (13.25 - site_index / 6.096).max(1.0)
}

/// Wiley (1978) root-collar years.
fn wiley(site_index: f64) -> f64 {
    (9.43 - site_index / 7.088).max(1.0)
}

/// Goudie spruce: 2 extra years for plantations, 6 for natural stands.
fn goudie_spruce(extra: f64, site_index: f64) -> f64 {
    extra + 2.1578 + 110.76 / site_index
}

fn goudie_pine(site_index: f64) -> f64 {
    2.0 + 3.6 + 42.64 / site_index
}

/// Nigh and Love (2000) white spruce, falling back to Goudie below 14.2 m.
fn nigh_love_spruce(site_index: f64) -> f64 {
    if site_index < 14.2 {
        goudie_spruce(2.0, site_index)
    } else {
        35.87 * ppow(site_index - 9.726, -0.5409)
    }
}

fn nigh_pine(site_index: f64) -> Result<f64, YieldError> {
    if site_index < 9.5 {
        return Err(YieldError::NoAnswer(format!(
            "Site index out of range, site index < 9.5: {site_index}"
        )));
    }
    Ok(21.6623 * ppow(site_index - 9.05671, -0.550762))
}

fn kurucz_balsam(site_index: f64) -> f64 {
    (18.47373 - 0.4086 * site_index).max(5.0)
}

fn thrower_subalpine(site_index: f64) -> f64 {
    (42.25 - 10.66 * llog(site_index)).max(5.0)
}

fn thrower_interior_fir(site_index: f64) -> f64 {
    4.0 + 99.0 / site_index
}

fn monserud(site_index: f64) -> f64 {
    (16.0 - site_index / 3.0).max(8.0)
}

fn goudie_aspen(site_index: f64) -> f64 {
    1.331 + 38.56 / site_index
}

fn goudie_sitka(site_index: f64) -> f64 {
    (11.7 - site_index / 5.4054).max(1.0)
}

fn dempster_black_spruce(site_index: f64) -> f64 {
    7.0 + 4.0427 + 61.08 / site_index
}

fn harrington_alder(site_index: f64) -> f64 {
    let si20 = ppow(site_index, 1.5) / 8.0;
    if si20 >= 15.0 {
        1.0
    } else {
        2.0
    }
}

fn milner_larch(site_index: f64) -> f64 {
    3.36 + 87.18 / site_index
}

/// Years from seed to breast height for `equation` at `site_index` (metres, base age 50).
///
/// The result is unrounded; see [`years_to_breast_height_half`] for the
/// half-year form the site curves expect.
pub fn years_to_breast_height(
    equation: SiteIndexEquation,
    site_index: f64,
) -> Result<f64, YieldError> {
    use SiteIndexEquation::*;

    if site_index < 1.3 {
        return Err(YieldError::LessThan13(format!(
            "Site index < 1.3m: {site_index}"
        )));
    }

    let y2bh = match equation {
        FdcBruce | FdcBruceac | FdcCochran | FdcKing | HwcFarr | SsFarr | CwcKurucz
        | CwcKuruczac | CwcNigh => bruce(site_index),
        FdcNighta => {
            if site_index <= 9.051 {
                return Err(YieldError::NoAnswer(format!(
                    "Site index out of range, site index <= 9.051: {site_index}"
                )));
            }
            24.44 * (site_index - 9.051).powf(-0.394)
        }
        FdcBrucenigh => {
            if site_index <= 15.0 {
                bruce(site_index)
            } else {
                36.5818 * (site_index - 6.6661).powf(-0.5526)
            }
        }
        HwcBarker => (-5.2 + 410.00 / site_index).max(1.0),
        HmMeans | HmMeansac | HwcWiley | HwcWileyac | HwcWileyBc | HwcWileyMb => {
            wiley(site_index)
        }
        HwiNigh => (446.6 * ppow(site_index, -1.432)).max(1.0),
        PjHuang | PjHuangac => 5.0 + 1.872138 + 49.555513 / site_index,
        PliHuangPla => 3.5 + 1.740006 + 58.83891 / site_index,
        PliHuangNat => 5.0 + 1.740006 + 58.83891 / site_index,
        PliNighta2004 | PliNighta98 => nigh_pine(site_index)?,
        SwGoudnigh => {
            if site_index < 19.5 {
                goudie_spruce(2.0, site_index).max(10.45)
            } else {
                35.87 * ppow(site_index - 9.726, -0.5409)
            }
        }
        SwNighta2004 | SwHuGarcia | SwNighta | SeNighta => nigh_love_spruce(site_index),
        SeNigh | SeChen | SeChenac | SwKerNat | SwGoudieNat | SwGoudieNatac => {
            goudie_spruce(6.0, site_index)
        }
        PliThrownigh => {
            if site_index < 18.5 {
                2.0 + 0.55 + 69.4 / site_index
            } else {
                21.6623 * ppow(site_index - 9.05671, -0.550762)
            }
        }
        PliThrower => 2.0 + 0.55 + 69.4 / site_index,
        PliMilner | PliCieszewski | PliGoudieDry | PliGoudieWet | PliDempster | PlChen
        | PyHann | PyHannac | PyMilner => goudie_pine(site_index),
        SwHuangPla => 4.5 + 4.3473 + 59.908359 / site_index,
        SwHuangNat => 8.0 + 4.3473 + 59.908359 / site_index,
        SwThrower => 4.0 + 0.38 + 117.34 / site_index,
        SwKerPla | SwGoudiePla | SwGoudiePlaac | SwCieszewski | PwCurtis | PwCurtisac => {
            goudie_spruce(2.0, site_index)
        }
        SwDempster => 2.1578 + 110.76 / site_index,
        SbHuang => 8.0 + 2.288325 + 80.774008 / site_index,
        SbKer | SbDempster | SbNigh | SbCieszewski => dempster_black_spruce(site_index),
        SsGoudie | SsNigh => goudie_sitka(site_index),
        SsBarker => (-5.13 + 450.00 / site_index).max(1.0),
        CwiNigh => (18.18 - 0.5526 * site_index).max(1.0),
        CwcBarker => (-3.46 + 285.00 / site_index).max(1.0),
        BaDilucca | BpCurtis | BpCurtisac | BaNigh | BaKurucz86 | BaKurucz82
        | BaKurucz82ac => kurucz_balsam(site_index),
        BbKer => (18.47373 - site_index / 2.447).max(5.0),
        BlChen | BlChenac | BlKurucz82 => thrower_subalpine(site_index),
        FdiHuangPla => 6.5 + 5.276585 + 38.968242 / site_index,
        FdiHuangNat => 8.0 + 5.276585 + 38.968242 / site_index,
        FdiMilner | FdiThrower | FdiThrowerac | FdiVdpMont | FdiVdpWash => {
            thrower_interior_fir(site_index)
        }
        FdiMonsDf | FdiMonsGf | FdiMonsWrc | FdiMonsWh | FdiMonsSaf => monserud(site_index),
        AtNigh | AtChen | AtGoudie | AtCieszewski | EpNigh => goudie_aspen(site_index),
        AtHuang => 1.0 + 2.184066 + 50.788746 / site_index,
        AcbHuang | AcbHuangac => (1.0 - 1.196472 + 104.124205 / site_index).max(1.0),
        ActThrower | ActThrowerac => 2.0,
        DrHarring | DrChen => harrington_alder(site_index),
        DrNigh => {
            let si25 = 0.3094 + 0.7616 * site_index;
            if si25 <= 25.0 {
                5.494 - 0.1789 * si25
            } else {
                1.0
            }
        }
        PyNigh => 36.35 * 0.9318_f64.powf(site_index),
        LwMilner | LwNigh => milner_larch(site_index),
        BaNighgi | BlThrowergi | CwiNighgi | FdcNighgi | FdiNighgi | HwcNighgi | HwcNighgi99
        | HwiNighgi | LwNighgi | PliNighgi97 | PyNighgi | SeNighgi | SsNighgi | SsNighgi99
        | SwNighgi | SwNighgi99 | SwNighgi2004 => {
            return Err(YieldError::GrowthInterceptTotal(format!(
                "Cannot use with growth intercept curve {equation}"
            )))
        }
    };

    Ok(y2bh)
}

/// [`years_to_breast_height`] snapped to `0.5, 1.5, 2.5, ...`.
pub fn years_to_breast_height_half(
    equation: SiteIndexEquation,
    site_index: f64,
) -> Result<f64, YieldError> {
    Ok(half_year(years_to_breast_height(equation, site_index)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bruce_years() {
        let y = years_to_breast_height(SiteIndexEquation::FdcBruce, 30.0).unwrap();
        assert!((y - (13.25 - 30.0 / 6.096)).abs() < 1e-12);
        assert_eq!(
            years_to_breast_height_half(SiteIndexEquation::FdcBruce, 30.0).unwrap(),
            8.5
        );
    }

    #[test]
    fn test_bruce_floor_of_one() {
        let y = years_to_breast_height(SiteIndexEquation::FdcBruce, 80.0).unwrap();
        assert_eq!(y, 1.0);
    }

    #[test]
    fn test_site_index_below_breast_height() {
        let err = years_to_breast_height(SiteIndexEquation::SwGoudieNat, 1.0).unwrap_err();
        assert!(matches!(err, YieldError::LessThan13(_)));
    }

    #[test]
    fn test_growth_intercept_rejected() {
        let err = years_to_breast_height(SiteIndexEquation::SwNighgi, 20.0).unwrap_err();
        assert!(matches!(err, YieldError::GrowthInterceptTotal(_)));
    }

    #[test]
    fn test_nigh_pine_lower_limit() {
        let err = years_to_breast_height(SiteIndexEquation::PliNighta98, 9.0).unwrap_err();
        assert!(matches!(err, YieldError::NoAnswer(_)));
        let ok = years_to_breast_height(SiteIndexEquation::PliNighta98, 20.0).unwrap();
        assert!((ok - 21.6623 * (20.0_f64 - 9.05671).powf(-0.550762)).abs() < 1e-12);
    }

    #[test]
    fn test_goudnigh_transition_floor() {
        let y = years_to_breast_height(SiteIndexEquation::SwGoudnigh, 19.0).unwrap();
        assert!(y >= 10.45);
    }

    #[test]
    fn test_dr_nigh_branches() {
        let low = years_to_breast_height(SiteIndexEquation::DrNigh, 20.0).unwrap();
        let si25 = 0.3094 + 0.7616 * 20.0;
        assert!((low - (5.494 - 0.1789 * si25)).abs() < 1e-12);
        let high = years_to_breast_height(SiteIndexEquation::DrNigh, 40.0).unwrap();
        assert_eq!(high, 1.0);
    }

    #[test]
    fn test_every_closed_form_curve_has_years() {
        for eq in SiteIndexEquation::ALL {
            let result = years_to_breast_height(eq, 25.0);
            if eq.is_growth_intercept() {
                assert!(result.is_err(), "{eq} should be rejected");
            } else {
                let y = result.unwrap();
                assert!(y > 0.0, "{eq} produced {y}");
            }
        }
    }
}
