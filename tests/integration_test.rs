use std::path::{Path, PathBuf};

use forest_yield_estimator::{
    error::YieldError,
    estimation::{compute_utilization_components, trees_per_hectare},
    io,
    models::{ControlMap, Stand, UtilizationClass},
    reconcile::reconcile_stand_diameters,
    site_index::{
        height_to_index, index_to_height, years_to_breast_height, AgeType, SiteIndexEquation,
    },
    Estimator,
};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn load_control() -> ControlMap {
    io::read_control(data_path("control.toml")).unwrap()
}

fn load_stand(name: &str) -> Stand {
    io::read_stand(data_path(name)).unwrap()
}

#[test]
fn test_full_pipeline_from_files() {
    let control = load_control();
    let stand = load_stand("stand.json");
    let report = Estimator::new(&control, &stand).utilization().unwrap();

    assert_eq!(report.stand_id, "CWH-1");
    assert_eq!(report.species.len(), 3);
    assert!(report.diameter_adjustment.is_some());

    let totals = &report.totals;
    assert!((totals.base_area.all - stand.base_area).abs() < 0.01);
    assert!((totals.base_area.sum_of_bands() - totals.base_area.all).abs() < 0.01);

    let fractions: f32 = report.species.iter().map(|s| s.fraction).sum();
    assert!((fractions - 1.0).abs() < 1e-4);

    for species in &report.species {
        let u = &species.utilization;
        for uc in UtilizationClass::BANDS {
            assert!(u.base_area[uc] >= 0.0, "{} {uc}", species.genus);
            assert!(u.close_utilization_volume[uc] <= u.whole_stem_volume[uc] + 1e-3);
            assert!(u.net_decay_volume[uc] <= u.close_utilization_volume[uc] + 1e-3);
            assert!(u.net_decay_waste_volume[uc] <= u.net_decay_volume[uc] + 1e-3);
            assert!(u.net_decay_waste_breakage_volume[uc] <= u.net_decay_waste_volume[uc] + 1e-3);
        }
    }

    let yield_estimate = report.yield_estimate.unwrap();
    assert_eq!(yield_estimate.dominant_height, 28.0);
}

#[test]
fn test_stand_with_site_curve_and_stated_diameters() {
    let control = load_control();
    let stand = load_stand("stand_site_curve.json");
    let report = compute_utilization_components(&control, &stand).unwrap();

    assert!(report.diameter_adjustment.is_none());
    let y = report.yield_estimate.unwrap();
    let expected = index_to_height(
        SiteIndexEquation::FdcBruce,
        60.0,
        AgeType::Total,
        30.0,
        years_to_breast_height(SiteIndexEquation::FdcBruce, 30.0).unwrap(),
        0.5,
    )
    .unwrap() as f32;
    assert!((y.dominant_height - expected).abs() < 1e-4);
}

#[test]
fn test_reconciled_density_matches_stand() {
    let control = load_control();
    let stand = load_stand("stand.json");
    let result = reconcile_stand_diameters(&control, &stand).unwrap();

    let target = trees_per_hectare(stand.base_area, stand.quad_mean_diameter());
    assert!((result.trees_per_hectare - target).abs() / target < 1e-3);
    for s in &result.species {
        assert!(s.quad_mean_diameter >= s.minimum - 1e-4);
        assert!(s.quad_mean_diameter <= s.maximum + 1e-4);
    }
}

#[test]
fn test_site_index_round_trip() {
    let eq = SiteIndexEquation::FdcBruce;
    let y2bh = years_to_breast_height(eq, 32.0).unwrap();
    let height = index_to_height(eq, 70.0, AgeType::Total, 32.0, y2bh, 0.5).unwrap();
    let site = height_to_index(eq, 70.0, AgeType::Total, height).unwrap();
    assert!((site - 32.0).abs() < 0.1, "site index {site}");
}

#[test]
fn test_every_equation_has_a_citation() {
    for eq in SiteIndexEquation::ALL {
        assert!(!eq.citation().is_empty(), "{eq}");
        assert_eq!(SiteIndexEquation::from_index(eq.index()).unwrap(), eq);
    }
}

#[test]
fn test_unknown_bec_reports_missing_coefficients() {
    let control = load_control();
    let mut stand = load_stand("stand_site_curve.json");
    stand.bec = "XYZ".to_string();
    let err = compute_utilization_components(&control, &stand).unwrap_err();
    assert!(matches!(err, YieldError::MissingCoefficients(_)), "{err}");
}

#[test]
fn test_report_written_as_csv_and_json() {
    let control = load_control();
    let stand = load_stand("stand.json");
    let report = compute_utilization_components(&control, &stand).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("report.csv");
    io::writer_for_path(&csv_path).unwrap().write(&report, &csv_path).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("stand_id,genus,component"));
    assert_eq!(csv.lines().count(), 1 + 8 * 4);

    let json_path = dir.path().join("report.json");
    io::writer_for_path(&json_path).unwrap().write(&report, &json_path).unwrap();
    let content = std::fs::read_to_string(&json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["stand_id"], "CWH-1");
}
