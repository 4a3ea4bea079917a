use std::path::Path;

use serde::Serialize;

use crate::error::YieldError;
use crate::estimation::{StandUtilization, UtilizationSet};
use crate::models::UtilizationVector;

/// One component of one species (or the layer totals) across every class.
#[derive(Debug, Serialize)]
struct UtilizationRow<'a> {
    stand_id: &'a str,
    genus: &'a str,
    component: &'static str,
    small: f32,
    all: f32,
    u75: f32,
    u125: f32,
    u175: f32,
    o225: f32,
}

fn components(set: &UtilizationSet) -> [(&'static str, &UtilizationVector); 8] {
    [
        ("base_area", &set.base_area),
        ("trees_per_hectare", &set.trees_per_hectare),
        ("quad_mean_diameter", &set.quad_mean_diameter),
        ("whole_stem_volume", &set.whole_stem_volume),
        ("close_utilization_volume", &set.close_utilization_volume),
        ("net_decay_volume", &set.net_decay_volume),
        ("net_decay_waste_volume", &set.net_decay_waste_volume),
        ("net_decay_waste_breakage_volume", &set.net_decay_waste_breakage_volume),
    ]
}

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    stand_id: &str,
    genus: &str,
    set: &UtilizationSet,
) -> Result<(), YieldError> {
    for (component, v) in components(set) {
        wtr.serialize(UtilizationRow {
            stand_id,
            genus,
            component,
            small: v.small,
            all: v.all,
            u75: v.u75,
            u125: v.u125,
            u175: v.u175,
            o225: v.o225,
        })?;
    }
    Ok(())
}

/// Write every species' components, then the layer totals under genus `ALL`.
pub fn write_utilization_csv(
    report: &StandUtilization,
    path: impl AsRef<Path>,
) -> Result<(), YieldError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for species in &report.species {
        write_rows(&mut wtr, &report.stand_id, &species.genus, &species.utilization)?;
    }
    write_rows(&mut wtr, &report.stand_id, "ALL", &report.totals)?;
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::SpeciesUtilization;

    fn make_report() -> StandUtilization {
        let mut set = UtilizationSet::default();
        set.base_area = UtilizationVector::from_bands([1.0, 2.0, 3.0, 4.0]);
        StandUtilization {
            stand_id: "S1".to_string(),
            diameter_adjustment: None,
            species: vec![SpeciesUtilization {
                genus: "F".to_string(),
                fraction: 1.0,
                lorey_height: 20.0,
                utilization: set,
            }],
            totals: set,
            lorey_height: 20.0,
            yield_estimate: None,
        }
    }

    #[test]
    fn test_write_utilization_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_utilization_csv(&make_report(), &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "stand_id");
        assert_eq!(&headers[8], "o225");

        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 16);
        assert_eq!(&records[0][1], "F");
        assert_eq!(&records[0][2], "base_area");
        assert_eq!(records[0][4].parse::<f32>().unwrap(), 10.0);
        assert_eq!(&records[8][1], "ALL");
    }
}
