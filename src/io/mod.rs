mod csv_io;
mod json_io;

use std::path::Path;

use crate::error::YieldError;
use crate::estimation::StandUtilization;
use crate::models::{ControlMap, Stand};

pub use csv_io::write_utilization_csv;
pub use json_io::{read_stand, read_stand_from_str, write_json};

/// Read the coefficient tables from a TOML control file.
pub fn read_control(path: impl AsRef<Path>) -> Result<ControlMap, YieldError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    ControlMap::from_toml_str(&content)
}

/// Trait for reading a stand from a file.
pub trait StandReader {
    fn read(&self, path: &Path) -> Result<Stand, YieldError>;
}

/// Trait for writing estimation results to a file.
pub trait ReportWriter {
    fn write(&self, report: &StandUtilization, path: &Path) -> Result<(), YieldError>;
}

/// CSV report writer: one row per component and genus.
pub struct CsvFormat;

impl ReportWriter for CsvFormat {
    fn write(&self, report: &StandUtilization, path: &Path) -> Result<(), YieldError> {
        write_utilization_csv(report, path)
    }
}

/// JSON format reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl StandReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<Stand, YieldError> {
        read_stand(path)
    }
}

impl ReportWriter for JsonFormat {
    fn write(&self, report: &StandUtilization, path: &Path) -> Result<(), YieldError> {
        write_json(report, path, self.pretty)
    }
}

/// Pick a report writer from the file extension (`.csv` or `.json`).
pub fn writer_for_path(path: &Path) -> Result<Box<dyn ReportWriter>, YieldError> {
    match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
        Some("csv") => Ok(Box::new(CsvFormat)),
        Some("json") => Ok(Box::new(JsonFormat { pretty: true })),
        _ => Err(YieldError::Validation(format!(
            "Unsupported output format: {}. Use .csv or .json",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::compute_utilization_components;

    fn data_path(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
    }

    #[test]
    fn test_read_control_from_data_dir() {
        let control = read_control(data_path("control.toml")).unwrap();
        assert!(!control.species_quad_mean_diameter().is_empty());
    }

    #[test]
    fn test_json_trait_roundtrip() {
        let control = read_control(data_path("control.toml")).unwrap();
        let reader: &dyn StandReader = &JsonFormat::default();
        let stand = reader.read(&data_path("stand.json")).unwrap();
        let report = compute_utilization_components(&control, &stand).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let writer = writer_for_path(&path).unwrap();
        writer.write(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: StandUtilization = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.stand_id, report.stand_id);
        assert_eq!(loaded.species.len(), report.species.len());
    }

    #[test]
    fn test_writer_for_path() {
        assert!(writer_for_path(Path::new("out.csv")).is_ok());
        assert!(writer_for_path(Path::new("OUT.JSON")).is_ok());
        assert!(writer_for_path(Path::new("out.xlsx")).is_err());
        assert!(writer_for_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_json_format_default() {
        assert!(!JsonFormat::default().pretty);
    }
}
