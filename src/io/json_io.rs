use std::path::Path;

use serde::Serialize;

use crate::error::YieldError;
use crate::models::Stand;

/// Read a stand from a JSON file and validate it.
pub fn read_stand(path: impl AsRef<Path>) -> Result<Stand, YieldError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    read_stand_from_str(&content)
}

/// Parse and validate a stand from JSON text.
pub fn read_stand_from_str(content: &str) -> Result<Stand, YieldError> {
    let stand: Stand = serde_json::from_str(content)?;
    stand.validate()?;
    Ok(stand)
}

/// Write any serializable result to a JSON file.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), YieldError> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAND: &str = r#"{
        "id": "IDF-7",
        "bec": "IDF",
        "decay_bec": null,
        "region": "interior",
        "age_breast_height": 60.0,
        "dominant_height": 21.0,
        "base_area": 18.0,
        "trees_per_hectare": 420.0,
        "lorey_height": 17.0,
        "veteran_base_area": null,
        "basal_area_group": null,
        "site": null,
        "species": [
            {"genus": "PL", "fraction": 1.0, "lorey_height": 17.0, "quad_mean_diameter": null,
             "volume_group": 2, "decay_group": 2, "breakage_group": 2}
        ]
    }"#;

    #[test]
    fn test_read_stand_from_str() {
        let stand = read_stand_from_str(STAND).unwrap();
        assert_eq!(stand.id, "IDF-7");
        assert_eq!(stand.species.len(), 1);
        assert_eq!(stand.decay_bec(), "IDF");
        assert_eq!(stand.species[0].adjustments.net_decay.all, 0.0);
    }

    #[test]
    fn test_read_stand_rejects_invalid() {
        let bad = STAND.replace("\"fraction\": 1.0", "\"fraction\": 0.4");
        assert!(matches!(read_stand_from_str(&bad), Err(YieldError::Validation(_))));
    }

    #[test]
    fn test_read_stand_rejects_malformed_json() {
        assert!(matches!(read_stand_from_str("{ not json"), Err(YieldError::Json(_))));
    }

    #[test]
    fn test_write_json_roundtrip() {
        let stand = read_stand_from_str(STAND).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stand.json");
        write_json(&stand, &path, true).unwrap();
        let loaded = read_stand(&path).unwrap();
        assert_eq!(loaded.id, stand.id);
        assert_eq!(loaded.base_area, stand.base_area);
    }

    #[test]
    fn test_read_stand_missing_file() {
        let err = read_stand("/nonexistent/stand.json").unwrap_err();
        assert!(matches!(err, YieldError::Io(_)));
    }
}
