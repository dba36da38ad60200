//! # Configuration Files
//!
//! Specification criteria, engine configuration and bridge models are stored
//! as pretty JSON with a schema version beside the content:
//!
//! ```text
//! { "version": "0.1.0", "name": "AASHTO LRFD 9th Edition", ... }
//! ```
//!
//! Saves are atomic: the JSON is written to a `.tmp` sibling, synced, then
//! renamed over the target. Loads reject files whose major version differs
//! from [`SCHEMA_VERSION`], and 0.x files newer than this build.
//!
//! ## Example
//!
//! ```rust,no_run
//! use spec_core::config::{load_criteria, save_criteria};
//! use spec_core::criteria::SpecCriteria;
//! use std::path::Path;
//!
//! save_criteria(&SpecCriteria::default(), Path::new("lrfd9.json"))?;
//! let criteria = load_criteria(Path::new("lrfd9.json"))?;
//! assert!(criteria.validate().is_ok());
//! # Ok::<(), spec_core::errors::SpecError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use semver::Version;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::DocumentType;
use crate::criteria::SpecCriteria;
use crate::errors::{SpecError, SpecResult};
use crate::model::BridgeModel;

/// Current file schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// What the engine checks against and for which kind of document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub criteria: SpecCriteria,
    pub document_type: DocumentType,
}

impl EngineConfig {
    pub fn new(criteria: SpecCriteria, document_type: DocumentType) -> Self {
        EngineConfig {
            criteria,
            document_type,
        }
    }

    pub fn validate(&self) -> SpecResult<()> {
        self.criteria.validate()
    }
}

#[derive(Serialize)]
struct VersionedRef<'a, T> {
    version: &'a str,
    #[serde(flatten)]
    content: &'a T,
}

#[derive(Deserialize)]
struct Versioned<T> {
    version: String,
    #[serde(flatten)]
    content: T,
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> SpecResult<()> {
    let json = serde_json::to_string_pretty(&VersionedRef {
        version: SCHEMA_VERSION,
        content: value,
    })?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path)
        .map_err(|e| SpecError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| SpecError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .sync_all()
        .map_err(|e| SpecError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        SpecError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), "saved");
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> SpecResult<T> {
    let mut file =
        File::open(path).map_err(|e| SpecError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| SpecError::file_error("read", path.display().to_string(), e.to_string()))?;

    let versioned: Versioned<T> = serde_json::from_str(&contents).map_err(|e| SpecError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    validate_version(&versioned.version)?;

    debug!(path = %path.display(), version = %versioned.version, "loaded");
    Ok(versioned.content)
}

/// Compatible when the major versions match; a 0.x file may not be newer
/// than this build.
fn validate_version(file_version: &str) -> SpecResult<()> {
    let mismatch = || SpecError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|_| mismatch())?;

    if file.major != current.major || (current.major == 0 && file.minor > current.minor) {
        return Err(mismatch());
    }
    Ok(())
}

pub fn save_criteria(criteria: &SpecCriteria, path: &Path) -> SpecResult<()> {
    save_json(criteria, path)
}

/// Load and validate a criteria file
pub fn load_criteria(path: &Path) -> SpecResult<SpecCriteria> {
    let criteria: SpecCriteria = load_json(path)?;
    criteria.validate()?;
    Ok(criteria)
}

pub fn save_engine_config(config: &EngineConfig, path: &Path) -> SpecResult<()> {
    save_json(config, path)
}

/// Load and validate an engine configuration file
pub fn load_engine_config(path: &Path) -> SpecResult<EngineConfig> {
    let config: EngineConfig = load_json(path)?;
    config.validate()?;
    Ok(config)
}

pub fn save_bridge_model(model: &BridgeModel, path: &Path) -> SpecResult<()> {
    save_json(model, path)
}

/// Load a bridge model and check its concrete definitions
pub fn load_bridge_model(path: &Path) -> SpecResult<BridgeModel> {
    let model: BridgeModel = load_json(path)?;
    model.validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edition::SpecEdition;
    use tempfile::tempdir;

    #[test]
    fn test_criteria_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("criteria.json");
        let mut criteria = SpecCriteria::for_edition(SpecEdition::EighthEdition2017);
        criteria.prestressed_element.check_final_service_i_tension = true;

        save_criteria(&criteria, &path).unwrap();
        let loaded = load_criteria(&path).unwrap();
        assert_eq!(loaded, criteria);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        save_engine_config(&EngineConfig::default(), &path).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn test_file_carries_schema_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("criteria.json");
        save_criteria(&SpecCriteria::default(), &path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["version"], SCHEMA_VERSION);
        assert_eq!(json["edition"], "NinthEdition2020");
    }

    #[test]
    fn test_partial_criteria_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "version": "0.1.0", "edition": "SixthEdition2012", "deck": { "compression_permanent": 0.40 } }"#)
            .unwrap();
        let criteria = load_criteria(&path).unwrap();
        assert_eq!(criteria.edition, SpecEdition::SixthEdition2012);
        assert_eq!(criteria.deck.compression_permanent, 0.40);
        assert_eq!(criteria.deck.compression_all_loads, 0.60);
        assert_eq!(criteria.lifting, SpecCriteria::default().lifting);
    }

    #[test]
    fn test_engine_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.json");
        let config = EngineConfig::new(SpecCriteria::default(), DocumentType::SplicedGirder);
        save_engine_config(&config, &path).unwrap();
        assert_eq!(load_engine_config(&path).unwrap(), config);
    }

    #[test]
    fn test_bridge_model_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        let model = BridgeModel::spliced_demo();
        save_bridge_model(&model, &path).unwrap();
        assert_eq!(load_bridge_model(&path).unwrap(), model);
    }

    #[test]
    fn test_invalid_criteria_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "version": "0.1.0", "deck": { "compression_permanent": 1.5 } }"#).unwrap();
        let err = load_criteria(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("latest").is_err());
        assert!(validate_version("0.1").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_criteria(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_criteria(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
