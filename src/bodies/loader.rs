//! Catalog file loading
//!
//! A user catalog can replace the built-in solar system. It is looked up in
//! the path named by `ORRERY_CATALOG`, then in the platform config directory:
//! - macOS: ~/Library/Application Support/orrery/catalog.json
//! - Linux: ~/.config/orrery/catalog.json
//! - Windows: %APPDATA%\orrery\config\catalog.json

use anyhow::Context;
use bevy::prelude::*;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bodies::catalog::Catalog;

pub const CATALOG_ENV: &str = "ORRERY_CATALOG";
const CATALOG_FILE: &str = "catalog.json";

/// A place a user catalog may be read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPath {
    pub path: PathBuf,
    /// Named through `ORRERY_CATALOG` rather than found by default
    pub explicit: bool,
}

/// Where a user catalog would be read from, if anywhere.
pub fn catalog_path() -> Option<CatalogPath> {
    if let Some(path) = std::env::var_os(CATALOG_ENV) {
        return Some(CatalogPath {
            path: PathBuf::from(path),
            explicit: true,
        });
    }
    ProjectDirs::from("", "", "orrery").map(|dirs| CatalogPath {
        path: dirs.config_dir().join(CATALOG_FILE),
        explicit: false,
    })
}

/// Read and validate a catalog file.
///
/// Returns Ok(None) if the file does not exist and was not asked for.
/// Returns Err if a `required` file is missing, or if the file exists but
/// cannot be read, parsed or validated.
pub fn load_catalog_from(path: &Path, required: bool) -> Result<Option<Catalog>, anyhow::Error> {
    if !path.exists() {
        if required {
            anyhow::bail!("catalog {} not found", path.display());
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&contents)
        .with_context(|| format!("invalid catalog {}", path.display()))?;

    Ok(Some(catalog))
}

/// User catalog if one is configured and valid, built-in solar system otherwise.
pub fn load_catalog() -> Catalog {
    let Some(CatalogPath { path, explicit }) = catalog_path() else {
        return Catalog::solar_system();
    };

    match load_catalog_from(&path, explicit) {
        Ok(Some(catalog)) => {
            info!(
                "loaded {} bodies from {}",
                catalog.len(),
                path.display()
            );
            catalog
        }
        Ok(None) => Catalog::solar_system(),
        Err(e) => {
            warn!("{:#}; using built-in catalog", e);
            Catalog::solar_system()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "orrery-catalog-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = unique_temp_dir("missing").join(CATALOG_FILE);
        let result = load_catalog_from(&path, false).expect("Missing file should not error");
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = unique_temp_dir("explicit").join("nowhere.json");
        let err = load_catalog_from(&path, true).expect_err("Named file must exist");
        assert!(format!("{:#}", err).contains("not found"));
    }

    #[test]
    fn test_load_valid_catalog() {
        let path = unique_temp_dir("valid").join(CATALOG_FILE);
        let catalog = Catalog::solar_system();
        fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap())
            .expect("Failed to write catalog");

        let loaded = load_catalog_from(&path, true)
            .expect("Load should succeed")
            .expect("Catalog should exist");
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_invalid_catalog_is_an_error() {
        let path = unique_temp_dir("invalid").join(CATALOG_FILE);
        let json = r##"[
            {"name": "A", "color": "#fff", "size": 1.0,
             "orbit": {"kind": "primary", "orbital_radius": 10.0, "angular_speed": 0.1}},
            {"name": "A", "color": "#fff", "size": 1.0,
             "orbit": {"kind": "primary", "orbital_radius": 20.0, "angular_speed": 0.1}}
        ]"##;
        fs::write(&path, json).expect("Failed to write catalog");

        let err = load_catalog_from(&path, false).expect_err("Duplicate names must fail");
        assert!(format!("{:#}", err).contains("duplicate body name"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let path = unique_temp_dir("malformed").join(CATALOG_FILE);
        fs::write(&path, "{ not json").expect("Failed to write catalog");
        assert!(load_catalog_from(&path, false).is_err());
    }
}
