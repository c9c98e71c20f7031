//! This module provides the `ConfigLoader` struct, responsible for loading machine
//! configurations from JSON files and strings.

use crate::config::MachineConfig;
use crate::types::MachineError;
use std::fs;
use std::path::{Path, PathBuf};

/// `ConfigLoader` is a utility struct for loading machine configurations.
/// It provides methods to load a configuration from a file, from string content,
/// and to discover and load all `.json` files within a directory.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a single configuration from the specified file path.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::File` if the file cannot be read or decoded.
    pub fn load_config(path: &Path) -> Result<MachineConfig, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_config_from_string(&content)
            .map_err(|e| MachineError::File(format!("{}: {}", path.display(), e)))
    }

    /// Loads a configuration from JSON text.
    ///
    /// Only the JSON shape is checked here; the machine validates the values when it is
    /// built.
    pub fn load_config_from_string(content: &str) -> Result<MachineConfig, MachineError> {
        serde_json::from_str(content)
            .map_err(|e| MachineError::File(format!("Invalid configuration: {e}")))
    }

    /// Loads every `.json` configuration in `directory`.
    ///
    /// Subdirectories and other files are skipped. Each element of the result is either
    /// a loaded configuration with its path or the error raised while loading it.
    pub fn load_configs(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineConfig), MachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::File(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(MachineError::File(format!(
                            "Failed to read directory entry: {e}"
                        ))))
                    }
                };

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                Some(Self::load_config(&path).map(|config| (path, config)))
            })
            .collect()
    }
}
