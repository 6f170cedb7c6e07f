use lowpoly_core::prelude::GenerateLowPolySettings;
use std::{fmt, fs, path::Path, path::PathBuf};

/// Error thrown while reading settings file.
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read.
    Read(PathBuf, std::io::Error),
    /// JSON settings are malformed.
    Json(PathBuf, serde_json::Error),
    /// YAML settings are malformed.
    Yaml(PathBuf, serde_yaml::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(path, error) => {
                write!(f, "Cannot read settings '{}': {error}", path.display())
            }
            Self::Json(path, error) => {
                write!(f, "Cannot parse JSON settings '{}': {error}", path.display())
            }
            Self::Yaml(path, error) => {
                write!(f, "Cannot parse YAML settings '{}': {error}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(_, error) => Some(error),
            Self::Json(_, error) => Some(error),
            Self::Yaml(_, error) => Some(error),
        }
    }
}

/// Load generation settings; `.json` files are read as JSON, anything else as YAML.
/// Fields missing from the file keep their default values.
pub fn load_settings(path: &Path) -> Result<GenerateLowPolySettings, SettingsError> {
    let contents =
        fs::read_to_string(path).map_err(|error| SettingsError::Read(path.to_owned(), error))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        serde_json::from_str(&contents).map_err(|error| SettingsError::Json(path.to_owned(), error))
    } else {
        serde_yaml::from_str(&contents).map_err(|error| SettingsError::Yaml(path.to_owned(), error))
    }
}
