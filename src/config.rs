use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::ImportError;

/// Top-level settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Import behaviour
    #[serde(default)]
    pub import: ImportSettings,
    /// Where video metadata comes from
    #[serde(default)]
    pub source: SourceSettings,
}

/// Import behaviour
#[derive(Debug, Deserialize, Clone)]
pub struct ImportSettings {
    /// Overwrite fields that already hold a value
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    /// Create posts for listed videos that have none
    #[serde(default)]
    pub create_posts: bool,
    /// Maximum number of videos per batch (0 = no limit)
    #[serde(default)]
    pub limit: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            overwrite: default_overwrite(),
            create_posts: false,
            limit: 0,
        }
    }
}

/// Video metadata source configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceSettings {
    /// Directory of `<id>.info.json` files
    pub info_dir: Option<PathBuf>,
}

impl SourceSettings {
    /// The configured metadata directory, or a configuration error
    pub fn require_info_dir(&self) -> Result<&PathBuf, ImportError> {
        self.info_dir.as_ref().ok_or_else(|| {
            ImportError::Configuration(
                "No metadata directory configured. Set source.info_dir in fff-danse.toml \
                 or FFF_DANSE__SOURCE__INFO_DIR"
                    .to_string(),
            )
        })
    }
}

fn default_overwrite() -> bool {
    true
}

/// Load settings from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables with FFF_DANSE__ prefix
/// 2. `file` if given (must exist), otherwise fff-danse.toml in the current directory
/// 3. Default values
///
/// Environment variable format: FFF_DANSE__IMPORT__OVERWRITE=false
pub fn load_settings(file: Option<&str>) -> Result<Settings, ImportError> {
    let file_source = match file {
        Some(path) => File::with_name(path).required(true),
        // Optional config file (can be missing)
        None => File::with_name("fff-danse").required(false),
    };

    let settings = Config::builder()
        .add_source(file_source)
        .add_source(
            Environment::with_prefix("FFF_DANSE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
