//! Configuration loading and management.

use std::path::{Path, PathBuf};

use evgen_core::{ParserConfig, ValidationError};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Duration for events whose detail line gives none, in minutes.
    pub default_duration_minutes: u32,

    /// Gap between auto-placed events, in minutes.
    pub gap_minutes: u32,

    /// Timezone label shown in the preview.
    pub timezone: String,

    /// Report malformed input as warnings.
    pub emit_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_minutes: 5,
            gap_minutes: 1,
            timezone: system_timezone(),
            emit_warnings: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (EVGEN_*)
        figment = figment.merge(Env::prefixed("EVGEN_"));

        figment.extract()
    }

    /// Builds the parser configuration, validating values.
    pub fn parser_config(&self) -> Result<ParserConfig, ValidationError> {
        Ok(ParserConfig::new(
            self.default_duration_minutes,
            self.gap_minutes,
            self.timezone.as_str(),
        )?
        .with_warnings(self.emit_warnings))
    }
}

/// Returns the system IANA timezone name, or `UTC` if it cannot be read.
fn system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "could not read system timezone");
        "UTC".to_string()
    })
}

/// Returns the platform-specific config directory for evgen.
///
/// On Linux: `~/.config/evgen`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("evgen"))
}
