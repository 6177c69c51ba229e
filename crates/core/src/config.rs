//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core operations. The
//! library itself never reads environment variables; binaries do that and hand the result over
//! through [`format_from_env_value`] and [`ClinicConfig::new`].

use crate::constants::{DEFAULT_FORMAT, JSON_EXTENSION, XML_EXTENSION};
use crate::{ClinicError, ClinicResult};
use std::path::Path;
use std::str::FromStr;

/// On-disk format of a clinic file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// File extension conventionally used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => JSON_EXTENSION,
            Format::Xml => XML_EXTENSION,
        }
    }

    /// Infers the format from a path's extension, ignoring case.
    ///
    /// Returns `None` when the path has no extension or an unrecognised one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            JSON_EXTENSION => Ok(Format::Json),
            XML_EXTENSION => Ok(Format::Xml),
            other => Err(ClinicError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClinicConfig {
    default_format: Format,
}

impl ClinicConfig {
    /// Create a new `ClinicConfig`.
    pub fn new(default_format: Format) -> Self {
        Self { default_format }
    }

    pub fn default_format(&self) -> Format {
        self.default_format
    }

    /// Format to use for `path`: a recognised extension wins, otherwise the configured
    /// default.
    pub fn format_for(&self, path: &Path) -> Format {
        Format::from_path(path).unwrap_or(self.default_format)
    }
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

/// Parse the default format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_FORMAT`].
///
/// # Errors
///
/// Returns `ClinicError::UnsupportedFormat` for anything other than `json` or `xml`.
pub fn format_from_env_value(value: Option<String>) -> ClinicResult<Format> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<Format>()).transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_FORMAT))
}
