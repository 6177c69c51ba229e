//! Constants used throughout the clinic core crate.

use crate::config::Format;

/// File extension for JSON clinic files.
pub const JSON_EXTENSION: &str = "json";

/// File extension for XML clinic files.
pub const XML_EXTENSION: &str = "xml";

/// Format used when neither the file extension nor configuration picks one.
pub const DEFAULT_FORMAT: Format = Format::Json;

/// Shown in summaries in place of an appointment reference that could not be resolved.
pub const MISSING_REFERENCE: &str = "<missing>";
