//! Converter configuration via `valbridge.toml`
//!
//! Every field has a default, so an empty file is a valid configuration.
//! String-valued settings are validated eagerly when loading from a file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use valbridge_core::{Error, Result, DEFAULT_POOL_CAPACITY};
use valbridge_host::SerializerPolicy;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "valbridge.toml";

/// How stored text is surfaced to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringMode {
    /// Always produce Unicode text
    Unicode,
    /// Produce legacy byte-strings where the text allows it
    Legacy,
}

/// Converter configuration loaded from `valbridge.toml`.
///
/// # Example
///
/// ```toml
/// strict_types = false
/// serializer = "native"
/// geo_enabled = true
/// string_mode = "unicode"
/// pool_capacity = 4096
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConverterConfig {
    /// Enforce store limits (bin name length) on the client side.
    #[serde(default)]
    pub strict_types: bool,
    /// Default serializer: `"identity"`, `"native"`, `"user"` or `"none"`.
    #[serde(default = "default_serializer_str")]
    pub serializer: String,
    /// Whether the host has GeoJSON support.
    #[serde(default = "default_geo_enabled")]
    pub geo_enabled: bool,
    /// Text read-back mode: `"unicode"` or `"legacy"`.
    #[serde(default = "default_string_mode_str")]
    pub string_mode: String,
    /// Live scratch buffers allowed per call.
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,
}

fn default_serializer_str() -> String {
    "native".to_string()
}

fn default_geo_enabled() -> bool {
    true
}

fn default_string_mode_str() -> String {
    "unicode".to_string()
}

fn default_pool_capacity() -> usize {
    DEFAULT_POOL_CAPACITY
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            strict_types: false,
            serializer: default_serializer_str(),
            geo_enabled: default_geo_enabled(),
            string_mode: default_string_mode_str(),
            pool_capacity: default_pool_capacity(),
        }
    }
}

impl ConverterConfig {
    /// Parse the serializer string into a policy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParam` for an unknown serializer name.
    pub fn serializer_policy(&self) -> Result<SerializerPolicy> {
        self.serializer.parse()
    }

    /// Parse the string mode.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParam` unless the value is `"unicode"` or `"legacy"`.
    pub fn string_mode(&self) -> Result<StringMode> {
        match self.string_mode.as_str() {
            "unicode" => Ok(StringMode::Unicode),
            "legacy" => Ok(StringMode::Legacy),
            other => Err(Error::invalid_param(format!(
                "Invalid string_mode '{}'. Expected \"unicode\" or \"legacy\".",
                other
            ))),
        }
    }

    /// Check every string-valued setting.
    pub fn validate(&self) -> Result<()> {
        self.serializer_policy()?;
        self.string_mode()?;
        if self.pool_capacity == 0 {
            return Err(Error::invalid_param("pool_capacity must be at least 1"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# valbridge converter configuration
#
# Enforce the 14-byte bin name limit before sending (default: false)
strict_types = false

# Serializer for values with no native store type:
#   "native"   = host-native encoding (default)
#   "identity" = raw byte buffers only
#   "user"     = the registered user serializer
#   "none"     = reject such values
serializer = "native"

# GeoJSON support in the host (default: true)
geo_enabled = true

# Text read-back: "unicode" (default) or "legacy"
string_mode = "unicode"

# Live scratch buffers per call (default: 4096)
pool_capacity = 4096
"#
    }

    /// Parse and validate config text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConverterConfig = toml::from_str(content)
            .map_err(|e| Error::invalid_param(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::client(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ConverterConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_param(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::client(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::client(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
