//! config.rs
//! Stream and codec settings.
//!
//! Summary: every field has a default, so a JSON document only needs the
//! values it changes:
//!
//! ```json
//! { "stream": { "window_size": 8192 }, "codec": { "level": 9 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::compression::constants::{DEFAULT_LEVEL_DEFLATE, MAX_LEVEL_DEFLATE};
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_READ_CHUNK, DEFAULT_WINDOW_SIZE, MAX_CHUNK_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {field}: {value} ({reason})")]
    Invalid { field: &'static str, value: usize, reason: &'static str },
}

/// Window and read sizes of a stream adapter, in units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Units the write window holds before they go to the compressor.
    pub window_size: usize,
    /// Units requested from the source per pull.
    pub read_chunk: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { window_size: DEFAULT_WINDOW_SIZE, read_chunk: DEFAULT_READ_CHUNK }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("stream.window_size", self.window_size)?;
        check_size("stream.read_chunk", self.read_chunk)
    }
}

/// Settings of the real codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Compression level, 0 (store) to 9 (best).
    pub level: u32,
    /// Staged bytes that trigger a codec call without a flush.
    pub batch_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LEVEL_DEFLATE, batch_size: DEFAULT_BATCH_SIZE }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level > MAX_LEVEL_DEFLATE {
            return Err(ConfigError::Invalid {
                field: "codec.level",
                value: self.level as usize,
                reason: "must be between 0 and 9",
            });
        }
        check_size("codec.batch_size", self.batch_size)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub stream: StreamConfig,
    pub codec: CodecConfig,
}

impl Settings {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stream.validate()?;
        self.codec.validate()
    }
}

fn check_size(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid { field, value, reason: "must be positive" });
    }
    if value > MAX_CHUNK_SIZE {
        return Err(ConfigError::Invalid { field, value, reason: "exceeds 32 MiB" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let s = Settings::from_json(r#"{ "codec": { "level": 9 } }"#).unwrap();
        assert_eq!(s.codec.level, 9);
        assert_eq!(s.codec.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(s.stream, StreamConfig::default());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "codec": { "level": 12 } }"#),
            Err(ConfigError::Invalid { field: "codec.level", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "stream": { "window_size": 0 } }"#),
            Err(ConfigError::Invalid { field: "stream.window_size", .. })
        ));
        assert!(matches!(Settings::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
