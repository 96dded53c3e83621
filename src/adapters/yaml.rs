// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document codec.
//!
//! An alternative backing-file format for `ConfigStore`. Documents go through
//! `serde_yaml` and the [`Value`] serde implementations, so numbers are typed
//! the same way as in JSON documents.

use crate::domain::errors::{ConfigError, ParseErrorKind, Result};
use crate::domain::Value;
use crate::ports::DocumentCodec;

/// YAML codec implementation.
///
/// # Examples
///
/// ```rust
/// use valcfg::adapters::YamlCodec;
/// use valcfg::domain::Value;
/// use valcfg::ports::DocumentCodec;
///
/// let codec = YamlCodec::new();
/// let value = codec.parse("configuration:\n  camera_mode: VGA\n  fps: 60").unwrap();
/// assert_eq!(value["configuration"]["camera_mode"], Value::from("VGA"));
/// assert!(matches!(value["configuration"]["fps"], Value::Int(60)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl YamlCodec {
    /// Creates a new YAML codec.
    pub fn new() -> Self {
        YamlCodec
    }
}

impl DocumentCodec for YamlCodec {
    fn name(&self) -> &str {
        "yaml"
    }

    fn parse(&self, content: &str) -> Result<Value> {
        if content.trim().is_empty() {
            return Err(ConfigError::parse(0, ParseErrorKind::EmptyDocument));
        }
        serde_yaml::from_str(content).map_err(|e| {
            let offset = e.location().map(|l| l.index()).unwrap_or(0);
            ConfigError::parse(offset, ParseErrorKind::Syntax(e.to_string()))
        })
    }

    fn render(&self, value: &Value) -> Result<String> {
        serde_yaml::to_string(value).map_err(|e| ConfigError::EncodeError {
            message: format!("Failed to write YAML: {}", e),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
