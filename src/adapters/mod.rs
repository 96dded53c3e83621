// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing codec and binding implementations.
//!
//! This module contains the concrete implementations behind the ports layer:
//! the JSON text codec used for backing files, the optional YAML codec, the
//! MessagePack encoder, and the shared-variable binding for dynamic
//! attributes.

pub mod dynamic_variable;
pub mod json;
pub mod msgpack;
#[cfg(feature = "yaml")]
pub mod yaml;

use crate::ports::DocumentCodec;
use std::path::Path;

// Re-export commonly used types
pub use dynamic_variable::DynamicVariable;
pub use json::JsonCodec;
#[cfg(feature = "yaml")]
pub use yaml::YamlCodec;

/// Picks a backing-file codec from a path's extension.
///
/// JSON files get the pretty writer. Returns `None` for unknown extensions.
///
/// # Examples
///
/// ```rust
/// use valcfg::adapters::codec_for_path;
///
/// assert_eq!(codec_for_path("settings.json").unwrap().name(), "json");
/// assert!(codec_for_path("settings.ini").is_none());
/// ```
pub fn codec_for_path(path: impl AsRef<Path>) -> Option<Box<dyn DocumentCodec>> {
    let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "json" => Some(Box::new(JsonCodec::pretty())),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Some(Box::new(YamlCodec::new())),
        _ => None,
    }
}
