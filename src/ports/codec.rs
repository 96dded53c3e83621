// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document codec trait definition.
//!
//! This module defines the `DocumentCodec` trait, the interface the
//! configuration store uses to turn backing-file text into a [`Value`] tree
//! and back.

use crate::domain::{Result, Value};

/// A trait for text document formats.
///
/// A codec must parse a whole document or fail: a partially parsed document
/// is never returned.
///
/// # Examples
///
/// ```rust
/// use valcfg::ports::DocumentCodec;
/// use valcfg::domain::{Result, Value};
///
/// struct LineCodec;
///
/// impl DocumentCodec for LineCodec {
///     fn name(&self) -> &str {
///         "lines"
///     }
///
///     fn parse(&self, content: &str) -> Result<Value> {
///         Ok(content.lines().map(Value::from).collect())
///     }
///
///     fn render(&self, value: &Value) -> Result<String> {
///         Ok(value
///             .as_array()
///             .map(|a| a.iter().map(|v| v.coerce_to::<String>() + "\n").collect())
///             .unwrap_or_default())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let codec = LineCodec;
/// let value = codec.parse("a\nb").unwrap();
/// assert_eq!(codec.render(&value).unwrap(), "a\nb\n");
/// ```
pub trait DocumentCodec: Send + Sync {
    /// Returns a short name for this format, used in log messages.
    fn name(&self) -> &str;

    /// Parses a complete document.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The document's value tree
    /// * `Err(ConfigError::ParseError)` - The text was malformed
    fn parse(&self, content: &str) -> Result<Value>;

    /// Renders a value tree as a document.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The document text
    /// * `Err(ConfigError::EncodeError)` - The format cannot represent the value
    fn render(&self, value: &Value) -> Result<String>;

    /// Returns the file extensions (without the leading dot) this codec handles.
    fn supported_extensions(&self) -> &[&str];
}
