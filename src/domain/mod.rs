// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the value model and its core rules.
//!
//! This module holds the dynamic [`Value`] type, the [`FromValue`] coercion
//! trait, access tiers, the unicode bridge and the crate's error type. It
//! performs no I/O.

pub mod access;
pub mod coerce;
pub mod errors;
pub mod unicode;
pub mod value;

// Re-export commonly used types
pub use access::{AccessTier, Attribute};
pub use coerce::FromValue;
pub use errors::{ConfigError, ParseErrorKind, Result};
pub use value::{Array, Hash, Value};
