// SPDX-License-Identifier: MIT OR Apache-2.0

//! A dynamic value model and an access-controlled configuration registry.
//!
//! This crate provides [`Value`](domain::Value), a self-describing tree of
//! scalars, arrays and string-keyed maps, together with a strict JSON codec
//! and a MessagePack encoder for it. On top of the value model sits
//! [`ConfigStore`](service::ConfigStore), a thread-safe registry of named
//! attributes with access tiers, live variable bindings, change notification
//! and crash-safe persistence into sections of a backing file.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types with no I/O (`Value`, `FromValue`, `AccessTier`, errors)
//! - **Ports**: Trait definitions at the seams (`DocumentCodec`, `DynamicAttribute`)
//! - **Adapters**: Implementations of those traits (JSON, YAML, MessagePack, shared variables)
//! - **Service**: The configuration store, its default catalogue and derived image parameters
//!
//! # Features
//!
//! - **Lossless numbers**: Integers keep signedness and are narrowed on the wire
//! - **Strict parsing**: Malformed documents fail as a whole with a byte offset
//! - **Access control**: Read-only, restricted and open attributes
//! - **Minimal diffs**: Only user-specified changes are written back
//! - **Atomic saves**: Write to a temporary file, then rename
//!
//! # Feature Flags
//!
//! - `yaml`: Enable the YAML document codec (default)
//! - `internal`: Privileged build; restricted attributes accept user writes
//! - `language_menu`: Add the `display_language` attribute to the catalogue
//!
//! # Quick Start
//!
//! ```rust
//! use valcfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let value = Value::from_json(r#"{"mode": "VGA", "fps": 60}"#)?;
//! assert_eq!(value["fps"].coerce_to::<f64>(), 60.0);
//! assert_eq!(value.to_msgpack()?[0], 0x82);
//!
//! let store = ConfigStore::with_defaults();
//! store.register_on_change("log", |name, value| println!("{} = {}", name, value));
//! assert!(store.set_attribute("tracking_mode", "precise", true));
//! assert!(store.set_camera_mode(CameraMode::Vga, false));
//! assert_eq!(store.image_config().height, 480);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{AccessTier, Array, ConfigError, FromValue, Hash, Result, Value};
    pub use crate::ports::{ChangeCallback, DocumentCodec, DynamicAttribute};
    pub use crate::service::{CameraMode, ConfigStore, ImageConfig, DEFAULT_SECTION};

    pub use crate::adapters::{DynamicVariable, JsonCodec};
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlCodec;
}
