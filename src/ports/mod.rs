// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that the configuration
//! store depends on. They are implemented by the adapters layer, or by the
//! subsystems that bind live variables into the store.

pub mod codec;
pub mod dynamic;
pub mod notify;

// Re-export commonly used types
pub use codec::DocumentCodec;
pub use dynamic::DynamicAttribute;
pub use notify::ChangeCallback;
