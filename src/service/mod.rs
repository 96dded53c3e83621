// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration store.
//!
//! This module contains `ConfigStore`, the registry that ties the value model,
//! the codecs and the ports together, along with the default attribute
//! catalogue and the image parameters derived from it.

pub mod catalogue;
pub mod config_store;
pub mod image_config;

// Re-export commonly used types
pub use catalogue::{default_screen_calibration, MAX_NUM_CALIBRATED_SCREENS};
pub use config_store::{ConfigStore, ConfigStoreBuilder, DEFAULT_SECTION};
pub use image_config::{CameraMode, ImageConfig};
