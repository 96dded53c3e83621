// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the valcfg crate.
//!
//! This example demonstrates:
//! - Creating a store with the default attribute catalogue
//! - Reading attributes with type coercion
//! - Subscribing to changes
//! - Binding a live variable as a dynamic attribute
//! - Loading and saving a backing file
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use parking_lot::RwLock;
use std::sync::Arc;
use valcfg::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== valcfg: Basic Usage ===\n");

    let store = ConfigStore::with_defaults();

    // Example 1: Coerced reads
    println!("--- Example 1: Reading Attributes ---");
    let mode: String = store.get_attribute("tracking_mode").unwrap_or_default();
    let port: i32 = store.get_attribute("websockets_port").unwrap_or_default();
    let port_text: String = store.get_attribute("websockets_port").unwrap_or_default();
    println!("tracking_mode = {}", mode);
    println!("websockets_port = {} (as text: {:?})", port, port_text);

    // Example 2: Change notification
    println!("\n--- Example 2: Change Notification ---");
    store.register_on_change("printer", |name, value| {
        println!("  changed: {} = {}", name, value);
    });
    store.set_attribute("tracking_mode", "precise", true);
    let accepted = store.set_attribute("websockets_port", 9000, true);
    println!("user write to websockets_port accepted: {}", accepted);

    // Example 3: Dynamic attributes
    println!("\n--- Example 3: Dynamic Attributes ---");
    let exposure = Arc::new(RwLock::new(0.25f64));
    store.register_dynamic_variable("exposure", Arc::clone(&exposure));
    store.set_attribute("exposure", "0.5", false);
    println!("exposure variable now holds {}", *exposure.read());

    // Example 4: Camera presets
    println!("\n--- Example 4: Camera Presets ---");
    store.set_camera_mode(CameraMode::Qvga, false);
    let image = store.image_config();
    println!(
        "{} -> {}x{} (downsample {})",
        store.camera_mode(),
        image.width,
        image.height,
        image.downsample_rate
    );

    // Example 5: Persistence
    println!("\n--- Example 5: Saving and Loading ---");
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.json");
    store.set_output_file(&path, DEFAULT_SECTION);
    if store.save(DEFAULT_SECTION, false) {
        println!("saved to {}:", path.display());
        println!("{}", std::fs::read_to_string(&path)?);
    }

    let reloaded = ConfigStore::with_defaults();
    reloaded.load_from_file(&path, DEFAULT_SECTION)?;
    println!(
        "reloaded tracking_mode = {}",
        reloaded.get_attribute::<String>("tracking_mode").unwrap_or_default()
    );

    let packed = Value::Hash(reloaded.get_public_attributes()).to_msgpack()?;
    println!("\nMessagePack of the public attributes: {} bytes", packed.len());

    Ok(())
}
