// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helper utilities shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use valcfg::domain::Value;
use valcfg::service::ConfigStore;

/// A change log filled by a subscriber.
pub type ChangeLog = Arc<Mutex<Vec<(String, Value)>>>;

/// A scratch directory holding one backing file.
#[allow(dead_code)]
pub struct ScratchFile {
    /// Keeps the directory alive for the duration of the test
    pub dir: TempDir,
    /// Path of the backing file inside `dir`
    pub path: PathBuf,
}

impl ScratchFile {
    /// Creates a scratch directory with no file in it yet.
    pub fn empty(name: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join(name);
        Self { dir, path }
    }

    /// Creates a scratch directory with a file holding `contents`.
    pub fn with_contents(name: &str, contents: &str) -> Self {
        let scratch = Self::empty(name);
        fs::write(&scratch.path, contents).expect("failed to write scratch file");
        scratch
    }

    /// Reads the file back as a value tree.
    #[allow(dead_code)]
    pub fn read_value(&self) -> Value {
        read_value(&self.path)
    }
}

/// Parses a JSON file from disk.
#[allow(dead_code)]
pub fn read_value(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("failed to read file");
    Value::from_json(&text).expect("file is not valid JSON")
}

/// Registers a subscriber that records every notification.
#[allow(dead_code)]
pub fn record_changes(store: &ConfigStore, id: &str) -> ChangeLog {
    let log: ChangeLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    store.register_on_change(id, move |name, value| {
        sink.lock().unwrap().push((name.to_string(), value.clone()));
    });
    log
}

/// Returns the names recorded in a change log, in order.
#[allow(dead_code)]
pub fn changed_names(log: &ChangeLog) -> Vec<String> {
    log.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
}

/// Installs a test subscriber for `tracing` output, once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
