// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration store.
//!
//! `ConfigStore` is a thread-safe registry of named attributes. Each static
//! attribute holds a [`Value`] and an [`AccessTier`]; dynamic attributes
//! delegate to a live binding owned elsewhere. The store records which
//! attributes were changed by the user, notifies subscribers of changes, and
//! persists the user's changes into one section of a backing file (pretty
//! JSON unless another codec is configured).
//!
//! # Locking
//!
//! All state sits behind one reentrant mutex. Callbacks and dynamic bindings
//! run with the mutex held, so a callback may call back into the store on the
//! same thread while other threads wait.

use crate::adapters::{codec_for_path, DynamicVariable, JsonCodec};
use crate::domain::{AccessTier, Attribute, ConfigError, FromValue, Hash, Result, Value};
use crate::ports::{ChangeCallback, DocumentCodec, DynamicAttribute};
use crate::service::catalogue;
use crate::service::image_config::{CameraMode, ImageConfig};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Section name used by the runtime for user preferences.
pub const DEFAULT_SECTION: &str = "configuration";

/// Maximum size of a backing file accepted by `load_from_file` (10MB).
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

static GLOBAL: Lazy<ConfigStore> = Lazy::new(ConfigStore::with_defaults);

#[derive(Default)]
struct StoreState {
    attributes: HashMap<String, Attribute>,
    dynamic: HashMap<String, Arc<dyn DynamicAttribute>>,
    modified: Hash,
    section_files: HashMap<String, PathBuf>,
    subscribers: Vec<(String, ChangeCallback)>,
    image: ImageConfig,
}

impl StoreState {
    fn file_for(&self, section: &str) -> Option<&PathBuf> {
        self.section_files
            .get(section)
            .or_else(|| self.section_files.get(""))
    }
}

type StateGuard<'a> = ReentrantMutexGuard<'a, RefCell<StoreState>>;

/// A thread-safe, access-controlled attribute registry with file persistence.
///
/// # Examples
///
/// ```rust
/// use valcfg::prelude::*;
///
/// let store = ConfigStore::with_defaults();
///
/// store.create_attribute("volume", 5, AccessTier::WriteOpen);
/// assert!(store.set_attribute("volume", 6, true));
/// assert_eq!(store.get_attribute::<i64>("volume"), Some(6));
///
/// // Restricted attributes refuse user writes in a public build.
/// if !store.is_privileged() {
///     assert!(!store.set_attribute("websockets_port", 7000, true));
/// }
/// ```
pub struct ConfigStore {
    state: ReentrantMutex<RefCell<StoreState>>,
    codec: Box<dyn DocumentCodec>,
    privileged: bool,
}

impl ConfigStore {
    /// Creates an empty store with no attributes.
    ///
    /// Call [`install_defaults`](Self::install_defaults) to register the
    /// standard catalogue, or use [`with_defaults`](Self::with_defaults).
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a store with the standard catalogue installed.
    pub fn with_defaults() -> Self {
        Self::builder().with_defaults().build()
    }

    /// Creates a new store builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valcfg::adapters::JsonCodec;
    /// use valcfg::service::ConfigStore;
    ///
    /// let store = ConfigStore::builder()
    ///     .codec(JsonCodec::packed())
    ///     .privileged(true)
    ///     .with_defaults()
    ///     .build();
    /// assert!(store.is_privileged());
    /// assert!(store.has_attribute("camera_mode"));
    /// ```
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Returns the process-wide store, created with defaults on first use.
    pub fn global() -> &'static ConfigStore {
        &GLOBAL
    }

    /// Returns the OS-specific default backing file for an application.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn default_config_path(app_name: &str, qualifier: &str) -> Option<PathBuf> {
        ProjectDirs::from(qualifier, "", app_name)
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Returns true if restricted attributes accept user-specified writes.
    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Returns the codec used for backing files.
    pub fn codec(&self) -> &dyn DocumentCodec {
        self.codec.as_ref()
    }

    fn lock(&self) -> StateGuard<'_> {
        self.state.lock()
    }

    /// Replaces all static attributes with the standard catalogue.
    ///
    /// Clears the modified set and recomputes the image configuration.
    /// Dynamic bindings, section files and subscribers are kept. No
    /// notifications fire.
    pub fn install_defaults(&self) {
        let guard = self.lock();
        {
            let mut state = guard.borrow_mut();
            state.attributes.clear();
            state.modified.clear();
            state.attributes.extend(catalogue::default_attributes());
        }
        if let Err(e) = self.reload_image_config() {
            tracing::warn!("Default attributes produced no image configuration: {}", e);
        }
    }

    /// Inserts or overwrites a static attribute.
    ///
    /// This is an administrative operation: the tier is not checked, the
    /// modified set is untouched and subscribers are not notified.
    pub fn create_attribute(&self, name: &str, value: impl Into<Value>, tier: AccessTier) {
        let guard = self.lock();
        guard
            .borrow_mut()
            .attributes
            .insert(name.to_string(), Attribute::new(value, tier));
    }

    /// Writes an attribute.
    ///
    /// Static attributes are checked first, then dynamic bindings. Returns
    /// false without changing anything if the name is unknown, the attribute
    /// is read-only, or it is restricted and `user_specified` is set in a
    /// non-privileged store.
    ///
    /// A static write that changes the value records it in the modified set
    /// when `user_specified` is set and notifies subscribers. Writing an equal
    /// value succeeds without notifying. A dynamic write notifies only if the
    /// binding accepted the value.
    pub fn set_attribute(&self, name: &str, value: impl Into<Value>, user_specified: bool) -> bool {
        let value = value.into();
        let guard = self.lock();

        let binding = {
            let mut state = guard.borrow_mut();
            let state = &mut *state;
            match state.attributes.get_mut(name) {
                Some(attribute) => {
                    if !attribute.tier.permits(user_specified, self.privileged) {
                        tracing::debug!(
                            "Rejected write to {} attribute '{}'",
                            attribute.tier,
                            name
                        );
                        return false;
                    }
                    if attribute.value == value {
                        return true;
                    }
                    attribute.value = value.clone();
                    if user_specified {
                        state.modified.insert(name.to_string(), value.clone());
                    }
                    None
                }
                None => match state.dynamic.get(name) {
                    Some(binding) => Some(Arc::clone(binding)),
                    None => {
                        tracing::debug!("Rejected write to unknown attribute '{}'", name);
                        return false;
                    }
                },
            }
        };

        if let Some(binding) = binding {
            if !binding.set(&value) {
                tracing::debug!("Dynamic attribute '{}' refused the value", name);
                return false;
            }
        }

        self.notify(&guard, name, &value);
        true
    }

    /// Reads an attribute coerced to `T`.
    ///
    /// Returns `None` if the name is unknown.
    pub fn get_attribute<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get_attribute_value(name).map(|v| v.coerce_to::<T>())
    }

    /// Reads an attribute's raw value, static first, then dynamic.
    pub fn get_attribute_value(&self, name: &str) -> Option<Value> {
        let guard = self.lock();
        let binding = {
            let state = guard.borrow();
            if let Some(attribute) = state.attributes.get(name) {
                return Some(attribute.value.clone());
            }
            state.dynamic.get(name).cloned()
        };
        binding.map(|b| b.get())
    }

    /// Returns the tier of a static attribute.
    ///
    /// Dynamic attributes have no tier and return `None`.
    pub fn attribute_tier(&self, name: &str) -> Option<AccessTier> {
        let guard = self.lock();
        let state = guard.borrow();
        state.attributes.get(name).map(|a| a.tier)
    }

    /// Returns true if a static or dynamic attribute has this name.
    pub fn has_attribute(&self, name: &str) -> bool {
        let guard = self.lock();
        let state = guard.borrow();
        state.attributes.contains_key(name) || state.dynamic.contains_key(name)
    }

    /// Returns every attribute's current value, static and dynamic.
    pub fn get_attributes(&self) -> Hash {
        let guard = self.lock();
        let (mut all, bindings) = {
            let state = guard.borrow();
            let all: Hash = state
                .attributes
                .iter()
                .map(|(name, a)| (name.clone(), a.value.clone()))
                .collect();
            let bindings: Vec<_> = state
                .dynamic
                .iter()
                .map(|(name, b)| (name.clone(), Arc::clone(b)))
                .collect();
            (all, bindings)
        };
        for (name, binding) in bindings {
            all.entry(name).or_insert_with(|| binding.get());
        }
        all
    }

    /// Returns the static attributes whose tier is `WriteOpen`.
    pub fn get_public_attributes(&self) -> Hash {
        let guard = self.lock();
        let state = guard.borrow();
        state
            .attributes
            .iter()
            .filter(|(_, a)| a.tier.is_public())
            .map(|(name, a)| (name.clone(), a.value.clone()))
            .collect()
    }

    /// Returns the user-specified changes pending persistence.
    pub fn modified_attributes(&self) -> Hash {
        let guard = self.lock();
        let modified = guard.borrow().modified.clone();
        modified
    }

    /// Registers a live binding under a new name.
    ///
    /// Returns false if a static or dynamic attribute already has the name.
    /// On success subscribers are notified with the binding's current value.
    pub fn register_dynamic_attribute(
        &self,
        name: &str,
        binding: Arc<dyn DynamicAttribute>,
    ) -> bool {
        let guard = self.lock();
        {
            let mut state = guard.borrow_mut();
            if state.attributes.contains_key(name) || state.dynamic.contains_key(name) {
                return false;
            }
            state.dynamic.insert(name.to_string(), Arc::clone(&binding));
        }
        let current = binding.get();
        self.notify(&guard, name, &current);
        true
    }

    /// Registers a shared variable as a dynamic attribute.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valcfg::service::ConfigStore;
    /// use parking_lot::RwLock;
    /// use std::sync::Arc;
    ///
    /// let store = ConfigStore::new();
    /// let level = Arc::new(RwLock::new(2i32));
    /// assert!(store.register_dynamic_variable("log_level", level.clone()));
    ///
    /// assert!(store.set_attribute("log_level", "4", true));
    /// assert_eq!(*level.read(), 4);
    /// ```
    pub fn register_dynamic_variable<T>(&self, name: &str, shared: Arc<RwLock<T>>) -> bool
    where
        T: FromValue + Into<Value> + Clone + Send + Sync + 'static,
    {
        self.register_dynamic_attribute(name, Arc::new(DynamicVariable::new(shared)))
    }

    /// Removes a live binding.
    ///
    /// On success subscribers are notified with `Null`.
    pub fn unregister_dynamic_attribute(&self, name: &str) -> bool {
        let guard = self.lock();
        let removed = guard.borrow_mut().dynamic.remove(name).is_some();
        if removed {
            self.notify(&guard, name, &Value::Null);
        }
        removed
    }

    /// Registers a change callback under an id.
    ///
    /// Callbacks run in registration order. Registering an existing id
    /// replaces its callback and keeps its position.
    pub fn register_on_change<F>(&self, id: &str, callback: F)
    where
        F: Fn(&str, &Value) + Send + Sync + 'static,
    {
        let callback: ChangeCallback = Arc::new(callback);
        let guard = self.lock();
        let mut state = guard.borrow_mut();
        match state.subscribers.iter_mut().find(|(existing, _)| existing == id) {
            Some(entry) => entry.1 = callback,
            None => state.subscribers.push((id.to_string(), callback)),
        }
    }

    /// Removes a change callback. Returns false if the id was not registered.
    pub fn unregister_on_change(&self, id: &str) -> bool {
        let guard = self.lock();
        let mut state = guard.borrow_mut();
        let before = state.subscribers.len();
        state.subscribers.retain(|(existing, _)| existing != id);
        state.subscribers.len() != before
    }

    fn notify(&self, guard: &StateGuard<'_>, name: &str, value: &Value) {
        let callbacks: Vec<ChangeCallback> = guard
            .borrow()
            .subscribers
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(name, value);
        }
    }

    /// Sets the backing file for a section.
    ///
    /// The first file ever registered also becomes the file for sections
    /// with no file of their own.
    pub fn set_output_file(&self, path: impl AsRef<Path>, section: &str) {
        let path = path.as_ref().to_path_buf();
        let guard = self.lock();
        let mut state = guard.borrow_mut();
        if state.section_files.is_empty() {
            state.section_files.insert(String::new(), path.clone());
        }
        state.section_files.insert(section.to_string(), path);
    }

    /// Returns the backing file a save of `section` would write.
    pub fn output_file(&self, section: &str) -> Option<PathBuf> {
        let guard = self.lock();
        let state = guard.borrow();
        state.file_for(section).cloned()
    }

    /// Loads one section of a backing file.
    ///
    /// The file is registered as the section's output file even if it cannot
    /// be read. The whole document is parsed before anything is applied.
    /// Every key in the section is written with `user_specified` set; keys the
    /// store rejects are skipped.
    ///
    /// # Errors
    ///
    /// * `ConfigError::IoError` - The file could not be read
    /// * `ConfigError::ParseError` - The file is not valid JSON
    /// * `ConfigError::SchemaError` - The document or the section is not an object
    /// * `ConfigError::ImageConfigError` - The image configuration could not be derived
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use valcfg::service::{ConfigStore, DEFAULT_SECTION};
    ///
    /// # fn main() -> valcfg::domain::Result<()> {
    /// let store = ConfigStore::with_defaults();
    /// store.load_from_file("/etc/tracker/config.json", DEFAULT_SECTION)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from_file(&self, path: impl AsRef<Path>, section: &str) -> Result<()> {
        let path = path.as_ref();
        let _guard = self.lock();
        self.set_output_file(path, section);

        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::IoError(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Configuration file too large: {} bytes (max: {} bytes)",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE
                ),
            )));
        }

        let content = fs::read_to_string(path)?;
        let document = self.codec.parse(&content)?;
        let location = path.display().to_string();

        let mut root = match document {
            Value::Hash(root) => root,
            _ => {
                return Err(ConfigError::schema(
                    location,
                    "Top-level value is not an object",
                ))
            }
        };
        let entries = match root.remove(section) {
            Some(Value::Hash(entries)) => entries,
            _ => {
                return Err(ConfigError::schema(
                    location,
                    format!("Section '{}' not found", section),
                ))
            }
        };

        for (name, value) in entries {
            if !self.set_attribute(&name, value, true) {
                tracing::debug!("Skipped attribute '{}' from {}", name, location);
            }
        }

        self.reload_image_config()?;
        tracing::info!("Loaded section '{}' from {}", section, location);
        Ok(())
    }

    /// Loads one section of a backing file, reporting failure as `false`.
    ///
    /// Failures are logged at warn level when `verbose` is set and at debug
    /// level otherwise.
    pub fn try_load_from_file(&self, path: impl AsRef<Path>, section: &str, verbose: bool) -> bool {
        let path = path.as_ref();
        match self.load_from_file(path, section) {
            Ok(()) => true,
            Err(e) => {
                if verbose {
                    tracing::warn!("Failed to load {}: {}", path.display(), e);
                } else {
                    tracing::debug!("Failed to load {}: {}", path.display(), e);
                }
                false
            }
        }
    }

    /// Persists the modified set into one section of the backing file.
    ///
    /// Does nothing and returns false if there are no modified attributes and
    /// `reset_to_empty` is not set, or no file is registered. Otherwise the
    /// existing file is read (a missing or unparsable file counts as an empty
    /// object), the section is replaced by the modified set or, with
    /// `reset_to_empty`, by an empty object, and the result is written to a
    /// temporary file beside it (creating missing parent directories) that is renamed over the original. A reset also clears
    /// the modified set.
    ///
    /// Returns true only if the file was replaced. On failure the original
    /// file is left untouched.
    pub fn save(&self, section: &str, reset_to_empty: bool) -> bool {
        let guard = self.lock();
        let (path, modified) = {
            let state = guard.borrow();
            if state.modified.is_empty() && !reset_to_empty {
                return false;
            }
            match state.file_for(section) {
                Some(path) => (path.clone(), state.modified.clone()),
                None => {
                    tracing::debug!("No output file registered for section '{}'", section);
                    return false;
                }
            }
        };

        let contents = if reset_to_empty {
            Value::new_hash()
        } else {
            Value::Hash(modified)
        };

        match self.write_section(&path, section, contents) {
            Ok(()) => {
                if reset_to_empty {
                    guard.borrow_mut().modified.clear();
                }
                tracing::debug!("Saved section '{}' to {}", section, path.display());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", path.display(), e);
                false
            }
        }
    }

    fn write_section(&self, path: &Path, section: &str, contents: Value) -> Result<()> {
        let mut document = match fs::read_to_string(path) {
            Ok(text) => self.codec.parse(&text).unwrap_or_else(|e| {
                tracing::debug!("Replacing unreadable {}: {}", path.display(), e);
                Value::new_hash()
            }),
            Err(_) => Value::new_hash(),
        };
        if !document.is_hash() {
            document = Value::new_hash();
        }
        document.hash_set(section, contents);

        let text = self.codec.render(&document)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = temp_path(path);
        let result = fs::write(&tmp, text).and_then(|()| fs::rename(&tmp, path));
        if tmp.exists() {
            if let Err(e) = fs::remove_file(&tmp) {
                tracing::debug!("Failed to remove {}: {}", tmp.display(), e);
            }
        }
        result.map_err(ConfigError::from)
    }

    /// Recomputes the image configuration from the current attributes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ImageConfigError` if `camera_mode` is not a known
    /// preset and one of the raw `image_*` attributes is missing. The previous
    /// configuration is kept in that case.
    pub fn reload_image_config(&self) -> Result<()> {
        let guard = self.lock();
        let downsample_rate = guard.borrow().image.downsample_rate;
        let config = ImageConfig::derive(|name| self.get_attribute_value(name), downsample_rate)?;
        guard.borrow_mut().image = config;
        Ok(())
    }

    /// Returns the current image configuration.
    pub fn image_config(&self) -> ImageConfig {
        let guard = self.lock();
        let image = guard.borrow().image;
        image
    }

    /// Overrides the processed image size and downsampling.
    pub fn set_image_size(&self, width: i32, height: i32, downsample_rate: i32) {
        let guard = self.lock();
        let mut state = guard.borrow_mut();
        state.image.width = width;
        state.image.height = height;
        state.image.downsample_rate = downsample_rate;
    }

    /// Overrides the calibration image size.
    pub fn set_calib_image_size(&self, width: i32, height: i32) {
        let guard = self.lock();
        let mut state = guard.borrow_mut();
        state.image.calib_width = width;
        state.image.calib_height = height;
    }

    /// Overrides the camera source image size.
    pub fn set_source_image_size(&self, width: i32, height: i32) {
        let guard = self.lock();
        let mut state = guard.borrow_mut();
        state.image.source_width = width;
        state.image.source_height = height;
    }

    /// Returns the `camera_mode` preset, or HVGA if it is not recognized.
    pub fn camera_mode(&self) -> CameraMode {
        self.get_attribute::<String>("camera_mode")
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default()
    }

    /// Writes `camera_mode` and recomputes the image configuration.
    ///
    /// A user-specified change is saved to the `configuration` section
    /// immediately. Returns the result of the attribute write.
    pub fn set_camera_mode(&self, mode: CameraMode, user_specified: bool) -> bool {
        let _guard = self.lock();
        let accepted = self.set_attribute("camera_mode", mode.as_str(), user_specified);
        if user_specified {
            self.save(DEFAULT_SECTION, false);
        }
        if let Err(e) = self.reload_image_config() {
            tracing::warn!("Failed to apply camera mode {}: {}", mode, e);
        }
        accepted
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.lock();
        let state = guard.borrow();
        f.debug_struct("ConfigStore")
            .field("codec", &self.codec.name())
            .field("privileged", &self.privileged)
            .field("attributes", &state.attributes.len())
            .field("dynamic", &state.dynamic.len())
            .field("modified", &state.modified.len())
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Builder for [`ConfigStore`].
pub struct ConfigStoreBuilder {
    codec: Box<dyn DocumentCodec>,
    privileged: bool,
    install_defaults: bool,
}

impl ConfigStoreBuilder {
    /// Creates a builder for an empty store writing pretty JSON.
    ///
    /// The store is privileged when the crate is built with the `internal`
    /// feature.
    pub fn new() -> Self {
        Self {
            codec: Box::new(JsonCodec::pretty()),
            privileged: cfg!(feature = "internal"),
            install_defaults: false,
        }
    }

    /// Sets the codec used for backing files.
    pub fn codec(mut self, codec: impl DocumentCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    /// Sets the codec matching a backing file's extension.
    ///
    /// Unknown extensions keep the current codec.
    pub fn codec_for_path(mut self, path: impl AsRef<Path>) -> Self {
        match codec_for_path(path.as_ref()) {
            Some(codec) => self.codec = codec,
            None => tracing::debug!(
                "No codec for {}, keeping {}",
                path.as_ref().display(),
                self.codec.name()
            ),
        }
        self
    }

    /// Sets whether restricted attributes accept user-specified writes.
    pub fn privileged(mut self, privileged: bool) -> Self {
        self.privileged = privileged;
        self
    }

    /// Installs the standard catalogue when the store is built.
    pub fn with_defaults(mut self) -> Self {
        self.install_defaults = true;
        self
    }

    /// Builds the store.
    pub fn build(self) -> ConfigStore {
        let store = ConfigStore {
            state: ReentrantMutex::new(RefCell::new(StoreState::default())),
            codec: self.codec,
            privileged: self.privileged,
        };
        if self.install_defaults {
            store.install_defaults();
        }
        store
    }
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
