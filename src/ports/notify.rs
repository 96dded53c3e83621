// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change notification callback type.

use crate::domain::Value;
use std::sync::Arc;

/// Type alias for change notification callbacks.
///
/// Invoked with the attribute name and its new value after every successful
/// `set_attribute`. Callbacks run synchronously on the mutating thread and may
/// call back into the store.
pub type ChangeCallback = Arc<dyn Fn(&str, &Value) + Send + Sync>;
