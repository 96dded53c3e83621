// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic attribute trait definition.
//!
//! A dynamic attribute is a registry entry backed by a live variable owned by
//! some other subsystem. The registry only holds a shared handle to it.

use crate::domain::Value;

/// A live binding the configuration store can read and write.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the store may call them from any
/// thread that touches the registry.
///
/// # Examples
///
/// ```rust
/// use valcfg::ports::DynamicAttribute;
/// use valcfg::domain::Value;
/// use std::sync::atomic::{AtomicI64, Ordering};
///
/// struct Counter(AtomicI64);
///
/// impl DynamicAttribute for Counter {
///     fn get(&self) -> Value {
///         Value::Int(self.0.load(Ordering::SeqCst))
///     }
///
///     fn set(&self, value: &Value) -> bool {
///         if !value.is_numeric() {
///             return false;
///         }
///         self.0.store(value.coerce_to::<i64>(), Ordering::SeqCst);
///         true
///     }
/// }
///
/// let counter = Counter(AtomicI64::new(1));
/// assert!(counter.set(&Value::Int(5)));
/// assert!(!counter.set(&Value::from("five")));
/// assert_eq!(counter.get(), Value::Int(5));
/// ```
pub trait DynamicAttribute: Send + Sync {
    /// Returns the current value of the bound variable.
    fn get(&self) -> Value;

    /// Writes `value` into the bound variable.
    ///
    /// Returns false if the binding refused the value; the store then skips
    /// change notification.
    fn set(&self, value: &Value) -> bool;
}
