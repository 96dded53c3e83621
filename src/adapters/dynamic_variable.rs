// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic attribute adapter over a shared variable.
//!
//! The owning subsystem keeps an `Arc<RwLock<T>>` and hands a clone to the
//! store. Reads through the store see the variable's current value and
//! writes through the store update it in place.

use crate::domain::{FromValue, Value};
use crate::ports::DynamicAttribute;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A [`DynamicAttribute`] bound to a shared, lock-protected variable.
///
/// Incoming values are coerced to `T` with the value model's lenient rules,
/// so a write never fails.
///
/// # Examples
///
/// ```rust
/// use valcfg::adapters::DynamicVariable;
/// use valcfg::domain::Value;
/// use valcfg::ports::DynamicAttribute;
/// use parking_lot::RwLock;
/// use std::sync::Arc;
///
/// let fps = Arc::new(RwLock::new(60i32));
/// let binding = DynamicVariable::new(fps.clone());
///
/// assert!(binding.set(&Value::from("120")));
/// assert_eq!(*fps.read(), 120);
///
/// *fps.write() = 30;
/// assert_eq!(binding.get(), Value::Int(30));
/// ```
pub struct DynamicVariable<T> {
    shared: Arc<RwLock<T>>,
}

impl<T> DynamicVariable<T> {
    /// Binds to an existing shared variable.
    pub fn new(shared: Arc<RwLock<T>>) -> Self {
        DynamicVariable { shared }
    }

    /// Creates a binding that owns a fresh variable holding `initial`.
    pub fn with_value(initial: T) -> Self {
        Self::new(Arc::new(RwLock::new(initial)))
    }

    /// Returns a handle to the bound variable.
    pub fn shared(&self) -> Arc<RwLock<T>> {
        Arc::clone(&self.shared)
    }
}

impl<T> DynamicAttribute for DynamicVariable<T>
where
    T: FromValue + Into<Value> + Clone + Send + Sync,
{
    fn get(&self) -> Value {
        self.shared.read().clone().into()
    }

    fn set(&self, value: &Value) -> bool {
        *self.shared.write() = value.coerce_to::<T>();
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicVariable")
            .field("value", &*self.shared.read())
            .finish()
    }
}
