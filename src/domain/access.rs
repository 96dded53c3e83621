// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access tiers for registered attributes.

use crate::domain::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy controlling which writes an attribute accepts.
///
/// Tiers are fixed when the attribute is registered and never change
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    /// Never writable through `set_attribute`.
    ReadOnly,
    /// Writable internally; user-specified writes only in a privileged store.
    WriteRestricted,
    /// Writable by anyone, and listed among the public attributes.
    WriteOpen,
}

impl AccessTier {
    /// Returns true if a write with the given provenance is allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use valcfg::domain::AccessTier;
    ///
    /// assert!(!AccessTier::ReadOnly.permits(false, true));
    /// assert!(AccessTier::WriteRestricted.permits(false, false));
    /// assert!(!AccessTier::WriteRestricted.permits(true, false));
    /// assert!(AccessTier::WriteRestricted.permits(true, true));
    /// assert!(AccessTier::WriteOpen.permits(true, false));
    /// ```
    pub fn permits(self, user_specified: bool, privileged: bool) -> bool {
        match self {
            AccessTier::ReadOnly => false,
            AccessTier::WriteRestricted => privileged || !user_specified,
            AccessTier::WriteOpen => true,
        }
    }

    /// Returns true if attributes of this tier are exposed publicly.
    pub fn is_public(self) -> bool {
        self == AccessTier::WriteOpen
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessTier::ReadOnly => "read-only",
            AccessTier::WriteRestricted => "write-restricted",
            AccessTier::WriteOpen => "write-open",
        };
        f.write_str(name)
    }
}

/// A stored attribute: its current value and access tier.
#[derive(Clone, Debug)]
pub struct Attribute {
    /// The current value
    pub value: Value,
    /// The tier fixed at registration
    pub tier: AccessTier,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(value: impl Into<Value>, tier: AccessTier) -> Self {
        Self {
            value: value.into(),
            tier,
        }
    }
}
