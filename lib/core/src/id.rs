//! Opaque string identifier types for domain entities.
//!
//! Identifiers generated by this crate are ULID strings, but consumers must
//! treat them as opaque: trigger clean-up joins scheduled state back to its
//! owning workflow by substring containment over composite keys, so the only
//! contract an id carries is its exact string value.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Macro to generate an opaque string-backed identifier type.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mints a new id backed by a freshly generated ULID string.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a workflow definition.
    WorkflowId
);

define_id!(
    /// Unique identifier for one trigger entry within a workflow's
    /// trigger configuration.
    TriggerId
);

define_id!(
    /// Unique identifier for a block within a workflow graph.
    BlockId
);
