//! Newtype identifiers.
//!
//! Identifiers assigned by the repository are opaque strings on the wire. Each
//! gets its own newtype so that, for example, a [`TicketId`] cannot be passed
//! where a [`UserId`] is expected.

use serde::{Deserialize, Serialize};

use crate::ModelError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and a
// TryFrom<String> that deserialization goes through.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(ModelError::EmptyIdentifier {
                    kind: stringify!($name),
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// An authentication ticket issued by the repository.
    ///
    /// Tickets look like `TICKET_<hex>` but are treated as opaque.
    TicketId
}

string_id! {
    /// A user (person) identifier, e.g. `"admin"`.
    ///
    /// Matches the `userId` / `id` fields of people and ticket payloads.
    UserId
}
