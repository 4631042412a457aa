//! String-backed identifier wrappers.
//!
//! Roster identifiers are human-readable (`S01`, `S02`, ...) because they
//! appear verbatim in URLs, dashboard tables, and chat responses. Subjects
//! are likewise identified by their catalog name (`CSE-2A`, `DBMS`). Both
//! get newtype wrappers so the compiler prevents accidental mixing.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_name_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner [`String`].
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
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
    };
}

define_name_id! {
    /// Roster-issued identifier for a student (e.g. `S07`).
    StudentId
}

define_name_id! {
    /// Catalog name of a taught subject (e.g. `DBMS`).
    Subject
}
