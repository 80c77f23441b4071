//! Strongly-typed identifier wrappers for OSM resources.
//!
//! OSM identifiers are opaque strings. They are never parsed or validated, only
//! forwarded into URL paths, but separate types keep an NS id from being passed
//! where a VNF package id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate opaque string identifier types.
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Converts into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

resource_id!(NsId, "Network service instance identifier");
resource_id!(VnfId, "VNF instance record identifier");
resource_id!(VnfPkgId, "VNF package identifier");
resource_id!(NsOpId, "NS lifecycle operation occurrence identifier");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_opaque() {
        let id = NsId::new("not a uuid / at all");
        assert_eq!(id.as_str(), "not a uuid / at all");
        assert_eq!(id.to_string(), "not a uuid / at all");
    }

    #[test]
    fn test_id_conversions() {
        let id: VnfPkgId = "pkg-1".into();
        let owned: String = id.clone().into();
        assert_eq!(owned, "pkg-1");
        assert_eq!(VnfPkgId::from(owned), id);
        assert_eq!(id.into_inner(), "pkg-1");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = NsOpId::new("op-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"op-42\"");

        let back: NsOpId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
