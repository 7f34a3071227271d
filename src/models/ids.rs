//! Strongly-typed ID wrappers for the ledger's category tables
//!
//! The ledger identifies categories and subcategories with plain integers.
//! Newtype wrappers keep the two from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw ledger identifier
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw ledger identifier
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(CategoryId, "cat-");
define_id!(SubcategoryId, "sub-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryId::new(7).to_string(), "cat-7");
        assert_eq!(SubcategoryId::new(-2).to_string(), "sub--2");
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        assert_eq!("12".parse::<SubcategoryId>().unwrap(), SubcategoryId::new(12));
        assert_eq!("sub-12".parse::<SubcategoryId>().unwrap(), SubcategoryId::new(12));
        assert_eq!(" cat-3 ".parse::<CategoryId>().unwrap(), CategoryId::new(3));
        assert!("groceries".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = SubcategoryId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let deserialized: SubcategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
