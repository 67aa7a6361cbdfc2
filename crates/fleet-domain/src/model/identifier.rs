//! Identifiers - Validated string newtypes
//!
//! FleetId, UserId and PlateNumber share a representation but are
//! distinct types: a `UserId` can never be passed where a `FleetId`
//! is expected. The only rule is "not empty once trimmed"; the raw
//! value is stored untouched.

use crate::error::FleetError;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Build from a raw string, rejecting empty or whitespace-only input
            pub fn new(raw: impl Into<String>) -> Result<Self, FleetError> {
                let raw = raw.into();
                if raw.trim().is_empty() {
                    return Err(FleetError::InvalidIdentifier {
                        kind: $kind,
                        reason: "empty",
                    });
                }
                Ok(Self(raw))
            }

            /// Whether `new` would accept this input
            pub fn is_valid(raw: &str) -> bool {
                !raw.trim().is_empty()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = FleetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

identifier!(
    /// Unique identifier for a Fleet
    FleetId,
    "fleet ID"
);

identifier!(
    /// Identifier of the user owning a Fleet
    UserId,
    "user ID"
);

identifier!(
    /// Natural key of a Vehicle within a Fleet
    PlateNumber,
    "plate number"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers_keep_raw_value() {
        for raw in ["fleet-1", "  padded  ", "é-日本-123", "a"] {
            assert_eq!(FleetId::new(raw).unwrap().as_str(), raw);
            assert_eq!(UserId::new(raw).unwrap().as_str(), raw);
            assert_eq!(PlateNumber::new(raw).unwrap().as_str(), raw);
            assert!(PlateNumber::is_valid(raw));
        }
    }

    #[test]
    fn test_empty_identifiers_rejected() {
        for raw in ["", " ", "\t\n", "   "] {
            assert!(!FleetId::is_valid(raw));
            assert!(!UserId::is_valid(raw));
            assert!(!PlateNumber::is_valid(raw));
        }

        let err = FleetId::new("  ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid fleet ID: empty");
        assert_eq!(
            UserId::new("").unwrap_err().to_string(),
            "Invalid user ID: empty"
        );
        assert_eq!(
            PlateNumber::new("\t").unwrap_err().to_string(),
            "Invalid plate number: empty"
        );
    }

    #[test]
    fn test_no_normalization() {
        let upper = PlateNumber::new("ABC-123").unwrap();
        let lower = PlateNumber::new("abc-123").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_from_str() {
        let id: UserId = "user-1".parse().unwrap();
        assert_eq!(id.to_string(), "user-1");
        assert!("".parse::<UserId>().is_err());
    }
}
