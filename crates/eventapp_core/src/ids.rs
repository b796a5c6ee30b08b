//! Strongly-typed document IDs. Store-assigned IDs are opaque, so the only rule is "non-empty".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// IDs are taken verbatim: a padded ID would address a different document.
fn validate_id(kind: &str, s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err(format!("Invalid {}: empty", kind));
    }
    if s.trim() != s {
        return Err(format!("Invalid {}: surrounding whitespace in {:?}", kind, s));
    }
    Ok(s.to_string())
}

/// Identity-service user ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

/// `events` document ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

/// `favorites` document ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FavoriteId(String);

macro_rules! id_type {
    ($name:ident, $kind:literal) => {
        impl $name {
            pub fn parse(s: impl AsRef<str>) -> Result<Self, String> {
                Self::from_str(s.as_ref())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
        impl FromStr for $name {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(validate_id($kind, s)?))
            }
        }
        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                ser.serialize_str(&self.0)
            }
        }
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                let s = String::deserialize(de)?;
                Self::from_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
id_type!(UserId, "user id");
id_type!(EventId, "event id");
id_type!(FavoriteId, "favorite id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank_ids() {
        assert!(EventId::parse("").is_err());
        assert!(UserId::parse("   ").is_err());
    }

    #[test]
    fn parse_rejects_padded_ids() {
        assert!(EventId::parse(" ev1 ").is_err());
        assert!(UserId::parse("alice\n").is_err());
        assert_eq!(EventId::parse("ev 1").unwrap().as_str(), "ev 1");
        assert!(serde_json::from_str::<EventId>("\" ev1\"").is_err());
    }

    #[test]
    fn serde_uses_plain_strings() {
        let id = FavoriteId::parse("fav-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"fav-1\"");
        let back: FavoriteId = serde_json::from_str("\"fav-1\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
