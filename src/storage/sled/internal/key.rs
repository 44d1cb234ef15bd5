use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::storage::{sled::error::SledStorageError, TodoId};
use strum::AsRefStr;
use strum_macros::{Display, EnumString};

#[derive(Debug, EnumString, AsRefStr, Display, PartialEq, Eq, Copy, Clone)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum PrefixKind {
    Todo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyPrefix {
    prefix: String,
}

impl KeyPrefix {
    pub fn from_kind(kind: PrefixKind) -> Self {
        Self {
            prefix: format!("{}:", kind.as_ref()),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        self.prefix.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.prefix.as_bytes()
    }
}

impl std::fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.prefix.fmt(f)
    }
}

/// `<kind>:<id>` key of a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Key {
    full_key: String,
}

impl Key {
    pub fn new(prefix: KeyPrefix, value: impl Display) -> Self {
        Self {
            full_key: format!("{}{}", prefix.as_str(), value),
        }
    }

    pub fn todo(id: &TodoId) -> Self {
        Self::new(KeyPrefix::from_kind(PrefixKind::Todo), id)
    }

    #[instrument(name = "Key::from_bytes", skip_all, level = "debug")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SledStorageError> {
        let full_key = std::str::from_utf8(bytes)
            .map_err(SledStorageError::Conversion)?
            .to_string();

        match full_key.split_once(':') {
            Some((kind, value)) if PrefixKind::from_str(kind).is_ok() && !value.is_empty() => {
                debug!(key = %full_key, "created key from bytes");
                Ok(Self { full_key })
            }
            _ => Err(SledStorageError::InvalidKey(full_key)),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.full_key.as_bytes()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.full_key.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key() {
        let key1 = Key::new(KeyPrefix::from_kind(PrefixKind::Todo), "xxx");
        assert_eq!(key1.full_key, "todo:xxx");

        let id = TodoId::new();
        let key2 = Key::todo(&id);
        assert_eq!(key2.to_string(), format!("todo:{id}"));
        assert!(key2.as_bytes().starts_with(KeyPrefix::from_kind(PrefixKind::Todo).as_bytes()));

        let key3 = Key::from_bytes("todo:xxx".as_bytes()).unwrap();
        assert_eq!(key3, key1);

        assert!(Key::from_bytes("todo".as_bytes()).is_err());
        assert!(Key::from_bytes("todo:".as_bytes()).is_err());
        assert!(Key::from_bytes("user:xxx".as_bytes()).is_err());
    }
}
