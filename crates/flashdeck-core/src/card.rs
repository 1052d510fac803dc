//! Card types shared between the client and the server.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque card identifier.
///
/// Servers may hand out numeric or string ids; both are accepted and the
/// original textual form is kept so it can be echoed back in requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<usize> for CardId {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => CardId(n.to_string()),
            RawId::Text(s) => CardId(s),
        })
    }
}

impl Serialize for CardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

/// A reviewable front/back pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub front: String,
    #[serde(default)]
    pub back: String,
}

impl Card {
    pub fn new(id: impl Into<CardId>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Payload for creating a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub front: String,
    #[serde(default)]
    pub back: String,
}

impl NewCard {
    /// Builds a payload with surrounding whitespace removed from both sides.
    pub fn new(front: &str, back: &str) -> Self {
        Self {
            front: front.trim().to_string(),
            back: back.trim().to_string(),
        }
    }

    /// A card can only be created with some front text.
    pub fn is_valid(&self) -> bool {
        !self.front.trim().is_empty()
    }
}
