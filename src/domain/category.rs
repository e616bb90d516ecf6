//! Category records and the id → type mapping served to clients.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Category types inserted at startup when the table is empty.
pub const DEFAULT_CATEGORY_TYPES: [&str; 6] = [
    "Art",
    "Entertainment",
    "Geography",
    "History",
    "Science",
    "Sports",
];

/// Categories keyed by id, serialized as `{"1": "Art", ...}`.
pub type CategoryMap = BTreeMap<i64, String>;

/// A labeled grouping of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i64, kind: impl Into<String>) -> Self {
        Category {
            id,
            kind: kind.into(),
        }
    }
}

/// Category id as sent by clients.
///
/// Clients echo the keys of [`CategoryMap`], which are JSON strings, so both
/// `3` and `"3"` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(id) => Ok(CategoryId(id)),
            Raw::Str(s) => s.trim().parse::<i64>().map(CategoryId).map_err(|_| {
                serde::de::Error::custom(format!("Wrong value {s}, can not parse to i64"))
            }),
        }
    }
}
