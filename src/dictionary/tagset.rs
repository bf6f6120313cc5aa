use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::DEFAULT_TAGSET;
use crate::error::{HansegError, Result};

/// Tag code to human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagset {
    tags: BTreeMap<String, String>,
}

impl Default for Tagset {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGSET
                .iter()
                .map(|(tag, description)| (tag.to_string(), description.to_string()))
                .collect(),
        }
    }
}

impl Tagset {
    /// Parses a JSON object such as `{"NNG": "일반 명사"}`.
    pub(crate) fn from_json(path: &Path, content: &str) -> Result<Self> {
        let tags: BTreeMap<String, String> = serde_json::from_str(content).map_err(|error| {
            HansegError::dictionary_load(path, format!("invalid tagset JSON: {error}"))
        })?;
        if tags.is_empty() {
            return Err(HansegError::dictionary_load(path, "tagset is empty"));
        }
        Ok(Self { tags })
    }

    /// Description of a single tag.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).map(String::as_str)
    }

    /// Description of a possibly compound tag such as `VCP+EF`.
    ///
    /// Each part is described in turn and joined with ` + `; `None` when any
    /// part is unknown.
    pub fn describe(&self, tag: &str) -> Option<String> {
        let parts = tag
            .split('+')
            .map(|part| self.get(part))
            .collect::<Option<Vec<_>>>()?;
        Some(parts.join(" + "))
    }

    /// Iterates `(tag, description)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags
            .iter()
            .map(|(tag, description)| (tag.as_str(), description.as_str()))
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the tagset has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
