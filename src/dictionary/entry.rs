//! Dictionary entries and their feature columns.

use serde::{Deserialize, Serialize};

use crate::constants::{FEATURE_NONE, TAG_SYMBOL};

pub(crate) const FEATURE_TAG: usize = 0;
pub(crate) const FEATURE_SEMANTIC: usize = 1;
pub(crate) const FEATURE_JONGSUNG: usize = 2;
pub(crate) const FEATURE_READING: usize = 3;
pub(crate) const FEATURE_TYPE: usize = 4;
pub(crate) const FEATURE_FIRST_POS: usize = 5;
pub(crate) const FEATURE_LAST_POS: usize = 6;
pub(crate) const FEATURE_ORIGINAL: usize = 7;
pub(crate) const FEATURE_INDEXED: usize = 8;

/// Entry type from the fifth feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryType {
    /// Plain morpheme (`*`).
    #[default]
    Regular,
    /// Stem and ending fused into one surface.
    Inflect,
    /// Compound noun made of several nouns.
    Compound,
    /// Pre-analyzed expression.
    Preanalysis,
}

impl EntryType {
    /// Parses the feature value; `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | FEATURE_NONE => Some(EntryType::Regular),
            "Inflect" => Some(EntryType::Inflect),
            "Compound" => Some(EntryType::Compound),
            "Preanalysis" => Some(EntryType::Preanalysis),
            _ => None,
        }
    }

    /// Feature value as written in dictionary files.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Regular => FEATURE_NONE,
            EntryType::Inflect => "Inflect",
            EntryType::Compound => "Compound",
            EntryType::Preanalysis => "Preanalysis",
        }
    }
}

/// One morpheme candidate of the dictionary.
///
/// Feature columns follow the mecab-ko-dic layout: tag, semantic class,
/// trailing consonant flag, reading, type, first POS, last POS, original
/// form and indexed expression. The raw columns are kept for dump output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    surface: String,
    cost: i32,
    features: Vec<String>,
    entry_type: EntryType,
    pub(crate) left_id: u16,
    pub(crate) right_id: u16,
}

impl Entry {
    /// Builds an entry from its surface, emission cost and feature columns.
    ///
    /// An unrecognized type column is treated as [`EntryType::Regular`];
    /// the lexicon loader rejects such rows before getting here.
    pub fn new(surface: impl Into<String>, cost: i32, features: Vec<String>) -> Self {
        let entry_type = features
            .get(FEATURE_TYPE)
            .and_then(|value| EntryType::parse(value))
            .unwrap_or_default();
        Self {
            surface: surface.into(),
            cost,
            features,
            entry_type,
            left_id: 0,
            right_id: 0,
        }
    }

    /// Template entry for surfaces that are taken from the input text.
    pub(crate) fn template(tag: &str, cost: i32) -> Self {
        let mut features = vec![tag.to_string()];
        features.extend((1..FEATURE_ORIGINAL + 1).map(|_| FEATURE_NONE.to_string()));
        Self::new("", cost, features)
    }

    /// Surface form. Empty for unknown-category and rule templates.
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Emission cost.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// POS tag, `SY` when the feature list is empty.
    pub fn tag(&self) -> &str {
        self.features
            .get(FEATURE_TAG)
            .map(String::as_str)
            .filter(|tag| !tag.is_empty())
            .unwrap_or(TAG_SYMBOL)
    }

    /// Semantic class.
    pub fn semantic(&self) -> Option<&str> {
        self.feature(FEATURE_SEMANTIC)
    }

    /// Whether the surface ends in a syllable with a final consonant.
    pub fn has_jongsung(&self) -> Option<bool> {
        match self.feature(FEATURE_JONGSUNG)? {
            "T" => Some(true),
            "F" => Some(false),
            _ => None,
        }
    }

    /// Reading, or the surface itself when none is recorded.
    pub fn reading(&self) -> &str {
        self.feature(FEATURE_READING).unwrap_or(self.surface.as_str())
    }

    /// Entry type.
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// First POS of a multi-morpheme entry.
    pub fn first_pos(&self) -> Option<&str> {
        self.feature(FEATURE_FIRST_POS)
    }

    /// Last POS of a multi-morpheme entry.
    pub fn last_pos(&self) -> Option<&str> {
        self.feature(FEATURE_LAST_POS)
    }

    /// Decomposition such as `이/VCP/*+ㄴ가/EF/*`.
    pub fn original(&self) -> Option<&str> {
        self.feature(FEATURE_ORIGINAL)
    }

    /// Indexed expression.
    pub fn indexed(&self) -> Option<&str> {
        self.feature(FEATURE_INDEXED)
    }

    /// Raw feature columns in file order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// POS used when this entry is the right side of a connection.
    pub fn left_pos(&self) -> &str {
        self.first_pos().unwrap_or_else(|| self.tag())
    }

    /// POS used when this entry is the left side of a connection.
    pub fn right_pos(&self) -> &str {
        self.last_pos().unwrap_or_else(|| self.tag())
    }

    fn feature(&self, index: usize) -> Option<&str> {
        self.features
            .get(index)
            .map(String::as_str)
            .filter(|value| !value.is_empty() && *value != FEATURE_NONE)
    }
}
