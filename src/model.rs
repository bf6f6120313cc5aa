use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dictionary::entry::EntryType;
use crate::types::{default_split_types, EngineConfig, PosOptions, RegexRule};

/// One output morph: a `(surface, tag)` pair or a joined `surface/tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Morph {
    /// `(surface, tag)`.
    Pair(String, String),
    /// `surface/tag`.
    Joined(String),
}

impl Morph {
    /// Builds a pair, or a joined string when `join` is set.
    pub fn new(surface: &str, tag: &str, join: bool) -> Self {
        if join {
            Morph::Joined(format!("{surface}/{tag}"))
        } else {
            Morph::Pair(surface.to_string(), tag.to_string())
        }
    }

    /// Surface part. For joined morphs everything before the last `/`.
    pub fn surface(&self) -> &str {
        match self {
            Morph::Pair(surface, _) => surface,
            Morph::Joined(joined) => joined
                .rsplit_once('/')
                .map_or(joined.as_str(), |(surface, _)| surface),
        }
    }

    /// Tag part. For joined morphs everything after the last `/`.
    pub fn tag(&self) -> &str {
        match self {
            Morph::Pair(_, tag) => tag,
            Morph::Joined(joined) => joined.rsplit_once('/').map_or("", |(_, tag)| tag),
        }
    }
}

impl fmt::Display for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Morph::Pair(surface, tag) => write!(f, "{surface}/{tag}"),
            Morph::Joined(joined) => f.write_str(joined),
        }
    }
}

/// Result of [`crate::Engine::pos`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PosOutput {
    /// `flatten = true`.
    Flat(Vec<Morph>),
    /// `flatten = false`: one sequence per eojeol.
    Eojeols(Vec<Vec<Morph>>),
}

impl PosOutput {
    /// All morphs in order, dropping eojeol grouping.
    pub fn into_flat(self) -> Vec<Morph> {
        match self {
            PosOutput::Flat(morphs) => morphs,
            PosOutput::Eojeols(groups) => groups.into_iter().flatten().collect(),
        }
    }

    /// Flat morphs, or `None` for grouped output.
    pub fn as_flat(&self) -> Option<&[Morph]> {
        match self {
            PosOutput::Flat(morphs) => Some(morphs),
            PosOutput::Eojeols(_) => None,
        }
    }

    /// Eojeol groups, or `None` for flat output.
    pub fn as_eojeols(&self) -> Option<&[Vec<Morph>]> {
        match self {
            PosOutput::Flat(_) => None,
            PosOutput::Eojeols(groups) => Some(groups),
        }
    }

    /// Number of morphs across all groups.
    pub fn len(&self) -> usize {
        match self {
            PosOutput::Flat(morphs) => morphs.len(),
            PosOutput::Eojeols(groups) => groups.iter().map(Vec::len).sum(),
        }
    }

    /// Whether there are no morphs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serializable engine settings; see [`crate::Engine::state`].
///
/// Restoring reloads the dictionary from `dictionary_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    /// Dictionary directory the engine was built from.
    pub dictionary_path: PathBuf,
    /// Missing-pair connection penalty.
    pub connection_penalty: i32,
    /// Input length limit in characters.
    pub max_input_chars: usize,
    /// Options used by [`crate::Engine::pos_default`].
    #[serde(default)]
    pub default_pos_options: PosOptions,
    /// Pretokenization rules.
    #[serde(default)]
    pub rules: Vec<RegexRule>,
    /// Entry types expanded when `split_inflect` is on.
    #[serde(default = "default_split_types")]
    pub split_types: Vec<EntryType>,
}

impl From<EngineState> for EngineConfig {
    fn from(state: EngineState) -> Self {
        Self {
            dictionary_path: Some(state.dictionary_path),
            connection_penalty: state.connection_penalty,
            max_input_chars: state.max_input_chars,
            default_pos_options: state.default_pos_options,
            rules: state.rules,
            split_types: state.split_types,
        }
    }
}
