use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONNECTION_PENALTY, DEFAULT_MAX_INPUT_CHARS, DEFAULT_RULE_COST};
use crate::dictionary::entry::EntryType;
use crate::discovery::discover_default_dictionary_path;
use crate::model::Morph;

/// Output shape of [`crate::Engine::pos`].
///
/// The default is flat `(surface, tag)` pairs without inflection splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosOptions {
    /// One flat sequence instead of one sequence per eojeol.
    pub flatten: bool,
    /// Render each morph as `surface/tag`.
    pub join: bool,
    /// Replace split-eligible entries by their morphemes.
    pub split_inflect: bool,
}

impl Default for PosOptions {
    fn default() -> Self {
        Self {
            flatten: true,
            join: false,
            split_inflect: false,
        }
    }
}

impl PosOptions {
    /// Sets `flatten`.
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Sets `join`.
    pub fn with_join(mut self, join: bool) -> Self {
        self.join = join;
        self
    }

    /// Sets `split_inflect`.
    pub fn with_split_inflect(mut self, split_inflect: bool) -> Self {
        self.split_inflect = split_inflect;
        self
    }
}

/// Pretokenization rule: every match inside an eojeol becomes one morph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexRule {
    /// Regular expression in `regex` crate syntax.
    pub pattern: String,
    /// Tag assigned to matches.
    pub tag: String,
    /// Emission cost of the forced node.
    pub cost: i32,
}

impl RegexRule {
    /// Creates a rule with the default cost.
    pub fn new(pattern: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            tag: tag.into(),
            cost: DEFAULT_RULE_COST,
        }
    }

    /// Sets the emission cost.
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }
}

/// Engine construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Dictionary directory. `None` fails construction.
    pub dictionary_path: Option<PathBuf>,
    /// Cost of POS pairs missing from `connection.csv`.
    pub connection_penalty: i32,
    /// Longest accepted input, in characters.
    pub max_input_chars: usize,
    /// Options used by [`crate::Engine::pos_default`].
    pub default_pos_options: PosOptions,
    /// Pretokenization rules; earlier rules win overlapping matches.
    pub rules: Vec<RegexRule>,
    /// Entry types expanded when `split_inflect` is on.
    #[serde(default = "default_split_types")]
    pub split_types: Vec<EntryType>,
}

pub(crate) fn default_split_types() -> Vec<EntryType> {
    vec![EntryType::Inflect]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dictionary_path: discover_default_dictionary_path(),
            connection_penalty: DEFAULT_CONNECTION_PENALTY,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            default_pos_options: PosOptions::default(),
            rules: Vec::new(),
            split_types: default_split_types(),
        }
    }
}

impl EngineConfig {
    /// Sets the dictionary directory.
    pub fn with_dictionary_path(mut self, dictionary_path: impl AsRef<Path>) -> Self {
        self.dictionary_path = Some(dictionary_path.as_ref().to_path_buf());
        self
    }

    /// Sets the missing-pair connection penalty.
    pub fn with_connection_penalty(mut self, connection_penalty: i32) -> Self {
        self.connection_penalty = connection_penalty;
        self
    }

    /// Sets the input length limit.
    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    /// Sets the options used by [`crate::Engine::pos_default`].
    pub fn with_default_pos_options(mut self, options: PosOptions) -> Self {
        self.default_pos_options = options;
        self
    }

    /// Appends a pretokenization rule.
    pub fn add_rule(mut self, pattern: impl Into<String>, tag: impl Into<String>) -> Self {
        self.rules.push(RegexRule::new(pattern, tag));
        self
    }

    /// Appends a fully specified pretokenization rule.
    pub fn with_rule(mut self, rule: RegexRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the entry types expanded when `split_inflect` is on.
    pub fn with_split_types(mut self, split_types: impl Into<Vec<EntryType>>) -> Self {
        self.split_types = split_types.into();
        self
    }
}

/// One morph of an analysis with its position in the input.
///
/// `start` and `end` are character offsets (`str.chars()` indices). Pieces
/// of a split entry that absorbed no characters have `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Covered input text.
    pub surface: String,
    /// POS tag.
    pub tag: String,
    /// Canonical form: the morpheme form for split pieces, otherwise the
    /// surface.
    pub form: String,
    /// Start character offset.
    pub start: usize,
    /// End character offset.
    pub end: usize,
    /// Index of the whitespace-delimited segment holding the token.
    pub eojeol: usize,
    /// Type of the dictionary entry the token came from.
    pub entry_type: EntryType,
}

impl Token {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the token covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Pair or `surface/tag` rendering.
    pub fn to_morph(&self, join: bool) -> Morph {
        Morph::new(&self.surface, &self.tag, join)
    }
}
