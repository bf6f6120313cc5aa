use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use regex::Regex;

use crate::constants::{DICT_PATH_ENV, NOUN_TAG_PREFIX};
use crate::dictionary::entry::{Entry, EntryType};
use crate::dictionary::tagset::Tagset;
use crate::dictionary::Dictionary;
use crate::error::{HansegError, Result};
use crate::format::{format, path_tokens, write_dump};
use crate::discovery::searched_dictionary_paths;
use crate::inflect::{InflectOnly, SplitPredicate, SplitTypes};
use crate::lattice::{ForcedSpan, Lattice, Node};
use crate::model::{EngineState, PosOutput};
use crate::scorer::PathScorer;
use crate::search::search;
use crate::types::{EngineConfig, PosOptions, RegexRule, Token};

struct CompiledRule {
    pattern: Regex,
    entry: Entry,
}

/// Morphological analyzer over one loaded dictionary.
///
/// An engine is immutable once built and can be shared across threads
/// behind an `Arc`; every call builds its own lattice.
///
/// # Examples
/// ```no_run
/// use hanseg::{Engine, PosOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = Engine::with_dictionary_path("/usr/local/share/hanseg/dic")?;
/// let output = engine.pos("곳인가?", PosOptions::default().with_split_inflect(true))?;
/// for morph in output.into_flat() {
///     println!("{morph}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Engine {
    dictionary: Dictionary,
    rules: Vec<CompiledRule>,
    rule_sources: Vec<RegexRule>,
    splitter: Box<dyn SplitPredicate>,
    connection_penalty: i32,
    max_input_chars: usize,
    default_pos_options: PosOptions,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("dictionary_path", &self.dictionary.path())
            .field("entries", &self.dictionary.len())
            .field("rules", &self.rule_sources)
            .field("connection_penalty", &self.connection_penalty)
            .field("max_input_chars", &self.max_input_chars)
            .finish()
    }
}

impl Engine {
    /// Creates an engine using [`EngineConfig::default`], which looks for a
    /// dictionary in `HANSEG_DICT_PATH` and then in well-known directories.
    pub fn new() -> Result<Self> {
        Self::from_config(EngineConfig::default())
    }

    /// Shorthand for setting only the dictionary directory.
    pub fn with_dictionary_path(dictionary_path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(EngineConfig::default().with_dictionary_path(dictionary_path))
    }

    /// Creates an engine from a full [`EngineConfig`].
    ///
    /// # Examples
    /// ```no_run
    /// use hanseg::{Engine, EngineConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = EngineConfig::default()
    ///     .with_dictionary_path("/path/to/dic")
    ///     .add_rule(r"https?://\S+", "SL");
    /// let engine = Engine::from_config(config)?;
    /// let _ = engine.morphs("https://example.com 주소")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let Some(path) = config.dictionary_path else {
            let searched = searched_dictionary_paths();
            let listed = searched
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(HansegError::dictionary_load(
                searched
                    .first()
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(DICT_PATH_ENV)),
                format!(
                    "no dictionary directory found (searched {listed}); set {DICT_PATH_ENV} \
                     or EngineConfig::with_dictionary_path"
                ),
            ));
        };
        if config.max_input_chars == 0 {
            return Err(HansegError::validation("max_input_chars must be >= 1"));
        }

        let mut dictionary = Dictionary::load_with_penalty(&path, config.connection_penalty)?;
        let mut rules = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            rules.push(compile_rule(&mut dictionary, rule)?);
        }

        debug!(
            "engine ready: dictionary {}, {} rules, max {} chars",
            path.display(),
            rules.len(),
            config.max_input_chars
        );

        Ok(Self {
            dictionary,
            rules,
            rule_sources: config.rules,
            splitter: splitter_for(config.split_types),
            connection_penalty: config.connection_penalty,
            max_input_chars: config.max_input_chars,
            default_pos_options: config.default_pos_options,
        })
    }

    /// Rebuilds an engine from [`Self::state`]. The dictionary is reloaded
    /// from disk.
    pub fn from_state(state: EngineState) -> Result<Self> {
        Self::from_config(state.into())
    }

    /// Replaces the predicate deciding which entries `split_inflect` expands.
    /// Defaults to [`InflectOnly`].
    pub fn with_split_predicate(mut self, predicate: impl SplitPredicate + 'static) -> Self {
        self.splitter = Box::new(predicate);
        self
    }

    /// Settings needed to rebuild this engine.
    ///
    /// Fails with [`HansegError::Validation`] when the split predicate is not
    /// a plain type filter such as [`InflectOnly`] or [`SplitTypes`].
    pub fn state(&self) -> Result<EngineState> {
        let split_types = self.splitter.split_types().ok_or_else(|| {
            HansegError::validation("custom split predicates cannot be persisted")
        })?;
        Ok(EngineState {
            dictionary_path: self.dictionary.path().to_path_buf(),
            connection_penalty: self.connection_penalty,
            max_input_chars: self.max_input_chars,
            default_pos_options: self.default_pos_options,
            rules: self.rule_sources.clone(),
            split_types,
        })
    }

    /// Loaded dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Tag descriptions of the loaded dictionary.
    pub fn tagset(&self) -> &Tagset {
        self.dictionary.tagset()
    }

    /// Description of a tag; compound tags such as `VCP+EF` are described
    /// part by part.
    pub fn tag_description(&self, tag: &str) -> Option<String> {
        self.dictionary.tagset().describe(tag)
    }

    /// POS-tags `phrase`.
    ///
    /// Surfaces of the flat output concatenate to `phrase` without its
    /// whitespace; with `flatten = false` each group concatenates to one
    /// eojeol.
    pub fn pos(&self, phrase: &str, options: PosOptions) -> Result<PosOutput> {
        let tokens = self.tokenize(phrase, options.split_inflect)?;
        Ok(format(&tokens, options))
    }

    /// [`Self::pos`] with the configured default options.
    pub fn pos_default(&self, phrase: &str) -> Result<PosOutput> {
        self.pos(phrase, self.default_pos_options)
    }

    /// UTF-16 variant of [`Self::pos`]. Unpaired surrogates are rejected.
    pub fn pos_utf16(&self, phrase: &[u16], options: PosOptions) -> Result<PosOutput> {
        let phrase = String::from_utf16(phrase)
            .map_err(|error| HansegError::validation(format!("invalid UTF-16 input: {error}")))?;
        self.pos(&phrase, options)
    }

    /// Surfaces of the flat, unsplit analysis.
    pub fn morphs(&self, phrase: &str) -> Result<Vec<String>> {
        Ok(self
            .tokenize(phrase, false)?
            .into_iter()
            .map(|token| token.surface)
            .collect())
    }

    /// Surfaces of noun-tagged morphs, in order.
    pub fn nouns(&self, phrase: &str) -> Result<Vec<String>> {
        Ok(self
            .tokenize(phrase, false)?
            .into_iter()
            .filter(|token| token.tag.starts_with(NOUN_TAG_PREFIX))
            .map(|token| token.surface)
            .collect())
    }

    /// Best analysis as rich tokens with character offsets.
    pub fn tokenize(&self, phrase: &str, split_inflect: bool) -> Result<Vec<Token>> {
        let splitter = split_inflect.then_some(self.splitter.as_ref());
        self.analyze(phrase, |lattice, path| path_tokens(lattice, path, splitter))
    }

    /// MeCab-style dump of the best path, readable by [`crate::parse_dump`].
    pub fn dump(&self, phrase: &str) -> Result<String> {
        self.analyze(phrase, |lattice, path| {
            let mut out = String::new();
            write_dump(&mut out, lattice, path);
            out
        })
    }

    fn analyze<T>(
        &self,
        phrase: &str,
        render: impl FnOnce(&Lattice<'_>, &[Node<'_>]) -> T,
    ) -> Result<T> {
        self.validate(phrase)?;
        let forced = self.forced_spans(phrase);
        let mut lattice = Lattice::build(&self.dictionary, phrase, &forced);
        let scorer = PathScorer::new(self.dictionary.connector(), self.dictionary.boundary());
        let path = search(&mut lattice, &scorer)?;
        if log::log_enabled!(log::Level::Trace) {
            let entries: Vec<&Entry> = path.iter().map(|node| node.entry).collect();
            trace!(
                "analyzed {} chars into {} nodes ({} forced), cost {}",
                lattice.char_len(),
                path.len(),
                forced.len(),
                scorer.path_cost(&entries)
            );
        }
        Ok(render(&lattice, &path))
    }

    fn validate(&self, phrase: &str) -> Result<()> {
        if phrase.contains('\0') {
            return Err(HansegError::validation("input must not contain NUL"));
        }
        let len = phrase.chars().count();
        if len > self.max_input_chars {
            return Err(HansegError::validation(format!(
                "input has {len} chars, limit is {}",
                self.max_input_chars
            )));
        }
        Ok(())
    }

    /// Rule matches inside each eojeol; earlier rules win overlaps.
    fn forced_spans(&self, phrase: &str) -> Vec<ForcedSpan<'_>> {
        if self.rules.is_empty() {
            return Vec::new();
        }

        let mut spans: Vec<ForcedSpan<'_>> = Vec::new();
        for (char_offset, eojeol) in eojeols(phrase) {
            let first = spans.len();
            for rule in &self.rules {
                for found in rule.pattern.find_iter(eojeol) {
                    if found.start() == found.end() {
                        continue;
                    }
                    let start = char_offset + eojeol[..found.start()].chars().count();
                    let end = start + found.as_str().chars().count();
                    if spans[first..]
                        .iter()
                        .any(|span| ranges_overlap(start, end, span.start, span.end))
                    {
                        continue;
                    }
                    spans.push(ForcedSpan {
                        start,
                        end,
                        entry: &rule.entry,
                    });
                }
            }
        }
        spans.sort_by_key(|span| span.start);
        spans
    }
}

fn splitter_for(split_types: Vec<EntryType>) -> Box<dyn SplitPredicate> {
    if split_types == [EntryType::Inflect] {
        Box::new(InflectOnly)
    } else {
        Box::new(SplitTypes(split_types))
    }
}

fn compile_rule(dictionary: &mut Dictionary, rule: &RegexRule) -> Result<CompiledRule> {
    let pattern = Regex::new(&rule.pattern).map_err(|error| {
        HansegError::validation(format!("invalid regex pattern {:?}: {error}", rule.pattern))
    })?;
    if rule.tag.is_empty() {
        return Err(HansegError::validation(format!(
            "rule {:?} has an empty tag",
            rule.pattern
        )));
    }
    if rule.cost < 0 {
        return Err(HansegError::validation(format!(
            "rule {:?} has negative cost {}",
            rule.pattern, rule.cost
        )));
    }
    let mut entry = Entry::template(&rule.tag, rule.cost);
    dictionary.bind_entry(&mut entry)?;
    Ok(CompiledRule { pattern, entry })
}

/// Whitespace-free segments of `text` with their starting char offset.
fn eojeols(text: &str) -> Vec<(usize, &str)> {
    let mut segments = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    for (char_index, (byte_index, c)) in text.char_indices().enumerate() {
        match (c.is_whitespace(), start) {
            (true, Some((char_start, byte_start))) => {
                segments.push((char_start, &text[byte_start..byte_index]));
                start = None;
            }
            (false, None) => start = Some((char_index, byte_index)),
            _ => {}
        }
    }
    if let Some((char_start, byte_start)) = start {
        segments.push((char_start, &text[byte_start..]));
    }
    segments
}

fn ranges_overlap(a_begin: usize, a_end: usize, b_begin: usize, b_end: usize) -> bool {
    a_begin < b_end && b_begin < a_end
}
