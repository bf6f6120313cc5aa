//! Surface-form lexicon backed by a double-array trie.

use std::collections::BTreeMap;
use std::path::Path;

use crate::dictionary::entry::{Entry, EntryType, FEATURE_TYPE};
use crate::error::{HansegError, Result};
use crate::utils::parse_csv_row;

/// Maps surface forms to the ids of every entry sharing that surface.
///
/// Ids inside one posting list keep the order of `lex.csv`.
pub(crate) struct WordMap {
    trie: crawdad::Trie,
    postings: Vec<Vec<u32>>,
}

impl WordMap {
    pub(crate) fn new<I, W>(words: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut map: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for (i, word) in words.into_iter().enumerate() {
            let id = u32::try_from(i).map_err(|error| error.to_string())?;
            map.entry(word.as_ref().to_string()).or_default().push(id);
        }

        let mut records = Vec::with_capacity(map.len());
        let mut postings = Vec::with_capacity(map.len());
        for (word, ids) in map {
            let offset = u32::try_from(postings.len()).map_err(|error| error.to_string())?;
            postings.push(ids);
            records.push((word, offset));
        }

        let trie = crawdad::Trie::from_records(records.iter().map(|(k, v)| (k, *v)))
            .map_err(|error| error.to_string())?;
        Ok(Self { trie, postings })
    }

    /// Yields `(entry id, end char)` for every surface that prefixes `input`.
    ///
    /// Shorter surfaces come first.
    pub(crate) fn common_prefix_iterator<'s, 'i>(
        &'s self,
        input: &'i [char],
    ) -> impl Iterator<Item = (u32, usize)> + 'i
    where
        's: 'i,
    {
        self.trie
            .common_prefix_search(input.iter().cloned())
            .flat_map(move |(value, end_char)| {
                self.postings[value as usize]
                    .iter()
                    .map(move |&id| (id, end_char))
            })
    }
}

/// Entries of `lex.csv` plus their surface index.
pub(crate) struct Lexicon {
    entries: Vec<Entry>,
    map: WordMap,
}

impl Lexicon {
    /// Parses `lex.csv` content.
    ///
    /// Each row is `surface,cost,tag[,feature...]`; `#` lines and blank
    /// lines are skipped.
    pub(crate) fn from_csv(path: &Path, content: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            entries.push(parse_entry_row(path, line_no, line)?);
        }
        if entries.is_empty() {
            return Err(HansegError::dictionary_load(path, "lexicon has no entries"));
        }

        let map = WordMap::new(entries.iter().map(Entry::surface)).map_err(|message| {
            HansegError::dictionary_load(path, format!("failed to build trie: {message}"))
        })?;
        Ok(Self { entries, map })
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub(crate) fn entry(&self, id: u32) -> &Entry {
        &self.entries[id as usize]
    }

    pub(crate) fn common_prefix_iterator<'s, 'i>(
        &'s self,
        input: &'i [char],
    ) -> impl Iterator<Item = (&'s Entry, usize)> + 'i
    where
        's: 'i,
    {
        self.map
            .common_prefix_iterator(input)
            .map(move |(id, end_char)| (self.entry(id), end_char))
    }
}

fn parse_entry_row(path: &Path, line_no: usize, line: &str) -> Result<Entry> {
    let row_error = |message: String| {
        HansegError::dictionary_load(path, format!("line {line_no}: {message}"))
    };

    let mut fields = parse_csv_row(line).ok_or_else(|| row_error("field too long".to_string()))?;
    if fields.len() < 3 {
        return Err(row_error(format!(
            "expected at least 3 fields (surface,cost,tag), found {}",
            fields.len()
        )));
    }
    let features = fields.split_off(2);
    let cost_field = fields.pop().unwrap_or_default();
    let surface = fields.pop().unwrap_or_default();

    if surface.is_empty() {
        return Err(row_error("empty surface".to_string()));
    }
    if surface.chars().any(char::is_whitespace) {
        return Err(row_error(format!("surface {surface:?} contains whitespace")));
    }
    let cost: i32 = cost_field
        .trim()
        .parse()
        .map_err(|error| row_error(format!("invalid cost {cost_field:?}: {error}")))?;
    if cost < 0 {
        return Err(row_error(format!("negative cost {cost} for {surface:?}")));
    }
    if features[0].is_empty() {
        return Err(row_error(format!("empty tag for {surface:?}")));
    }
    if let Some(kind) = features.get(FEATURE_TYPE) {
        if EntryType::parse(kind).is_none() {
            return Err(row_error(format!("unknown entry type {kind:?}")));
        }
    }

    Ok(Entry::new(surface, cost, features))
}
