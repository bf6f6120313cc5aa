//! Read-only morpheme dictionary.
//!
//! A dictionary is a directory holding `lex.csv` (entries),
//! `connection.csv` (POS bigram costs), and optionally `tagset.json` and
//! `unknown.csv`. Everything is parsed and validated once in
//! [`Dictionary::load`]; afterwards the dictionary is immutable and can be
//! shared freely between threads.

pub(crate) mod connector;
pub(crate) mod entry;
pub(crate) mod lexicon;
pub(crate) mod tagset;
pub(crate) mod unknown;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{
    BOS_EOS_POS, CONNECTION_FILE, DEFAULT_CONNECTION_PENALTY, LEXICON_FILE, TAGSET_FILE,
    UNKNOWN_FILE,
};
use crate::error::{HansegError, Result};

use self::connector::{Connector, PosTable};
use self::entry::Entry;
use self::lexicon::Lexicon;
use self::tagset::Tagset;
use self::unknown::{CharCategory, CharRun, CharRuns, UnknownHandler};

/// One candidate returned by [`Dictionary::lookup`].
#[derive(Debug, Clone, Copy)]
pub struct LookupMatch<'a> {
    /// Matched entry. Unknown-category entries have an empty surface.
    pub entry: &'a Entry,
    /// Match length in characters.
    pub len: usize,
    /// Whether the entry came from the lexicon rather than the
    /// unknown-character fallback.
    pub known: bool,
}

/// Trie-backed dictionary plus its connection table and tagset.
pub struct Dictionary {
    path: PathBuf,
    lexicon: Lexicon,
    unknown: UnknownHandler,
    connector: Connector,
    pos_table: PosTable,
    tagset: Tagset,
    boundary: Entry,
}

impl Dictionary {
    /// Loads a dictionary directory with the default connection penalty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_penalty(path, DEFAULT_CONNECTION_PENALTY)
    }

    /// Loads a dictionary directory; POS pairs missing from
    /// `connection.csv` cost `default_connection_cost`.
    pub fn load_with_penalty(path: impl AsRef<Path>, default_connection_cost: i32) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(HansegError::dictionary_load(
                path,
                "dictionary directory does not exist",
            ));
        }

        let lexicon_path = path.join(LEXICON_FILE);
        let mut lexicon = Lexicon::from_csv(&lexicon_path, &read_required(&lexicon_path)?)?;

        let mut pos_table = PosTable::default();
        let connection_path = path.join(CONNECTION_FILE);
        let connector = Connector::from_csv(
            &connection_path,
            &read_required(&connection_path)?,
            &mut pos_table,
            default_connection_cost,
        )?;

        let mut unknown = UnknownHandler::new()?;
        let unknown_path = path.join(UNKNOWN_FILE);
        if let Some(content) = read_optional(&unknown_path)? {
            unknown.apply_overrides(&unknown_path, &content)?;
        }

        let tagset_path = path.join(TAGSET_FILE);
        let tagset = match read_optional(&tagset_path)? {
            Some(content) => Tagset::from_json(&tagset_path, &content)?,
            None => Tagset::default(),
        };

        for entry in lexicon.entries_mut() {
            intern_entry(&mut pos_table, entry)
                .ok_or_else(|| HansegError::dictionary_load(&lexicon_path, "too many POS names"))?;
        }
        for entry in unknown.entries_mut() {
            intern_entry(&mut pos_table, entry)
                .ok_or_else(|| HansegError::dictionary_load(&unknown_path, "too many POS names"))?;
        }
        let boundary = Entry::template(BOS_EOS_POS, 0);

        debug!(
            "loaded dictionary {}: {} entries, {} connection pairs, {} POS names, {} tags",
            path.display(),
            lexicon.entries().len(),
            connector.len(),
            pos_table.len(),
            tagset.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            lexicon,
            unknown,
            connector,
            pos_table,
            tagset,
            boundary,
        })
    }

    /// Directory this dictionary was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tagset loaded with the dictionary.
    pub fn tagset(&self) -> &Tagset {
        &self.tagset
    }

    /// Number of lexicon entries.
    pub fn len(&self) -> usize {
        self.lexicon.entries().len()
    }

    /// Whether the lexicon is empty. Loading rejects empty lexicons, so this
    /// is always `false` for a loaded dictionary.
    pub fn is_empty(&self) -> bool {
        self.lexicon.entries().is_empty()
    }

    /// Lexicon entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lexicon.entries().iter()
    }

    /// Connection cost applied to POS pairs missing from `connection.csv`.
    pub fn default_connection_cost(&self) -> i32 {
        self.connector.default_cost()
    }

    /// Every entry matching `text` at character `offset`.
    ///
    /// Lexicon matches come first, shortest surface first and then in file
    /// order, followed by unknown-character candidates. Matches never extend
    /// past whitespace. Empty when `offset` is out of range or points at
    /// whitespace.
    pub fn lookup(&self, text: &str, offset: usize) -> Vec<LookupMatch<'_>> {
        let chars: Vec<char> = text.chars().collect();
        if offset >= chars.len() || chars[offset].is_whitespace() {
            return Vec::new();
        }
        let end = chars[offset..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(chars.len(), |len| offset + len);

        let runs = self.unknown.runs(&chars[offset..end]);
        let mut out = Vec::new();
        self.lookup_window(&chars[offset..end], runs.at(0, end - offset), &mut out);
        out
    }

    /// Category the unknown-character fallback assigns to the first char of
    /// `text`.
    pub fn char_category(&self, text: &str) -> CharCategory {
        self.unknown.category_of(text)
    }

    /// Per-character categories of `chars` for [`Self::lookup_window`].
    pub(crate) fn char_runs(&self, chars: &[char]) -> CharRuns {
        self.unknown.runs(chars)
    }

    /// Lookup over one whitespace-free window; `run` is the unknown-category
    /// run at its first character, already cut to the window.
    pub(crate) fn lookup_window<'a>(
        &'a self,
        chars: &[char],
        run: CharRun,
        out: &mut Vec<LookupMatch<'a>>,
    ) {
        let before = out.len();
        out.extend(
            self.lexicon
                .common_prefix_iterator(chars)
                .map(|(entry, len)| LookupMatch {
                    entry,
                    len,
                    known: true,
                }),
        );
        let has_known = out.len() > before;

        let mut unknown = Vec::new();
        self.unknown.candidates(run, has_known, &mut unknown);
        out.extend(unknown.into_iter().map(|(entry, len)| LookupMatch {
            entry,
            len,
            known: false,
        }));
    }

    pub(crate) fn connector(&self) -> &Connector {
        &self.connector
    }

    pub(crate) fn boundary(&self) -> &Entry {
        &self.boundary
    }

    /// Resolves connection ids for an entry created outside the lexicon.
    ///
    /// POS names absent from `connection.csv` get a fresh id, so every edge
    /// touching them costs the default penalty.
    pub(crate) fn bind_entry(&mut self, entry: &mut Entry) -> Result<()> {
        intern_entry(&mut self.pos_table, entry)
            .ok_or_else(|| HansegError::dictionary_load(&self.path, "too many POS names"))
    }
}

fn intern_entry(pos_table: &mut PosTable, entry: &mut Entry) -> Option<()> {
    let left_id = pos_table.intern(entry.left_pos())?;
    let right_id = pos_table.intern(entry.right_pos())?;
    entry.left_id = left_id;
    entry.right_id = right_id;
    Some(())
}

fn read_required(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|error| HansegError::dictionary_load(path, format!("failed to read: {error}")))
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    read_required(path).map(Some)
}

#[cfg(test)]
mod dictionary_tests {
    use super::Dictionary;
    use crate::error::HansegError;
    use crate::test_support::write_dictionary;

    const LEX: &str = "\
곳,1500,NNG,*,T,곳,*,*,*,*
인가,2000,VCP+EF,*,F,인가,Inflect,VCP,EF,이/VCP/*+ㄴ가/EF/*
인,2500,NNG,*,T,인,*,*,*,*
?,0,SF
";
    const CONNECTION: &str = "\
BOS/EOS,NNG,10
NNG,VCP,10
EF,SF,10
SF,BOS/EOS,0
";

    #[test]
    fn lookup_lists_lexicon_then_fallback() {
        let dir = write_dictionary(LEX, CONNECTION, None);
        let dictionary = Dictionary::load(dir.path()).unwrap();
        assert_eq!(dictionary.len(), 4);

        let matches = dictionary.lookup("곳인가?", 1);
        let found: Vec<(&str, usize, bool)> = matches
            .iter()
            .map(|m| (m.entry.tag(), m.len, m.known))
            .collect();
        assert_eq!(found, vec![("NNG", 1, true), ("VCP+EF", 2, true)]);
    }

    #[test]
    fn lookup_falls_back_to_symbol_for_unknown_character() {
        let dir = write_dictionary(LEX, CONNECTION, None);
        let dictionary = Dictionary::load(dir.path()).unwrap();
        let matches = dictionary.lookup("😀", 0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entry.tag(), "SY");
        assert_eq!(matches[0].len, 1);
        assert!(!matches[0].known);
    }

    #[test]
    fn lookup_stops_at_whitespace() {
        let dir = write_dictionary(LEX, CONNECTION, None);
        let dictionary = Dictionary::load(dir.path()).unwrap();
        assert!(dictionary.lookup("곳 인가", 1).is_empty());
        assert!(dictionary.lookup("곳", 5).is_empty());
        let matches = dictionary.lookup("인 가", 0);
        assert!(matches.iter().all(|m| m.len == 1));
    }

    #[test]
    fn missing_directory_names_the_path() {
        let error = Dictionary::load("/definitely/not/here").err().unwrap();
        match error {
            HansegError::DictionaryLoad { path, .. } => {
                assert_eq!(path.to_str(), Some("/definitely/not/here"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_connection_file_fails() {
        let dir = write_dictionary(LEX, CONNECTION, None);
        std::fs::remove_file(dir.path().join("connection.csv")).unwrap();
        let error = Dictionary::load(dir.path()).err().unwrap().to_string();
        assert!(error.contains("connection.csv"), "{error}");
    }

    #[test]
    fn optional_tagset_is_loaded() {
        let dir = write_dictionary(LEX, CONNECTION, Some(r#"{"NNG":"noun"}"#));
        let dictionary = Dictionary::load(dir.path()).unwrap();
        assert_eq!(dictionary.tagset().get("NNG"), Some("noun"));
        assert_eq!(dictionary.tagset().len(), 1);
    }
}
