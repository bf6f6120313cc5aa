//! Decomposition of fused entries into their morphemes.

use crate::constants::{FORM_TAG_SEPARATOR, MORPHEME_SEPARATOR};
use crate::dictionary::entry::{Entry, EntryType};
use crate::hangul::attach_final;

/// Decides which path entries are expanded when `split_inflect` is on.
pub trait SplitPredicate: Send + Sync {
    /// Whether `entry` should be replaced by the morphemes of its
    /// `original` column.
    fn should_split(&self, entry: &Entry) -> bool;

    /// Entry types this predicate splits, if it is exactly a type filter.
    /// Only such predicates survive [`crate::Engine::state`].
    fn split_types(&self) -> Option<Vec<EntryType>> {
        None
    }
}

/// Splits `Inflect` entries only.
#[derive(Debug, Clone, Copy, Default)]
pub struct InflectOnly;

impl SplitPredicate for InflectOnly {
    fn should_split(&self, entry: &Entry) -> bool {
        entry.entry_type() == EntryType::Inflect
    }

    fn split_types(&self) -> Option<Vec<EntryType>> {
        Some(vec![EntryType::Inflect])
    }
}

/// Splits entries whose type is in the given list.
#[derive(Debug, Clone, Default)]
pub struct SplitTypes(pub Vec<EntryType>);

impl SplitPredicate for SplitTypes {
    fn should_split(&self, entry: &Entry) -> bool {
        self.0.contains(&entry.entry_type())
    }

    fn split_types(&self) -> Option<Vec<EntryType>> {
        Some(self.0.clone())
    }
}

/// Splits entries accepted by a closure.
#[derive(Debug, Clone, Copy)]
pub struct SplitWith<F>(pub F);

impl<F> SplitPredicate for SplitWith<F>
where
    F: Fn(&Entry) -> bool + Send + Sync,
{
    fn should_split(&self, entry: &Entry) -> bool {
        (self.0)(entry)
    }
}

/// One piece of an expanded node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Piece {
    pub(crate) surface: String,
    pub(crate) form: String,
    pub(crate) tag: String,
}

/// Parses `original` into `(form, tag)` pairs, e.g. `이/VCP/*+ㄴ가/EF/*`.
///
/// `None` when any morpheme lacks a form or a tag.
pub(crate) fn parse_original(original: &str) -> Option<Vec<(&str, &str)>> {
    original
        .split(MORPHEME_SEPARATOR)
        .map(|morpheme| {
            let mut parts = morpheme.split(FORM_TAG_SEPARATOR);
            let form = parts.next().filter(|form| !form.is_empty())?;
            let tag = parts.next().filter(|tag| !tag.is_empty())?;
            Some((form, tag))
        })
        .collect()
}

/// Expands `entry` covering `surface` into its morphemes.
///
/// The pieces' surfaces always concatenate back to `surface`. Returns `None`
/// for entries without a usable `original` column.
pub(crate) fn expand(entry: &Entry, surface: &str) -> Option<Vec<Piece>> {
    let morphemes = parse_original(entry.original()?)?;
    if morphemes.len() < 2 {
        return None;
    }
    let surfaces = align(surface, &morphemes);
    Some(
        morphemes
            .iter()
            .zip(surfaces)
            .map(|(&(form, tag), surface)| Piece {
                surface,
                form: form.to_string(),
                tag: tag.to_string(),
            })
            .collect(),
    )
}

/// Assigns each character of `surface` to one morpheme.
fn align(surface: &str, morphemes: &[(&str, &str)]) -> Vec<String> {
    let forms: String = morphemes.iter().map(|(form, _)| *form).collect();
    if forms == surface {
        return morphemes.iter().map(|(form, _)| form.to_string()).collect();
    }

    // A leading jamo closes the previous syllable; that syllable stays with
    // the morpheme that opened it.
    let mut composed: Vec<(char, usize)> = Vec::new();
    for (index, (form, _)) in morphemes.iter().enumerate() {
        let mut chars = form.chars().peekable();
        let first = chars.peek().copied();
        if let (Some(first), Some(last)) = (first, composed.last_mut()) {
            if let Some(syllable) = attach_final(last.0, first) {
                last.0 = syllable;
                chars.next();
            }
        }
        composed.extend(chars.map(|c| (c, index)));
    }

    let mut pieces = vec![String::new(); morphemes.len()];
    if composed.iter().map(|(c, _)| *c).eq(surface.chars()) {
        for (c, owner) in composed {
            pieces[owner].push(c);
        }
    } else {
        pieces[0] = surface.to_string();
    }
    pieces
}
