//! Fallback entries for characters the lexicon does not cover.
//!
//! Every character falls into one category. A category decides whether it
//! competes with lexicon matches (`invoke`), whether a whole run of same
//! category characters becomes one candidate (`group`) and how many shorter
//! prefixes of the run are offered as well (`length`). `DEFAULT` yields a
//! single-character `SY` candidate, so every offset has at least one node.

use std::path::Path;

use regex::Regex;

use crate::constants::{TAG_FOREIGN, TAG_HANJA, TAG_NUMBER, TAG_SYMBOL, TAG_UNKNOWN};
use crate::dictionary::entry::Entry;
use crate::error::{HansegError, Result};
use crate::utils::parse_csv_row;

/// Character class of an unknown run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCategory {
    /// ASCII and full-width digits.
    Numeric,
    /// ASCII and full-width Latin letters.
    Alpha,
    /// Han ideographs.
    Hanja,
    /// Hangul syllables and jamo.
    Hangul,
    /// Anything else.
    Default,
}

impl CharCategory {
    /// Name used in `unknown.csv`.
    pub fn name(self) -> &'static str {
        match self {
            CharCategory::Numeric => "NUMERIC",
            CharCategory::Alpha => "ALPHA",
            CharCategory::Hanja => "HANJA",
            CharCategory::Hangul => "HANGUL",
            CharCategory::Default => "DEFAULT",
        }
    }

    /// Inverse of [`Self::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        [
            CharCategory::Numeric,
            CharCategory::Alpha,
            CharCategory::Hanja,
            CharCategory::Hangul,
            CharCategory::Default,
        ]
        .into_iter()
        .find(|category| category.name() == name)
    }
}

struct UnknownCategory {
    category: CharCategory,
    class: Option<Regex>,
    invoke: bool,
    group: bool,
    length: usize,
    entry: Entry,
}

impl UnknownCategory {
    fn new(
        category: CharCategory,
        class: Option<&str>,
        (invoke, group, length): (bool, bool, usize),
        tag: &str,
        cost: i32,
    ) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            category,
            class: class.map(Regex::new).transpose()?,
            invoke,
            group,
            length,
            entry: Entry::template(tag, cost),
        })
    }

    fn contains(&self, c: char) -> bool {
        match &self.class {
            Some(class) => class.is_match(c.encode_utf8(&mut [0; 4])),
            None => true,
        }
    }
}

/// Category run starting at one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CharRun {
    slot: usize,
    len: usize,
}

/// Per-character categories of one input, with the length of the
/// same-category run starting at each character.
pub(crate) struct CharRuns {
    slots: Vec<usize>,
    lens: Vec<usize>,
}

impl CharRuns {
    /// Run at `offset`, cut at `limit`.
    pub(crate) fn at(&self, offset: usize, limit: usize) -> CharRun {
        CharRun {
            slot: self.slots[offset],
            len: self.lens[offset].min(limit.saturating_sub(offset)).max(1),
        }
    }
}

/// Ordered unknown-character categories; `DEFAULT` is always last.
pub(crate) struct UnknownHandler {
    categories: Vec<UnknownCategory>,
}

impl UnknownHandler {
    pub(crate) fn new() -> Result<Self> {
        let categories = [
            (CharCategory::Numeric, Some(r"^[0-9０-９]$"), (true, true, 0), TAG_NUMBER, 1000),
            (CharCategory::Alpha, Some(r"^[A-Za-zＡ-Ｚａ-ｚ]$"), (true, true, 0), TAG_FOREIGN, 1000),
            (CharCategory::Hanja, Some(r"^\p{Han}$"), (false, true, 1), TAG_HANJA, 3000),
            (CharCategory::Hangul, Some(r"^\p{Hangul}$"), (false, true, 2), TAG_UNKNOWN, 6000),
            (CharCategory::Default, None, (false, false, 1), TAG_SYMBOL, 3000),
        ]
        .into_iter()
        .map(|(category, class, flags, tag, cost)| {
            UnknownCategory::new(category, class, flags, tag, cost).map_err(|error| {
                HansegError::dictionary_load(
                    category.name(),
                    format!("invalid unknown-category pattern: {error}"),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;
        Ok(Self { categories })
    }

    /// Applies `unknown.csv` rows `category,cost,tag[,feature...]`.
    pub(crate) fn apply_overrides(&mut self, path: &Path, content: &str) -> Result<()> {
        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let row_error = |message: String| {
                HansegError::dictionary_load(path, format!("line {line_no}: {message}"))
            };

            let mut fields =
                parse_csv_row(line).ok_or_else(|| row_error("field too long".to_string()))?;
            if fields.len() < 3 || fields[2].is_empty() {
                return Err(row_error("expected category,cost,tag".to_string()));
            }
            let features = fields.split_off(2);
            let category = CharCategory::from_name(&fields[0])
                .ok_or_else(|| row_error(format!("unknown category {:?}", fields[0])))?;
            let cost: i32 = fields[1]
                .trim()
                .parse()
                .map_err(|error| row_error(format!("invalid cost {:?}: {error}", fields[1])))?;
            if cost < 0 {
                return Err(row_error(format!("negative cost {cost} for {}", category.name())));
            }

            if let Some(slot) = self
                .categories
                .iter_mut()
                .find(|slot| slot.category == category)
            {
                slot.entry = Entry::new("", cost, features);
            }
        }
        Ok(())
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.categories.iter_mut().map(|category| &mut category.entry)
    }

    /// Category of the first character of `text`.
    pub(crate) fn category_of(&self, text: &str) -> CharCategory {
        text.chars()
            .next()
            .map_or(CharCategory::Default, |c| self.categories[self.slot_of(c)].category)
    }

    /// Classifies every character once and measures runs in a single
    /// backward pass.
    pub(crate) fn runs(&self, chars: &[char]) -> CharRuns {
        let slots: Vec<usize> = chars.iter().map(|&c| self.slot_of(c)).collect();
        let mut lens = vec![1; chars.len()];
        for i in (0..chars.len().saturating_sub(1)).rev() {
            if slots[i] == slots[i + 1] && !chars[i + 1].is_whitespace() {
                lens[i] = lens[i + 1] + 1;
            }
        }
        CharRuns { slots, lens }
    }

    /// Appends `(entry, length in chars)` candidates for `run`.
    ///
    /// `has_known` tells whether the lexicon matched at this offset; only
    /// invoked categories compete with lexicon matches.
    pub(crate) fn candidates<'a>(
        &'a self,
        run: CharRun,
        has_known: bool,
        out: &mut Vec<(&'a Entry, usize)>,
    ) {
        let slot = &self.categories[run.slot];
        if has_known && !slot.invoke {
            return;
        }

        let before = out.len();
        for len in 1..=slot.length.min(run.len) {
            out.push((&slot.entry, len));
        }
        if slot.group && run.len > slot.length {
            out.push((&slot.entry, run.len));
        }
        if out.len() == before {
            out.push((&slot.entry, 1));
        }
    }

    fn slot_of(&self, c: char) -> usize {
        self.categories
            .iter()
            .position(|slot| slot.contains(c))
            .unwrap_or(self.categories.len() - 1)
    }
}

#[cfg(test)]
mod unknown_tests {
    use super::{CharCategory, UnknownHandler};
    use std::path::Path;

    fn candidates(handler: &UnknownHandler, window: &str, has_known: bool) -> Vec<(String, usize)> {
        let chars: Vec<char> = window.chars().collect();
        let runs = handler.runs(&chars);
        let mut out = Vec::new();
        handler.candidates(runs.at(0, chars.len()), has_known, &mut out);
        out.into_iter()
            .map(|(entry, len)| (entry.tag().to_string(), len))
            .collect()
    }

    #[test]
    fn classifies_first_character() {
        let handler = UnknownHandler::new().unwrap();
        assert_eq!(handler.category_of("2024년"), CharCategory::Numeric);
        assert_eq!(handler.category_of("Rust는"), CharCategory::Alpha);
        assert_eq!(handler.category_of("漢字"), CharCategory::Hanja);
        assert_eq!(handler.category_of("러스트"), CharCategory::Hangul);
        assert_eq!(handler.category_of("😀"), CharCategory::Default);
    }

    #[test]
    fn numeric_run_is_grouped_even_next_to_lexicon_matches() {
        let handler = UnknownHandler::new().unwrap();
        assert_eq!(candidates(&handler, "2024년", true), vec![("SN".to_string(), 4)]);
    }

    #[test]
    fn hangul_yields_prefixes_and_whole_run_only_without_lexicon_match() {
        let handler = UnknownHandler::new().unwrap();
        assert_eq!(
            candidates(&handler, "데브시스터즈", false),
            vec![
                ("UNKNOWN".to_string(), 1),
                ("UNKNOWN".to_string(), 2),
                ("UNKNOWN".to_string(), 6),
            ]
        );
        assert!(candidates(&handler, "데브시스터즈", true).is_empty());
    }

    #[test]
    fn unknown_symbol_is_single_character() {
        let handler = UnknownHandler::new().unwrap();
        assert_eq!(candidates(&handler, "😀😀", false), vec![("SY".to_string(), 1)]);
    }

    #[test]
    fn overrides_replace_tag_and_cost() {
        let mut handler = UnknownHandler::new().unwrap();
        handler
            .apply_overrides(Path::new("unknown.csv"), "HANGUL,7000,NNG,*,*\n")
            .unwrap();
        let chars: Vec<char> = "러스트".chars().collect();
        let mut out = Vec::new();
        handler.candidates(handler.runs(&chars).at(0, chars.len()), false, &mut out);
        assert_eq!(out[0].0.tag(), "NNG");
        assert_eq!(out[0].0.cost(), 7000);
        assert_eq!(out[0].0.features().len(), 3);
    }

    #[test]
    fn overrides_reject_bad_rows() {
        let mut handler = UnknownHandler::new().unwrap();
        for bad in ["EMOJI,10,SY\n", "HANGUL,-5,NNG\n", "HANGUL,10\n", "HANGUL,x,NNG\n"] {
            assert!(
                handler.apply_overrides(Path::new("unknown.csv"), bad).is_err(),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn runs_are_measured_per_character() {
        let handler = UnknownHandler::new().unwrap();
        let chars: Vec<char> = "ab12 러스트😀".chars().collect();
        let runs = handler.runs(&chars);
        let lens: Vec<usize> = (0..chars.len()).map(|i| runs.at(i, chars.len()).len).collect();
        assert_eq!(lens, vec![2, 1, 2, 1, 1, 3, 2, 1, 1]);
        assert_eq!(runs.at(5, 7).len, 2);
        assert_eq!(runs.at(0, 2).slot, runs.at(1, 2).slot);
        assert_ne!(runs.at(1, 9).slot, runs.at(2, 9).slot);
    }

    #[test]
    fn long_runs_are_linear() {
        let handler = UnknownHandler::new().unwrap();
        let chars: Vec<char> = std::iter::repeat('뷁').take(200_000).collect();
        let runs = handler.runs(&chars);
        assert_eq!(runs.at(0, chars.len()).len, 200_000);
        assert_eq!(runs.at(199_999, chars.len()).len, 1);
    }
}
