//! Rendering of best paths and parsing of tagger dumps.

use crate::constants::{DUMP_EOS, TAG_SYMBOL};
use crate::dictionary::entry::Entry;
use crate::inflect::{expand, InflectOnly, SplitPredicate};
use crate::lattice::{Lattice, Node};
use crate::model::{Morph, PosOutput};
use crate::types::{PosOptions, Token};
use crate::utils::{parse_csv_row, push_csv_field};

/// Turns a best path into tokens, expanding entries accepted by `splitter`.
pub(crate) fn path_tokens(
    lattice: &Lattice<'_>,
    path: &[Node<'_>],
    splitter: Option<&dyn SplitPredicate>,
) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(path.len());
    for node in path {
        let surface = lattice.surface(node);
        let pieces = splitter
            .filter(|splitter| splitter.should_split(node.entry))
            .and_then(|_| expand(node.entry, surface));

        let Some(pieces) = pieces else {
            tokens.push(Token {
                surface: surface.to_string(),
                tag: node.entry.tag().to_string(),
                form: surface.to_string(),
                start: node.start,
                end: node.end,
                eojeol: node.eojeol,
                entry_type: node.entry.entry_type(),
            });
            continue;
        };

        let mut start = node.start;
        for piece in pieces {
            let end = start + piece.surface.chars().count();
            tokens.push(Token {
                surface: piece.surface,
                tag: piece.tag,
                form: piece.form,
                start,
                end,
                eojeol: node.eojeol,
                entry_type: node.entry.entry_type(),
            });
            start = end;
        }
    }
    tokens
}

/// Shapes tokens into flat or per-eojeol morphs.
pub(crate) fn format(tokens: &[Token], options: PosOptions) -> PosOutput {
    if options.flatten {
        return PosOutput::Flat(tokens.iter().map(|token| token.to_morph(options.join)).collect());
    }

    let mut groups: Vec<Vec<Morph>> = Vec::new();
    for token in tokens {
        if groups.len() <= token.eojeol {
            groups.resize_with(token.eojeol + 1, Vec::new);
        }
        groups[token.eojeol].push(token.to_morph(options.join));
    }
    PosOutput::Eojeols(groups)
}

/// Writes a MeCab-style dump of `path`: one `surface\tfeatures` line per
/// node followed by `EOS`.
pub(crate) fn write_dump(out: &mut String, lattice: &Lattice<'_>, path: &[Node<'_>]) {
    for node in path {
        out.push_str(lattice.surface(node));
        out.push('\t');
        for (i, feature) in node.entry.features().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_csv_field(out, feature);
        }
        out.push('\n');
    }
    out.push_str(DUMP_EOS);
    out.push('\n');
}

/// Parses a MeCab-style tagger dump into morphs.
///
/// The last line (the `EOS` terminator) is dropped. Empty lines and lines
/// without a tab become `("", "SY")`. With `split_inflect`, `Inflect` lines
/// are replaced by the morphemes of their `original` column, aligned to the
/// line's surface the same way [`crate::Engine::pos`] does.
///
/// Split output therefore carries input surfaces, not the canonical forms a
/// raw MeCab `original` column lists: an irregular `했다` becomes
/// `("했다", "VV"), ("", "EP"), ("", "EF")` rather than `하`, `았`, `다`.
/// [`crate::Engine::tokenize`] keeps the canonical forms in
/// [`crate::Token::form`].
///
/// ```
/// use hanseg::{parse_dump, Morph};
///
/// let dump = "곳\tNNG,*,T,곳,*,*,*,*\n?\tSF,*,*,*,*,*,*,*\nEOS\n";
/// let morphs = parse_dump(dump, false, false);
/// assert_eq!(morphs[0], Morph::Pair("곳".into(), "NNG".into()));
/// assert_eq!(morphs.len(), 2);
/// ```
pub fn parse_dump(dump: &str, join: bool, split_inflect: bool) -> Vec<Morph> {
    let lines: Vec<&str> = dump.lines().collect();
    let Some((_, body)) = lines.split_last() else {
        return Vec::new();
    };

    let mut morphs = Vec::with_capacity(body.len());
    for line in body {
        let line = line.trim_end_matches('\r');
        let Some((surface, features)) = line.split_once('\t') else {
            morphs.push(Morph::new("", TAG_SYMBOL, join));
            continue;
        };
        let features = parse_csv_row(features)
            .unwrap_or_else(|| features.split(',').map(str::to_string).collect());
        let tag = features.first().cloned().unwrap_or_default();

        if split_inflect {
            let entry = Entry::new(surface, 0, features);
            if let Some(pieces) = InflectOnly
                .should_split(&entry)
                .then(|| expand(&entry, surface))
                .flatten()
            {
                morphs.extend(
                    pieces
                        .iter()
                        .map(|piece| Morph::new(&piece.surface, &piece.tag, join)),
                );
                continue;
            }
        }
        morphs.push(Morph::new(surface, &tag, join));
    }
    morphs
}

#[cfg(test)]
mod format_tests {
    use super::{format, parse_dump, path_tokens, write_dump};
    use crate::inflect::{InflectOnly, SplitPredicate};
    use crate::lattice::Lattice;
    use crate::model::{Morph, PosOutput};
    use crate::scorer::PathScorer;
    use crate::search::search;
    use crate::test_support::fixture_dictionary;
    use crate::types::{PosOptions, Token};

    fn tokens(text: &str, split: bool) -> Vec<Token> {
        let dictionary = fixture_dictionary();
        let scorer = PathScorer::new(dictionary.connector(), dictionary.boundary());
        let mut lattice = Lattice::build(&dictionary, text, &[]);
        let path = search(&mut lattice, &scorer).unwrap();
        let splitter: Option<&dyn SplitPredicate> = if split { Some(&InflectOnly) } else { None };
        path_tokens(&lattice, &path, splitter)
    }

    fn dump(text: &str) -> String {
        let dictionary = fixture_dictionary();
        let scorer = PathScorer::new(dictionary.connector(), dictionary.boundary());
        let mut lattice = Lattice::build(&dictionary, text, &[]);
        let path = search(&mut lattice, &scorer).unwrap();
        let mut out = String::new();
        write_dump(&mut out, &lattice, &path);
        out
    }

    #[test]
    fn split_tokens_keep_offsets_and_forms() {
        let tokens = tokens("곳인가?", true);
        let spans: Vec<(&str, &str, &str, usize, usize)> = tokens
            .iter()
            .map(|t| (t.surface.as_str(), t.tag.as_str(), t.form.as_str(), t.start, t.end))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("곳", "NNG", "곳", 0, 1),
                ("인", "VCP", "이", 1, 2),
                ("가", "EF", "ㄴ가", 2, 3),
                ("?", "SF", "?", 3, 4),
            ]
        );
    }

    #[test]
    fn grouping_follows_eojeols() {
        let tokens = tokens("나는 학교에", false);
        let grouped = format(&tokens, PosOptions::default().with_flatten(false));
        let groups = grouped.as_eojeols().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![Morph::new("나", "NP", false), Morph::new("는", "JX", false)]);

        let flat = format(&tokens, PosOptions::default());
        assert_eq!(grouped.into_flat(), flat.into_flat());
    }

    #[test]
    fn join_renders_slash_strings() {
        let tokens = tokens("곳인가?", false);
        let output = format(&tokens, PosOptions::default().with_join(true));
        assert_eq!(
            output,
            PosOutput::Flat(vec![
                Morph::Joined("곳/NNG".to_string()),
                Morph::Joined("인가/VCP+EF".to_string()),
                Morph::Joined("?/SF".to_string()),
            ])
        );
    }

    #[test]
    fn dump_round_trips_through_parse_dump() {
        for text in ["곳인가?", "나는 학교에 간다.", "😀", ""] {
            for (join, split) in [(false, false), (true, false), (false, true), (true, true)] {
                let expected = format(
                    &tokens(text, split),
                    PosOptions::default().with_join(join),
                )
                .into_flat();
                assert_eq!(parse_dump(&dump(text), join, split), expected, "{text}");
            }
        }
    }

    #[test]
    fn malformed_dump_lines_become_symbol_placeholders() {
        let morphs = parse_dump("\nno tab here\n곳\tNNG,*\nEOS\n", false, false);
        assert_eq!(
            morphs,
            vec![
                Morph::new("", "SY", false),
                Morph::new("", "SY", false),
                Morph::new("곳", "NNG", false),
            ]
        );
        assert!(parse_dump("", false, false).is_empty());
        assert!(parse_dump("EOS\n", true, true).is_empty());
    }

    #[test]
    fn split_dump_lines_use_original_column() {
        let dump = "인가\tVCP+EF,*,F,인가,Inflect,VCP,EF,이/VCP/*+ㄴ가/EF/*\nEOS\n";
        assert_eq!(
            parse_dump(dump, true, true),
            vec![Morph::Joined("인/VCP".into()), Morph::Joined("가/EF".into())]
        );
        assert_eq!(
            parse_dump(dump, false, false),
            vec![Morph::new("인가", "VCP+EF", false)]
        );
    }
}
