//! Tag codes, file names and default cost values.

/// Tag emitted for unknown symbols and for malformed dump lines.
pub const TAG_SYMBOL: &str = "SY";
/// Tag of sentence-final punctuation.
pub const TAG_SENTENCE_FINAL: &str = "SF";
/// Tag of foreign-alphabet runs.
pub const TAG_FOREIGN: &str = "SL";
/// Tag of numeral runs.
pub const TAG_NUMBER: &str = "SN";
/// Tag of Hanja runs.
pub const TAG_HANJA: &str = "SH";
/// Tag of Hangul runs that are not in the dictionary.
pub const TAG_UNKNOWN: &str = "UNKNOWN";

/// Tags starting with this prefix are nouns for [`crate::Engine::nouns`].
pub const NOUN_TAG_PREFIX: &str = "N";

/// POS name used in `connection.csv` for the sentence boundary.
pub const BOS_EOS_POS: &str = "BOS/EOS";

/// Placeholder for an absent feature column.
pub const FEATURE_NONE: &str = "*";
/// Separator between morphemes in the `original` feature.
pub const MORPHEME_SEPARATOR: char = '+';
/// Separator between form and tag inside one morpheme of `original`.
pub const FORM_TAG_SEPARATOR: char = '/';

/// Lexicon file inside a dictionary directory.
pub const LEXICON_FILE: &str = "lex.csv";
/// Connection-cost file inside a dictionary directory.
pub const CONNECTION_FILE: &str = "connection.csv";
/// Optional tagset description file.
pub const TAGSET_FILE: &str = "tagset.json";
/// Optional unknown-category override file.
pub const UNKNOWN_FILE: &str = "unknown.csv";

/// Environment variable naming the default dictionary directory.
pub const DICT_PATH_ENV: &str = "HANSEG_DICT_PATH";

/// Line terminating a tagger dump.
pub const DUMP_EOS: &str = "EOS";

/// Connection cost used for POS pairs missing from `connection.csv`.
pub const DEFAULT_CONNECTION_PENALTY: i32 = 5000;
/// Emission cost of nodes forced by pretokenization rules.
pub const DEFAULT_RULE_COST: i32 = 0;
/// Inputs longer than this many characters are rejected.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 1 << 20;

/// Built-in tagset used when a dictionary ships no `tagset.json`.
pub const DEFAULT_TAGSET: &[(&str, &str)] = &[
    ("EC", "연결 어미"),
    ("EF", "종결 어미"),
    ("EP", "선어말어미"),
    ("ETM", "관형형 전성 어미"),
    ("ETN", "명사형 전성 어미"),
    ("IC", "감탄사"),
    ("JC", "접속 조사"),
    ("JKB", "부사격 조사"),
    ("JKC", "보격 조사"),
    ("JKG", "관형격 조사"),
    ("JKO", "목적격 조사"),
    ("JKQ", "인용격 조사"),
    ("JKS", "주격 조사"),
    ("JKV", "호격 조사"),
    ("JX", "보조사"),
    ("MAG", "일반 부사"),
    ("MAJ", "접속 부사"),
    ("MM", "관형사"),
    ("NNB", "의존 명사"),
    ("NNBC", "단위를 나타내는 명사"),
    ("NNG", "일반 명사"),
    ("NNP", "고유 명사"),
    ("NP", "대명사"),
    ("NR", "수사"),
    ("SC", "구분자"),
    ("SE", "줄임표"),
    ("SF", "마침표, 물음표, 느낌표"),
    ("SH", "한자"),
    ("SL", "외국어"),
    ("SN", "숫자"),
    ("SSC", "닫는 괄호"),
    ("SSO", "여는 괄호"),
    ("SY", "기타 기호"),
    ("UNKNOWN", "미등록어"),
    ("VA", "형용사"),
    ("VCN", "부정 지정사"),
    ("VCP", "긍정 지정사"),
    ("VV", "동사"),
    ("VX", "보조 용언"),
    ("XPN", "체언 접두사"),
    ("XR", "어근"),
    ("XSA", "형용사 파생 접미사"),
    ("XSN", "명사파생 접미사"),
    ("XSV", "동사 파생 접미사"),
];
