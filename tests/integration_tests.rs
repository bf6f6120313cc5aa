use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use hanseg::*;

fn get_engine() -> Engine {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("ko-dic");
    Engine::with_dictionary_path(path).expect("Failed to load fixture dictionary")
}

fn pairs(items: &[(&str, &str)]) -> Vec<Morph> {
    items
        .iter()
        .map(|(surface, tag)| Morph::new(surface, tag, false))
        .collect()
}

fn flat(engine: &Engine, text: &str, options: PosOptions) -> Vec<Morph> {
    engine
        .pos(text, options)
        .expect("pos should succeed")
        .into_flat()
}

const SAMPLES: &[&str] = &[
    "곳인가?",
    "나는 학교에 간다.",
    "  형태소 분석, 형태소분석!",
    "2024년 😀",
    "Rust는 漢字 데브시스터즈",
    "",
    " \t\n",
];

#[test]
fn copula_is_split_into_stem_and_ending() {
    let engine = get_engine();
    let options = PosOptions::default().with_split_inflect(true);
    let morphs = flat(&engine, "곳인가?", options);
    assert_eq!(
        morphs,
        pairs(&[("곳", "NNG"), ("인", "VCP"), ("가", "EF"), ("?", "SF")])
    );
    assert_eq!(
        flat(&engine, "곳인가?", PosOptions::default()),
        pairs(&[("곳", "NNG"), ("인가", "VCP+EF"), ("?", "SF")])
    );
}

#[test]
fn empty_input_gives_empty_output() {
    let engine = get_engine();
    assert!(engine.pos("", PosOptions::default()).unwrap().is_empty());
    assert_eq!(
        engine.pos("", PosOptions::default().with_flatten(false)).unwrap(),
        PosOutput::Eojeols(Vec::new())
    );
    assert!(engine.morphs("").unwrap().is_empty());
    assert!(engine.nouns("").unwrap().is_empty());
    assert_eq!(engine.dump("").unwrap(), "EOS\n");
}

#[test]
fn unknown_emoji_is_a_symbol() {
    let engine = get_engine();
    assert_eq!(
        flat(&engine, "😀", PosOptions::default()),
        pairs(&[("😀", "SY")])
    );
}

#[test]
fn unknown_runs_use_character_categories() {
    let engine = get_engine();
    let morphs = flat(&engine, "2024년 Rust는 漢字", PosOptions::default());
    assert_eq!(morphs[0], Morph::new("2024", "SN", false));
    assert_eq!(morphs[1], Morph::new("년", "NNB", false));
    assert!(morphs.contains(&Morph::new("Rust", "SL", false)));
    assert!(morphs.contains(&Morph::new("漢字", "SH", false)));
}

#[test]
fn surfaces_reconstruct_the_input() {
    let engine = get_engine();
    for text in SAMPLES {
        for split in [false, true] {
            let options = PosOptions::default().with_split_inflect(split);
            let joined: String = flat(&engine, text, options)
                .iter()
                .map(|morph| morph.surface().to_string())
                .collect();
            assert_eq!(joined, text.split_whitespace().collect::<String>(), "{text:?}");

            let grouped = engine.pos(text, options.with_flatten(false)).unwrap();
            let groups: Vec<String> = grouped
                .as_eojeols()
                .unwrap()
                .iter()
                .map(|group| group.iter().map(Morph::surface).collect())
                .collect();
            let eojeols: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(groups, eojeols, "{text:?}");
        }
    }
}

#[test]
fn flattened_output_equals_concatenated_groups() {
    let engine = get_engine();
    for text in SAMPLES {
        for join in [false, true] {
            let options = PosOptions::default().with_join(join);
            let grouped = engine.pos(text, options.with_flatten(false)).unwrap();
            assert_eq!(grouped.into_flat(), flat(&engine, text, options), "{text:?}");
        }
    }
}

#[test]
fn morphs_and_nouns_project_pos() {
    let engine = get_engine();
    for text in SAMPLES {
        let tagged = flat(&engine, text, PosOptions::default());
        let morphs = engine.morphs(text).unwrap();
        let surfaces: Vec<String> = tagged.iter().map(|m| m.surface().to_string()).collect();
        assert_eq!(morphs, surfaces);

        let nouns = engine.nouns(text).unwrap();
        let expected: Vec<String> = tagged
            .iter()
            .filter(|m| m.tag().starts_with(NOUN_TAG_PREFIX))
            .map(|m| m.surface().to_string())
            .collect();
        assert_eq!(nouns, expected);
    }
    assert_eq!(
        engine.nouns("나는 학교에 간다.").unwrap(),
        vec!["나", "학교"]
    );
}

#[test]
fn analysis_is_deterministic_across_threads() {
    let engine = Arc::new(get_engine());
    let expected: Vec<Vec<Morph>> = SAMPLES
        .iter()
        .map(|text| flat(&engine, text, PosOptions::default()))
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                SAMPLES
                    .iter()
                    .map(|text| flat(&engine, text, PosOptions::default()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("worker panicked"), expected);
    }
}

#[test]
fn dump_round_trips_through_parse_dump() {
    let engine = get_engine();
    for text in SAMPLES {
        let dump = engine.dump(text).unwrap();
        assert!(dump.ends_with("EOS\n"));
        for join in [false, true] {
            for split in [false, true] {
                let options = PosOptions::default().with_join(join).with_split_inflect(split);
                assert_eq!(
                    parse_dump(&dump, join, split),
                    flat(&engine, text, options),
                    "{text:?} join={join} split={split}"
                );
            }
        }
    }
}

#[test]
fn tokens_carry_offsets_and_forms() {
    let engine = get_engine();
    let tokens = engine.tokenize("나는 학교에 간다.", true).unwrap();
    let verb = tokens.iter().find(|token| token.tag == "VV").unwrap();
    assert_eq!(verb.surface, "간");
    assert_eq!(verb.form, "가");
    assert_eq!((verb.start, verb.end, verb.eojeol), (7, 8, 2));
    assert_eq!(verb.entry_type, EntryType::Inflect);

    let ending = tokens.iter().find(|token| token.tag == "EF").unwrap();
    assert_eq!(ending.surface, "다");
    assert_eq!(ending.form, "ㄴ다");
}

#[test]
fn dictionary_lookup_is_public() {
    let engine = get_engine();
    let matches = engine.dictionary().lookup("형태소분석", 0);
    let surfaces: Vec<&str> = matches.iter().map(|m| m.entry.surface()).collect();
    assert_eq!(surfaces, vec!["형태소", "형태소분석"]);
    assert_eq!(engine.dictionary().char_category("漢"), CharCategory::Hanja);
}

#[test]
fn irregular_inflection_keeps_surface_on_first_morpheme() {
    let engine = get_engine();
    let options = PosOptions::default().with_split_inflect(true);
    let expected = pairs(&[("했다", "VV"), ("", "EP"), ("", "EF")]);
    assert_eq!(flat(&engine, "했다", options), expected);
    assert_eq!(parse_dump(&engine.dump("했다").unwrap(), false, true), expected);

    let forms: Vec<String> = engine
        .tokenize("했다", true)
        .unwrap()
        .into_iter()
        .map(|token| token.form)
        .collect();
    assert_eq!(forms, vec!["하", "았", "다"]);
}

#[test]
fn long_unspaced_input_is_analyzed() {
    let engine = get_engine();
    let unknown: String = std::iter::repeat('뷁').take(20_000).collect();
    let morphs = engine.morphs(&unknown).unwrap();
    assert_eq!(morphs.concat(), unknown);

    let known: String = std::iter::repeat("곳").take(20_000).collect();
    let morphs = engine.morphs(&known).unwrap();
    assert_eq!(morphs.len(), 20_000);
}
