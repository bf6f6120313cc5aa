use std::env;

use hanseg::{Engine, EngineConfig, PosOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EngineConfig::default().add_rule(r"https?://\S+", "SL");
    if let Some(path) = env::args().nth(1) {
        config = config.with_dictionary_path(path);
    }
    let engine = Engine::from_config(config)?;

    let text = "곳인가? 나는 학교에 간다.";
    let options = PosOptions::default().with_split_inflect(true);
    for morph in engine.pos(text, options)?.into_flat() {
        println!("{morph}");
    }

    for token in engine.tokenize(text, true)? {
        println!(
            "  {}/{} form={} @{}..{} eojeol={}",
            token.surface, token.tag, token.form, token.start, token.end, token.eojeol
        );
    }

    println!("nouns: {:?}", engine.nouns(text)?);
    print!("{}", engine.dump(text)?);
    Ok(())
}
