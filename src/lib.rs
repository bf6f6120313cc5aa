#![deny(missing_docs)]

//! Dictionary-driven Korean morphological analyzer.
//!
//! `hanseg` loads a MeCab-ko style dictionary directory, builds a lattice of
//! candidate morphemes over the input, picks the minimum-cost path and
//! renders it as morph/tag pairs. Fused entries such as `인가` (`이` + `ㄴ가`)
//! can be split into their morphemes.
//!
//! ## Quick Start
//! ```no_run
//! use hanseg::{Engine, PosOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Engine::new()?;
//!     let output = engine.pos("곳인가?", PosOptions::default())?;
//!     for morph in output.into_flat() {
//!         println!("{}/{}", morph.surface(), morph.tag());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Dictionary Directory
//! - `lex.csv`: `surface,cost,tag,semantic,jongsung,reading,type,first_pos,last_pos,original,indexed`
//! - `connection.csv`: `left_pos,right_pos,cost`, with `BOS/EOS` for the
//!   sentence boundary.
//! - `tagset.json` (optional): tag to description.
//! - `unknown.csv` (optional): `category,cost,tag` overrides for characters
//!   the lexicon does not cover (`NUMERIC`, `ALPHA`, `HANJA`, `HANGUL`,
//!   `DEFAULT`).
//!
//! ## Offset Rules
//! Offsets in [`Token`] are character indices (based on `str.chars()`), not
//! byte indices. Whitespace never belongs to a token.
//!
//! ## Environment Variables
//! - `HANSEG_DICT_PATH`: dictionary directory used by [`Engine::new`].
//!
//! ## Logging
//! Dictionary loading and engine construction log through the `log` facade
//! at `debug` level; per-call lattice sizes are logged at `trace` level.

mod constants;
mod dictionary;
mod discovery;
mod error;
mod format;
mod hangul;
mod inflect;
mod lattice;
mod model;
mod runtime;
mod scorer;
mod search;
mod types;
mod utils;

pub use constants::*;
pub use dictionary::entry::{Entry, EntryType};
pub use dictionary::tagset::Tagset;
pub use dictionary::unknown::CharCategory;
pub use dictionary::{Dictionary, LookupMatch};
pub use error::{HansegError, Result};
pub use format::parse_dump;
pub use inflect::{InflectOnly, SplitPredicate, SplitTypes, SplitWith};
pub use model::{EngineState, Morph, PosOutput};
pub use runtime::Engine;
pub use types::{EngineConfig, PosOptions, RegexRule, Token};

#[cfg(test)]
mod test_support;
