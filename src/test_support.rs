use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use crate::constants::{CONNECTION_FILE, LEXICON_FILE, TAGSET_FILE};
use crate::dictionary::Dictionary;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn set_env_var(key: &str, value: &str) {
    #[allow(unused_unsafe)]
    unsafe {
        env::set_var(key, value);
    }
}

fn restore_env_var(key: &str, value: Option<OsString>) {
    #[allow(unused_unsafe)]
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

/// Runs a closure with one overridden environment variable.
pub(crate) fn with_env_var<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    with_env_vars(&[(key, Some(value))], f)
}

/// Runs a closure while holding a global environment lock and applying overrides.
pub(crate) fn with_env_vars<T>(overrides: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
    let _guard = env_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let backups: Vec<(&str, Option<OsString>)> = overrides
        .iter()
        .map(|(key, _)| (*key, env::var_os(key)))
        .collect();

    for (key, value) in overrides {
        match value {
            Some(value) => set_env_var(key, value),
            None => restore_env_var(key, None),
        }
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, value) in backups.into_iter().rev() {
        restore_env_var(key, value);
    }

    match result {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Dictionary shipped under `tests/data/ko-dic`.
pub(crate) fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("ko-dic")
}

pub(crate) fn fixture_dictionary() -> Dictionary {
    Dictionary::load(fixture_path()).expect("fixture dictionary should load")
}

/// Writes a throwaway dictionary directory.
pub(crate) fn write_dictionary(
    lexicon: &str,
    connection: &str,
    tagset: Option<&str>,
) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(dir.path().join(LEXICON_FILE), lexicon).expect("failed to write lexicon");
    fs::write(dir.path().join(CONNECTION_FILE), connection).expect("failed to write connection");
    if let Some(tagset) = tagset {
        fs::write(dir.path().join(TAGSET_FILE), tagset).expect("failed to write tagset");
    }
    dir
}
