use std::env;
use std::path::PathBuf;

use crate::constants::DICT_PATH_ENV;

pub(crate) fn default_dictionary_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "windows")]
    {
        &["C:\\hanseg\\dic", "C:\\Program Files\\hanseg\\dic"]
    }
    #[cfg(not(target_os = "windows"))]
    {
        &[
            "~/.local/share/hanseg/dic",
            "/usr/local/share/hanseg/dic",
            "/usr/share/hanseg/dic",
        ]
    }
}

/// Default directories, in search order, with `~` expanded. Candidates
/// under `~` are skipped when `HOME` is unset.
pub(crate) fn searched_dictionary_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    #[cfg(target_os = "windows")]
    {
        if let Some(local_app_data) = env::var_os("LOCALAPPDATA") {
            paths.push(PathBuf::from(local_app_data).join("hanseg").join("dic"));
        }
    }

    for candidate in default_dictionary_candidates() {
        if let Some(stripped) = candidate.strip_prefix("~/") {
            if let Some(home) = env::var_os("HOME") {
                paths.push(PathBuf::from(home).join(stripped));
            }
        } else {
            paths.push(PathBuf::from(candidate));
        }
    }
    paths
}

/// First existing dictionary directory: `HANSEG_DICT_PATH` wins even when it
/// does not exist, so a misconfigured path is reported instead of skipped.
pub(crate) fn discover_default_dictionary_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(DICT_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    searched_dictionary_paths()
        .into_iter()
        .find(|path| path.is_dir())
}
