// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

pub fn default_log_path(file: &str) -> PathBuf {
    let base = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    base.join("quadsnip").join(file)
}

/// Where extraction artifacts land by default: the user's download
/// directory, the closest analogue to a browser download.
pub fn default_output_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|h| PathBuf::from(h).join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

/// Resolve the effective output directory.
///
/// Priority:
/// 1) $QUADSNIP_DIR (if set and non-empty)
/// 2) --out-dir flag
/// 3) config quadsnip.output_directory
pub fn effective_output_dir(flag: Option<PathBuf>, config_dir: &Path) -> PathBuf {
    if let Some(v) = std::env::var_os("QUADSNIP_DIR") {
        let p = PathBuf::from(v);
        if !p.as_os_str().is_empty() {
            return p;
        }
    }

    if let Some(p) = flag {
        return p;
    }

    config_dir.to_path_buf()
}
