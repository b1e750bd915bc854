use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const YP_DIR: &str = ".yp";
pub const CONFIG_FILE: &str = ".yp/config.yaml";

pub const DEFAULT_GAPS_FILE: &str = "tools/machine-sprint/output/gaps/gaps.json";
pub const DEFAULT_TASKS_FILE: &str = "tools/machine-sprint/output/seo-tasks.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn yp_dir(root: &Path) -> PathBuf {
    root.join(YP_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured path: absolute paths pass through, relative ones
/// hang off the project root.
pub fn resolve(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}
