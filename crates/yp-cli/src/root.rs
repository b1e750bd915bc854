use std::path::{Path, PathBuf};
use yp_core::paths::YP_DIR;

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `YP_ROOT` env var (passed in as `explicit`)
/// 2. Nearest ancestor of the cwd containing `.yp/`
/// 3. Nearest ancestor containing `.git/`
/// 4. The cwd itself
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_marked_ancestor(&cwd, YP_DIR)
        .or_else(|| find_marked_ancestor(&cwd, ".git"))
        .unwrap_or(cwd)
}

fn find_marked_ancestor(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
