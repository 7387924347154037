use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `RAPID_ROOT` env var (passed in as `explicit`)
/// 2. The current working directory
///
/// There is no upward search: `init` writes into exactly this directory and
/// scripts are looked up relative to it. The result is always absolute, so
/// `.` and `..` name a real directory and script paths stay valid after the
/// child changes into the root.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match explicit {
        Some(p) => absolutize(&cwd, p),
        None => cwd,
    }
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let joined = cwd.join(path);
    // canonicalize collapses `..`; a root that does not exist yet keeps the
    // joined form.
    std::fs::canonicalize(&joined).unwrap_or(joined)
}
