pub mod check;
pub mod config_check;
pub mod import;
pub mod resolve;
pub mod rewrite;
pub mod split;

use std::path::PathBuf;

/// Input path: the CLI flag if given, otherwise the configured catalog.
pub(crate) fn input_path(flag: Option<String>, configured: &std::path::Path) -> PathBuf {
    flag.map(PathBuf::from)
        .unwrap_or_else(|| configured.to_path_buf())
}

/// Output paths: CLI flags if any, else the configured list, else the input.
pub(crate) fn output_paths(
    flags: Vec<String>,
    configured: &[PathBuf],
    input: &std::path::Path,
) -> Vec<PathBuf> {
    if !flags.is_empty() {
        flags.into_iter().map(PathBuf::from).collect()
    } else if !configured.is_empty() {
        configured.to_vec()
    } else {
        vec![input.to_path_buf()]
    }
}
