use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Line separator used for every line written to a config file.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

const TEMP_SUFFIX: &str = "campath.tmp";

/// Sibling temporary path for `target`, e.g. `mediamtx.yml` -> `mediamtx.yml.campath.tmp`.
///
/// Kept in the same directory so the final rename never crosses filesystems.
pub fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    target.with_file_name(format!("{}.{}", file_name, TEMP_SUFFIX))
}

/// Creates (or truncates) `path`, writes `contents` and flushes it to disk.
pub fn write_synced(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
