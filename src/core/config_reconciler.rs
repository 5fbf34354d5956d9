use crate::camera_record::CameraRecord;
use crate::common::file_utils::{self, LINE_SEPARATOR};
use crate::core::relay_command::RelayCommandTemplate;
use crate::errors::ConfigError;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Line that separates hand-maintained settings from generated camera paths.
pub const PATHS_MARKER: &str = "paths:";

/// A streaming-server config file split at the `paths:` marker.
///
/// The preamble runs up to and including the first line whose trimmed content
/// is the marker. Everything after it is the paths section. Without a marker
/// the whole file is preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    preamble: Vec<String>,
    paths: Vec<String>,
    has_marker: bool,
}

impl ConfigDocument {
    pub fn parse(text: &str) -> Self {
        ConfigDocument::from_lines(text.lines())
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut document = ConfigDocument::default();
        for line in lines {
            let line = line.into();
            if document.has_marker {
                document.paths.push(line);
            } else {
                let is_marker = line.trim() == PATHS_MARKER;
                document.preamble.push(line);
                document.has_marker = is_marker;
            }
        }
        document
    }

    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    pub fn paths_section(&self) -> &[String] {
        &self.paths
    }

    pub fn has_marker(&self) -> bool {
        self.has_marker
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.preamble.iter().chain(self.paths.iter()).map(String::as_str)
    }

    /// Every line followed by the platform line separator.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push_str(LINE_SEPARATOR);
        }
        out
    }
}

/// A generated path entry for one camera. Rebuilt on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEntry {
    pub camera: CameraRecord,
    pub relay_command: String,
}

impl StreamEntry {
    pub fn new(camera: &CameraRecord, template: &RelayCommandTemplate) -> Self {
        StreamEntry {
            relay_command: template.build_relay_command(camera.id),
            camera: camera.clone(),
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("  {}:", self.camera.path_name()),
            format!("    source: {}", self.camera.source_url),
            format!("    runOnReady: {}", self.relay_command),
            "    runOnReadyRestart: yes".to_string(),
        ]
    }
}

/// Keeps the preamble of `existing` and replaces its paths section with one
/// entry per record, in record order.
pub fn reconcile(
    existing: &ConfigDocument,
    records: &[CameraRecord],
    template: &RelayCommandTemplate,
) -> ConfigDocument {
    let paths = records
        .iter()
        .flat_map(|record| StreamEntry::new(record, template).lines())
        .collect();
    ConfigDocument {
        preamble: existing.preamble.clone(),
        paths,
        has_marker: existing.has_marker,
    }
}

pub fn load_document(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ConfigDocument::parse(&text))
}

/// Read-transform-write cycle against the config file at `path`.
///
/// A symlinked `path` is followed so the link itself survives. The new content
/// goes to a sibling temporary file carrying the original's permissions, which
/// is then renamed over the original, so the original is never partially
/// overwritten. When the rename fails the temporary file is left in place and
/// named in the error.
pub fn apply(
    path: &Path,
    records: &[CameraRecord],
    template: &RelayCommandTemplate,
) -> Result<(), ConfigError> {
    let start_time = Instant::now();
    debug!("📄 Reconciling {} camera path(s) into '{}'", records.len(), path.display());

    let not_found = |source: std::io::Error| ConfigError::NotFound { path: path.to_path_buf(), source };
    let target = fs::canonicalize(path).map_err(not_found)?;
    let existing = load_document(&target)?;
    let permissions = fs::metadata(&target).map_err(not_found)?.permissions();
    if !existing.has_marker() {
        warn!("No '{}' line found in '{}'; appending entries at the end.", PATHS_MARKER, path.display());
    }
    debug!(
        "Kept {} preamble line(s), discarding {} old path line(s)",
        existing.preamble().len(),
        existing.paths_section().len()
    );
    let updated = reconcile(&existing, records, template);

    let temp_path = file_utils::temp_path_for(&target);
    let written = file_utils::write_synced(&temp_path, &updated.render())
        .and_then(|()| fs::set_permissions(&temp_path, permissions));
    if let Err(source) = written {
        if temp_path.is_file() {
            if let Err(e) = fs::remove_file(&temp_path) {
                warn!("Could not remove partial temporary file '{}': {}", temp_path.display(), e);
            }
        }
        return Err(ConfigError::WriteFailed { temp_path, source });
    }
    debug!("Wrote reconciled config to '{}'", temp_path.display());

    replace_original(&temp_path, &target)?;
    info!(
        "✅ Wrote {} camera path(s) to '{}' in {:?}",
        records.len(),
        path.display(),
        start_time.elapsed()
    );
    Ok(())
}

fn replace_original(temp_path: &Path, path: &Path) -> Result<(), ConfigError> {
    fs::rename(temp_path, path).map_err(|source| ConfigError::ReplaceFailed {
        path: path.to_path_buf(),
        temp_path: temp_path.to_path_buf(),
        source,
    })
}
