use crate::errors::LaunchError;
use log::info;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Starts the external streaming server once its config has been rewritten.
pub struct MediaServerLauncher {
    executable: PathBuf,
}

impl MediaServerLauncher {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        MediaServerLauncher { executable: executable.into() }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Spawns the server detached and returns its process id. The server
    /// runs from its own directory so it picks up the config next to it.
    pub fn launch(&self) -> Result<u32, LaunchError> {
        if !self.executable.is_file() {
            return Err(LaunchError::MissingExecutable { path: self.executable.clone() });
        }

        let mut command = Command::new(&self.executable);
        if let Some(dir) = self.executable.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn { path: self.executable.clone(), source })?;

        info!("🚀 Started media server '{}' (pid {})", self.executable.display(), child.id());
        Ok(child.id())
    }
}
