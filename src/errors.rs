use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a raw directory response into camera records.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Response body is not a sequence of JSON values: {0}")]
    InvalidBody(String),

    #[error("Malformed camera record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

/// Storage faults raised while reconciling the streaming-server config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file '{}' could not be opened for reading: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write temporary config file '{}': {source}", .temp_path.display())]
    WriteFailed {
        temp_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Failed to replace '{}' with '{}' (temporary file kept for recovery): {source}",
        .path.display(),
        .temp_path.display()
    )]
    ReplaceFailed {
        path: PathBuf,
        temp_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// True when storage may hold a half-finished swap that needs an operator.
    pub fn mutation_possible(&self) -> bool {
        matches!(self, ConfigError::ReplaceFailed { .. })
    }
}

/// Faults talking to the account directory service.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to set up HTTP client: {0}")]
    ClientSetup(String),

    #[error("Connection to '{url}' failed: {details}")]
    Connection { url: String, details: String },

    #[error("Request to '{url}' timed out")]
    Timeout { url: String },

    #[error("Request to '{url}' returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from '{url}': {details}")]
    Body { url: String, details: String },

    #[error("Unexpected response from '{url}': {details}")]
    InvalidResponse { url: String, details: String },

    #[error("Account '{username}' not found")]
    UnknownAccount { username: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Fetch,
    Aggregate,
    Apply,
}

impl std::fmt::Display for SyncStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SyncStage::Fetch => "fetch",
            SyncStage::Aggregate => "aggregate",
            SyncStage::Apply => "apply",
        };
        f.write_str(name)
    }
}

/// A sync pass failure, tagged with the stage that produced it.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Fetching cameras for account {account_id} failed: {source}")]
    Fetch {
        account_id: u64,
        #[source]
        source: TransportError,
    },

    #[error("Aggregating camera records failed: {0}")]
    Aggregate(#[source] AggregateError),

    #[error("Applying camera paths failed: {0}")]
    Apply(#[source] ConfigError),
}

impl SyncError {
    pub fn stage(&self) -> SyncStage {
        match self {
            SyncError::Fetch { .. } => SyncStage::Fetch,
            SyncError::Aggregate(_) => SyncStage::Aggregate,
            SyncError::Apply(_) => SyncStage::Apply,
        }
    }

    /// Only a failed swap can leave storage in a state needing manual recovery.
    pub fn requires_operator_attention(&self) -> bool {
        match self {
            SyncError::Apply(e) => e.mutation_possible(),
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Media server executable '{}' not found", .path.display())]
    MissingExecutable { path: PathBuf },

    #[error("Failed to start media server '{}': {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
