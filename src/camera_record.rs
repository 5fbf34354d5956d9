use serde::Deserialize;

/// One camera as returned by the account directory.
///
/// Wire field names are those of the directory API; unknown fields are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CameraRecord {
    #[serde(rename = "cameraid")]
    pub id: u64,
    #[serde(rename = "rtspurl")]
    pub source_url: String,
    #[serde(rename = "streampath")]
    pub stream_path: String,
}

impl CameraRecord {
    pub fn new(id: u64, source_url: impl Into<String>, stream_path: impl Into<String>) -> Self {
        CameraRecord {
            id,
            source_url: source_url.into(),
            stream_path: stream_path.into(),
        }
    }

    /// Path key used both in the streaming-server config and in relay URLs.
    pub fn path_name(&self) -> String {
        path_name_for(self.id)
    }
}

pub fn path_name_for(id: u64) -> String {
    format!("cam{}", id)
}
