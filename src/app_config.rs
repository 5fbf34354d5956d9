use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    pub log_level: Option<String>, // Overridden by --debug
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            log_level: Some("info".to_string()),
        }
    }
}

/// Where the account directory API lives.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        DirectoryConfig {
            base_url: "http://172.166.189.197:8081".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// The local MediaMTX install whose config gets rewritten.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MediaMtxConfig {
    pub config_path: String,
    pub executable: String,
    pub launch_after_sync: bool,
}

impl Default for MediaMtxConfig {
    fn default() -> Self {
        MediaMtxConfig {
            config_path: "./mediamtx.yml".to_string(),
            executable: (if cfg!(windows) { "./mediamtx.exe" } else { "./mediamtx" }).to_string(),
            launch_after_sync: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub scheme: String, // e.g., "rtsps"
    pub host: String,
    pub port: u16,
}

/// Constants of the generated relay command.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RelayConfig {
    pub program: String,
    pub output_format: String, // Passed to -f
    pub source: EndpointConfig,
    pub destination: EndpointConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            program: "ffmpeg".to_string(),
            output_format: "rtsp".to_string(),
            source: EndpointConfig {
                scheme: "rtsps".to_string(),
                host: "localhost".to_string(),
                port: 8322,
            },
            destination: EndpointConfig {
                scheme: "rtsps".to_string(),
                host: "172.166.189.197".to_string(),
                port: 8322,
            },
        }
    }
}
