use serde::Deserialize;
use std::fs;
use crate::app_config::{ApplicationConfig, DirectoryConfig, EndpointConfig, MediaMtxConfig, RelayConfig};
use anyhow::{Result, Context, bail};
use log::{debug, info};
use std::time::Instant;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MasterConfig {
    #[serde(rename = "application")]
    pub app_settings: ApplicationConfig,
    pub directory: DirectoryConfig,
    pub mediamtx: MediaMtxConfig,
    pub relay: RelayConfig,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    let config = parse_config(&config_str)
        .with_context(|| format!("Invalid configuration in '{}'", path))?;

    info!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

pub fn parse_config(config_str: &str) -> Result<MasterConfig> {
    // An empty file means "all defaults"; serde_yaml reads it as null.
    let config: MasterConfig = if config_str.trim().is_empty() {
        MasterConfig::default()
    } else {
        serde_yaml::from_str(config_str).context("Failed to parse YAML configuration. 💔")?
    };
    validate_master_config(&config).context("Master configuration validation failed 👎")?;
    Ok(config)
}

fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    let directory = &config.directory;
    if directory.base_url.is_empty() {
        bail!("❌ directory.base_url cannot be empty.");
    }
    if !directory.base_url.starts_with("http://") && !directory.base_url.starts_with("https://") {
        bail!("❌ directory.base_url '{}' must start with http:// or https://.", directory.base_url);
    }
    if directory.request_timeout_secs == 0 {
        bail!("❌ directory.request_timeout_secs must be greater than zero.");
    }

    if config.mediamtx.config_path.trim().is_empty() {
        bail!("❌ mediamtx.config_path cannot be empty.");
    }

    if config.relay.program.trim().is_empty() {
        bail!("❌ relay.program cannot be empty.");
    }
    if config.relay.output_format.trim().is_empty() {
        bail!("❌ relay.output_format cannot be empty.");
    }
    validate_endpoint("relay.source", &config.relay.source)?;
    validate_endpoint("relay.destination", &config.relay.destination)?;
    Ok(())
}

fn validate_endpoint(name: &str, endpoint: &EndpointConfig) -> Result<()> {
    if endpoint.scheme.is_empty() || endpoint.scheme.contains("://") {
        bail!("❌ {}.scheme '{}' must be a bare scheme such as 'rtsps'.", name, endpoint.scheme);
    }
    if endpoint.host.trim().is_empty() {
        bail!("❌ {}.host cannot be empty.", name);
    }
    if endpoint.port == 0 {
        bail!("❌ {}.port cannot be 0.", name);
    }
    Ok(())
}
