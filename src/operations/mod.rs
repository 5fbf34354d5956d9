pub mod sync_op;
pub mod apply_op;
pub mod relay_command_op;

use crate::config_loader::MasterConfig;
use crate::errors::{AggregateError, ConfigError, LaunchError, SyncError, TransportError};
use clap::ArgMatches;
use std::path::PathBuf;

/// `--mediamtx-config` if given, otherwise the configured path.
pub fn mediamtx_config_path(master_config: &MasterConfig, args: &ArgMatches) -> PathBuf {
    args.get_one::<String>("mediamtx-config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&master_config.mediamtx.config_path))
}

/// One-line, user-facing summary of a failed operation.
pub fn user_message(err: &anyhow::Error) -> String {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<SyncError>() {
            return match e {
                SyncError::Fetch { source, .. } => transport_message(source),
                SyncError::Aggregate(source) => aggregate_message(source),
                SyncError::Apply(source) => config_message(source),
            };
        }
        if let Some(e) = cause.downcast_ref::<TransportError>() {
            return transport_message(e);
        }
        if let Some(e) = cause.downcast_ref::<AggregateError>() {
            return aggregate_message(e);
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return config_message(e);
        }
        if cause.downcast_ref::<LaunchError>().is_some() {
            return "Paths added, but MediaMTX was not found and couldn't be started.".to_string();
        }
    }
    format!("{:#}", err)
}

fn transport_message(e: &TransportError) -> String {
    match e {
        TransportError::UnknownAccount { .. } => "Account not found.".to_string(),
        TransportError::Connection { .. } | TransportError::Timeout { .. } => {
            "Couldn't connect to server.".to_string()
        }
        other => format!("Server request failed: {}", other),
    }
}

fn aggregate_message(e: &AggregateError) -> String {
    format!("Paths were not added: the server sent an unusable camera list ({}).", e)
}

fn config_message(e: &ConfigError) -> String {
    match e {
        ConfigError::NotFound { path, .. } => format!("{} not found, check the MediaMTX config path.", path.display()),
        ConfigError::WriteFailed { .. } => "Paths were not added: the new config could not be written.".to_string(),
        ConfigError::ReplaceFailed { temp_path, .. } => format!(
            "Paths were not added: the config could not be replaced. New content is in {}.",
            temp_path.display()
        ),
    }
}
