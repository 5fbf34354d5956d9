use crate::clients::directory_client::HttpDirectoryClient;
use crate::clients::media_server::MediaServerLauncher;
use crate::config_loader::MasterConfig;
use crate::core::config_reconciler;
use crate::core::relay_command::RelayCommandTemplate;
use crate::core::sync_orchestrator;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{error, info, warn};
use std::path::PathBuf;

pub fn handle_sync_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let directory = HttpDirectoryClient::new(&master_config.directory)
        .context("Failed to create account directory client")?;

    let account_id = match args.get_one::<u64>("account-id") {
        Some(id) => *id,
        None => {
            let username = args
                .get_one::<String>("username")
                .context("Either --account-id or --username is required")?;
            directory
                .resolve_account_id(username)
                .with_context(|| format!("Could not resolve account '{}'", username))?
        }
    };

    let config_path = super::mediamtx_config_path(master_config, args);
    let template = RelayCommandTemplate::new(&master_config.relay);

    if args.get_flag("dry-run") {
        let records = sync_orchestrator::fetch_records(&directory, account_id)?;
        let existing = config_reconciler::load_document(&config_path)?;
        print!("{}", config_reconciler::reconcile(&existing, &records, &template).render());
        info!("Dry run: {} camera path(s) not written to '{}'", records.len(), config_path.display());
        return Ok(());
    }

    let records = match sync_orchestrator::sync(&directory, account_id, &config_path, &template) {
        Ok(records) => records,
        Err(e) => {
            if e.requires_operator_attention() {
                error!("'{}' may need manual recovery: {}", config_path.display(), e);
            }
            return Err(e).with_context(|| format!("Sync for account {} failed", account_id));
        }
    };
    if records.is_empty() {
        warn!("Account {} has no cameras; the paths section is now empty.", account_id);
    }

    if !master_config.mediamtx.launch_after_sync || args.get_flag("no-launch") {
        info!("✅ Paths added. Skipping MediaMTX launch.");
        return Ok(());
    }
    let launcher = MediaServerLauncher::new(PathBuf::from(&master_config.mediamtx.executable));
    launcher
        .launch()
        .context("Paths added, but MediaMTX could not be started")?;
    info!("✅ Paths added. Streams can be viewed remotely while MediaMTX is running.");
    Ok(())
}
