use crate::config_loader::MasterConfig;
use crate::core::config_reconciler;
use crate::core::record_aggregator;
use crate::core::relay_command::RelayCommandTemplate;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use std::fs;

/// Offline variant of `sync`: the camera list comes from a saved response body.
pub fn handle_apply_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let body_path = args
        .get_one::<String>("body")
        .context("Missing --body argument for apply command")?;
    let raw_body = fs::read_to_string(body_path)
        .with_context(|| format!("Failed to read response body file '{}'", body_path))?;
    let records = record_aggregator::aggregate(&raw_body)
        .with_context(|| format!("Camera list in '{}' is not usable", body_path))?;
    info!("Loaded {} camera record(s) from '{}'", records.len(), body_path);

    let config_path = super::mediamtx_config_path(master_config, args);
    let template = RelayCommandTemplate::new(&master_config.relay);

    if args.get_flag("dry-run") {
        let existing = config_reconciler::load_document(&config_path)?;
        print!("{}", config_reconciler::reconcile(&existing, &records, &template).render());
        return Ok(());
    }
    config_reconciler::apply(&config_path, &records, &template)?;
    info!("✅ Paths added to '{}'.", config_path.display());
    Ok(())
}
