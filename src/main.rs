use campath::cli;
use campath::common::logging_setup;
use campath::config_loader;
use campath::operations;
use log::{info, error, debug};
use anyhow::{bail, Result};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

const DEFAULT_CONFIG_PATH: &str = "config/campath.yaml";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", operations::user_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let explicit_config = matches.get_one::<String>("config").map(|s| s.as_str());
    let config_path = explicit_config.unwrap_or(DEFAULT_CONFIG_PATH);

    // The default file is optional; an explicitly named one is not.
    let loaded = if explicit_config.is_none() && !Path::new(config_path).exists() {
        Ok(config_loader::MasterConfig::default())
    } else {
        config_loader::load_config(config_path)
    };
    let master_config = match loaded {
        Ok(cfg) => {
            logging_setup::initialize_logging(Some(&cfg), &matches);
            debug!("Configuration ready (source: {})", config_path);
            cfg
        }
        Err(e) => {
            logging_setup::initialize_logging(None, &matches);
            error!("❌ Failed to load master configuration from '{}': {:#}. Exiting.", config_path, e);
            return Err(e);
        }
    };

    let Some((operation_name, sub_matches)) = matches.subcommand() else {
        bail!("No subcommand provided. Run with --help for usage.");
    };
    debug!("🎬 Dispatching to subcommand: {}", operation_name);
    let op_start_time = Instant::now();

    let op_result = match operation_name {
        "sync" => operations::sync_op::handle_sync_cli(&master_config, sub_matches),
        "apply" => operations::apply_op::handle_apply_cli(&master_config, sub_matches),
        "relay-command" => operations::relay_command_op::handle_relay_command_cli(&master_config, sub_matches),
        other => bail!("Subcommand '{}' not implemented.", other),
    };

    if let Err(e) = op_result {
        error!("❌ Operation '{}' failed after {:?}: {:#}", operation_name, op_start_time.elapsed(), e);
        return Err(e);
    }
    info!("🏁 Campath finished in {:?}.", main_start_time.elapsed());
    Ok(())
}
