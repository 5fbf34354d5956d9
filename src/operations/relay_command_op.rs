use crate::config_loader::MasterConfig;
use crate::core::relay_command::RelayCommandTemplate;
use anyhow::{Context, Result};
use clap::ArgMatches;

pub fn handle_relay_command_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let camera_id = args
        .get_one::<u64>("camera-id")
        .context("Missing --camera-id argument")?;
    let template = RelayCommandTemplate::new(&master_config.relay);
    println!("{}", template.build_relay_command(*camera_id));
    Ok(())
}
