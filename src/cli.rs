use clap::{Arg, ArgAction, ArgGroup, Command};

pub fn build_cli() -> Command {
    Command::new("campath")
        .version("0.1.0")
        .author("Campath Developers")
        .about("Writes an account's cameras into a MediaMTX config as relay paths.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("sync")
                .about("Fetches the account's cameras, rewrites the paths section and starts MediaMTX")
                .arg(Arg::new("account-id").long("account-id").value_name("ID").help("Numeric account id").value_parser(clap::value_parser!(u64).range(1..)).action(ArgAction::Set))
                .arg(Arg::new("username").short('u').long("username").value_name("NAME").help("Account username to resolve to an id").action(ArgAction::Set))
                .group(ArgGroup::new("account").args(["account-id", "username"]).required(true))
                .arg(mediamtx_config_arg())
                .arg(Arg::new("no-launch").long("no-launch").help("Do not start MediaMTX after writing the config").action(ArgAction::SetTrue))
                .arg(dry_run_arg())
        )
        .subcommand(
            Command::new("apply")
                .about("Writes paths from a saved camera-list response body")
                .arg(Arg::new("body").long("body").value_name("FILE").required(true).help("File holding the raw camera-list response").action(ArgAction::Set))
                .arg(mediamtx_config_arg())
                .arg(dry_run_arg())
        )
        .subcommand(
            Command::new("relay-command")
                .about("Prints the relay command generated for one camera")
                .arg(Arg::new("camera-id").long("camera-id").value_name("ID").required(true).value_parser(clap::value_parser!(u64).range(1..)).action(ArgAction::Set))
        )
}

fn mediamtx_config_arg() -> Arg {
    Arg::new("mediamtx-config")
        .long("mediamtx-config")
        .value_name("FILE")
        .help("MediaMTX config file to rewrite (default: mediamtx.config_path)")
        .action(ArgAction::Set)
}

fn dry_run_arg() -> Arg {
    Arg::new("dry-run")
        .long("dry-run")
        .help("Print the resulting config instead of writing it")
        .action(ArgAction::SetTrue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn sync_requires_an_account() {
        assert!(build_cli().try_get_matches_from(["campath", "sync"]).is_err());
        assert!(build_cli()
            .try_get_matches_from(["campath", "sync", "--account-id", "3", "--username", "bob"])
            .is_err());
        let matches = build_cli()
            .try_get_matches_from(["campath", "sync", "--username", "bob", "--no-launch"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "sync");
        assert_eq!(sub.get_one::<String>("username").map(String::as_str), Some("bob"));
        assert!(sub.get_flag("no-launch"));
    }

    #[test]
    fn zero_camera_id_is_rejected() {
        assert!(build_cli()
            .try_get_matches_from(["campath", "relay-command", "--camera-id", "0"])
            .is_err());
    }
}
