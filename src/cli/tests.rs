#[cfg(test)]
mod cli_tests {
    use crate::cli::parser::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_sync_command_parsing() {
        let cli = Cli::try_parse_from(["leadsync", "sync"]).unwrap();
        match cli.command {
            Commands::Sync(args) => assert!(!args.json),
            _ => panic!("Expected Sync command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_sync_command_with_json() {
        let cli = Cli::try_parse_from(["leadsync", "sync", "--json"]).unwrap();
        match cli.command {
            Commands::Sync(args) => assert!(args.json),
            _ => panic!("Expected Sync command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "leadsync",
            "sync",
            "--config",
            "/tmp/leadsync.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/leadsync.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_watch_command_overrides() {
        let cli = Cli::try_parse_from([
            "leadsync",
            "watch",
            "--interval",
            "60",
            "--initial-delay",
            "0",
        ])
        .unwrap();
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.interval, Some(60));
                assert_eq!(args.initial_delay, Some(0));
                assert!(args.validate().is_ok());
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_watch_rejects_zero_interval() {
        let cli = Cli::try_parse_from(["leadsync", "watch", "--interval", "0"]).unwrap();
        match cli.command {
            Commands::Watch(args) => assert!(args.validate().is_err()),
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_inspect_and_alias() {
        let cli = Cli::try_parse_from(["leadsync", "inspect", "--all"]).unwrap();
        match cli.command {
            Commands::Inspect(args) => {
                assert!(args.all);
                assert!(!args.json);
            }
            _ => panic!("Expected Inspect command"),
        }

        let cli = Cli::try_parse_from(["leadsync", "dry-run", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect(ref args) if args.json));
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["leadsync", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ref args) if args.command.is_none()));

        let cli = Cli::try_parse_from(["leadsync", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                command: Some(ConfigCommands::Path)
            })
        ));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["leadsync"]).is_err());
        assert!(Cli::try_parse_from(["leadsync", "push"]).is_err());
    }
}
