use crate::cli::parser::{ConfigArgs, ConfigCommands};
use crate::config::defaults::{default_config, get_config_file_path};
use crate::config::{Config, ConfigManager};
use crate::utils::Result;
use std::path::Path;

pub fn execute(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_file_path);

    match args.command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => show_config(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init => init_config(&path),
    }
}

fn show_config(path: &Path) -> Result<()> {
    let config = ConfigManager::load_or_create_with_path(Some(path))?;
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&redacted(&config))?);
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        return Ok(());
    }

    ConfigManager::save_to_path(&default_config(), path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

pub fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    if !shown.api.api_key.is_empty() {
        shown.api.api_key = "********".to_string();
    }
    shown
}
