//! Config subcommand handlers.

use std::path::PathBuf;

use footfall_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

fn target_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(footfall_config::config_path)
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => {
            let path = target_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            footfall_config::save_config(&Config::default(), &path)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = super::load(global)?;
            print!("{}", footfall_config::to_toml(&cfg)?);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", target_path(global).display());
            Ok(())
        }
    }
}
