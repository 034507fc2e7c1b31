//! Config command - show or change settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use profile_core::config::{Config, Source};

use super::get_profile_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the backend base URL
    SetUrl {
        /// Backend base URL (http or https)
        url: String,
    },
}

pub fn run(command: Option<ConfigCommands>) -> Result<()> {
    let profile_dir = get_profile_dir()?;
    std::fs::create_dir_all(&profile_dir)?;
    let mut config = Config::load(&profile_dir)?;

    match command {
        Some(ConfigCommands::SetUrl { url }) => {
            config.set_base_url(&url)?;
            config.save(&profile_dir)?;
            let stored = config.stored_base_url().unwrap_or(&url);
            output::success(&format!("Backend URL set to {}", stored));
            if config.base_url_source == Source::Env {
                output::warning("PROFILE_BACKEND_URL is set and still takes precedence");
            }
        }
        Some(ConfigCommands::Show { json: true }) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "profile_dir": profile_dir.to_string_lossy(),
                    "base_url": config.base_url,
                    "base_url_source": config.base_url_source,
                }))?
            );
        }
        Some(ConfigCommands::Show { json: false }) | None => {
            let source = match config.base_url_source {
                Source::Default => "default",
                Source::Settings => "settings.json",
                Source::Env => "PROFILE_BACKEND_URL",
            };
            println!("{}", "Settings".bold());
            println!("  Profile directory: {}", profile_dir.display());
            println!("  Backend URL: {} {}", config.base_url, format!("({})", source).dimmed());
        }
    }

    Ok(())
}
