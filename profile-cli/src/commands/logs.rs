//! Logs command - inspect and maintain the local event log

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use profile_core::services::logging::{days_before, now_ms};
use profile_core::{EntryFilter, EntryPoint, LoggingService};

use super::get_profile_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent events, newest first
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only failed requests
        #[arg(long)]
        errors: bool,
        #[arg(long)]
        json: bool,
    },
    /// Delete old events
    Clear {
        /// Delete events older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show entry counts and where the log lives
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Copy the event log database to a file
    Export {
        /// Destination path
        path: PathBuf,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let profile_dir = get_profile_dir()?;
    std::fs::create_dir_all(&profile_dir)?;
    let service = LoggingService::new(&profile_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .context("Failed to open event log")?;

    match command {
        LogsCommands::List { limit, errors, json } => list(&service, limit, errors, json),
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => clear(&service, older_than_days, force, json),
        LogsCommands::Stats { json } => stats(&service, json),
        LogsCommands::Export { path } => export(&service, &path),
    }
}

fn list(service: &LoggingService, limit: usize, errors: bool, json: bool) -> Result<()> {
    let filter = if errors { EntryFilter::ErrorsOnly } else { EntryFilter::All };
    let entries = service.entries(filter, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No log entries found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Event", "Endpoint", "Command", "Error"]);
    for entry in entries {
        table.add_row(vec![
            format_timestamp(entry.timestamp),
            entry.event,
            entry.endpoint.unwrap_or_default(),
            entry.command.unwrap_or_default(),
            entry.error_message.unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn clear(service: &LoggingService, older_than_days: u64, force: bool, json: bool) -> Result<()> {
    let cutoff = cutoff_ms(now_ms(), older_than_days)?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete events older than {} days?", older_than_days))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = service.delete_before(cutoff)?;
    if json {
        println!("{}", serde_json::json!({ "deleted": deleted }));
    } else {
        println!("Deleted {} log entries", deleted);
    }
    Ok(())
}

fn stats(service: &LoggingService, json: bool) -> Result<()> {
    let total = service.count(EntryFilter::All)?;
    let errors = service.count_errors()?;
    let db_path = service.db_path();
    let size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    if json {
        let stats = serde_json::json!({
            "total_entries": total,
            "error_count": errors,
            "database_path": db_path.to_string_lossy(),
            "database_size_bytes": size_bytes,
        });
        println!("{}", stats);
        return Ok(());
    }

    println!("{}", "Event Log".bold());
    println!("  Total entries: {}", total);
    println!("  Errors: {}", errors);
    println!("  Database: {}", db_path.display());
    println!("  Size: {}", output::format_size(size_bytes));
    Ok(())
}

fn export(service: &LoggingService, path: &Path) -> Result<()> {
    let bytes = service
        .export(path)
        .with_context(|| format!("Failed to export event log to {}", path.display()))?;
    output::success(&format!(
        "Exported event log to {} ({})",
        path.display(),
        output::format_size(bytes)
    ));
    Ok(())
}

/// Cutoff timestamp for `clear`; day counts past the i64 range are rejected
fn cutoff_ms(now: i64, older_than_days: u64) -> Result<i64> {
    days_before(now, older_than_days)
        .with_context(|| format!("--older-than-days {} is out of range", older_than_days))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}
