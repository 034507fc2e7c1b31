//! Show command - load and display the current user and their projects

use anyhow::Result;
use colored::Colorize;
use serde_json::Value as JsonValue;

use profile_core::ViewState;

use super::{activate, get_context};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    activate(&mut ctx, "show")?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.controller.state())?);
        return Ok(());
    }

    render(ctx.controller.state());
    Ok(())
}

/// Render the bindings: user, project list, then the error slot
pub fn render(state: &ViewState) {
    match state.user.as_ref().filter(|u| !u.is_empty()) {
        Some(user) => {
            let label = user.display_name().unwrap_or_else(|| "unknown user".to_string());
            println!("{} {}", "Signed in as".bold(), label);
            println!();

            if let JsonValue::Object(fields) = user.raw() {
                let mut table = output::create_table();
                for (key, value) in fields {
                    table.add_row(vec![key.clone(), output::cell(value)]);
                }
                println!("{}", table);
            } else {
                println!("{}", user.raw());
            }
            println!();

            if state.projects.is_empty() {
                println!("{}", "No projects".dimmed());
            } else {
                println!("{}", "Projects".bold());
                let mut table = output::create_table();
                table.set_header(vec!["Name", "ID"]);
                for project in &state.projects {
                    table.add_row(vec![
                        project.name().unwrap_or_else(|| "-".to_string()),
                        project.id().unwrap_or_else(|| "-".to_string()),
                    ]);
                }
                println!("{}", table);
            }
        }
        None => println!("{}", "Not signed in".yellow()),
    }

    if let Some(error) = &state.error {
        println!();
        output::error(&format!("Error: {}", error));
    }
}
