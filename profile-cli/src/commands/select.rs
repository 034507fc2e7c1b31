//! Select command - pick one of the user's projects

use anyhow::{bail, Result};
use dialoguer::Select;

use profile_core::services::events::project_changed_event;
use profile_core::{ActivationOutcome, Project};

use super::{activate, get_context, get_logger, log_events, show};
use crate::output;

pub fn run(project: Option<String>, json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    let outcome = activate(&mut ctx, "select")?;

    if !can_select(&outcome) {
        if json {
            println!("{}", serde_json::to_string_pretty(ctx.controller.state())?);
        } else {
            show::render(ctx.controller.state());
        }
        return Ok(());
    }

    let chosen = match project {
        Some(key) => match ctx.controller.state().find_project(&key) {
            Some(found) => found.clone(),
            None => bail!("No project matching '{}'", key),
        },
        None => prompt_for_project(ctx.controller.state().projects.as_slice())?,
    };

    let selected = ctx.controller.select_project(Some(chosen)).cloned();
    log_events(&get_logger(), [project_changed_event("select")]);

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    match selected {
        Some(project) => {
            output::info(&format!("Selected project: {}", output::project_label(&project)))
        }
        None => output::warning("No project selected"),
    }

    Ok(())
}

/// Nothing to choose from until both loads have succeeded; any other
/// outcome has left a payload in the error slot for the caller to show
fn can_select(outcome: &ActivationOutcome) -> bool {
    *outcome == ActivationOutcome::Ready
}

fn prompt_for_project(projects: &[Project]) -> Result<Project> {
    if projects.is_empty() {
        bail!("No projects available to select");
    }
    if !atty::is(atty::Stream::Stdin) {
        bail!("No project given; pass a project id or name");
    }

    let labels: Vec<String> = projects.iter().map(output::project_label).collect();
    let index = Select::new()
        .with_prompt("Select a project")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(projects[index].clone())
}
