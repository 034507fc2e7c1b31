//! Logout command - end the backend session

use anyhow::Result;
use dialoguer::Confirm;

use profile_core::services::events::logout_event;
use profile_core::{LogoutOutcome, OperationResult};

use super::{block_on, get_context, get_logger, log_events};
use crate::output;

pub fn run(force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt("Log out of the backend?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let mut ctx = get_context()?;

    let outcome = block_on(ctx.controller.logout())?;
    log_events(&get_logger(), [logout_event(&outcome, "logout")]);

    // A failed logout is reported, not raised: the command itself worked
    let result: OperationResult<()> = match &outcome {
        LogoutOutcome::LoggedOut => OperationResult::ok(()),
        LogoutOutcome::Failed(payload) => OperationResult::fail(payload.summary()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match outcome {
        LogoutOutcome::LoggedOut => output::success("Logged out"),
        LogoutOutcome::Failed(payload) => output::warning(&format!("Logout failed: {}", payload)),
    }

    Ok(())
}
