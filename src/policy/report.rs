//! Confirmation text for the CLI layer. Presentation only: nothing here
//! feeds back into policy semantics.

use crate::policy::assemble::AssemblyOutcome;
use std::collections::HashSet;
use std::fmt::Write;

/// Render the success confirmation: names the team, then lists every
/// statement whose resource addresses an individual secret.
pub fn render_success(outcome: &AssemblyOutcome) -> String {
    let secret_paths: HashSet<&str> = outcome
        .resources
        .iter()
        .filter(|r| r.is_secret())
        .map(|r| r.path())
        .collect();

    let mut msg = format!(
        "Policy generated and attached to the {} team.\n",
        outcome.team.body.name
    );

    let statements: Vec<_> = outcome
        .policy
        .body
        .policy
        .statements()
        .iter()
        .filter(|s| secret_paths.contains(s.resource()))
        .collect();

    for (i, statement) in statements.iter().enumerate() {
        let _ = write!(
            msg,
            "\n  Effect: {}\n  Action(s): {}\n  Resource: {}",
            statement.effect(),
            statement.actions().join(", "),
            statement.resource()
        );
        if i + 1 != statements.len() {
            msg.push_str("\n  -");
        }
    }

    msg
}

pub fn render_failure() -> String {
    "Policy could not be generated, please try again.".to_string()
}
