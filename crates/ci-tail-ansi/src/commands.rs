//! Workflow command parsing
//!
//! Recognises `::error::`, `::warning::` and `::notice::` annotations that CI
//! runners print into the raw log.

use crate::types::{CommandParams, WorkflowCommand};
use regex::Regex;
use std::sync::OnceLock;

/// Parse a line for workflow commands
///
/// Returns `None` when the line holds no command or an unknown one.
pub fn parse_command(line: &str) -> Option<WorkflowCommand> {
    static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = COMMAND_REGEX.get_or_init(|| {
        // Match ::command params::message or ::command::message
        Regex::new(r"^::([a-zA-Z-]+)(?:\s+([^:]+?))?::(.*)$").expect("valid command regex")
    });

    let captures = re.captures(line.trim())?;
    let command_name = captures.get(1)?.as_str();
    let params = parse_params(captures.get(2).map(|m| m.as_str()).unwrap_or(""));
    let message = captures.get(3)?.as_str().to_string();

    let command = match command_name.to_lowercase().as_str() {
        "error" => WorkflowCommand::Error { message, params },
        "warning" => WorkflowCommand::Warning { message, params },
        "notice" => WorkflowCommand::Notice { message, params },
        _ => return None,
    };

    Some(command)
}

/// Parse command parameters like "file=foo.rs,line=42,col=10"
fn parse_params(params_str: &str) -> CommandParams {
    let mut params = CommandParams::default();

    for param in params_str.split(',') {
        let Some((key, value)) = param.trim().split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "file" => params.file = Some(value.to_string()),
            "line" => params.line = value.parse().ok(),
            "col" => params.col = value.parse().ok(),
            "title" => params.title = Some(value.to_string()),
            _ => {}
        }
    }

    params
}
