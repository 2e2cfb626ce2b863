//! Output formatting for CLI commands.
//!
//! Text output is meant for people; JSON output is meant for pipelines that
//! feed the created change set name into a later execute or delete step.

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::changeset::{ChangeSetHandle, ChangeSetReference};

use super::commands::OutputFormat;

/// Action performed on an existing change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSetAction {
    /// The change set was handed to CloudFormation for execution.
    Executed,
    /// The change set was deleted.
    Deleted,
}

impl std::fmt::Display for ChangeSetAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Executed => write!(f, "executed"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Key/value row for table display.
#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// JSON shape for execute and delete results.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionJson<'a> {
    stack_name: &'a str,
    change_set_name: &'a str,
    action: ChangeSetAction,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the result of a create operation.
    #[must_use]
    pub fn format_handle(&self, handle: &ChangeSetHandle) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(handle).unwrap_or_default(),
            OutputFormat::Text => {
                let rows = vec![
                    FieldRow {
                        field: "Name",
                        value: handle.name.clone(),
                    },
                    FieldRow {
                        field: "Id",
                        value: handle.id.clone(),
                    },
                ];
                format!(
                    "{} Change set created\n{}",
                    "✓".green(),
                    Table::new(rows)
                )
            }
        }
    }

    /// Formats the result of an execute or delete operation.
    #[must_use]
    pub fn format_action(&self, reference: &ChangeSetReference, action: ChangeSetAction) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&ActionJson {
                stack_name: &reference.stack_name,
                change_set_name: &reference.change_set_name,
                action,
            })
            .unwrap_or_default(),
            OutputFormat::Text => format!(
                "{} Change set {} {action} on stack {}",
                "✓".green(),
                reference.change_set_name.bold(),
                reference.stack_name.bold()
            ),
        }
    }
}
