//! CLI module for the change set tool.
//!
//! This module provides the command-line front-end over the change set
//! client.

mod commands;
mod output;

pub use commands::{Cli, Commands, CreateArgs, LogFormat, OutputFormat, TargetArgs};
pub use output::{ChangeSetAction, OutputFormatter};
