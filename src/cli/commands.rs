//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::changeset::{ChangeSetReference, ChangeSetRequest};

/// cfn-changeset - Create, execute, and delete CloudFormation change sets.
#[derive(Parser, Debug)]
#[command(name = "cfn-changeset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// AWS access key id.
    #[arg(long, global = true, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// AWS secret access key.
    #[arg(long, global = true, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// AWS region.
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Environment file loaded before reading settings.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Log format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Propose a new change set for a stack.
    Create(CreateArgs),

    /// Apply an existing change set.
    Execute(TargetArgs),

    /// Discard an existing change set.
    Delete(TargetArgs),
}

/// Arguments for `create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Target stack name.
    #[arg(long, env = "CFN_STACK_NAME")]
    pub stack_name: String,

    /// Path to the stack template.
    #[arg(long, env = "CFN_TEMPLATE_FILE")]
    pub template_file: PathBuf,

    /// Change set name (generated from the stack name if omitted).
    #[arg(long, env = "CFN_CHANGE_SET_NAME")]
    pub change_set_name: Option<String>,

    /// Change set description.
    #[arg(long, env = "CFN_DESCRIPTION")]
    pub description: Option<String>,

    /// Stack parameters as comma-separated key=value pairs.
    #[arg(long, env = "CFN_PARAMETERS")]
    pub parameters: Option<String>,
}

/// Arguments for `execute` and `delete`.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Stack the change set belongs to.
    #[arg(long, env = "CFN_STACK_NAME")]
    pub stack_name: String,

    /// Change set name.
    #[arg(long, env = "CFN_CHANGE_SET_NAME")]
    pub change_set_name: String,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Plain log lines.
    #[default]
    Text,
    /// One JSON object per log line.
    Json,
}

impl From<CreateArgs> for ChangeSetRequest {
    fn from(args: CreateArgs) -> Self {
        Self {
            stack_name: args.stack_name,
            template_file: args.template_file,
            change_set_name: args.change_set_name,
            description: args.description,
            parameters: args.parameters,
        }
    }
}

impl From<TargetArgs> for ChangeSetReference {
    fn from(args: TargetArgs) -> Self {
        Self::new(args.stack_name, args.change_set_name)
    }
}
