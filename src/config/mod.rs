//! Configuration module.
//!
//! This module handles the AWS credentials and region the CloudFormation
//! client is built from, and loading them from the environment.

mod settings;

pub use settings::{
    AwsSettings, SettingsLoader, ACCESS_KEY_ID_VAR, DEFAULT_REGION_VAR, REGION_VAR,
    SECRET_ACCESS_KEY_VAR,
};
