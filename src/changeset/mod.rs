//! Change set operations.
//!
//! This module provides the client that proposes, applies, and discards
//! CloudFormation change sets, along with the request types, parameter
//! parsing, and name generation it relies on.
//!
//! The free functions build a CloudFormation-backed client from explicit
//! settings for one call. Long-lived callers and tests should construct a
//! [`ChangeSetClient`] directly.

mod api;
mod client;
mod naming;
mod parameters;
mod types;

pub use api::{ChangeSetApi, CloudFormationApi};
pub use client::ChangeSetClient;
pub use naming::{NameGenerator, UuidNameGenerator};
pub use parameters::{parse_parameters, ParsedParameter};
pub use types::{
    validate_fields, Capability, ChangeSetHandle, ChangeSetReference, ChangeSetRequest,
    ChangeSetTarget, ChangeSetType, CreateChangeSetInput,
};

use crate::config::AwsSettings;
use crate::error::Result;

/// Creates a change set using the given credentials and region.
///
/// # Errors
///
/// See [`ChangeSetClient::create`].
pub async fn create_change_set(
    settings: &AwsSettings,
    request: &ChangeSetRequest,
) -> Result<ChangeSetHandle> {
    ChangeSetClient::from_settings(settings)
        .await?
        .create(request)
        .await
}

/// Executes a change set using the given credentials and region.
///
/// # Errors
///
/// See [`ChangeSetClient::execute`].
pub async fn execute_change_set(
    settings: &AwsSettings,
    reference: &ChangeSetReference,
) -> Result<()> {
    ChangeSetClient::from_settings(settings)
        .await?
        .execute(reference)
        .await
}

/// Deletes a change set using the given credentials and region.
///
/// # Errors
///
/// See [`ChangeSetClient::delete`].
pub async fn delete_change_set(
    settings: &AwsSettings,
    reference: &ChangeSetReference,
) -> Result<()> {
    ChangeSetClient::from_settings(settings)
        .await?
        .delete(reference)
        .await
}
