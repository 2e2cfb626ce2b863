//! Change set client.
//!
//! Validates caller input, reads the template, builds payloads, and issues
//! exactly one remote call per operation. Nothing is retried and nothing is
//! cached between calls.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::AwsSettings;
use crate::error::{Result, ValidationError};

use super::api::{ChangeSetApi, CloudFormationApi};
use super::naming::{NameGenerator, UuidNameGenerator};
use super::parameters::parse_parameters;
use super::types::{
    validate_fields, ChangeSetHandle, ChangeSetReference, ChangeSetRequest, ChangeSetTarget,
    CreateChangeSetInput,
};

/// Client for creating, executing, and deleting change sets.
#[derive(Debug)]
pub struct ChangeSetClient<A, N = UuidNameGenerator> {
    /// Remote API.
    api: A,
    /// Generator for change set names.
    names: N,
}

impl ChangeSetClient<CloudFormationApi> {
    /// Creates a CloudFormation-backed client with UUID name generation.
    ///
    /// # Errors
    ///
    /// Returns an error if a setting is empty.
    pub async fn from_settings(settings: &AwsSettings) -> Result<Self> {
        let api = CloudFormationApi::from_settings(settings).await?;
        Ok(Self::new(api))
    }
}

impl<A: ChangeSetApi> ChangeSetClient<A> {
    /// Creates a client over the given API with UUID name generation.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self {
            api,
            names: UuidNameGenerator,
        }
    }
}

impl<A: ChangeSetApi, N: NameGenerator> ChangeSetClient<A, N> {
    /// Creates a client with a custom name generator.
    #[must_use]
    pub const fn with_name_generator(api: A, names: N) -> Self {
        Self { api, names }
    }

    /// Proposes a new change set for a stack.
    ///
    /// The template must exist locally; its text is sent as-is.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stack name is empty or the template
    /// is missing, in which case no remote call is made. Remote failures are
    /// returned unchanged.
    pub async fn create(&self, request: &ChangeSetRequest) -> Result<ChangeSetHandle> {
        let input = self.build_create_input(request)?;
        let name = input.change_set_name.clone();

        info!(
            "Creating change set {name} for stack {}",
            request.stack_name
        );
        debug!(
            "Change set has {} parameter(s), description {}",
            input.parameters.len(),
            if input.description.is_some() { "set" } else { "unset" }
        );

        let id = self.api.create_change_set(input).await?;

        info!("Created change set {name}: {id}");
        Ok(ChangeSetHandle { id, name })
    }

    /// Starts applying a change set.
    ///
    /// Returns once CloudFormation accepts the request; the stack update
    /// itself runs asynchronously on the service side.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either name is empty. Remote failures
    /// are returned unchanged.
    pub async fn execute(&self, reference: &ChangeSetReference) -> Result<()> {
        validate_fields(reference)?;

        info!(
            "Executing change set {} on stack {}",
            reference.change_set_name, reference.stack_name
        );
        self.api
            .execute_change_set(ChangeSetTarget::from(reference))
            .await
    }

    /// Discards a change set.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either name is empty. Remote failures
    /// are returned unchanged.
    pub async fn delete(&self, reference: &ChangeSetReference) -> Result<()> {
        validate_fields(reference)?;

        info!(
            "Deleting change set {} from stack {}",
            reference.change_set_name, reference.stack_name
        );
        self.api
            .delete_change_set(ChangeSetTarget::from(reference))
            .await
    }

    /// Builds the creation payload without contacting the remote API.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stack name is empty or the template
    /// cannot be read.
    pub fn build_create_input(&self, request: &ChangeSetRequest) -> Result<CreateChangeSetInput> {
        validate_fields(request)?;

        let template_body = read_template(&request.template_file)?;

        let name = request.explicit_name().map_or_else(
            || self.names.generate(&request.stack_name),
            ToString::to_string,
        );

        Ok(CreateChangeSetInput::new(
            name,
            request.stack_name.as_str(),
            template_body,
            parse_parameters(request.parameters.as_deref()),
            request.explicit_description().map(ToString::to_string),
        ))
    }
}

/// Reads the whole template as text.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected;
/// CloudFormation reports templates it cannot parse.
fn read_template(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ValidationError::TemplateNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    debug!("Reading template from: {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| ValidationError::TemplateUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(
                "Template {} is not valid UTF-8, replacing invalid bytes",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
