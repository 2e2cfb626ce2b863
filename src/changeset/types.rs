//! Change set request and payload types.
//!
//! Requests are what callers hand to [`super::ChangeSetClient`]; payloads are
//! what the client hands to the remote API. Payloads serialize with the same
//! field names CloudFormation uses.

use std::path::PathBuf;

use serde::Serialize;
use validator::Validate;

use crate::error::{Result, ValidationError};

use super::parameters::ParsedParameter;

/// Input to a create operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ChangeSetRequest {
    /// Target stack name.
    #[validate(length(min = 1))]
    pub stack_name: String,
    /// Local path to the stack template.
    pub template_file: PathBuf,
    /// Change set name. Generated from the stack name when absent or empty.
    pub change_set_name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Comma-separated `key=value` pairs.
    pub parameters: Option<String>,
}

impl ChangeSetRequest {
    /// Creates a request for the given stack and template.
    #[must_use]
    pub fn new(stack_name: impl Into<String>, template_file: impl Into<PathBuf>) -> Self {
        Self {
            stack_name: stack_name.into(),
            template_file: template_file.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit change set name.
    #[must_use]
    pub fn with_change_set_name(mut self, name: impl Into<String>) -> Self {
        self.change_set_name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw parameter string.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    /// Returns the caller-supplied change set name, ignoring empty values.
    #[must_use]
    pub fn explicit_name(&self) -> Option<&str> {
        self.change_set_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns the caller-supplied description, ignoring empty values.
    #[must_use]
    pub fn explicit_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|description| !description.is_empty())
    }
}

/// Input to execute and delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ChangeSetReference {
    /// Stack the change set belongs to.
    #[validate(length(min = 1))]
    pub stack_name: String,
    /// Change set name.
    #[validate(length(min = 1))]
    pub change_set_name: String,
}

impl ChangeSetReference {
    /// Creates a reference to a change set on a stack.
    #[must_use]
    pub fn new(stack_name: impl Into<String>, change_set_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            change_set_name: change_set_name.into(),
        }
    }
}

/// Result of a create operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSetHandle {
    /// Id assigned by CloudFormation.
    pub id: String,
    /// Change set name, supplied or generated.
    pub name: String,
}

/// Capabilities acknowledged on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Capability {
    /// Acknowledges that the template may create IAM resources.
    #[serde(rename = "CAPABILITY_IAM")]
    Iam,
}

impl Capability {
    /// Wire name of the capability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iam => "CAPABILITY_IAM",
        }
    }
}

/// Kind of change set. Only new-stack change sets are proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeSetType {
    /// Change set for a stack that does not exist yet.
    #[serde(rename = "CREATE")]
    Create,
}

impl ChangeSetType {
    /// Wire name of the change set type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
        }
    }
}

/// Payload of a `CreateChangeSet` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateChangeSetInput {
    /// Acknowledged capabilities.
    pub capabilities: Vec<Capability>,
    /// Change set type.
    pub change_set_type: ChangeSetType,
    /// Resolved change set name.
    pub change_set_name: String,
    /// Target stack.
    pub stack_name: String,
    /// Raw template text.
    pub template_body: String,
    /// Parsed parameters, in input order.
    pub parameters: Vec<ParsedParameter>,
    /// Description, omitted when not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateChangeSetInput {
    /// Builds a creation payload with the fixed capability and type.
    #[must_use]
    pub fn new(
        change_set_name: impl Into<String>,
        stack_name: impl Into<String>,
        template_body: impl Into<String>,
        parameters: Vec<ParsedParameter>,
        description: Option<String>,
    ) -> Self {
        Self {
            capabilities: vec![Capability::Iam],
            change_set_type: ChangeSetType::Create,
            change_set_name: change_set_name.into(),
            stack_name: stack_name.into(),
            template_body: template_body.into(),
            parameters,
            description,
        }
    }
}

/// Payload of `ExecuteChangeSet` and `DeleteChangeSet` calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeSetTarget {
    /// Change set name.
    pub change_set_name: String,
    /// Stack name.
    pub stack_name: String,
}

impl From<&ChangeSetReference> for ChangeSetTarget {
    fn from(reference: &ChangeSetReference) -> Self {
        Self {
            change_set_name: reference.change_set_name.clone(),
            stack_name: reference.stack_name.clone(),
        }
    }
}

/// Runs derived field validation, reporting empty fields as missing.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] naming every failing field.
pub fn validate_fields<T: Validate>(value: &T) -> Result<()> {
    value.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(ToString::to_string)
            .collect();
        fields.sort();
        ValidationError::missing_field(fields.join(", ")).into()
    })
}
