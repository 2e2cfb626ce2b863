//! Parsing of `key=value` stack parameter strings.
//!
//! Parsing is permissive: malformed tokens are passed through rather than
//! rejected, and CloudFormation reports whatever it does not accept.

use serde::Serialize;

/// A single stack parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedParameter {
    /// Parameter key.
    #[serde(rename = "ParameterKey")]
    pub key: String,
    /// Parameter value. Absent for tokens without a usable `=`.
    #[serde(rename = "ParameterValue", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ParsedParameter {
    /// Creates a parameter with a value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Splits one token on its first `=`.
    ///
    /// A token with no `=`, or with nothing before it, becomes a key with no
    /// value.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => Self::new(key, value),
            _ => Self {
                key: token.to_string(),
                value: None,
            },
        }
    }
}

/// Parses a comma-separated parameter string.
///
/// Blank or absent input yields no parameters. Order is preserved and
/// duplicate keys are kept.
#[must_use]
pub fn parse_parameters(raw: Option<&str>) -> Vec<ParsedParameter> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => {
            raw.split(',').map(ParsedParameter::from_token).collect()
        }
        _ => Vec::new(),
    }
}
