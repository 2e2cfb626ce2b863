//! AWS credential and region settings.
//!
//! Settings are supplied explicitly by the caller or read from the process
//! environment, optionally after loading a `.env` file.

use std::fmt;
use std::path::{Path, PathBuf};

use validator::Validate;

use crate::changeset::validate_fields;
use crate::error::{ConfigError, Result};

/// Environment variable holding the access key id.
pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";

/// Environment variable holding the secret access key.
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Environment variable holding the region.
pub const REGION_VAR: &str = "AWS_REGION";

/// Fallback environment variable for the region.
pub const DEFAULT_REGION_VAR: &str = "AWS_DEFAULT_REGION";

/// Credentials and region used to construct the CloudFormation client.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct AwsSettings {
    #[validate(length(min = 1))]
    access_key_id: String,
    #[validate(length(min = 1))]
    secret_access_key: String,
    #[validate(length(min = 1))]
    region: String,
}

impl AwsSettings {
    /// Creates settings from explicit values.
    #[must_use]
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Resolves settings from explicit values, falling back to the standard
    /// AWS environment variables for anything not given.
    ///
    /// The region falls back to `AWS_REGION`, then `AWS_DEFAULT_REGION`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is neither given nor set in the environment.
    pub fn resolve(
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
        region: Option<&str>,
    ) -> Result<Self> {
        Ok(Self::new(
            value_or_env(access_key_id, &[ACCESS_KEY_ID_VAR])?,
            value_or_env(secret_access_key, &[SECRET_ACCESS_KEY_VAR])?,
            value_or_env(region, &[REGION_VAR, DEFAULT_REGION_VAR])?,
        ))
    }

    /// Reads settings from the standard AWS environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential or the region is not set.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None, None)
    }

    /// Checks that no setting is empty.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first empty field.
    pub fn validate_required(&self) -> Result<()> {
        validate_fields(self)
    }

    /// Access key id.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret access key.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Region name.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSettings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

fn value_or_env(value: Option<&str>, vars: &[&str]) -> Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }

    vars.iter()
        .find_map(|var| std::env::var(var).ok())
        .ok_or_else(|| {
            ConfigError::MissingEnvVar {
                name: vars.first().copied().unwrap_or_default().to_string(),
            }
            .into()
        })
}

/// Loads environment files before settings are read.
#[derive(Debug, Default)]
pub struct SettingsLoader {
    /// Directory searched for `.env`.
    base_path: Option<PathBuf>,
}

impl SettingsLoader {
    /// Creates a loader rooted at the current directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the directory searched for `.env`.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads the .env file if present, returning its path when loaded.
    ///
    /// Variables already set in the process environment take precedence.
    /// Nothing is logged here, so this can run before logging is set up.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<Option<PathBuf>> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        Self::load_file(&env_path, false)
    }

    /// Loads a specific env file, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn load_env_file(path: &Path) -> Result<PathBuf> {
        Self::load_file(path, true)?.ok_or_else(|| {
            ConfigError::EnvFile {
                path: path.to_path_buf(),
                message: String::from("file does not exist"),
            }
            .into()
        })
    }

    fn load_file(path: &Path, required: bool) -> Result<Option<PathBuf>> {
        if !path.exists() {
            if required {
                return Err(ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    message: String::from("file does not exist"),
                }
                .into());
            }
            return Ok(None);
        }

        dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Some(path.to_path_buf()))
    }
}
