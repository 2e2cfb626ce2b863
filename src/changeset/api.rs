//! Remote change set API.
//!
//! [`ChangeSetApi`] is the seam between the client and CloudFormation. The
//! production implementation wraps the AWS SDK; tests substitute a mock.

use async_trait::async_trait;
use aws_sdk_cloudformation::config::Credentials;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::types::{
    Capability as SdkCapability, ChangeSetType as SdkChangeSetType, Parameter,
};
use aws_sdk_cloudformation::Client;
use tracing::{debug, trace};

use crate::config::AwsSettings;
use crate::error::{ChangeSetError, RemoteApiError, Result};

use super::types::{ChangeSetTarget, CreateChangeSetInput};

/// Provider name attached to the static credentials.
const CREDENTIALS_PROVIDER: &str = "cfn-changeset";

/// Remote operations on change sets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeSetApi: Send + Sync {
    /// Creates a change set and returns its id.
    async fn create_change_set(&self, input: CreateChangeSetInput) -> Result<String>;

    /// Starts applying a change set.
    async fn execute_change_set(&self, target: ChangeSetTarget) -> Result<()>;

    /// Deletes a change set.
    async fn delete_change_set(&self, target: ChangeSetTarget) -> Result<()>;
}

/// CloudFormation implementation of [`ChangeSetApi`].
#[derive(Debug, Clone)]
pub struct CloudFormationApi {
    /// CloudFormation client.
    client: Client,
}

impl CloudFormationApi {
    /// Creates a client using the given credentials and region.
    ///
    /// # Errors
    ///
    /// Returns an error if a setting is empty.
    pub async fn from_settings(settings: &AwsSettings) -> Result<Self> {
        settings.validate_required()?;

        let credentials = Credentials::new(
            settings.access_key_id(),
            settings.secret_access_key(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.region().to_string()))
            .credentials_provider(credentials)
            .load()
            .await;

        debug!("Created CloudFormation client for region {}", settings.region());

        Ok(Self {
            client: Client::new(&config),
        })
    }

    /// Creates an API wrapper around an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Converts an SDK failure, keeping its code, message chain, and cause.
fn remote_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ChangeSetError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    let code = err.code().map(ToString::to_string);
    RemoteApiError::with_source(operation, code.as_deref(), message, err).into()
}

#[async_trait]
impl ChangeSetApi for CloudFormationApi {
    async fn create_change_set(&self, input: CreateChangeSetInput) -> Result<String> {
        trace!("CreateChangeSet payload: {input:?}");

        let capabilities = input
            .capabilities
            .iter()
            .map(|c| SdkCapability::from(c.as_str()))
            .collect();

        let parameters = input
            .parameters
            .into_iter()
            .map(|p| {
                Parameter::builder()
                    .parameter_key(p.key)
                    .set_parameter_value(p.value)
                    .build()
            })
            .collect();

        let output = self
            .client
            .create_change_set()
            .set_capabilities(Some(capabilities))
            .change_set_type(SdkChangeSetType::from(input.change_set_type.as_str()))
            .change_set_name(&input.change_set_name)
            .stack_name(input.stack_name)
            .template_body(input.template_body)
            .set_parameters(Some(parameters))
            .set_description(input.description)
            .send()
            .await
            .map_err(|e| remote_error("CreateChangeSet", e))?;

        output.id().map(ToString::to_string).ok_or_else(|| {
            RemoteApiError::MissingChangeSetId {
                name: input.change_set_name,
            }
            .into()
        })
    }

    async fn execute_change_set(&self, target: ChangeSetTarget) -> Result<()> {
        self.client
            .execute_change_set()
            .change_set_name(target.change_set_name)
            .stack_name(target.stack_name)
            .send()
            .await
            .map_err(|e| remote_error("ExecuteChangeSet", e))?;

        Ok(())
    }

    async fn delete_change_set(&self, target: ChangeSetTarget) -> Result<()> {
        self.client
            .delete_change_set()
            .change_set_name(target.change_set_name)
            .stack_name(target.stack_name)
            .send()
            .await
            .map_err(|e| remote_error("DeleteChangeSet", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changeset::parameters::ParsedParameter;
    use aws_sdk_cloudformation::config::retry::RetryConfig;
    use aws_sdk_cloudformation::config::{BehaviorVersion, Region};
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const NAMESPACE: &str = "http://cloudformation.amazonaws.com/doc/2010-05-15/";
    const CHANGE_SET_ARN: &str =
        "arn:aws:cloudformation:eu-west-1:123456789012:changeSet/release-42/0a1b2c3d";

    /// Builds an API whose requests go to the local server, without retries.
    fn api_for(server: &MockServer) -> CloudFormationApi {
        let config = aws_sdk_cloudformation::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-1"))
            .credentials_provider(Credentials::new("AKIAEXAMPLE", "secret", None, None, "test"))
            .endpoint_url(server.uri())
            .retry_config(RetryConfig::disabled())
            .build();

        CloudFormationApi::with_client(Client::from_conf(config))
    }

    fn xml_response(status: u16, body: String) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_raw(body, "text/xml")
    }

    fn error_response(code: &str, message: &str) -> ResponseTemplate {
        xml_response(
            400,
            format!(
                "<ErrorResponse xmlns=\"{NAMESPACE}\"><Error><Type>Sender</Type>\
                 <Code>{code}</Code><Message>{message}</Message></Error>\
                 <RequestId>req-1</RequestId></ErrorResponse>"
            ),
        )
    }

    /// Returns the form fields of the single request the server received.
    async fn received_form(server: &MockServer) -> Vec<(String, String)> {
        let requests = server
            .received_requests()
            .await
            .expect("request recording should be enabled");
        assert_eq!(requests.len(), 1);

        String::from_utf8_lossy(&requests[0].body)
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    fn create_input() -> CreateChangeSetInput {
        CreateChangeSetInput::new(
            "release-42",
            "demo-stack",
            "AWSTemplateFormatVersion: \"2010-09-09\"\n",
            vec![
                ParsedParameter::new("Env", "prod"),
                ParsedParameter::from_token("Flag"),
            ],
            None,
        )
    }

    #[tokio::test]
    async fn test_from_settings_rejects_empty_credentials() {
        let settings = AwsSettings::new("", "secret", "eu-west-1");
        let result = CloudFormationApi::from_settings(&settings).await;

        assert!(matches!(result, Err(ChangeSetError::Validation(_))));
    }

    #[tokio::test]
    async fn test_from_settings_builds_client() {
        let settings = AwsSettings::new("AKIAEXAMPLE", "secret", "eu-west-1");
        let api = CloudFormationApi::from_settings(&settings)
            .await
            .expect("client should build");

        assert_eq!(
            api.client.config().region().map(ToString::to_string).as_deref(),
            Some("eu-west-1")
        );
    }

    #[tokio::test]
    async fn test_create_sends_query_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Action=CreateChangeSet"))
            .respond_with(xml_response(
                200,
                format!(
                    "<CreateChangeSetResponse xmlns=\"{NAMESPACE}\"><CreateChangeSetResult>\
                     <Id>{CHANGE_SET_ARN}</Id></CreateChangeSetResult>\
                     <ResponseMetadata><RequestId>req-1</RequestId></ResponseMetadata>\
                     </CreateChangeSetResponse>"
                ),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let id = api_for(&server)
            .create_change_set(create_input())
            .await
            .expect("create should succeed");
        assert_eq!(id, CHANGE_SET_ARN);

        let fields = received_form(&server).await;
        assert_eq!(field(&fields, "Capabilities.member.1"), Some("CAPABILITY_IAM"));
        assert_eq!(field(&fields, "Capabilities.member.2"), None);
        assert_eq!(field(&fields, "ChangeSetType"), Some("CREATE"));
        assert_eq!(field(&fields, "ChangeSetName"), Some("release-42"));
        assert_eq!(field(&fields, "StackName"), Some("demo-stack"));
        assert!(field(&fields, "TemplateBody").is_some());
        assert_eq!(field(&fields, "Parameters.member.1.ParameterKey"), Some("Env"));
        assert_eq!(field(&fields, "Parameters.member.1.ParameterValue"), Some("prod"));
        assert_eq!(field(&fields, "Parameters.member.2.ParameterKey"), Some("Flag"));
        assert_eq!(field(&fields, "Parameters.member.2.ParameterValue"), None);
        assert_eq!(field(&fields, "Description"), None);
    }

    #[tokio::test]
    async fn test_create_sends_description_when_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(xml_response(
                200,
                format!(
                    "<CreateChangeSetResponse xmlns=\"{NAMESPACE}\"><CreateChangeSetResult>\
                     <Id>{CHANGE_SET_ARN}</Id></CreateChangeSetResult></CreateChangeSetResponse>"
                ),
            ))
            .mount(&server)
            .await;

        let mut input = create_input();
        input.description = Some(String::from("Release42"));
        api_for(&server)
            .create_change_set(input)
            .await
            .expect("create should succeed");

        let fields = received_form(&server).await;
        assert_eq!(field(&fields, "Description"), Some("Release42"));
    }

    #[tokio::test]
    async fn test_create_without_id_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(xml_response(
                200,
                format!(
                    "<CreateChangeSetResponse xmlns=\"{NAMESPACE}\"><CreateChangeSetResult>\
                     <StackId>arn:aws:cloudformation:eu-west-1:123456789012:stack/demo-stack/1</StackId>\
                     </CreateChangeSetResult></CreateChangeSetResponse>"
                ),
            ))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .create_change_set(create_input())
            .await
            .unwrap_err();

        match err {
            ChangeSetError::Remote(RemoteApiError::MissingChangeSetId { name }) => {
                assert_eq!(name, "release-42");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_create_failure_keeps_service_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(error_response(
                "AlreadyExistsException",
                "ChangeSet release-42 already exists",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let err = api_for(&server)
            .create_change_set(create_input())
            .await
            .unwrap_err();

        match err {
            ChangeSetError::Remote(remote) => {
                assert_eq!(remote.code(), Some("AlreadyExistsException"));
                assert!(remote.to_string().starts_with("CreateChangeSet failed: "));
                assert!(remote.to_string().contains("already exists"));
                assert!(std::error::Error::source(&remote).is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_execute_sends_only_names() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Action=ExecuteChangeSet"))
            .respond_with(xml_response(
                200,
                format!(
                    "<ExecuteChangeSetResponse xmlns=\"{NAMESPACE}\">\
                     <ExecuteChangeSetResult></ExecuteChangeSetResult>\
                     <ResponseMetadata><RequestId>req-1</RequestId></ResponseMetadata>\
                     </ExecuteChangeSetResponse>"
                ),
            ))
            .expect(1)
            .mount(&server)
            .await;

        api_for(&server)
            .execute_change_set(ChangeSetTarget {
                change_set_name: String::from("release-42"),
                stack_name: String::from("demo-stack"),
            })
            .await
            .expect("execute should succeed");

        let fields = received_form(&server).await;
        let mut keys: Vec<&str> = fields.iter().map(|(key, _)| key.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Action", "ChangeSetName", "StackName", "Version"]);
        assert_eq!(field(&fields, "ChangeSetName"), Some("release-42"));
        assert_eq!(field(&fields, "StackName"), Some("demo-stack"));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_service_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Action=DeleteChangeSet"))
            .respond_with(error_response(
                "InvalidChangeSetStatus",
                "ChangeSet cannot be deleted",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let err = api_for(&server)
            .delete_change_set(ChangeSetTarget {
                change_set_name: String::from("release-42"),
                stack_name: String::from("demo-stack"),
            })
            .await
            .unwrap_err();

        assert!(err.is_remote());
        match err {
            ChangeSetError::Remote(remote) => {
                assert_eq!(remote.code(), Some("InvalidChangeSetStatus"));
                assert!(remote.to_string().starts_with("DeleteChangeSet failed: "));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
