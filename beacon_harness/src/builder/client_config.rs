use crate::constants::{APPLICATION_NAME, APPLICATION_URI, REQUEST_TIMEOUT};
use crate::endpoint::EndpointDescription;
use crate::error::HarnessError;
use crate::identity::IdentityProvider;
use std::time::Duration;

/// Immutable configuration consumed by
/// [`ClientStack::construct`](crate::stack::ClientStack::construct). Built
/// once per run and owned exclusively by the construction step.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    application_name: String,
    application_uri: String,
    endpoint: EndpointDescription,
    identity: IdentityProvider,
    request_timeout: Duration,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn application_uri(&self) -> &str {
        &self.application_uri
    }

    pub fn endpoint(&self) -> &EndpointDescription {
        &self.endpoint
    }

    pub fn identity(&self) -> &IdentityProvider {
        &self.identity
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Used to assemble a [`ClientConfig`]. Only the endpoint is mandatory; the
/// application identity and request timeout fall back to the fixed harness
/// values.
#[derive(Default)]
pub struct ClientConfigBuilder {
    application_name: Option<String>,
    application_uri: Option<String>,
    endpoint: Option<EndpointDescription>,
    identity: Option<IdentityProvider>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn with_application_name<T: Into<String>>(mut self, name: T) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn with_application_uri<T: Into<String>>(mut self, uri: T) -> Self {
        self.application_uri = Some(uri.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: EndpointDescription) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn with_identity(mut self, identity: IdentityProvider) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    pub fn build(mut self) -> Result<ClientConfig, HarnessError> {
        let endpoint = self.endpoint.take().ok_or_else(|| {
            HarnessError::ClientConstruction("no endpoint selected".to_string())
        })?;

        Ok(ClientConfig {
            application_name: self
                .application_name
                .take()
                .unwrap_or_else(|| APPLICATION_NAME.to_string()),
            application_uri: self
                .application_uri
                .take()
                .unwrap_or_else(|| APPLICATION_URI.to_string()),
            endpoint,
            identity: self.identity.take().unwrap_or_default(),
            request_timeout: self.request_timeout.take().unwrap_or(REQUEST_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ClientConfig;
    use crate::constants::{APPLICATION_NAME, APPLICATION_URI};
    use crate::endpoint::{EndpointDescription, SecurityPolicy};
    use crate::identity::IdentityProvider;
    use std::time::Duration;

    #[test]
    fn defaults_fill_in_the_fixed_identity_and_timeout() {
        let endpoint = EndpointDescription::with_policy("opc.tcp://a", SecurityPolicy::None);
        let config = ClientConfig::builder()
            .with_endpoint(endpoint.clone())
            .build()
            .unwrap();

        assert_eq!(config.application_name(), APPLICATION_NAME);
        assert_eq!(config.application_uri(), APPLICATION_URI);
        assert_eq!(config.endpoint(), &endpoint);
        assert_eq!(config.request_timeout(), Duration::from_millis(10_000));
        assert_eq!(config.identity().token_kind(), "anonymous");
    }

    #[test]
    fn explicit_values_override_the_defaults() {
        let endpoint = EndpointDescription::with_policy("opc.tcp://b", SecurityPolicy::Basic256);
        let config = ClientConfig::builder()
            .with_endpoint(endpoint)
            .with_application_name("custom client")
            .with_identity(IdentityProvider::username("operator", "secret"))
            .with_request_timeout(Duration::from_secs(3))
            .build()
            .unwrap();

        assert_eq!(config.application_name(), "custom client");
        assert_eq!(config.identity().token_kind(), "username");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn missing_endpoint_is_a_construction_error() {
        assert!(ClientConfig::builder().build().is_err());
    }
}
