//! Endpoint model and selection. Servers advertise a list of endpoints, each
//! bundling a connection URL with the URI of the security profile it speaks;
//! selection scans that list in resolver order and takes the first match.

use crate::error::HarnessError;
use std::fmt::{Display, Formatter};

/// The well-known security profiles a server may advertise. Opaque to the
/// harness beyond equality on the profile URI; the client library owns the
/// cryptography each one implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecurityPolicy {
    #[default]
    None,
    Basic128Rsa15,
    Basic256,
    Basic256Sha256,
    Aes128Sha256RsaOaep,
    Aes256Sha256RsaPss,
}

impl SecurityPolicy {
    /// The profile URI servers embed in their endpoint descriptions
    pub fn policy_uri(&self) -> &'static str {
        match self {
            Self::None => "http://opcfoundation.org/UA/SecurityPolicy#None",
            Self::Basic128Rsa15 => "http://opcfoundation.org/UA/SecurityPolicy#Basic128Rsa15",
            Self::Basic256 => "http://opcfoundation.org/UA/SecurityPolicy#Basic256",
            Self::Basic256Sha256 => "http://opcfoundation.org/UA/SecurityPolicy#Basic256Sha256",
            Self::Aes128Sha256RsaOaep => {
                "http://opcfoundation.org/UA/SecurityPolicy#Aes128_Sha256_RsaOaep"
            }
            Self::Aes256Sha256RsaPss => {
                "http://opcfoundation.org/UA/SecurityPolicy#Aes256_Sha256_RsaPss"
            }
        }
    }

    /// Maps a profile URI back to its variant, if it is one of the well-known set
    pub fn from_uri(uri: &str) -> Option<Self> {
        [
            Self::None,
            Self::Basic128Rsa15,
            Self::Basic256,
            Self::Basic256Sha256,
            Self::Aes128Sha256RsaOaep,
            Self::Aes256Sha256RsaPss,
        ]
        .into_iter()
        .find(|policy| policy.policy_uri() == uri)
    }
}

impl Display for SecurityPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Basic128Rsa15 => "Basic128Rsa15",
            Self::Basic256 => "Basic256",
            Self::Basic256Sha256 => "Basic256Sha256",
            Self::Aes128Sha256RsaOaep => "Aes128_Sha256_RsaOaep",
            Self::Aes256Sha256RsaPss => "Aes256_Sha256_RsaPss",
        };
        write!(f, "{name}")
    }
}

/// A connection target advertised by a server. Immutable once resolved;
/// consumed once to build the client configuration, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescription {
    pub endpoint_url: String,
    pub security_policy_uri: String,
}

impl EndpointDescription {
    pub fn new<T: Into<String>, R: Into<String>>(endpoint_url: T, security_policy_uri: R) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            security_policy_uri: security_policy_uri.into(),
        }
    }

    pub fn with_policy<T: Into<String>>(endpoint_url: T, policy: SecurityPolicy) -> Self {
        Self::new(endpoint_url, policy.policy_uri())
    }
}

/// Returns the first candidate, in resolver order, whose profile URI equals
/// the wanted policy's. Fatal when nothing matches; nothing is retried.
pub fn select_endpoint(
    candidates: &[EndpointDescription],
    wanted: SecurityPolicy,
) -> Result<&EndpointDescription, HarnessError> {
    candidates
        .iter()
        .find(|endpoint| endpoint.security_policy_uri == wanted.policy_uri())
        .ok_or_else(|| HarnessError::NoMatchingEndpoint(wanted.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{select_endpoint, EndpointDescription, SecurityPolicy};
    use rstest::rstest;

    fn candidates() -> Vec<EndpointDescription> {
        vec![
            EndpointDescription::with_policy("opc.tcp://a", SecurityPolicy::None),
            EndpointDescription::with_policy("opc.tcp://b", SecurityPolicy::Basic256),
            EndpointDescription::with_policy("opc.tcp://c", SecurityPolicy::Basic256),
        ]
    }

    #[rstest]
    #[case(SecurityPolicy::None, "opc.tcp://a")]
    #[case(SecurityPolicy::Basic256, "opc.tcp://b")]
    fn selects_first_match_in_resolver_order(
        #[case] wanted: SecurityPolicy,
        #[case] expected_url: &str,
    ) {
        let candidates = candidates();
        let selected = select_endpoint(&candidates, wanted).unwrap();
        assert_eq!(selected.endpoint_url, expected_url);
    }

    #[test]
    fn fails_when_no_candidate_matches() {
        let candidates = candidates();
        let err = select_endpoint(&candidates, SecurityPolicy::Aes256Sha256RsaPss).unwrap_err();
        assert!(err.into_string().contains("Aes256_Sha256_RsaPss"));
    }

    #[test]
    fn fails_on_empty_candidate_list() {
        assert!(select_endpoint(&[], SecurityPolicy::Basic256Sha256).is_err());
    }

    #[test]
    fn policy_uris_round_trip() {
        for policy in [
            SecurityPolicy::None,
            SecurityPolicy::Basic128Rsa15,
            SecurityPolicy::Basic256,
            SecurityPolicy::Basic256Sha256,
            SecurityPolicy::Aes128Sha256RsaOaep,
            SecurityPolicy::Aes256Sha256RsaPss,
        ] {
            assert_eq!(SecurityPolicy::from_uri(policy.policy_uri()), Some(policy));
        }

        assert_eq!(SecurityPolicy::from_uri("urn:not-a-policy"), None);
    }
}
