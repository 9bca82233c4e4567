use std::error::Error;
use std::fmt::Formatter;
use std::fmt::{Debug, Display};

/// The basic error type for this crate
pub enum HarnessError {
    /// The server could not be queried for the endpoints it advertises
    EndpointDiscovery(String),
    /// No advertised endpoint speaks the requested security policy
    NoMatchingEndpoint(String),
    /// The client library rejected the assembled configuration
    ClientConstruction(String),
    /// The example task failed while driving the client
    TaskExecution(String),
    /// Closing the session failed
    Disconnect(String),
    /// For a converted error
    Generic(String),
}

impl Error for HarnessError {}

impl Debug for HarnessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_msg())
    }
}

impl HarnessError {
    fn to_msg(&self) -> String {
        match self {
            HarnessError::EndpointDiscovery(err) => {
                format!("Endpoint discovery failed: {err}")
            }
            HarnessError::NoMatchingEndpoint(policy) => {
                format!("No desired endpoints returned for security policy {policy}")
            }
            HarnessError::ClientConstruction(err) => {
                format!("Unable to construct client: {err}")
            }
            HarnessError::TaskExecution(err) => {
                format!("Example task failed: {err}")
            }
            HarnessError::Disconnect(err) => {
                format!("Disconnect failed: {err}")
            }
            HarnessError::Generic(err) => err.to_string(),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            HarnessError::EndpointDiscovery(err)
            | HarnessError::ClientConstruction(err)
            | HarnessError::TaskExecution(err)
            | HarnessError::Disconnect(err)
            | HarnessError::Generic(err) => err,
            err @ HarnessError::NoMatchingEndpoint(_) => err.to_msg(),
        }
    }

    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Generic(msg.into())
    }
}

impl Display for HarnessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

impl From<anyhow::Error> for HarnessError {
    fn from(err: anyhow::Error) -> Self {
        HarnessError::Generic(err.to_string())
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Generic(err.to_string())
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for HarnessError {
    fn from(err: tokio::sync::oneshot::error::RecvError) -> Self {
        HarnessError::Generic(err.to_string())
    }
}
