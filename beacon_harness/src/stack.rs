//! Collaborator contracts. The actual wire protocol, session negotiation, and
//! security handling live behind these traits in an external client library;
//! the harness only ever sees the narrow surface below.

use crate::builder::client_config::ClientConfig;
use crate::endpoint::EndpointDescription;
use crate::error::HarnessError;
use async_trait::async_trait;
use auto_impl::auto_impl;
use uuid::Uuid;

/// Queries a server for the endpoints it advertises. Discovery failures are
/// fatal to a run; nothing is retried.
#[async_trait]
#[auto_impl(Box, Arc)]
pub trait EndpointResolver: Send + Sync {
    async fn discover(&self, server_url: &str) -> Result<Vec<EndpointDescription>, HarnessError>;
}

/// A live session produced by the client library. Exactly one exists per run.
/// Example tasks borrow it but must leave the disconnect to the runner's
/// teardown sequence.
#[async_trait]
pub trait UaSessionClient: Send + Sync + 'static {
    fn session_id(&self) -> Uuid;

    fn endpoint_url(&self) -> &str;

    /// Ends the session. An error here is reported but must leave the client
    /// safe to drop.
    async fn disconnect(&self) -> Result<(), HarnessError>;
}

/// The external client library: everything between the harness and the wire.
#[async_trait]
pub trait ClientStack: Send + Sync {
    type Client: UaSessionClient;

    /// Builds a session bound to the configured endpoint. May open the
    /// transport-level connection; the harness treats that as opaque.
    async fn construct(&self, config: ClientConfig) -> Result<Self::Client, HarnessError>;

    /// Releases process-wide resources owned by the library. Idempotent;
    /// called exactly once per run during teardown.
    fn release_shared_resources(&self);
}
