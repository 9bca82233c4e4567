#![allow(missing_docs)]
#![doc(hidden)]
//! In-memory stand-ins for the external collaborators: a resolver with a
//! scripted endpoint list, a client library over a shared tag table, and an
//! event log that records teardown calls in order. Used by this crate's test
//! suites and by the runnable demos in the example library.

use crate::builder::client_config::ClientConfig;
use crate::constants::DEFAULT_SERVER_URL;
use crate::endpoint::{EndpointDescription, SecurityPolicy};
use crate::error::HarnessError;
use crate::stack::{ClientStack, EndpointResolver, UaSessionClient};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Observable teardown steps, recorded in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownEvent {
    Disconnect,
    ReleaseSharedResources,
}

pub type EventLog = Arc<Mutex<Vec<TeardownEvent>>>;

type AddressSpace = Arc<Mutex<HashMap<String, String>>>;

lazy_static::lazy_static! {
    /// Tags the loopback server exposes out of the box
    pub static ref DEMO_TAGS: Vec<(&'static str, &'static str)> = vec![
        ("ns=2;s=Channel1.Device1.Temperature", "21.5"),
        ("ns=2;s=Channel1.Device1.Pressure", "101.3"),
        ("ns=2;s=Channel1.Device1.Status", "RUNNING"),
    ];
}

/// Hands back a scripted endpoint list, or fails on demand
pub struct LoopbackResolver {
    endpoints: Vec<EndpointDescription>,
    fail_with: Option<String>,
}

impl LoopbackResolver {
    /// Advertises one endpoint per given policy, all at the default address
    pub fn advertising(policies: &[SecurityPolicy]) -> Self {
        Self {
            endpoints: policies
                .iter()
                .map(|policy| EndpointDescription::with_policy(DEFAULT_SERVER_URL, *policy))
                .collect(),
            fail_with: None,
        }
    }

    pub fn with_endpoints(endpoints: Vec<EndpointDescription>) -> Self {
        Self {
            endpoints,
            fail_with: None,
        }
    }

    /// Every discovery attempt fails with the given reason
    pub fn failing<T: Into<String>>(reason: T) -> Self {
        Self {
            endpoints: Vec::new(),
            fail_with: Some(reason.into()),
        }
    }
}

#[async_trait]
impl EndpointResolver for LoopbackResolver {
    async fn discover(&self, _server_url: &str) -> Result<Vec<EndpointDescription>, HarnessError> {
        if let Some(reason) = &self.fail_with {
            return Err(HarnessError::EndpointDiscovery(reason.clone()));
        }

        Ok(self.endpoints.clone())
    }
}

/// In-memory client library: builds [`LoopbackClient`]s against a shared tag
/// table seeded from [`struct@DEMO_TAGS`]
pub struct LoopbackStack {
    events: EventLog,
    address_space: AddressSpace,
    released: AtomicBool,
    fail_construct: Option<String>,
    fail_disconnect: Option<String>,
}

impl LoopbackStack {
    pub fn new() -> Self {
        let seeded = DEMO_TAGS
            .iter()
            .map(|(node_id, value)| (node_id.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();

        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            address_space: Arc::new(Mutex::new(seeded)),
            released: AtomicBool::new(false),
            fail_construct: None,
            fail_disconnect: None,
        }
    }

    /// Every construction attempt fails with the given reason
    pub fn failing_construct<T: Into<String>>(reason: T) -> Self {
        Self {
            fail_construct: Some(reason.into()),
            ..Self::new()
        }
    }

    /// Sessions build fine but refuse to disconnect cleanly
    pub fn failing_disconnect<T: Into<String>>(reason: T) -> Self {
        Self {
            fail_disconnect: Some(reason.into()),
            ..Self::new()
        }
    }

    pub fn event_log(&self) -> EventLog {
        self.events.clone()
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl Default for LoopbackStack {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientStack for LoopbackStack {
    type Client = LoopbackClient;

    async fn construct(&self, config: ClientConfig) -> Result<LoopbackClient, HarnessError> {
        if let Some(reason) = &self.fail_construct {
            return Err(HarnessError::ClientConstruction(reason.clone()));
        }

        Ok(LoopbackClient {
            session_id: Uuid::new_v4(),
            endpoint_url: config.endpoint().endpoint_url.clone(),
            address_space: self.address_space.clone(),
            events: self.events.clone(),
            disconnected: AtomicBool::new(false),
            fail_disconnect: self.fail_disconnect.clone(),
        })
    }

    fn release_shared_resources(&self) {
        self.events.lock().push(TeardownEvent::ReleaseSharedResources);
        if self.released.swap(true, Ordering::SeqCst) {
            beacon_logging::trace!(target: "beacon", "shared resources already released");
        }
    }
}

/// A fake session over the stack's tag table
pub struct LoopbackClient {
    session_id: Uuid,
    endpoint_url: String,
    address_space: AddressSpace,
    events: EventLog,
    disconnected: AtomicBool,
    fail_disconnect: Option<String>,
}

impl LoopbackClient {
    /// Reads a tag value; unknown node ids are an error
    pub fn read_value(&self, node_id: &str) -> Result<String, HarnessError> {
        self.address_space
            .lock()
            .get(node_id)
            .cloned()
            .ok_or_else(|| HarnessError::msg(format!("unknown node id: {node_id}")))
    }

    pub fn write_value<T: Into<String>, V: Into<String>>(&self, node_id: T, value: V) {
        let _ = self
            .address_space
            .lock()
            .insert(node_id.into(), value.into());
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UaSessionClient for LoopbackClient {
    fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    async fn disconnect(&self) -> Result<(), HarnessError> {
        self.events.lock().push(TeardownEvent::Disconnect);
        self.disconnected.store(true, Ordering::SeqCst);

        if let Some(reason) = &self.fail_disconnect {
            return Err(HarnessError::Disconnect(reason.clone()));
        }

        Ok(())
    }
}

/// Resolver and stack advertising the given profiles, plus the stack's event
/// log for asserting teardown order after the stack has been moved into a run
pub fn loopback_info(policies: &[SecurityPolicy]) -> (LoopbackResolver, LoopbackStack, EventLog) {
    let resolver = LoopbackResolver::advertising(policies);
    let stack = LoopbackStack::new();
    let events = stack.event_log();
    (resolver, stack, events)
}
