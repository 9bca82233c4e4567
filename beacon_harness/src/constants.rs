//! Fixed literals shared by every example run. The harness is deliberately
//! not externally configurable: the discovery address, application identity,
//! and timing values below are the whole configuration surface.

use std::time::Duration;

/// The discovery address every run targets
pub const DEFAULT_SERVER_URL: &str = "opc.tcp://localhost:49320";
/// Application name advertised during session establishment
pub const APPLICATION_NAME: &str = "beacon opc ua example client";
/// Application URI advertised during session establishment
pub const APPLICATION_URI: &str = "urn:beacon:examples:client";
/// Applied by the client library to each service request
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Pause after resource release so deferred cleanup and log flushing can drain
/// before the process goes away
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);
