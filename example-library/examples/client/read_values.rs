//! # Read Values Example
//!
//! This example demonstrates the smallest complete run: connect to the
//! endpoint a server advertises for the `None` security profile, read a few
//! tag values, and relinquish the session so the harness can tear everything
//! down in order.
//!
//! ## Features Demonstrated
//! - Endpoint discovery and first-match selection
//! - A closure-driven kernel via `ClientTaskKernel`
//! - Completing the run by handing the session back through the signal
//! - The deterministic teardown sequence and clean process exit
//!
//! ## Usage
//! ```bash
//! RUST_LOG=trace cargo run --example read_values
//! ```
//!
//! ## Note
//! The run targets the bundled in-memory loopback stack so it works without a
//! live server. Swap in your own `EndpointResolver` and `ClientStack`
//! implementations to point the same kernel at real hardware.

use beacon_harness::prefabs::client_task::ClientTaskKernel;
use beacon_harness::prelude::*;
use beacon_harness::test_common::{loopback_info, DEMO_TAGS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    beacon_logging::setup_log();

    let (resolver, stack, _events) = loopback_info(&[SecurityPolicy::None]);

    // Read every demo tag, then complete the run. Disconnecting is not this
    // closure's job; the harness closes the session during teardown.
    let kernel = ClientTaskKernel::new_defaults(|client, signal| async move {
        for (node_id, _) in DEMO_TAGS.iter() {
            let value = client.read_value(node_id)?;
            println!("{node_id} = {value}");
        }

        assert!(signal.complete(client));
        Ok(())
    });

    // Build the run
    let run = RunnerBuilder::default().build(resolver, stack, kernel)?;

    // Await the report, then exit with its (always clean) status
    let report = run.await;
    report.exit()
}
