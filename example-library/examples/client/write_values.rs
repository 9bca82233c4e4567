//! # Write Values Example
//!
//! This example writes a tag, reads it back, and then lets the harness close
//! the session. It also shows that a kernel may do its work on a background
//! task: the closure returns immediately and the completion signal is written
//! later, which is the shape most callback-driven client libraries push you
//! toward.
//!
//! ## Features Demonstrated
//! - Writing and reading tag values over a live session
//! - Signalling completion from a spawned background task
//! - First-completion-wins semantics of the completion signal
//!
//! ## Usage
//! ```bash
//! RUST_LOG=trace cargo run --example write_values
//! ```

use beacon_harness::prefabs::client_task::ClientTaskKernel;
use beacon_harness::prelude::*;
use beacon_harness::test_common::loopback_info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    beacon_logging::setup_log();

    let (resolver, stack, _events) = loopback_info(&[SecurityPolicy::None]);

    let kernel = ClientTaskKernel::new_defaults(|client, signal| async move {
        let setpoint = "ns=2;s=Channel1.Device1.Setpoint";
        client.write_value(setpoint, "42.0");

        let value = client.read_value(setpoint)?;
        println!("{setpoint} = {value}");

        // hand the rest of the work to a background task; the run stays open
        // until that task writes the signal
        let _ = tokio::spawn(async move {
            let status = client
                .read_value("ns=2;s=Channel1.Device1.Status")
                .unwrap_or_else(|_| "UNKNOWN".to_string());
            println!("status at completion: {status}");

            assert!(signal.complete(client));
        });

        Ok(())
    });

    let run = RunnerBuilder::default().build(resolver, stack, kernel)?;

    let report = run.await;
    report.exit()
}
