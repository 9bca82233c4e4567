//! # Username Identity Example
//!
//! This example connects over a secured endpoint with a username token
//! instead of the anonymous default. The credential handling itself belongs
//! to the client library; the kernel only declares which identity provider
//! the configuration should carry.
//!
//! ## Features Demonstrated
//! - Selecting a secured endpoint (`Basic256Sha256`) among several advertised
//! - Threading a username identity provider into the client configuration
//! - Inspecting the report when the run is over
//!
//! ## Usage
//! ```bash
//! RUST_LOG=info cargo run --example username_identity
//! ```

use beacon_harness::prefabs::client_task::ClientTaskKernel;
use beacon_harness::prelude::*;
use beacon_harness::test_common::loopback_info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    beacon_logging::setup_log();

    // the server advertises an open and a secured endpoint; the kernel's
    // policy picks the secured one
    let (resolver, stack, _events) = loopback_info(&[
        SecurityPolicy::None,
        SecurityPolicy::Basic256Sha256,
    ]);

    let identity = IdentityProvider::username("operator", "notsecurepassword");
    println!("connecting with a {} token", identity.token_kind());

    let kernel = ClientTaskKernel::new_with_identity(
        SecurityPolicy::Basic256Sha256,
        identity,
        |client, signal| async move {
            println!(
                "session {} established against {}",
                client.session_id(),
                client.endpoint_url()
            );

            assert!(signal.complete(client));
            Ok(())
        },
    );

    let run = RunnerBuilder::default().build(resolver, stack, kernel)?;

    let report = run.await;
    if let Err(err) = &report.outcome {
        eprintln!("run failed: {err:?}");
    }

    report.exit()
}
