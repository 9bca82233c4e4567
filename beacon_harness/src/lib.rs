//! Run-once lifecycle harness for OPC UA-style client examples. The harness
//! discovers the endpoints a server advertises, selects the one matching an
//! example's security policy, builds a client bound to it, hands the live
//! session to the example, and guarantees a single ordered teardown
//! (disconnect, release shared resources, grace delay, clean exit) no matter
//! which path ended the run.
//!
//! The wire protocol, session negotiation, and security handling are owned by
//! an external client library consumed through the narrow traits in
//! [`stack`]; the harness itself is only the coordination logic.
//!
//! # Executor Architecture: The [`ExampleKernel`]
//! Application logic lives in an [`ExampleKernel`]: the runner asks it for a
//! security policy and an identity provider, builds the client, then calls
//! [`ExampleKernel::run`] with the session and a write-once
//! [`CompletionSignal`]. The first write into that signal, wherever it comes
//! from, is the one completion event of the run; the runner blocks on it and
//! then tears down exactly once. A kernel that returns an error is logged and
//! treated as a completed run whose session still deserves an orderly
//! disconnect, and the process exits with a success status on every path.
//!
//! # Examples
//! ```
//! use beacon_harness::prefabs::client_task::ClientTaskKernel;
//! use beacon_harness::prelude::*;
//! use beacon_harness::test_common::loopback_info;
//!
//! # async move {
//! let (resolver, stack, _events) = loopback_info(&[SecurityPolicy::None]);
//!
//! let kernel = ClientTaskKernel::new_defaults(|client, signal| async move {
//!     // drive the client here, then relinquish it for teardown
//!     let _ = signal.complete(client);
//!     Ok(())
//! });
//!
//! let run = RunnerBuilder::default().build(resolver, stack, kernel)?;
//! let report = run.await;
//! report.exit()
//! # };
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`ExampleKernel`]: crate::kernel::ExampleKernel
//! [`ExampleKernel::run`]: crate::kernel::ExampleKernel::run
//! [`CompletionSignal`]: crate::completion::CompletionSignal
#![deny(
    clippy::cognitive_complexity,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    variant_size_differences,
    unused_features,
    unused_results
)]

/// Convenience import for building examples
pub mod prelude {
    pub use crate::builder::client_config::*;
    pub use crate::builder::runner_builder::*;
    pub use crate::completion::*;
    pub use crate::constants::*;
    pub use crate::endpoint::*;
    pub use crate::error::*;
    pub use crate::identity::*;
    pub use crate::kernel::*;
    pub use crate::runner::*;
    pub use crate::stack::*;
}

/// Builders for the per-run client configuration and the run itself
pub mod builder;
/// The write-once completion cell shared by task and runner
pub mod completion;
/// Fixed configuration literals
pub mod constants;
/// Endpoint model and first-match selection
pub mod endpoint;
/// Crate error type
pub mod error;
/// Identity tokens threaded into the client configuration
pub mod identity;
/// The interface between the runner and the example it drives
pub mod kernel;
/// A list of prefabricated kernels designed for common use cases
pub mod prefabs;
/// The run-once lifecycle orchestrator
pub mod runner;
/// Contracts for the external collaborators
pub mod stack;
#[doc(hidden)]
pub mod test_common;

/// Convenience for harness users
pub use async_trait::async_trait;
