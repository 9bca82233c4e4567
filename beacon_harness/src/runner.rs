//! The run-once lifecycle orchestrator. One runner exists per process run: it
//! resolves exactly one endpoint matching the kernel's security policy,
//! constructs a client bound to it, delegates control to the kernel, waits for
//! the single completion write, and performs one ordered teardown sequence no
//! matter which path triggered completion.

use crate::builder::client_config::ClientConfig;
use crate::completion::{CompletionSignal, RunOutcome};
use crate::endpoint::select_endpoint;
use crate::error::HarnessError;
use crate::kernel::ExampleKernel;
use crate::stack::{ClientStack, EndpointResolver, UaSessionClient};
use std::sync::Arc;
use std::time::Duration;

/// Where a run currently stands. Transitions are strictly forward; every run
/// ends in `Terminated` by way of exactly one pass through `Completing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    EndpointsResolved,
    ClientBuilt,
    TaskRunning,
    Completing,
    Terminated,
}

/// What a finished run looked like. Never carries the client: by the time a
/// report exists, teardown has already run.
#[derive(Debug)]
pub struct RunReport {
    /// Terminal outcome. `Ok` includes runs whose task failed but whose
    /// session was still closed in an orderly fashion.
    pub outcome: Result<(), HarnessError>,
    /// Whether teardown had a live session to disconnect
    pub disconnect_attempted: bool,
    /// Always zero; the harness exits cleanly on every path
    pub exit_code: i32,
}

impl RunReport {
    /// Terminates the process with the recorded exit status
    pub fn exit(self) -> ! {
        std::process::exit(self.exit_code)
    }
}

/// Executes one example run: resolve, select, construct, delegate, tear down.
pub struct ExampleRunner<R, S, K>
where
    R: EndpointResolver,
    S: ClientStack,
    K: ExampleKernel<S::Client>,
{
    resolver: R,
    stack: S,
    kernel: K,
    server_url: String,
    request_timeout: Duration,
    grace_period: Duration,
    state: RunState,
}

impl<R, S, K> ExampleRunner<R, S, K>
where
    R: EndpointResolver,
    S: ClientStack,
    K: ExampleKernel<S::Client>,
{
    pub(crate) fn new(
        resolver: R,
        stack: S,
        kernel: K,
        server_url: String,
        request_timeout: Duration,
        grace_period: Duration,
    ) -> Self {
        Self {
            resolver,
            stack,
            kernel,
            server_url,
            request_timeout,
            grace_period,
            state: RunState::Init,
        }
    }

    /// Runs the whole lifecycle. Every failure mode funnels into the same
    /// write-once completion cell and the same teardown sequence; the caller
    /// gets a report, never a live client.
    pub async fn execute(mut self) -> RunReport {
        beacon_logging::trace!(target: "beacon", "ExampleRunner::execute is now executing ...");
        let (signal, listener) = CompletionSignal::channel();

        match self.create_client().await {
            Ok(client) => {
                self.transition(RunState::TaskRunning);
                if let Err(err) = self.kernel.run(client.clone(), signal.clone()).await {
                    let err = HarnessError::TaskExecution(err.into_string());
                    beacon_logging::error!(target: "beacon", "Error running client example: {err:?}");
                    // the session is presumed live; route it into teardown so
                    // it still gets an orderly disconnect
                    let _ = signal.complete(client);
                }
            }
            Err(err) => {
                let _ = signal.fail(err);
            }
        }

        self.transition(RunState::Completing);
        let outcome = listener.wait().await;
        self.teardown(outcome).await
    }

    async fn create_client(&mut self) -> Result<Arc<S::Client>, HarnessError> {
        let policy = self.kernel.security_policy();

        let endpoints = self.resolver.discover(&self.server_url).await?;
        self.transition(RunState::EndpointsResolved);

        let endpoint = select_endpoint(&endpoints, policy)?.clone();
        beacon_logging::info!(target: "beacon", "Using endpoint: {} [{}]", endpoint.endpoint_url, policy);

        let config = ClientConfig::builder()
            .with_endpoint(endpoint)
            .with_identity(self.kernel.identity_provider())
            .with_request_timeout(self.request_timeout)
            .build()?;

        let client = self.stack.construct(config).await?;
        self.transition(RunState::ClientBuilt);

        Ok(Arc::new(client))
    }

    /// Strictly sequential and executed exactly once per run: disconnect when
    /// a session exists, release shared resources regardless, then pause for
    /// the grace period before the report is handed back.
    async fn teardown(mut self, outcome: RunOutcome<S::Client>) -> RunReport {
        let (outcome, disconnect_attempted) = match outcome {
            RunOutcome::Completed(client) => {
                beacon_logging::trace!(target: "beacon", "Disconnecting session {} ...", client.session_id());
                if let Err(err) = client.disconnect().await {
                    // logged, never escalated
                    beacon_logging::error!(target: "beacon", "Error disconnecting: {err:?}");
                }
                self.stack.release_shared_resources();
                (Ok(()), true)
            }
            RunOutcome::Failed(err) => {
                beacon_logging::error!(target: "beacon", "Error running example: {err:?}");
                self.stack.release_shared_resources();
                (Err(err), false)
            }
        };

        tokio::time::sleep(self.grace_period).await;
        self.transition(RunState::Terminated);

        RunReport {
            outcome,
            disconnect_attempted,
            exit_code: 0,
        }
    }

    fn transition(&mut self, next: RunState) {
        beacon_logging::trace!(target: "beacon", "Run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
