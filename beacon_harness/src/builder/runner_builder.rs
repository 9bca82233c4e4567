use crate::constants::{DEFAULT_SERVER_URL, REQUEST_TIMEOUT, SHUTDOWN_GRACE};
use crate::kernel::ExampleKernel;
use crate::runner::{ExampleRunner, RunReport};
use crate::stack::{ClientStack, EndpointResolver};
use futures::Future;
use std::fmt::{Debug, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Used to construct one awaitable example run
#[derive(Default)]
pub struct RunnerBuilder {
    server_url: Option<String>,
    request_timeout: Option<Duration>,
    grace_period: Option<Duration>,
}

/// An awaitable future that drives a full run to its report, teardown included
pub struct RunFuture {
    inner: Pin<Box<dyn Future<Output = RunReport> + Send + 'static>>,
}

impl Debug for RunFuture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RunFuture")
    }
}

impl Future for RunFuture {
    type Output = RunReport;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl RunnerBuilder {
    /// Overrides the fixed discovery address. Mostly useful for tests; the
    /// harness default is [`DEFAULT_SERVER_URL`].
    pub fn with_server_url<T: Into<String>>(mut self, server_url: T) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    /// Shrinks or stretches the pause between resource release and the report.
    /// Tests typically pass [`Duration::ZERO`].
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = Some(grace_period);
        self
    }

    /// Returns a future that represents the entire run
    pub fn build<R, S, K>(mut self, resolver: R, stack: S, kernel: K) -> anyhow::Result<RunFuture>
    where
        R: EndpointResolver + 'static,
        S: ClientStack + 'static,
        K: ExampleKernel<S::Client> + 'static,
    {
        self.check()?;

        let server_url = self
            .server_url
            .take()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let request_timeout = self.request_timeout.take().unwrap_or(REQUEST_TIMEOUT);
        let grace_period = self.grace_period.take().unwrap_or(SHUTDOWN_GRACE);

        let runner = ExampleRunner::new(
            resolver,
            stack,
            kernel,
            server_url,
            request_timeout,
            grace_period,
        );

        Ok(RunFuture {
            inner: Box::pin(runner.execute()),
        })
    }

    fn check(&self) -> anyhow::Result<()> {
        if let Some(server_url) = &self.server_url {
            if !server_url.starts_with("opc.tcp://") {
                return Err(anyhow::Error::msg(format!(
                    "invalid discovery url: {server_url}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RunnerBuilder;

    #[test]
    fn rejects_non_opc_tcp_discovery_urls() {
        let builder = RunnerBuilder::default().with_server_url("http://localhost:49320");
        assert!(builder.check().is_err());
    }

    #[test]
    fn accepts_the_default_scheme() {
        let builder = RunnerBuilder::default().with_server_url("opc.tcp://localhost:4840");
        assert!(builder.check().is_ok());
    }
}
