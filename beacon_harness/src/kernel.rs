use crate::completion::CompletionSignal;
use crate::endpoint::SecurityPolicy;
use crate::error::HarnessError;
use crate::identity::IdentityProvider;
use crate::stack::UaSessionClient;
use async_trait::async_trait;
use auto_impl::auto_impl;
use std::sync::Arc;

/// The [`ExampleKernel`] is the interface between the runner and the example
/// routine it drives. The runner resolves an endpoint matching
/// [`ExampleKernel::security_policy`], builds a client around
/// [`ExampleKernel::identity_provider`], and hands the live session to
/// [`ExampleKernel::run`] together with the completion signal the kernel must
/// eventually write exactly once.
#[async_trait]
#[auto_impl(Box, &mut)]
pub trait ExampleKernel<C: UaSessionClient>: Send + Sync {
    /// The security profile the selected endpoint must speak
    fn security_policy(&self) -> SecurityPolicy {
        SecurityPolicy::None
    }

    /// Credentials threaded into the client configuration
    fn identity_provider(&self) -> IdentityProvider {
        IdentityProvider::Anonymous
    }

    /// Drives the borrowed client. Completion may be signalled here or from a
    /// background task this method spawns; either way the signal must be
    /// written for the run to finish. Returning an error is caught by the
    /// runner and treated as a completed run whose session still needs an
    /// orderly disconnect.
    async fn run(&self, client: Arc<C>, completion: CompletionSignal<C>)
        -> Result<(), HarnessError>;
}
