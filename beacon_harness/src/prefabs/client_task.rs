use crate::completion::CompletionSignal;
use crate::endpoint::SecurityPolicy;
use crate::error::HarnessError;
use crate::identity::IdentityProvider;
use crate::kernel::ExampleKernel;
use crate::stack::UaSessionClient;
use async_trait::async_trait;
use futures::Future;
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;

/// A kernel that drives a single session with the provided closure. The
/// closure receives the live client and the completion signal and is invoked
/// exactly once; signalling completion is its responsibility.
///
/// This is the base kernel type for one-shot example runs. For long-lived or
/// stateful examples, implement [`ExampleKernel`] directly.
pub struct ClientTaskKernel<F, Fut> {
    handler: Mutex<Option<F>>,
    security_policy: SecurityPolicy,
    identity: IdentityProvider,
    // by using fn() -> Fut, the future does not need to be Sync
    _pd: PhantomData<fn() -> Fut>,
}

impl<F, Fut> ClientTaskKernel<F, Fut> {
    /// Anonymous session over the given security profile
    pub fn new(security_policy: SecurityPolicy, on_client_ready: F) -> Self {
        Self {
            handler: Mutex::new(Some(on_client_ready)),
            security_policy,
            identity: IdentityProvider::Anonymous,
            _pd: Default::default(),
        }
    }

    /// Session over the given security profile with explicit credentials
    pub fn new_with_identity(
        security_policy: SecurityPolicy,
        identity: IdentityProvider,
        on_client_ready: F,
    ) -> Self {
        Self {
            handler: Mutex::new(Some(on_client_ready)),
            security_policy,
            identity,
            _pd: Default::default(),
        }
    }

    /// No transport security, anonymous token
    pub fn new_defaults(on_client_ready: F) -> Self {
        Self::new(SecurityPolicy::None, on_client_ready)
    }
}

#[async_trait]
impl<C, F, Fut> ExampleKernel<C> for ClientTaskKernel<F, Fut>
where
    C: UaSessionClient,
    F: FnOnce(Arc<C>, CompletionSignal<C>) -> Fut + Send,
    Fut: Future<Output = Result<(), HarnessError>> + Send,
{
    fn security_policy(&self) -> SecurityPolicy {
        self.security_policy
    }

    fn identity_provider(&self) -> IdentityProvider {
        self.identity.clone()
    }

    async fn run(
        &self,
        client: Arc<C>,
        completion: CompletionSignal<C>,
    ) -> Result<(), HarnessError> {
        let handler = self.handler.lock().take().unwrap();
        (handler)(client, completion).await
    }
}
