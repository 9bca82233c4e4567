use beacon_harness::prefabs::client_task::ClientTaskKernel;
use beacon_harness::prelude::*;
use beacon_harness::test_common::{loopback_info, LoopbackResolver, LoopbackStack, TeardownEvent};
use rstest::rstest;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn no_grace() -> RunnerBuilder {
    RunnerBuilder::default().with_grace_period(Duration::ZERO)
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_completes_and_tears_down(
    #[values(SecurityPolicy::None, SecurityPolicy::Basic256Sha256)] policy: SecurityPolicy,
) {
    beacon_logging::setup_log();

    let task_ran = Arc::new(AtomicBool::new(false));
    let task_ran_flag = task_ran.clone();

    let (resolver, stack, events) =
        loopback_info(&[SecurityPolicy::None, SecurityPolicy::Basic256Sha256]);

    let kernel = ClientTaskKernel::new(policy, move |client, signal| async move {
        assert_eq!(client.endpoint_url(), DEFAULT_SERVER_URL);

        let temperature = client.read_value("ns=2;s=Channel1.Device1.Temperature")?;
        assert_eq!(temperature, "21.5");

        task_ran_flag.store(true, Ordering::Relaxed);
        assert!(signal.complete(client));
        Ok(())
    });

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    assert!(task_ran.load(Ordering::Relaxed));
    assert!(report.outcome.is_ok());
    assert!(report.disconnect_attempted);
    assert_eq!(report.exit_code, 0);
    assert_eq!(
        *events.lock(),
        vec![
            TeardownEvent::Disconnect,
            TeardownEvent::ReleaseSharedResources
        ]
    );
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_discovery_failure_skips_disconnect() {
    beacon_logging::setup_log();

    let task_ran = Arc::new(AtomicBool::new(false));
    let task_ran_flag = task_ran.clone();

    let resolver = LoopbackResolver::failing("connection refused");
    let stack = LoopbackStack::new();
    let events = stack.event_log();

    let kernel = ClientTaskKernel::new_defaults(move |client, signal| async move {
        task_ran_flag.store(true, Ordering::Relaxed);
        assert!(signal.complete(client));
        Ok(())
    });

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    assert!(!task_ran.load(Ordering::Relaxed));
    assert!(matches!(
        report.outcome,
        Err(HarnessError::EndpointDiscovery(_))
    ));
    assert!(!report.disconnect_attempted);
    assert_eq!(report.exit_code, 0);
    assert_eq!(*events.lock(), vec![TeardownEvent::ReleaseSharedResources]);
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_no_matching_endpoint_is_fatal() {
    beacon_logging::setup_log();

    let (resolver, stack, events) = loopback_info(&[SecurityPolicy::None]);

    let kernel = ClientTaskKernel::new(
        SecurityPolicy::Basic256Sha256,
        |client, signal| async move {
            assert!(signal.complete(client));
            Ok(())
        },
    );

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    assert!(matches!(
        report.outcome,
        Err(HarnessError::NoMatchingEndpoint(_))
    ));
    assert!(!report.disconnect_attempted);
    assert_eq!(report.exit_code, 0);
    assert_eq!(*events.lock(), vec![TeardownEvent::ReleaseSharedResources]);
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_construction_failure_skips_disconnect() {
    beacon_logging::setup_log();

    let resolver = LoopbackResolver::advertising(&[SecurityPolicy::None]);
    let stack = LoopbackStack::failing_construct("configuration rejected");
    let events = stack.event_log();

    let kernel = ClientTaskKernel::new_defaults(|client, signal| async move {
        assert!(signal.complete(client));
        Ok(())
    });

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    assert!(matches!(
        report.outcome,
        Err(HarnessError::ClientConstruction(_))
    ));
    assert!(!report.disconnect_attempted);
    assert_eq!(*events.lock(), vec![TeardownEvent::ReleaseSharedResources]);
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_task_error_still_disconnects() {
    beacon_logging::setup_log();

    let (resolver, stack, events) = loopback_info(&[SecurityPolicy::None]);

    // the kernel fails without ever writing the signal; the runner converts
    // that into a completed run so the session still gets closed
    let kernel = ClientTaskKernel::new_defaults(|_client, _signal| async move {
        Err(HarnessError::msg("task blew up"))
    });

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    assert!(report.outcome.is_ok());
    assert!(report.disconnect_attempted);
    assert_eq!(report.exit_code, 0);
    assert_eq!(
        *events.lock(),
        vec![
            TeardownEvent::Disconnect,
            TeardownEvent::ReleaseSharedResources
        ]
    );
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_second_completion_write_is_a_noop() {
    beacon_logging::setup_log();

    let (resolver, stack, events) = loopback_info(&[SecurityPolicy::None]);

    let kernel = ClientTaskKernel::new_defaults(|client, signal| async move {
        assert!(signal.complete(client.clone()));
        assert!(!signal.fail(HarnessError::msg("late failure")));
        assert!(!signal.complete(client));
        Ok(())
    });

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    // the first write won and exactly one teardown ran
    assert!(report.outcome.is_ok());
    assert_eq!(
        *events.lock(),
        vec![
            TeardownEvent::Disconnect,
            TeardownEvent::ReleaseSharedResources
        ]
    );
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_disconnect_failure_is_never_escalated() {
    beacon_logging::setup_log();

    let resolver = LoopbackResolver::advertising(&[SecurityPolicy::None]);
    let stack = LoopbackStack::failing_disconnect("session already closed");
    let events = stack.event_log();

    let kernel = ClientTaskKernel::new_defaults(|client, signal| async move {
        assert!(signal.complete(client));
        Ok(())
    });

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    assert!(report.outcome.is_ok());
    assert!(report.disconnect_attempted);
    assert_eq!(report.exit_code, 0);
    assert_eq!(
        *events.lock(),
        vec![
            TeardownEvent::Disconnect,
            TeardownEvent::ReleaseSharedResources
        ]
    );
}

#[rstest]
#[timeout(std::time::Duration::from_secs(30))]
#[tokio::test(flavor = "multi_thread")]
async fn test_background_completion_after_run_returns() {
    beacon_logging::setup_log();

    let (resolver, stack, events) = loopback_info(&[SecurityPolicy::None]);

    // completion arrives from a spawned task after run() has already returned
    let kernel = ClientTaskKernel::new_defaults(|client, signal| async move {
        let _ = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(signal.complete(client));
        });
        Ok(())
    });

    let report = no_grace().build(resolver, stack, kernel).unwrap().await;

    assert!(report.outcome.is_ok());
    assert!(report.disconnect_attempted);
    assert_eq!(
        *events.lock(),
        vec![
            TeardownEvent::Disconnect,
            TeardownEvent::ReleaseSharedResources
        ]
    );
}
