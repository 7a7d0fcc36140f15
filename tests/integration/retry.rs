//! Retry and backoff behaviour seen through the full stack.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bigfix_api::client::{backoff_delay, AttemptOutcome, RetryAttempt, MAX_BACKOFF};
use bigfix_api::InventoryClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{config_for, init_tracing, xml};

fn observed_client(server: &MockServer, max_retries: u32) -> (InventoryClient, Arc<Mutex<Vec<RetryAttempt>>>) {
    let attempts = Arc::new(Mutex::new(Vec::new()));
    let sink = attempts.clone();
    let client = InventoryClient::new(&config_for(server, max_retries))
        .unwrap()
        .with_retry_observer(Arc::new(move |attempt: &RetryAttempt| {
            sink.lock().unwrap().push(attempt.clone());
        }));
    (client, attempts)
}

#[tokio::test]
async fn test_two_server_errors_then_success() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(xml(r#"<BESAPI><Property><Name>OS</Name><ID>2</ID></Property></BESAPI>"#))
        .expect(1)
        .mount(&server)
        .await;

    let (client, attempts) = observed_client(&server, 3);
    let properties = client.list_properties().await.unwrap();
    assert_eq!(properties[0].name, "OS");

    let attempts = attempts.lock().unwrap();
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| a.outcome == AttemptOutcome::Status(503)));
    assert!(attempts.iter().all(|a| a.delay.is_some()));
    assert_eq!(attempts[0].attempt, 1);
    assert_eq!(attempts[1].attempt, 2);
}

#[tokio::test]
async fn test_client_error_is_never_retried() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/actions"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let (client, attempts) = observed_client(&server, 5);
    let err = client.list_actions().await.unwrap_err();
    assert!(err.is_client_error());
    assert!(!err.is_retryable());
    assert!(attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_last_attempt_does_not_sleep() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(504))
        .expect(3)
        .mount(&server)
        .await;

    let (client, attempts) = observed_client(&server, 3);
    let err = client.list_roles().await.unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(err.status(), Some(504));

    let delays: Vec<Option<Duration>> = attempts.lock().unwrap().iter().map(|a| a.delay).collect();
    assert_eq!(delays.len(), 3);
    assert!(delays[0].is_some() && delays[1].is_some());
    assert_eq!(delays[2], None);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    init_tracing();
    let server = MockServer::start().await;
    let config = config_for(&server, 2);
    drop(server);

    let client = InventoryClient::new(&config).unwrap();
    let err = client.list_sites().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[test]
fn test_backoff_band() {
    let min = Duration::from_millis(100);
    for attempt in 1..=5u32 {
        let nominal = min.as_secs_f64() * 3f64.powi(attempt as i32);
        let delay = backoff_delay(attempt, min).as_secs_f64();
        assert!(delay >= nominal * 0.8 - 1e-9, "attempt {attempt}: {delay}");
        assert!(delay <= (nominal * 1.2).min(MAX_BACKOFF.as_secs_f64()), "attempt {attempt}: {delay}");
    }
    assert_eq!(backoff_delay(20, min), MAX_BACKOFF);
}
