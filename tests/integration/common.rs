use std::sync::Once;
use std::time::Duration;

use bigfix_api::{ConnectionConfig, InventoryClient};
use wiremock::{MockServer, ResponseTemplate};

static TRACING: Once = Once::new();

/// Route library logs to the test output. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn config_for(server: &MockServer, max_retries: u32) -> ConnectionConfig {
    ConnectionConfig::builder()
        .with_server_name(format!("http://{}", server.address().ip()))
        .with_port(server.address().port())
        .with_user_name("bigfix")
        .with_password("s3cret")
        .with_max_retries(max_retries)
        .with_min_retry_delay(Duration::from_millis(1))
        .build()
        .expect("valid test configuration")
}

pub async fn start() -> (MockServer, InventoryClient) {
    init_tracing();
    let server = MockServer::start().await;
    let client = InventoryClient::new(&config_for(&server, 3)).expect("client builds");
    (server, client)
}

pub fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/xml")
        .set_body_string(body)
}
