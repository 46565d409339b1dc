//! Shared helpers for HTTP integration tests.
//!
//! Spins the router up on an ephemeral port so tests never collide with a
//! running instance or with each other.

use std::sync::Arc;

use after8_deals::config::GlobalConfig;
use after8_deals::http::{serve_on, AppState};
use after8_deals::store::DealStore;
use tokio_util::sync::CancellationToken;

/// Config with no simulated latency and no seed data.
pub fn test_config() -> GlobalConfig {
    GlobalConfig::from_toml_str(
        r#"
bind_address = "127.0.0.1"
http_port = 0

[store]
latency_ms = 0
seed_count = 0
"#,
    )
    .expect("valid test config")
}

/// A running server plus the handles a test needs to drive it.
pub struct TestServer {
    pub base_url: String,
    pub store: DealStore,
    pub ct: CancellationToken,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.ct.cancel();
    }
}

/// Start a server over an empty store.
pub async fn spawn_server() -> TestServer {
    let config = Arc::new(test_config());
    let store = DealStore::from_config(&config);
    let state = Arc::new(AppState {
        config,
        store: store.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral");
    let addr = listener.local_addr().expect("local addr");

    let ct = CancellationToken::new();
    let server_ct = ct.clone();
    tokio::spawn(async move {
        let _ = serve_on(listener, state, server_ct).await;
    });

    TestServer {
        base_url: format!("http://{addr}"),
        store,
        ct,
    }
}
