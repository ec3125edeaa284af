use anyhow::{Context, Result};

use employee_aspect_api::app::{self, AppState};
use employee_aspect_api::config::AppConfig;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

/// Start a server on a free port with its own in-memory store seeded with 10 employees.
/// The server task lives as long as the calling test's runtime.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let mut config = AppConfig::development();
    config.server.port = port;
    config.server.enable_request_logging = false;
    config.database.url = "sqlite::memory:".to_string();
    config.database.seed_on_startup = true;
    config.database.seed_count = 10;

    let state = AppState::from_config(&config)
        .await
        .context("failed to build application state")?;
    let router = app::router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind {}", base_url))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(TestServer { port, base_url })
}

/// Route test logs through the test writer; RUST_LOG=debug shows advice output
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
