use clap::Parser;

use employee_aspect_api::{app, config, logging};

#[derive(Parser, Debug)]
#[command(name = "employee-aspect-api", version, about = "Employee REST API with logging advices")]
struct Cli {
    /// Address to bind (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides EMPLOYEE_API_PORT / PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// sqlx SQLite URL, e.g. sqlite::memory: or sqlite://employees.db
    #[arg(long)]
    database_url: Option<String>,

    /// Skip seeding sample employees at startup
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = config::config().clone();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
    if cli.no_seed {
        config.database.seed_on_startup = false;
    }

    logging::init(&config.logging);
    tracing::info!("Starting Employee API in {:?} mode", config.environment);

    let state = app::AppState::from_config(&config).await?;
    let router = app::router(state, &config.server);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Employee API listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
