//! CRM authorization API server binary.

use std::sync::Arc;

use clap::Parser;
use crm_core::store::PgStore;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "crm_api_server", about = "CRM authorization API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/crm"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Skip running embedded migrations on startup.
    #[arg(long, default_value_t = false)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
        tracing_subscriber::EnvFilter::try_new("info,crm_api=debug,crm_core=debug")
    })?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let args = Args::parse();

    info!(
        bind_addr = %args.bind_addr,
        max_connections = args.max_connections,
        "starting crm_api_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    if args.skip_migrations {
        info!("skipping database migrations");
    } else {
        info!("running database migrations");
        crm_api::migrate(&pool).await?;
    }

    let config = crm_api::config::ApiConfig {
        bind_addr: args.bind_addr,
        pg_connection_url: args.database_url,
        ..crm_api::config::ApiConfig::from_env()
    };
    info!(
        access_ttl_secs = config.access_ttl_secs,
        refresh_ttl_secs = config.refresh_ttl_secs,
        "token lifetimes"
    );

    let state = crm_api::AppState::new(config.clone(), Arc::new(PgStore::new(pool)))?;
    let app = crm_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
