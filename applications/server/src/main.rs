/// Capsule Server - journal service with GitHub sign-in
use capsule_core::Storage;
use capsule_identity::GitHubClient;
use capsule_server::{
    config::ServerConfig, create_router, services::SessionService, state::AppState,
};
use capsule_storage::Database;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "capsule-server")]
#[command(about = "Capsule journal server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "CAPSULE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// List all registered users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "capsule_server=info,capsule_identity=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::ListUsers => list_users(config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Capsule Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = open_database(&config).await?;
    tracing::info!("Database connected");

    let identity = GitHubClient::new(config.github.to_client_config())?;
    tracing::info!("Identity provider client initialized");

    let sessions = SessionService::new(
        &config.auth.jwt_secret,
        config.auth.session_expiration_days,
    );

    let app_state = AppState::new(Arc::new(db), Arc::new(sessions), Arc::new(identity));
    let app = create_router(app_state, &config.server.cors_origins)?;

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let db = open_database(&config).await?;
    let users = db.list_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({}, github {})", user.id, user.name, user.login, user.github_id);
    }

    Ok(())
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<Database> {
    // SQLite creates the file but not its directory
    if let Some(path) = config.storage.database_url.strip_prefix("sqlite://") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    Ok(Database::new(&config.storage.database_url).await?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
