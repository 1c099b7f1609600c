use std::sync::Arc;

use sso_service::config::Config;
use sso_service::config::Environment;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories::SqliteDirectory;
use sso_service::outbound::tokens::JwtTokenIssuer;
use sso_service::proto::auth_server::AuthServer;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    init_tracing(config.environment);

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "Service starting"
    );

    tracing::info!(
        database_url = %config.database.url,
        grpc_port = config.server.grpc_port,
        timeout_ms = config.server.timeout_ms,
        token_ttl_seconds = config.token.ttl_seconds,
        "Configuration loaded"
    );

    let pool =
        SqliteDirectory::connect(&config.database.url, config.database.max_connections).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    let directory = Arc::new(SqliteDirectory::new(pool.clone()));
    directory.migrate().await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let token_issuer = Arc::new(JwtTokenIssuer::new());
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&directory),
        Arc::clone(&directory),
        Arc::clone(&directory),
        token_issuer,
        config.token_ttl(),
    ));

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service, config.operation_timeout());
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database pool");
    pool.close().await;

    Ok(())
}

fn init_tracing(environment: Environment) {
    let default_directive = match environment {
        Environment::Local | Environment::Dev => "sso_service=debug",
        Environment::Prod => "sso_service=info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(filter);
    match environment {
        Environment::Local => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        Environment::Dev | Environment::Prod => {
            registry.with(tracing_subscriber::fmt::layer().json()).init()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
