use auth::generate_key_pair;
use clap::Parser;
use sso_service::domain::auth::models::App;
use sso_service::domain::auth::models::AppId;
use sso_service::outbound::repositories::SqliteDirectory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Provision an app with a fresh RSA key pair.
///
/// The private key is written to the database only; the public key is printed
/// so it can be handed to the app for token verification.
#[derive(Debug, Parser)]
#[command(name = "keygen", version)]
struct Args {
    /// SQLite database URL
    #[arg(long, default_value = "sqlite://storage/sso.db")]
    database_url: String,

    /// Identifier of the app to provision
    #[arg(long, default_value_t = 1)]
    app_id: i32,

    /// Display name of the app
    #[arg(long, default_value = "Test")]
    app_name: String,

    /// RSA modulus size
    #[arg(long, default_value_t = 2048)]
    bits: usize,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    tracing::info!(app_id = args.app_id, bits = args.bits, "Generating key pair");
    let bits = args.bits;
    let key_pair = tokio::task::spawn_blocking(move || generate_key_pair(bits)).await??;

    let pool = SqliteDirectory::connect(&args.database_url, 1).await?;
    let directory = SqliteDirectory::new(pool.clone());
    directory.migrate().await?;

    let app = App {
        id: AppId(args.app_id),
        name: args.app_name,
        private_key: key_pair.private_key,
        public_key: key_pair.public_key,
    };
    directory.upsert_app(&app).await?;
    tracing::info!(app_id = %app.id, name = %app.name, "App provisioned");

    pool.close().await;

    print!("{}", app.public_key);

    Ok(())
}
