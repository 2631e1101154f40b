/// Worldwide Freight Server - freight management REST backend
use anyhow::Context;
use clap::{Parser, Subcommand};
use freight_server::{
    config::{LoggingSettings, ServerConfig},
    create_router,
    services::{CredentialStore, TokenIssuer},
    state::AppState,
};
use mockable::{Clock, DefaultClock};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "freight-server")]
#[command(about = "Worldwide Freight management backend", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "FREIGHT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Full name
        #[arg(long)]
        full_name: String,
        /// Email address (used to sign in)
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Dropping the guard stops the background log writer
    let _log_guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            full_name,
            email,
            password,
        } => {
            add_user(&config, &full_name, &email, &password).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match logging.file_appender()? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "freight_server=info,freight_storage=info,tower_http=info".into()
            }),
        )
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let pool = freight_storage::create_pool(&config.storage.database_url).await?;
    freight_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
    let credentials = CredentialStore::new(config.auth.bcrypt_cost);
    let tokens = TokenIssuer::new(&config.auth.jwt_secret, Arc::clone(&clock))?;

    Ok(AppState::new(pool, credentials, tokens, clock))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Worldwide Freight Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = build_state(&config).await?;
    let app = create_router(app_state);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    full_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let app_state = build_state(config).await?;

    let user = app_state
        .accounts
        .sign_up(full_name, email, password)
        .await?;

    println!("Created user {} - {} <{}>", user.id, user.full_name, user.email);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let app_state = build_state(config).await?;

    let users = app_state
        .accounts
        .list_users()
        .await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.full_name, user.email);
    }

    Ok(())
}
