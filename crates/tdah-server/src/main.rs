use anyhow::Context;
use clap::Parser;
use tdah_auth::password::hash_password_blocking;
use tdah_config::TdahConfig;
use tdah_core::entities::NewPrincipal;
use tdah_core::enums::Role;
use tdah_db::TdahDb;
use tdah_server::{AppState, cors_layer, router};

mod cli;

use cli::{Cli, Commands, CreateAdminArgs, ServeArgs};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("smart-tdah error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = TdahConfig::load_with_dotenv().context("failed to load configuration")?;

    match cli.command {
        Commands::Serve(args) => serve(&mut config, args).await,
        Commands::Migrate => {
            open_db(&config).await?;
            tracing::info!(path = %config.database.path, "migrations applied");
            Ok(())
        }
        Commands::CreateAdmin(args) => create_admin(&config, args).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TDAH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn open_db(config: &TdahConfig) -> anyhow::Result<TdahDb> {
    TdahDb::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))
}

async fn serve(config: &mut TdahConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let db = open_db(config).await?;
    let state = AppState::new(db, config).context("invalid configuration")?;
    if !state.assistant.is_configured() {
        tracing::warn!("assistant.api_key not set; /api/gemini/ask will answer 503");
    }
    let app = router(state).layer(cors_layer(&config.server.frontend_origin)?);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

async fn create_admin(config: &TdahConfig, args: CreateAdminArgs) -> anyhow::Result<()> {
    let db = open_db(config).await?;
    let password_hash = hash_password_blocking(args.password).await?;
    let conn = db.acquire().await?;
    let id = conn
        .create_principal(&NewPrincipal {
            role: Role::Admin,
            email: args.email.clone(),
            password_hash,
            name: args.nombre,
            surname: args.apellidos,
        })
        .await?;
    tracing::info!(principal_id = id, email = %args.email, "admin created");
    println!("created admin {} (id {id})", args.email);
    Ok(())
}
