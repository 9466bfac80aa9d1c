use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `smart-tdah` binary.
#[derive(Debug, Parser)]
#[command(name = "smart-tdah", version, about = "SMART-TDAH backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Create or upgrade the database schema, then exit.
    Migrate,
    /// Create an admin account.
    CreateAdmin(CreateAdminArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,
    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateAdminArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub nombre: String,
    #[arg(long)]
    pub apellidos: String,
    #[arg(long)]
    pub password: String,
}
