//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::config::Env;
use crate::db;
use crate::server::app::serve;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Postboard lists, creates and deletes posts stored in SQLite.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a `postboard.toml` config file.
    /// Defaults to `postboard.toml` in the working directory, if present.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Postboard cli subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

///
#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Serve the posts page and API
    Serve {
        /// Address to bind to.
        #[arg(short, long, default_value_t = String::from("127.0.0.1"))]
        bind: String,
        /// Port on which to serve.
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Create or update the database schema
    Migrate,
}

/// Log at `info` unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect and apply pending migrations.
#[actix_web::main]
async fn migrate(env: &Env) -> anyhow::Result<()> {
    let connection = db::init::connect(env).await?;
    db::init::migrate(&connection).await
}

/// Main entrypoint to application
///
/// # Errors
/// Errors if the server cannot bind or stops with an I/O error.
pub fn run() -> std::io::Result<()> {
    init_tracing();
    tracing::debug!("Starting application");
    let cli = Cli::parse();
    let env = match Env::load(cli.config.as_deref()) {
        Ok(env) => env,
        Err(err) => {
            tracing::error!("error: could not load configuration: {err:?}");
            std::process::exit(1);
        }
    };

    match cli.subcommands {
        Subcommands::Serve { bind, port } => serve(env, &bind, port),
        Subcommands::Migrate => {
            if let Err(err) = migrate(&env) {
                tracing::error!("error: could not migrate database: {err:?}");
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
