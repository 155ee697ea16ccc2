//! Vaultdesk: admin console for a remote secret store
//!
//! Main binary with subcommands:
//! - `serve`: Browser console backed by the secrets REST API
//! - `copy`: Copy one secret's value to the system clipboard

use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultdesk_api::{DEFAULT_API_URL, MemorySecretStore, SecretsApi, SecretsClient};
use vaultdesk_console::{Navigator, SystemClipboard, console_routes, secret_path};

/// Flag parser for `VAULTDESK_IN_MEMORY`: `1`/`true`/`yes`/`on` enable it,
/// `0`/`false`/`no`/`off` or an empty value disable it, ignoring case.
fn parse_in_memory_flag(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(format!(
            "VAULTDESK_IN_MEMORY must be one of 1/true/yes/on or 0/false/no/off, got '{}'",
            s
        )),
    }
}

#[derive(Parser)]
#[command(name = "vaultdesk")]
#[command(about = "Admin console for a remote secret store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the browser console
    Serve {
        /// Base URL of the secrets REST API
        #[arg(long, env = "VAULTDESK_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Address to bind
        #[arg(long, env = "VAULTDESK_BIND", default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on
        #[arg(long, env = "VAULTDESK_PORT", default_value = "3000")]
        port: u16,

        /// Keep secrets in process memory instead of calling the API
        #[arg(long, env = "VAULTDESK_IN_MEMORY", value_parser = parse_in_memory_flag, default_value = "false")]
        in_memory: bool,
    },

    /// Copy a secret's value to the clipboard
    Copy {
        /// Secret name
        #[arg(value_name = "NAME")]
        name: String,

        /// Base URL of the secrets REST API
        #[arg(long, env = "VAULTDESK_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "vaultdesk=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            api_url,
            bind,
            port,
            in_memory,
        } => {
            let api: Arc<dyn SecretsApi> = if in_memory {
                tracing::warn!("using in-memory secret store; nothing will be persisted");
                Arc::new(MemorySecretStore::new())
            } else {
                Arc::new(connect(&api_url)?)
            };
            run_web_server(api, &bind, port).await
        }

        Commands::Copy { name, api_url } => copy_secret(&api_url, &name).await,
    }
}

fn connect(api_url: &str) -> Result<SecretsClient> {
    let client = SecretsClient::new(api_url).map_err(|e| miette::miette!("{}", e))?;
    tracing::info!(api_url = %client.base_url(), "using secrets API");
    Ok(client)
}

async fn run_web_server(api: Arc<dyn SecretsApi>, bind: &str, port: u16) -> Result<()> {
    use vaultdesk_web::create_router;

    let router = create_router(api);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, port))
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    tracing::info!("web console listening on http://{}:{}", bind, port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Load the secret through its detail route and copy the value.
async fn copy_secret(api_url: &str, name: &str) -> Result<()> {
    let client = connect(api_url)?;
    let mut navigator = Navigator::new(Arc::new(client), Arc::new(console_routes()));

    let screen = navigator
        .navigate(&secret_path(name))
        .await
        .map_err(|e| miette::miette!("{}", e))?;
    let detail = screen
        .as_detail()
        .ok_or_else(|| miette::miette!("{} is not a secret", name))?;

    if detail.copy_value(&SystemClipboard) {
        println!("Copied {} to the clipboard", name);
    } else {
        println!("{} has no value to copy", name);
    }
    Ok(())
}
