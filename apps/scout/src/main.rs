mod apollo_client;
mod cli;
mod config;
mod errors;
mod routes;
mod search;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::apollo_client::ApolloClient;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::errors::AppError;
use crate::routes::build_router;
use crate::search::classifier::InternationalGraduateFilter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Logs go to stderr so CLI listings on stdout stay clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let outcome = match cli.command {
        Command::Search(args) => cli::run_search(args, &config).await,
        Command::Interactive(args) => cli::run_interactive(args, &config).await,
        Command::Test => cli::run_connection_test(&config).await,
        Command::Serve => serve(config).await,
    };

    if let Err(err) = &outcome {
        if let Some(AppError::NotConfigured(msg)) = err.downcast_ref::<AppError>() {
            eprintln!("{}", format!("Error: {msg}").red());
            eprintln!(
                "{}",
                "Set APOLLO_API_KEY in the environment or in a .env file".yellow()
            );
            std::process::exit(1);
        }
    }

    outcome
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting Scout API v{}", env!("CARGO_PKG_VERSION"));
    let port = config.bind_port()?;

    // A missing key still starts the server; search routes answer NOT_CONFIGURED.
    let apollo = match config.apollo_api_key.as_deref() {
        Some(key) => {
            let client = ApolloClient::new(key.to_string(), &config.apollo_base_url)?;
            info!("Apollo client initialized (base: {})", config.apollo_base_url);
            Some(client)
        }
        None => {
            warn!("APOLLO_API_KEY is not set; search endpoints will report not configured");
            None
        }
    };

    let state = AppState {
        apollo,
        filter: Arc::new(InternationalGraduateFilter),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
