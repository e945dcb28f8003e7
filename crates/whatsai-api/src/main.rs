//! WhatsAi CLI and REST API entry point.
//!
//! Binary name: `whatsai`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! requested command or starts the auto-reply runtime with its dashboard API.

mod cli;
mod http;
mod state;

use clap::Parser;
use whatsai_infra::config::load_config;
use whatsai_infra::filesystem::resolve_data_dir;
use whatsai_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = TracingOptions {
        otel: cli.otel,
        json: cli.log_json,
        ..TracingOptions::default()
    }
    .with_verbosity(cli.verbose, cli.quiet);
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let mut config = load_config(&data_dir).await;

    let result = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Personalities => cli::personalities::list_personalities(cli.json),
        Commands::Analyze { input } => cli::analyze::analyze_sample(&config, &input, cli.json).await,
        Commands::Config => cli::config::show_config(&config, &data_dir, cli.json),
    };

    shutdown_tracing();
    result
}

/// Run the HTTP server until Ctrl+C / SIGTERM.
async fn serve(config: whatsai_types::config::GlobalConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let bridge_url = config.bridge.base_url.clone();
    let dashboard_locked = config.dashboard.api_token.is_some();

    let state = AppState::init(config)?;
    tracing::info!(
        provider = state.generator.provider_name(),
        model = state.generator.model(),
        bridge = %bridge_url,
        "runtime initialized"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!();
    println!(
        "  {} WhatsAi listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {} bridge at {}",
        console::style("↔").bold(),
        console::style(&bridge_url).cyan()
    );
    if !dashboard_locked {
        println!(
            "  {}",
            console::style("Dashboard API is open (no dashboard.api_token set)").yellow()
        );
    }
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
