use anyhow::Result;
use clap::Parser;
use gopkgviewer::adapters::browser;
use gopkgviewer::app::engine::ViewerEngine;
use gopkgviewer::cli::{self, Cli};
use gopkgviewer::server::http;
use std::process::ExitCode;
use std::time::Duration;
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Grace period for in-flight requests once a shutdown signal arrives
const FORCE_EXIT_AFTER: Duration = Duration::from_secs(3);

/// Logs go to stderr so `--dump` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gopkgviewer=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error:\n > {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let policy = cli.build_policy();
    let manifest = cli.gomod.clone();

    info!(policy = policy.name(), "creating graph...");
    let engine = spawn_blocking(move || ViewerEngine::load(&manifest, policy)).await??;

    if cli.dump {
        return cli::dump_graph(&engine, &mut std::io::stdout().lock());
    }

    let listener = http::bind(&cli.addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "starting server");

    if !cli.skip_browser {
        let url = format!("http://{local_addr}");
        info!(url = %url, "opening browser");
        if let Err(e) = browser::open_url(&url) {
            warn!(error = %e, "failed to open browser");
        }
    }

    let app = http::build_router(engine, cli.assets);
    http::serve(app, listener, shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on the first shutdown signal and arms the force-exit watchdog.
async fn shutdown_signal() {
    wait_for_signal().await;
    info!("shutting down...");

    tokio::spawn(async {
        tokio::time::sleep(FORCE_EXIT_AFTER).await;
        error!("force exit");
        std::process::exit(1);
    });
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
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
}
