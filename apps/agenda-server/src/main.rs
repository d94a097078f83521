use anyhow::Context;
use tracing::{error, info};

use agenda_core::ContactStore;
use agenda_server::bootstrap;

#[tokio::main]
async fn main() {
    match bootstrap::ensure_openapi_export() {
        Ok(Some(_)) => return,
        Ok(None) => {}
        Err(err) => {
            eprintln!("error: failed to write generated OPENAPI_OUT: {err}");
            std::process::exit(2);
        }
    }

    agenda_otel::init();

    let file_cfg = match agenda_core::discover_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    let http_cfg = match bootstrap::http_config_from_env(&file_cfg.http) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = serve(http_cfg).await {
        error!("http server exited with error: {err:#}");
        std::process::exit(1);
    }
}

async fn serve(http_cfg: bootstrap::HttpConfig) -> anyhow::Result<()> {
    let app = agenda_server::build_app(ContactStore::new(), http_cfg.concurrency_limit);

    let listener = tokio::net::TcpListener::bind(http_cfg.addr)
        .await
        .with_context(|| format!("bind {}", http_cfg.addr))?;
    info!(addr = %http_cfg.addr, "contact book listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    info!("shut down; in-memory contacts discarded");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {err}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
}
