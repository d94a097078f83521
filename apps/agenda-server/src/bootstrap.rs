use std::net::SocketAddr;

use agenda_core::{ContactStore, HttpSection};
use tracing::info;
use utoipa::OpenApi;

use crate::{access_log, router, security, AppState};

pub struct BootstrapOutput {
    pub router: axum::Router<AppState>,
    pub state: AppState,
}

/// Register routes and wrap the store into shared state.
pub fn build(store: ContactStore) -> BootstrapOutput {
    let (router, endpoints, endpoints_meta) = router::build_routes().build();
    info!(
        routes = endpoints.len(),
        contacts = store.len(),
        "router assembled"
    );
    let state = AppState::new(store, endpoints, endpoints_meta);
    BootstrapOutput { router, state }
}

pub fn attach_stateful_layers(
    router: axum::Router<AppState>,
    state: AppState,
) -> axum::Router<()> {
    router.with_state::<()>(state)
}

pub fn attach_http_layers(router: axum::Router<()>, concurrency_limit: usize) -> axum::Router<()> {
    use tower::limit::ConcurrencyLimitLayer;
    use tower_http::trace::TraceLayer;

    router
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
}

pub fn attach_global_layers(router: axum::Router<()>) -> axum::Router<()> {
    router
        .layer(axum::middleware::from_fn(access_log::access_log_mw))
        .layer(axum::middleware::from_fn(security::headers_mw))
}

#[derive(Debug, thiserror::Error)]
pub enum HttpConfigError {
    #[error("invalid AGENDA_HTTP_MAX_CONC: {0}")]
    InvalidConcurrency(String),
    #[error("invalid AGENDA_PORT: {0}")]
    InvalidPort(String),
    #[error("invalid AGENDA_BIND: {0}")]
    InvalidBind(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub addr: SocketAddr,
    pub concurrency_limit: usize,
}

/// Resolve the listen address, letting `AGENDA_*` env vars override the file config.
pub fn http_config_from_env(base: &HttpSection) -> Result<HttpConfig, HttpConfigError> {
    let concurrency_limit = std::env::var("AGENDA_HTTP_MAX_CONC")
        .ok()
        .map(|raw| {
            raw.parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(HttpConfigError::InvalidConcurrency(raw))
        })
        .transpose()?
        .unwrap_or(base.max_conc);
    if concurrency_limit == 0 {
        return Err(HttpConfigError::InvalidConcurrency("0".into()));
    }

    let bind = std::env::var("AGENDA_BIND").unwrap_or_else(|_| base.bind.clone());
    let port = match std::env::var("AGENDA_PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .map_err(|_| HttpConfigError::InvalidPort(raw))?,
        Err(_) => base.port,
    };

    let host = bind.trim();
    let addr = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    };
    let addr = addr
        .parse()
        .map_err(|_| HttpConfigError::InvalidBind(bind.clone()))?;

    Ok(HttpConfig {
        addr,
        concurrency_limit,
    })
}

/// When `OPENAPI_OUT` is set, write the generated document there and report the path.
pub fn ensure_openapi_export() -> Result<Option<String>, std::io::Error> {
    if let Ok(path) = std::env::var("OPENAPI_OUT") {
        export_openapi(&path)?;
        return Ok(Some(path));
    }
    Ok(None)
}

fn export_openapi(path: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = crate::openapi::ApiDoc::openapi()
        .to_yaml()
        .map_err(std::io::Error::other)?;
    std::fs::write(path, yaml)
}
