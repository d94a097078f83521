use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

#[derive(Clone, Debug)]
struct Cfg {
    enabled: bool,
    sample_n: u64,
}

static CFG: Lazy<Cfg> = Lazy::new(|| Cfg {
    enabled: std::env::var("AGENDA_ACCESS_LOG").ok().as_deref() == Some("1"),
    sample_n: std::env::var("AGENDA_ACCESS_SAMPLE_N")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1)
        .max(1),
});

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn sampled(n: u64, sample_n: u64) -> bool {
    sample_n <= 1 || n % sample_n == 0
}

pub async fn access_log_mw(req: Request<axum::body::Body>, next: Next) -> Response {
    if !CFG.enabled {
        return next.run(req).await;
    }
    let started = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let res = next.run(req).await;
    let n = COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    if !sampled(n, CFG.sample_n) {
        return res;
    }
    tracing::info!(
        target: agenda_otel::ACCESS_TARGET,
        ts = %chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        method = %method,
        path = %path,
        status = res.status().as_u16(),
        dur_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    res
}
