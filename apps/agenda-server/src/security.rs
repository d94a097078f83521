use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

fn add_hdr(h: &mut HeaderMap, name: &'static str, val: &str) {
    let name = HeaderName::from_static(name);
    if !h.contains_key(&name) {
        if let Ok(v) = HeaderValue::from_str(val) {
            h.insert(name, v);
        }
    }
}

/// Basic security headers. Handler-set values win.
pub async fn headers_mw(req: Request<axum::body::Body>, next: Next) -> Response {
    let mut res = next.run(req).await;
    let h = res.headers_mut();
    add_hdr(h, "x-content-type-options", "nosniff");
    add_hdr(h, "x-frame-options", "DENY");
    let refpol = std::env::var("AGENDA_REFERRER_POLICY").unwrap_or_else(|_| "no-referrer".into());
    add_hdr(h, "referrer-policy", &refpol);
    res
}
