use std::mem;

use axum::{
    handler::Handler,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

use crate::{api, AppState};

#[derive(Copy, Clone)]
pub enum Stability {
    Stable,
    Beta,
}

impl Stability {
    fn as_str(self) -> &'static str {
        match self {
            Stability::Stable => "stable",
            Stability::Beta => "beta",
        }
    }
}

/// Router wrapper that records every registered `METHOD path` for `/about`.
pub struct RouterBuilder {
    router: Router<AppState>,
    endpoints: Vec<String>,
    endpoints_meta: Vec<Value>,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            endpoints: Vec::new(),
            endpoints_meta: Vec::new(),
        }
    }

    fn record(&mut self, method: &str, path: &'static str, stability: Option<Stability>) {
        self.endpoints.push(format!("{} {}", method, path));
        if let Some(stability) = stability {
            self.endpoints_meta.push(json!({
                "method": method,
                "path": path,
                "stability": stability.as_str(),
            }));
        }
    }

    pub fn route_get<H, T>(
        &mut self,
        path: &'static str,
        handler: H,
        stability: Option<Stability>,
    ) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: 'static,
    {
        self.record("GET", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, get(handler));
        self
    }

    pub fn route_post<H, T>(
        &mut self,
        path: &'static str,
        handler: H,
        stability: Option<Stability>,
    ) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: 'static,
    {
        self.record("POST", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, post(handler));
        self
    }

    pub fn route_put<H, T>(
        &mut self,
        path: &'static str,
        handler: H,
        stability: Option<Stability>,
    ) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: 'static,
    {
        self.record("PUT", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, put(handler));
        self
    }

    pub fn route_delete<H, T>(
        &mut self,
        path: &'static str,
        handler: H,
        stability: Option<Stability>,
    ) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: 'static,
    {
        self.record("DELETE", path, stability);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, delete(handler));
        self
    }

    pub fn build(self) -> (Router<AppState>, Vec<String>, Vec<Value>) {
        (self.router, self.endpoints, self.endpoints_meta)
    }
}

pub mod paths {
    pub const HEALTHZ: &str = "/healthz";
    pub const ABOUT: &str = "/about";
    pub const OPENAPI_JSON: &str = "/openapi.json";
    pub const CONTACTS: &str = "/contatos";
    pub const CONTACTS_SEARCH: &str = "/contatos/buscar";
    pub const CONTACTS_ID: &str = "/contatos/{id}";
}

/// Register every route. `/contatos/buscar` is a static segment, so it wins over `{id}`.
pub fn build_routes() -> RouterBuilder {
    let mut builder = RouterBuilder::new();
    builder
        .route_get(paths::HEALTHZ, api::meta::healthz, Some(Stability::Stable))
        .route_get(paths::ABOUT, api::meta::about, Some(Stability::Stable))
        .route_get(
            paths::OPENAPI_JSON,
            api::meta::openapi_json,
            Some(Stability::Beta),
        )
        .route_get(
            paths::CONTACTS,
            api::contacts::contacts_list,
            Some(Stability::Stable),
        )
        .route_post(
            paths::CONTACTS,
            api::contacts::contacts_create,
            Some(Stability::Stable),
        )
        .route_get(
            paths::CONTACTS_SEARCH,
            api::contacts::contacts_search,
            Some(Stability::Stable),
        )
        .route_get(
            paths::CONTACTS_ID,
            api::contacts::contacts_get,
            Some(Stability::Stable),
        )
        .route_put(
            paths::CONTACTS_ID,
            api::contacts::contacts_update,
            Some(Stability::Stable),
        )
        .route_delete(
            paths::CONTACTS_ID,
            api::contacts::contacts_delete,
            Some(Stability::Stable),
        );
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_every_route() {
        let (_router, endpoints, meta) = build_routes().build();
        assert_eq!(endpoints.len(), 9);
        assert!(endpoints.contains(&"GET /contatos/buscar".to_string()));
        assert!(endpoints.contains(&"DELETE /contatos/{id}".to_string()));
        assert_eq!(meta.len(), endpoints.len());
    }
}
