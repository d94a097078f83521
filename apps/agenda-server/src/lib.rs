//! HTTP surface of the contact book.

mod access_log;
pub mod api;
pub mod app_state;
pub mod bootstrap;
pub mod openapi;
pub mod responses;
pub mod router;
mod security;
#[cfg(test)]
mod test_support;

pub use app_state::AppState;

use agenda_core::ContactStore;

/// Build the complete service with every layer attached.
pub fn build_app(store: ContactStore, concurrency_limit: usize) -> axum::Router {
    let bootstrap::BootstrapOutput { router, state } = bootstrap::build(store);
    bootstrap::attach_global_layers(bootstrap::attach_http_layers(
        bootstrap::attach_stateful_layers(router, state),
        concurrency_limit,
    ))
}
