//! Contact model, in-memory store and service configuration.

pub mod config;
pub mod contact;
pub mod store;

pub use config::{discover_config, load_config, ConfigError, HttpSection, ServiceConfig};
pub use contact::{Contact, ContactFields, ContactInput, ValidationError};
pub use store::ContactStore;
