use std::sync::Arc;

use agenda_core::ContactStore;
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Clone)]
pub struct AppState {
    // One lock scope per store call keeps id assignment collision-free.
    contacts: Arc<Mutex<ContactStore>>,
    endpoints: Arc<Vec<String>>,
    endpoints_meta: Arc<Vec<Value>>,
}

impl AppState {
    pub fn new(store: ContactStore, endpoints: Vec<String>, endpoints_meta: Vec<Value>) -> Self {
        Self {
            contacts: Arc::new(Mutex::new(store)),
            endpoints: Arc::new(endpoints),
            endpoints_meta: Arc::new(endpoints_meta),
        }
    }

    /// Run `f` with exclusive access to the store. Never hold this across an await.
    pub fn with_contacts<R>(&self, f: impl FnOnce(&mut ContactStore) -> R) -> R {
        let mut guard = self.contacts.lock();
        f(&mut guard)
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn endpoints_meta(&self) -> &[Value] {
        &self.endpoints_meta
    }
}
