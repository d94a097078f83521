//! Isolation for tests that read the service's environment variables.

use std::sync::{Mutex, MutexGuard};

/// Every variable `bootstrap` consults.
pub(crate) const SERVICE_VARS: [&str; 4] = [
    "AGENDA_BIND",
    "AGENDA_PORT",
    "AGENDA_HTTP_MAX_CONC",
    "OPENAPI_OUT",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the env lock with all `SERVICE_VARS` cleared, then restores the
/// previous values when dropped.
pub(crate) struct ServiceEnv {
    _lock: MutexGuard<'static, ()>,
    previous: Vec<(&'static str, Option<String>)>,
}

pub(crate) fn service_env(vars: &[(&'static str, &str)]) -> ServiceEnv {
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let previous = SERVICE_VARS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect();
    for key in SERVICE_VARS {
        std::env::remove_var(key);
    }
    let mut env = ServiceEnv {
        _lock: lock,
        previous,
    };
    env.set_all(vars);
    env
}

impl ServiceEnv {
    /// Replace the current values: listed vars are set, the rest are cleared.
    pub(crate) fn set_all(&mut self, vars: &[(&'static str, &str)]) {
        for key in SERVICE_VARS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            assert!(SERVICE_VARS.contains(key), "{key} is not a service variable");
            std::env::set_var(key, value);
        }
    }
}

impl Drop for ServiceEnv {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            match value {
                Some(val) => std::env::set_var(key, val),
                None => std::env::remove_var(key),
            }
        }
    }
}
