use std::collections::{BTreeMap, HashMap};

/// Read-only access to environment variables.
///
/// The registry only ever asks for one name at a time. Tests and embedders
/// pass a plain map instead of touching the process environment.
pub trait EnvSource {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        // Non-unicode values are treated as unset.
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// Name under which a stored setting is looked up in the environment.
///
/// With contextual casing the stored (lower-cased) name is upper-cased;
/// otherwise the name is used exactly as registered.
pub fn env_name(stored: &str, contextual_casing: bool) -> String {
    if contextual_casing {
        stored.to_uppercase()
    } else {
        stored.to_string()
    }
}

/// Build an in-memory environment from string pairs.
///
/// For apps that take their settings from somewhere other than the process
/// environment (a launcher, a test harness, a snapshot taken at startup) and
/// pass it to [`Registry::resolve_env_from`](crate::Registry::resolve_env_from)
/// or [`Registry::resolve_with`](crate::Registry::resolve_with):
///
/// ```
/// use clapset::{Registry, vars};
///
/// let mut settings = Registry::new();
/// settings.set_int("WORKERS", 4, "Worker threads");
/// settings.resolve_env_from(&vars([("WORKERS", "8")]));
/// assert_eq!(settings.get_int("WORKERS"), 8);
/// ```
pub fn vars<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
