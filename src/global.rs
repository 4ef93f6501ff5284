//! Free functions over one shared, process-lifetime [`Registry`].
//!
//! For programs that register their settings at startup and read them from
//! anywhere, without threading a registry through. Every function locks the
//! shared instance for the duration of one call. Settings registered here
//! live until the process exits.
//!
//! ```ignore
//! clapset::global::set_string("OUTPUT_DIR", "/tmp", "Directory to write output files");
//! clapset::global::resolve()?;
//! let dir = clapset::global::get_string("OUTPUT_DIR");
//! ```

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::ClapsetError;
use crate::registry::{Listing, Registry};
use crate::types::{Diagnostic, MultiMap};

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::new()));

fn registry() -> MutexGuard<'static, Registry> {
    // A panic elsewhere does not leave the registry half-updated in any way
    // that matters for reads, so poisoning is ignored.
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` with exclusive access to the shared registry.
pub fn with_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    f(&mut *registry())
}

pub fn set_contextual_casing(enabled: bool) {
    registry().set_contextual_casing(enabled);
}

pub fn set_string(name: &str, default: &str, help: &str) {
    registry().set_string(name, default, help);
}

pub fn set_string_with<F>(name: &str, default: &str, help: &str, transform: F)
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    registry().set_string_with(name, default, help, transform);
}

pub fn set_int(name: &str, default: i64, help: &str) {
    registry().set_int(name, default, help);
}

pub fn set_int_with<F>(name: &str, default: i64, help: &str, transform: F)
where
    F: Fn(i64) -> i64 + Send + Sync + 'static,
{
    registry().set_int_with(name, default, help, transform);
}

pub fn set_bool(name: &str, default: bool, help: &str) {
    registry().set_bool(name, default, help);
}

pub fn set_list<I, S>(name: &str, default: I, help: &str, separator: &str)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    registry().set_list(name, default, help, separator);
}

pub fn set_map(name: &str, default: MultiMap, help: &str) {
    registry().set_map(name, default, help);
}

pub fn get_string(name: &str) -> String {
    registry().get_string(name)
}

pub fn get_int(name: &str) -> i64 {
    registry().get_int(name)
}

pub fn get_bool(name: &str) -> bool {
    registry().get_bool(name)
}

pub fn get_list(name: &str) -> Vec<String> {
    registry().get_list(name)
}

pub fn get_map(name: &str) -> MultiMap {
    registry().get_map(name)
}

pub fn listing() -> Listing {
    registry().listing()
}

pub fn diagnostics() -> Vec<Diagnostic> {
    registry().diagnostics().to_vec()
}

pub fn resolve_from_environment() {
    registry().resolve_from_environment();
}

#[cfg(feature = "clap")]
pub fn resolve_from_command_line() -> Result<(), ClapsetError> {
    registry().resolve_from_command_line()
}

#[cfg(feature = "clap")]
pub fn resolve() -> Result<(), ClapsetError> {
    registry().resolve()
}

pub fn load_struct<C>(record: &C) -> Result<(), ClapsetError>
where
    C: Config + Serialize,
    C::Layer: for<'de> Deserialize<'de>,
{
    registry().load_struct(record)
}

pub fn update_struct<C>(record: &mut C) -> Result<(), ClapsetError>
where
    C: Config + Serialize,
    C::Layer: for<'de> Deserialize<'de>,
{
    registry().update_struct(record)
}

#[cfg(feature = "clap")]
pub fn parse_to<C>(record: &mut C) -> Result<(), ClapsetError>
where
    C: Config + Serialize,
    C::Layer: for<'de> Deserialize<'de>,
{
    registry().parse_to(record)
}
