//! Typed settings for Rust applications, resolved from environment variables
//! and command-line flags.
//!
//! Register a setting with a default and a help message, resolve once at
//! startup, then read the typed value:
//!
//! ```ignore
//! let mut settings = Registry::new();
//! settings.set_string("HOST", "localhost", "Address to bind");
//! settings.set_int("PORT", 8080, "Port to listen on");
//! settings.resolve()?;
//! let port = settings.get_int("PORT");
//! ```
//!
//! `HOST=0.0.0.0 myapp --PORT 3000` then yields `0.0.0.0` and `3000`.
//!
//! # Setting kinds
//!
//! | Kind   | Rust type                      | Text form                |
//! |--------|--------------------------------|--------------------------|
//! | string | `String`                       | verbatim                 |
//! | int    | `i64`                          | base-10                  |
//! | bool   | `bool`                         | `y`, `true`, `yes` → true |
//! | list   | `Vec<String>`                  | joined by a separator    |
//! | map    | `HashMap<String, Vec<String>>` | `k1:v1,v2;k2:v3`         |
//!
//! Booleans use a fixed, case-sensitive truthiness table: exactly `y`,
//! `true` and `yes` are true, everything else is false. Maps use the
//! single-line encoding in [`codec`]; keys and values must not contain `;`,
//! `:` or `,`.
//!
//! # Layer precedence
//!
//! ```text
//! Registered default    set_*(name, default, help)
//!        ↑ overridden by
//! Environment vars      NAME=value
//!        ↑ overridden by
//! Command-line flags    --NAME value
//! ```
//!
//! Each layer replaces the whole value when it has one; nothing is merged.
//! String and int settings can carry a transformer (`set_string_with`,
//! `set_int_with`) that runs on the value the flag pass settles on, whether
//! it came from the command line, the environment, or the default.
//!
//! # Names and casing
//!
//! By default a name is used exactly as registered, for lookups, for the
//! environment variable and for the flag. With
//! [`contextual_casing(true)`](Registry::contextual_casing) names are stored
//! lower-cased, the environment is queried upper-cased and flags are
//! lower-case.
//!
//! # Binding a struct
//!
//! A struct deriving confique's `Config` and serde's `Serialize` can be
//! bound in one call. Each top-level field of a supported shape becomes a
//! setting named by the upper-cased field name, its `///` doc comment is the
//! help text, and its current value is the default:
//!
//! ```ignore
//! #[derive(Config, Serialize, Deserialize)]
//! struct AppConfig {
//!     /// Address to bind.
//!     host: String,
//!     /// Port to listen on.
//!     port: u16,
//! }
//!
//! let mut config = AppConfig { host: "localhost".into(), port: 8080 };
//! Registry::new().parse_to(&mut config)?;   // reads HOST, PORT, --HOST, --PORT
//! ```
//!
//! # Silent fallback
//!
//! Bad input never stops resolution. A non-integer value for an int setting
//! is ignored, malformed map items are dropped, unknown boolean text is
//! false, a value a bound field cannot hold leaves the field as it was, and
//! reading an unregistered name returns the zero value. Each
//! skipped input is logged with `tracing` and collected in
//! [`Registry::diagnostics`] for callers who want to be strict.
//!
//! # Collaborators
//!
//! The environment is read through [`EnvSource`] and flags are parsed by a
//! [`FlagParser`]. [`ProcessEnv`] and the clap-backed [`ClapFlags`] (behind
//! the `clap` Cargo feature, on by default) are the real ones; plain maps
//! and [`StaticFlags`] stand in for tests or for apps with their own
//! argument parser.
//!
//! # Shared registry
//!
//! The [`global`] module offers the same operations as free functions over a
//! single process-wide registry.

pub mod codec;
pub mod error;
pub mod global;
pub mod types;

mod bind;
#[cfg(feature = "clap")]
mod cli;
mod env;
mod flags;
mod registry;

#[cfg(test)]
mod fixtures;

pub use bind::{load_struct, parse_to_with, setting_name, update_struct};
#[cfg(feature = "clap")]
pub use bind::parse_to;
#[cfg(feature = "clap")]
pub use cli::ClapFlags;
pub use env::{EnvSource, ProcessEnv, env_name, vars};
pub use error::ClapsetError;
pub use flags::{FlagParser, FlagSpec, FlagValue, ParsedFlags, StaticFlags};
pub use registry::{Entry, Listing, Registry};
pub use types::{Diagnostic, MultiMap, SettingKind, SettingValue, Source, truthiness};
