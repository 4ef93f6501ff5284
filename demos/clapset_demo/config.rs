//! Configuration struct for the clapset demo application.
//!
//! [`DemoConfig`] derives [`confique::Config`] for field metadata (names and
//! doc comments) plus [`Serialize`]/[`Deserialize`] so clapset can read and
//! rebuild it.
//!
//! # Env var and flag mapping
//!
//! Every top-level field maps to its upper-cased name:
//!
//! | Field        | Env var       | Flag                      |
//! |--------------|---------------|---------------------------|
//! | `name`       | `NAME`        | `--NAME demo`             |
//! | `verbose`    | `VERBOSE`     | `--VERBOSE yes`           |
//! | `port`       | `PORT`        | `--PORT 8080`             |
//! | `color`      | `COLOR`       | `--COLOR red`             |
//! | `tags`       | `TAGS`        | `--TAGS a,b,c`            |
//! | `upstreams`  | `UPSTREAMS`   | `--UPSTREAMS api:a,b;web:c` |
//!
//! The `display` section is nested and therefore not bound.

use std::collections::HashMap;

use confique::Config;
use serde::{Deserialize, Serialize};

/// Root configuration for the demo application.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Application name shown in the echo banner.
    pub name: String,

    /// Print extra detail (y, yes or true to enable).
    pub verbose: bool,

    /// Port number.
    pub port: u16,

    /// Terminal color for the echo output.
    pub color: String,

    /// Free-form tags, comma separated.
    pub tags: Vec<String>,

    /// Upstream groups, e.g. `api:host1,host2;web:host3`.
    pub upstreams: HashMap<String, Vec<String>>,

    /// Display settings (nested, not bound to settings).
    #[config(nested)]
    pub display: DisplayConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            name: "clapset-demo".into(),
            verbose: false,
            port: 3000,
            color: "yellow".into(),
            tags: vec!["demo".into()],
            upstreams: HashMap::from([("api".to_string(), vec!["127.0.0.1".to_string()])]),
            display: DisplayConfig {
                format: "pretty".into(),
            },
        }
    }
}

/// Display and output formatting configuration.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct DisplayConfig {
    /// Output format (pretty or plain).
    #[config(default = "pretty")]
    pub format: String,
}
