//! # clapset demo application
//!
//! A sample CLI tool that shows how to wire [clapset](https://docs.rs/clapset)
//! into an application. It exists purely to demonstrate and manually verify
//! clapset's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example clapset_demo
//! PORT=9999 cargo run --example clapset_demo -- --COLOR red
//! cargo run --example clapset_demo -- --help
//! RUST_LOG=clapset=debug UPSTREAMS='api:a;broken' cargo run --example clapset_demo
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                | How to exercise it                                        |
//! |------------------------|-----------------------------------------------------------|
//! | Record defaults        | `cargo run --example clapset_demo`                        |
//! | Env var override       | `COLOR=red cargo run --example clapset_demo`              |
//! | Flag override          | `cargo run --example clapset_demo -- --PORT 8080`         |
//! | Flags beat env vars    | `PORT=1 cargo run --example clapset_demo -- --PORT 2`     |
//! | List and map settings  | `TAGS=a,b UPSTREAMS='api:x,y;web:z' cargo run ...`        |
//! | Transformer            | `--LOG_LEVEL WARN` is lower-cased                         |
//! | Generated help         | `cargo run --example clapset_demo -- --help`              |
//! | Diagnostics            | `WORKERS=abc cargo run --example clapset_demo`            |

mod config;

use clapset::Registry;
use tracing_subscriber::EnvFilter;

use config::DemoConfig;

// ---------------------------------------------------------------------------
// ANSI color helpers
// ---------------------------------------------------------------------------

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn echo_all(config: &DemoConfig, settings: &Registry) {
    let color = ansi_color_code(&config.color);

    if config.verbose {
        println!(
            "{color}[verbose] Resolved configuration for {:?}{RESET}",
            config.name
        );
        println!();
    }

    let listing = settings.listing();
    if config.display.format == "plain" {
        println!("{listing}");
    } else {
        let max_key_len = listing
            .entries
            .iter()
            .map(|(k, _)| k.len())
            .max()
            .unwrap_or(0);
        for (key, value) in &listing.entries {
            println!("{color}{key:<max_key_len$}{RESET}  {value}");
        }
    }

    for diagnostic in settings.diagnostics() {
        eprintln!("note: {diagnostic}");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Registry::new()
        .command_name("clapset-demo")
        .about("clapset demo: settings from env vars and flags");

    // Settings registered by hand sit next to the ones bound from the struct.
    settings.set_int("WORKERS", 4, "Number of worker threads.");
    settings.set_string_with("LOG_LEVEL", "info", "Log level name.", |s| s.to_lowercase());

    let mut config = DemoConfig::default();
    if let Err(e) = settings.parse_to(&mut config) {
        eprintln!("Failed to load settings:\n{e}");
        std::process::exit(1);
    }

    echo_all(&config, &settings);
}
