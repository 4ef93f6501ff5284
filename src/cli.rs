//! Clap adapter for the flag pass.
//!
//! Compiled only with the `clap` Cargo feature (on by default). Settings are
//! only known at runtime, so instead of clap's derive API this builds a
//! [`Command`] from the registered [`FlagSpec`]s: every setting becomes a long
//! option `--<name> <value>` carrying its default and help text.
//!
//! The only bridge to the core is the [`FlagParser`] impl. Apps that use a
//! different argument parser implement that trait instead.

use std::ffi::OsString;
use std::path::Path;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};

use crate::error::ClapsetError;
use crate::flags::{FlagParser, FlagSpec, ParsedFlags};

/// [`FlagParser`] backed by clap.
#[derive(Debug, Clone)]
pub struct ClapFlags {
    name: String,
    about: Option<String>,
    args: Option<Vec<OsString>>,
}

impl ClapFlags {
    /// Parse the process arguments. Errors and `--help` print and exit.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            about: None,
            args: None,
        }
    }

    /// Parse an explicit argument list (first item is the program name).
    /// Errors are returned instead of exiting.
    pub fn from_args<I, T>(name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self {
            name: name.to_string(),
            about: None,
            args: Some(args.into_iter().map(Into::into).collect()),
        }
    }

    /// Text shown at the top of `--help`.
    pub fn about(mut self, about: Option<&str>) -> Self {
        self.about = about.map(str::to_string);
        self
    }

    /// Build the clap command for a set of specs.
    ///
    /// A setting called `help` replaces the generated `--help` flag.
    pub fn command(&self, specs: &[FlagSpec]) -> Command {
        // A repeated flag keeps its last value.
        let mut command = Command::new(self.name.clone()).args_override_self(true);
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }
        // A setting named `help` takes over `--help`.
        if specs.iter().any(|spec| spec.name == "help") {
            command = command.disable_help_flag(true);
        }
        for spec in specs {
            command = command.arg(
                Arg::new(spec.name.clone())
                    .long(spec.name.clone())
                    .value_name("VALUE")
                    .help(spec.help.clone())
                    .default_value(spec.default.clone())
                    .allow_hyphen_values(true)
                    .action(ArgAction::Set),
            );
        }
        command
    }
}

impl FlagParser for ClapFlags {
    fn parse(&mut self, specs: &[FlagSpec]) -> Result<ParsedFlags, ClapsetError> {
        let command = self.command(specs);
        let matches = match &self.args {
            Some(args) => command.try_get_matches_from(args)?,
            None => command.get_matches(),
        };

        let mut parsed = ParsedFlags::new();
        for spec in specs {
            if let Some(value) = matches.get_one::<String>(&spec.name) {
                let explicit = matches.value_source(&spec.name) == Some(ValueSource::CommandLine);
                parsed.insert(&spec.name, value, explicit);
            }
        }
        Ok(parsed)
    }
}

/// Program name from `argv[0]`, falling back to `"app"`.
pub fn default_command_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, default: &str, help: &str) -> FlagSpec {
        FlagSpec {
            name: name.into(),
            default: default.into(),
            help: help.into(),
        }
    }

    fn parse(args: &[&str], specs: &[FlagSpec]) -> ParsedFlags {
        ClapFlags::from_args("test", args.iter().copied())
            .parse(specs)
            .unwrap()
    }

    #[test]
    fn explicit_long_flag() {
        let parsed = parse(&["test", "--HOST", "0.0.0.0"], &[spec("HOST", "localhost", "")]);
        let host = parsed.get("HOST").unwrap();
        assert_eq!(host.value, "0.0.0.0");
        assert!(host.explicit);
    }

    #[test]
    fn equals_syntax() {
        let parsed = parse(&["test", "--port=3000"], &[spec("port", "8080", "")]);
        assert_eq!(parsed.get("port").unwrap().value, "3000");
    }

    #[test]
    fn missing_flag_reports_default() {
        let parsed = parse(&["test"], &[spec("port", "8080", "")]);
        let port = parsed.get("port").unwrap();
        assert_eq!(port.value, "8080");
        assert!(!port.explicit);
    }

    #[test]
    fn empty_default_is_reported() {
        let parsed = parse(&["test"], &[spec("name", "", "")]);
        assert_eq!(parsed.get("name").unwrap().value, "");
    }

    #[test]
    fn negative_number_value() {
        let parsed = parse(&["test", "--offset", "-5"], &[spec("offset", "0", "")]);
        assert_eq!(parsed.get("offset").unwrap().value, "-5");
    }

    #[test]
    fn unknown_flag_errors() {
        let result = ClapFlags::from_args("test", ["test", "--nope", "1"])
            .parse(&[spec("port", "8080", "")]);
        assert!(matches!(result, Err(ClapsetError::Cli(_))));
    }

    #[test]
    fn repeated_flag_keeps_last_value() {
        let parsed = parse(
            &["test", "--PORT", "2", "--PORT", "3"],
            &[spec("PORT", "1", "")],
        );
        let port = parsed.get("PORT").unwrap();
        assert_eq!(port.value, "3");
        assert!(port.explicit);
    }

    #[test]
    fn setting_named_help_replaces_help_flag() {
        let parsed = parse(&["test", "--help", "y"], &[spec("help", "", "Show more")]);
        let help = parsed.get("help").unwrap();
        assert_eq!(help.value, "y");
        assert!(help.explicit);
    }

    #[test]
    fn help_text_is_rendered() {
        let flags = ClapFlags::from_args("test", ["test"]).about(Some("Demo app"));
        let mut command = flags.command(&[spec("port", "8080", "Port to listen on")]);
        let help = command.render_help().to_string();
        assert!(help.contains("Demo app"));
        assert!(help.contains("--port"));
        assert!(help.contains("Port to listen on"));
        assert!(help.contains("8080"));
    }
}
