//! The command-line side of resolution, independent of any CLI framework.
//!
//! The registry describes each setting as a [`FlagSpec`], hands the whole set
//! to a [`FlagParser`] once, and reads the answers back from [`ParsedFlags`].
//! The clap-backed parser lives in the `cli` module; [`StaticFlags`] is a
//! framework-free parser over fixed values.

use std::collections::HashMap;

use crate::error::ClapsetError;

/// One flag to register: name, stringified default, and help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub default: String,
    pub help: String,
}

/// A parsed flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValue {
    pub value: String,
    /// `true` when the user passed the flag, `false` when this is the default.
    pub explicit: bool,
}

/// Values produced by one parse, keyed by flag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    values: HashMap<String, FlagValue>,
}

impl ParsedFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>, explicit: bool) {
        self.values.insert(
            name.into(),
            FlagValue {
                value: value.into(),
                explicit,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A command-line parser the registry can delegate to.
///
/// `parse` receives every registered setting at once and must return a value
/// (explicit or default) for each spec it accepted.
pub trait FlagParser {
    fn parse(&mut self, specs: &[FlagSpec]) -> Result<ParsedFlags, ClapsetError>;
}

/// A parser over a fixed set of `name -> value` pairs.
///
/// Names present in the set are reported as explicit; every other spec falls
/// back to its default. Unknown names are ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticFlags {
    given: HashMap<String, String>,
}

impl StaticFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value as if the user had passed `--name value`.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.given.insert(name.to_string(), value.to_string());
        self
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StaticFlags {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(StaticFlags::new(), |flags, (k, v)| flags.with(k, v))
    }
}

impl FlagParser for StaticFlags {
    fn parse(&mut self, specs: &[FlagSpec]) -> Result<ParsedFlags, ClapsetError> {
        let mut parsed = ParsedFlags::new();
        for spec in specs {
            match self.given.get(&spec.name) {
                Some(value) => parsed.insert(&spec.name, value, true),
                None => parsed.insert(&spec.name, &spec.default, false),
            }
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, default: &str) -> FlagSpec {
        FlagSpec {
            name: name.into(),
            default: default.into(),
            help: String::new(),
        }
    }

    #[test]
    fn static_flags_given_value_is_explicit() {
        let mut flags = StaticFlags::new().with("port", "9000");
        let parsed = flags.parse(&[spec("port", "8080")]).unwrap();
        let port = parsed.get("port").unwrap();
        assert_eq!(port.value, "9000");
        assert!(port.explicit);
    }

    #[test]
    fn static_flags_missing_value_uses_default() {
        let mut flags = StaticFlags::new();
        let parsed = flags.parse(&[spec("host", "localhost")]).unwrap();
        let host = parsed.get("host").unwrap();
        assert_eq!(host.value, "localhost");
        assert!(!host.explicit);
    }

    #[test]
    fn static_flags_ignore_unregistered_names() {
        let mut flags: StaticFlags = [("other", "x")].into_iter().collect();
        let parsed = flags.parse(&[spec("host", "")]).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.get("other").is_none());
    }
}
