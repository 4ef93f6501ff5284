//! Typed settings and their two-phase resolution.
//!
//! Each setting name owns exactly one [`Entry`] of one [`SettingKind`].
//! Resolution runs the environment pass first and the flag pass second, so
//! the precedence is: registered default < environment < command line. Each
//! pass overwrites the whole value; nothing is merged.

use std::collections::BTreeMap;
use std::fmt;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::bind;
use crate::codec;
use crate::env::{EnvSource, ProcessEnv, env_name};
use crate::error::ClapsetError;
use crate::flags::{FlagParser, FlagSpec, FlagValue};
use crate::types::{
    DEFAULT_SEPARATOR, Diagnostic, MultiMap, SettingKind, SettingValue, Source, truthiness,
};

type StrTransform = Box<dyn Fn(&str) -> String + Send + Sync>;
type IntTransform = Box<dyn Fn(i64) -> i64 + Send + Sync>;

enum Slot {
    String {
        value: String,
        default: String,
        transform: Option<StrTransform>,
    },
    Int {
        value: i64,
        default: i64,
        transform: Option<IntTransform>,
    },
    Bool {
        value: bool,
        default: bool,
    },
    List {
        value: Vec<String>,
        default: Vec<String>,
        separator: String,
    },
    Map {
        value: MultiMap,
        default: MultiMap,
    },
}

/// A registered setting: current value, default, help and kind-specific extras.
pub struct Entry {
    help: String,
    slot: Slot,
}

impl Entry {
    pub fn kind(&self) -> SettingKind {
        match self.slot {
            Slot::String { .. } => SettingKind::String,
            Slot::Int { .. } => SettingKind::Int,
            Slot::Bool { .. } => SettingKind::Bool,
            Slot::List { .. } => SettingKind::List,
            Slot::Map { .. } => SettingKind::Map,
        }
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The current value.
    pub fn value(&self) -> SettingValue {
        match &self.slot {
            Slot::String { value, .. } => SettingValue::String(value.clone()),
            Slot::Int { value, .. } => SettingValue::Int(*value),
            Slot::Bool { value, .. } => SettingValue::Bool(*value),
            Slot::List { value, .. } => SettingValue::List(value.clone()),
            Slot::Map { value, .. } => SettingValue::Map(value.clone()),
        }
    }

    /// The value registered as default.
    pub fn default_value(&self) -> SettingValue {
        match &self.slot {
            Slot::String { default, .. } => SettingValue::String(default.clone()),
            Slot::Int { default, .. } => SettingValue::Int(*default),
            Slot::Bool { default, .. } => SettingValue::Bool(*default),
            Slot::List { default, .. } => SettingValue::List(default.clone()),
            Slot::Map { default, .. } => SettingValue::Map(default.clone()),
        }
    }

    /// List separator; `None` for other kinds.
    pub fn separator(&self) -> Option<&str> {
        match &self.slot {
            Slot::List { separator, .. } => Some(separator),
            _ => None,
        }
    }

    pub fn has_transform(&self) -> bool {
        matches!(
            self.slot,
            Slot::String {
                transform: Some(_),
                ..
            } | Slot::Int {
                transform: Some(_),
                ..
            }
        )
    }

    /// The current value in its single-line text form.
    pub fn text(&self) -> String {
        match &self.slot {
            Slot::String { value, .. } => value.clone(),
            Slot::Int { value, .. } => value.to_string(),
            Slot::Bool { value, .. } => value.to_string(),
            Slot::List {
                value, separator, ..
            } => value.join(separator),
            Slot::Map { value, .. } => codec::encode(value),
        }
    }

    /// Interpret raw text from `source` and overwrite the current value.
    /// Transformers are not involved here.
    fn apply_text(&mut self, name: &str, raw: &str, source: Source, out: &mut Vec<Diagnostic>) {
        match &mut self.slot {
            Slot::String { value, .. } => *value = raw.to_string(),
            Slot::Int { value, .. } => match parse_int(raw) {
                Some(n) => *value = n,
                None => out.push(Diagnostic::InvalidInteger {
                    name: name.to_string(),
                    value: raw.to_string(),
                    source,
                }),
            },
            Slot::Bool { value, .. } => *value = truthiness(raw),
            Slot::List {
                value, separator, ..
            } => *value = raw.split(separator.as_str()).map(str::to_string).collect(),
            Slot::Map { value, .. } => {
                let decoded = codec::decode(raw);
                out.extend(
                    decoded
                        .discarded
                        .into_iter()
                        .map(|item| Diagnostic::MalformedMapItem {
                            name: name.to_string(),
                            item,
                            source,
                        }),
                );
                *value = decoded.map;
            }
        }
    }

    /// Apply a parsed flag.
    ///
    /// String and int settings always take the flag value, explicit or
    /// default, through their transformer. The other kinds only change when
    /// the flag was actually passed.
    fn apply_flag(&mut self, name: &str, flag: &FlagValue, out: &mut Vec<Diagnostic>) {
        match &mut self.slot {
            Slot::String {
                value, transform, ..
            } => {
                *value = transform
                    .as_ref()
                    .map_or_else(|| flag.value.clone(), |t| t(flag.value.as_str()));
            }
            Slot::Int {
                value, transform, ..
            } => match parse_int(&flag.value) {
                Some(n) => *value = transform.as_ref().map_or(n, |t| t(n)),
                None => out.push(Diagnostic::InvalidInteger {
                    name: name.to_string(),
                    value: flag.value.clone(),
                    source: Source::CommandLine,
                }),
            },
            Slot::Bool { .. } | Slot::List { .. } | Slot::Map { .. } => {}
        }
        if flag.explicit && !matches!(self.slot, Slot::String { .. } | Slot::Int { .. }) {
            self.apply_text(name, &flag.value, Source::CommandLine, out);
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("kind", &self.kind())
            .field("value", &self.value())
            .field("default", &self.default_value())
            .field("help", &self.help)
            .field("transform", &self.has_transform())
            .finish()
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

fn separator_or_default(separator: &str) -> String {
    if separator.is_empty() {
        DEFAULT_SEPARATOR.to_string()
    } else {
        separator.to_string()
    }
}

/// Resolved settings rendered as `name = value` lines, in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entries: Vec<(String, String)>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

/// Holds every registered setting.
///
/// One instance normally lives for the whole process: register at startup,
/// resolve once, then read. The [`global`](crate::global) module wraps a
/// shared instance for callers who prefer free functions.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
    contextual_casing: bool,
    command_name: Option<String>,
    about: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable contextual casing (default: off).
    ///
    /// When on, names are stored lower-cased, queried in the environment
    /// upper-cased, and registered as lower-case flags. When off, the name is
    /// used exactly as given everywhere.
    pub fn contextual_casing(mut self, enabled: bool) -> Self {
        self.contextual_casing = enabled;
        self
    }

    pub fn set_contextual_casing(&mut self, enabled: bool) {
        self.contextual_casing = enabled;
    }

    pub fn is_contextual_casing(&self) -> bool {
        self.contextual_casing
    }

    /// Program name shown in `--help` (default: derived from `argv[0]`).
    pub fn command_name(mut self, name: &str) -> Self {
        self.command_name = Some(name.to_string());
        self
    }

    /// Description shown at the top of `--help`.
    pub fn about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    fn key(&self, name: &str) -> String {
        if self.contextual_casing {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    fn insert(&mut self, name: &str, help: &str, slot: Slot) {
        let key = self.key(name);
        self.entries.insert(
            key,
            Entry {
                help: help.to_string(),
                slot,
            },
        );
    }

    // -- registration -------------------------------------------------------

    /// Register a string setting. Re-registering replaces the entry.
    pub fn set_string(&mut self, name: &str, default: &str, help: &str) {
        self.insert(
            name,
            help,
            Slot::String {
                value: default.to_string(),
                default: default.to_string(),
                transform: None,
            },
        );
    }

    /// Register a string setting whose resolved value passes through `transform`.
    pub fn set_string_with<F>(&mut self, name: &str, default: &str, help: &str, transform: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.insert(
            name,
            help,
            Slot::String {
                value: default.to_string(),
                default: default.to_string(),
                transform: Some(Box::new(transform)),
            },
        );
    }

    pub fn set_int(&mut self, name: &str, default: i64, help: &str) {
        self.insert(
            name,
            help,
            Slot::Int {
                value: default,
                default,
                transform: None,
            },
        );
    }

    /// Register an integer setting whose resolved value passes through `transform`.
    pub fn set_int_with<F>(&mut self, name: &str, default: i64, help: &str, transform: F)
    where
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        self.insert(
            name,
            help,
            Slot::Int {
                value: default,
                default,
                transform: Some(Box::new(transform)),
            },
        );
    }

    pub fn set_bool(&mut self, name: &str, default: bool, help: &str) {
        self.insert(
            name,
            help,
            Slot::Bool {
                value: default,
                default,
            },
        );
    }

    /// Register a list setting. An empty `separator` means `","`.
    pub fn set_list<I, S>(&mut self, name: &str, default: I, help: &str, separator: &str)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default: Vec<String> = default.into_iter().map(Into::into).collect();
        self.insert(
            name,
            help,
            Slot::List {
                value: default.clone(),
                default,
                separator: separator_or_default(separator),
            },
        );
    }

    pub fn set_map(&mut self, name: &str, default: MultiMap, help: &str) {
        self.insert(
            name,
            help,
            Slot::Map {
                value: default.clone(),
                default,
            },
        );
    }

    /// Register `value` as both default and current value, keeping the
    /// transformer or list separator already configured for `name`.
    pub(crate) fn bind_value(&mut self, name: &str, help: &str, value: SettingValue) {
        let key = self.key(name);
        let previous = self.entries.remove(&key).map(|e| e.slot);
        let slot = match value {
            SettingValue::String(v) => Slot::String {
                transform: match previous {
                    Some(Slot::String { transform, .. }) => transform,
                    _ => None,
                },
                value: v.clone(),
                default: v,
            },
            SettingValue::Int(v) => Slot::Int {
                transform: match previous {
                    Some(Slot::Int { transform, .. }) => transform,
                    _ => None,
                },
                value: v,
                default: v,
            },
            SettingValue::Bool(v) => Slot::Bool {
                value: v,
                default: v,
            },
            SettingValue::List(v) => Slot::List {
                separator: match previous {
                    Some(Slot::List { separator, .. }) => separator,
                    _ => DEFAULT_SEPARATOR.to_string(),
                },
                value: v.clone(),
                default: v,
            },
            SettingValue::Map(v) => Slot::Map {
                value: v.clone(),
                default: v,
            },
        };
        self.entries.insert(
            key,
            Entry {
                help: help.to_string(),
                slot,
            },
        );
    }

    // -- reads --------------------------------------------------------------

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(&self.key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Current value of any kind.
    pub fn value(&self, name: &str) -> Option<SettingValue> {
        self.entry(name).map(Entry::value)
    }

    pub fn help(&self, name: &str) -> Option<&str> {
        self.entry(name).map(Entry::help)
    }

    pub fn separator(&self, name: &str) -> Option<&str> {
        self.entry(name).and_then(Entry::separator)
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current string value, or `""` if `name` is not a string setting.
    pub fn get_string(&self, name: &str) -> String {
        match self.entry(name).map(|e| &e.slot) {
            Some(Slot::String { value, .. }) => value.clone(),
            _ => String::new(),
        }
    }

    /// Current integer value, or `0` if `name` is not an integer setting.
    pub fn get_int(&self, name: &str) -> i64 {
        match self.entry(name).map(|e| &e.slot) {
            Some(Slot::Int { value, .. }) => *value,
            _ => 0,
        }
    }

    /// Current boolean value, or `false` if `name` is not a boolean setting.
    pub fn get_bool(&self, name: &str) -> bool {
        match self.entry(name).map(|e| &e.slot) {
            Some(Slot::Bool { value, .. }) => *value,
            _ => false,
        }
    }

    /// Current list value, or an empty list if `name` is not a list setting.
    pub fn get_list(&self, name: &str) -> Vec<String> {
        match self.entry(name).map(|e| &e.slot) {
            Some(Slot::List { value, .. }) => value.clone(),
            _ => Vec::new(),
        }
    }

    /// Current map value, or an empty map if `name` is not a map setting.
    pub fn get_map(&self, name: &str) -> MultiMap {
        match self.entry(name).map(|e| &e.slot) {
            Some(Slot::Map { value, .. }) => value.clone(),
            _ => MultiMap::new(),
        }
    }

    /// Every resolved setting with its value in text form.
    pub fn listing(&self) -> Listing {
        Listing {
            entries: self
                .entries
                .iter()
                .map(|(name, entry)| (name.clone(), entry.text()))
                .collect(),
        }
    }

    // -- diagnostics --------------------------------------------------------

    /// Input skipped so far by resolution and struct binding.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn record(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            tracing::warn!("{diagnostic}");
            self.diagnostics.push(diagnostic);
        }
    }

    // -- resolution ---------------------------------------------------------

    /// Environment pass over the process environment.
    pub fn resolve_from_environment(&mut self) {
        self.resolve_env_from(&ProcessEnv);
    }

    /// Environment pass over any [`EnvSource`].
    pub fn resolve_env_from<E: EnvSource + ?Sized>(&mut self, env: &E) {
        let casing = self.contextual_casing;
        let mut diagnostics = Vec::new();
        for (name, entry) in &mut self.entries {
            let lookup = env_name(name, casing);
            let Some(raw) = env.lookup(&lookup) else {
                continue;
            };
            tracing::debug!(setting = %name, var = %lookup, "Applying environment value");
            entry.apply_text(name, &raw, Source::Environment, &mut diagnostics);
        }
        self.record(diagnostics);
    }

    /// The flag registrations handed to a [`FlagParser`]: one per setting,
    /// with the current value as default.
    pub fn flag_specs(&self) -> Vec<FlagSpec> {
        self.entries
            .iter()
            .map(|(name, entry)| FlagSpec {
                name: name.clone(),
                default: entry.text(),
                help: entry.help.clone(),
            })
            .collect()
    }

    /// Flag pass through any [`FlagParser`].
    pub fn resolve_from_flags<P: FlagParser + ?Sized>(
        &mut self,
        parser: &mut P,
    ) -> Result<(), ClapsetError> {
        let parsed = parser.parse(&self.flag_specs())?;
        let mut diagnostics = Vec::new();
        for (name, entry) in &mut self.entries {
            let Some(flag) = parsed.get(name) else {
                continue;
            };
            if flag.explicit {
                tracing::debug!(setting = %name, "Applying command-line value");
            }
            entry.apply_flag(name, flag, &mut diagnostics);
        }
        self.record(diagnostics);
        Ok(())
    }

    /// Environment pass, then flag pass, with explicit collaborators.
    pub fn resolve_with<E, P>(&mut self, env: &E, flags: &mut P) -> Result<(), ClapsetError>
    where
        E: EnvSource + ?Sized,
        P: FlagParser + ?Sized,
    {
        self.resolve_env_from(env);
        self.resolve_from_flags(flags)
    }

    #[cfg(feature = "clap")]
    fn clap_flags(&self) -> crate::cli::ClapFlags {
        let name = self
            .command_name
            .clone()
            .unwrap_or_else(crate::cli::default_command_name);
        crate::cli::ClapFlags::new(&name).about(self.about.as_deref())
    }

    /// Flag pass over the process arguments.
    ///
    /// Like any CLI parser, invalid arguments and `--help` print a message
    /// and exit the process.
    #[cfg(feature = "clap")]
    pub fn resolve_from_command_line(&mut self) -> Result<(), ClapsetError> {
        let mut flags = self.clap_flags();
        self.resolve_from_flags(&mut flags)
    }

    /// Flag pass over an explicit argument list (first item is the program
    /// name). Parse failures are returned.
    #[cfg(feature = "clap")]
    pub fn try_resolve_from_args<I, T>(&mut self, args: I) -> Result<(), ClapsetError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString>,
    {
        let name = self
            .command_name
            .clone()
            .unwrap_or_else(crate::cli::default_command_name);
        let mut flags =
            crate::cli::ClapFlags::from_args(&name, args).about(self.about.as_deref());
        self.resolve_from_flags(&mut flags)
    }

    /// Environment pass, then flag pass, over the process sources.
    #[cfg(feature = "clap")]
    pub fn resolve(&mut self) -> Result<(), ClapsetError> {
        self.resolve_from_environment();
        self.resolve_from_command_line()
    }

    // -- struct binding -----------------------------------------------------

    /// Register every supported field of `record`. See [`load_struct`](crate::load_struct).
    pub fn load_struct<C>(&mut self, record: &C) -> Result<(), ClapsetError>
    where
        C: Config + Serialize,
        C::Layer: for<'de> Deserialize<'de>,
    {
        bind::load_struct(self, record)
    }

    /// Write current values back into `record`. See [`update_struct`](crate::update_struct).
    pub fn update_struct<C>(&mut self, record: &mut C) -> Result<(), ClapsetError>
    where
        C: Config + Serialize,
        C::Layer: for<'de> Deserialize<'de>,
    {
        bind::update_struct(self, record)
    }

    /// Load, resolve from the process sources, update.
    #[cfg(feature = "clap")]
    pub fn parse_to<C>(&mut self, record: &mut C) -> Result<(), ClapsetError>
    where
        C: Config + Serialize,
        C::Layer: for<'de> Deserialize<'de>,
    {
        bind::parse_to(self, record)
    }

    /// Load, resolve with explicit collaborators, update.
    pub fn parse_to_with<C, E, P>(
        &mut self,
        record: &mut C,
        env: &E,
        flags: &mut P,
    ) -> Result<(), ClapsetError>
    where
        C: Config + Serialize,
        C::Layer: for<'de> Deserialize<'de>,
        E: EnvSource + ?Sized,
        P: FlagParser + ?Sized,
    {
        bind::parse_to_with(self, record, env, flags)
    }
}
