use std::collections::HashMap;
use std::fmt;

/// A string-keyed multi-value map, the fifth setting kind.
pub type MultiMap = HashMap<String, Vec<String>>;

/// Default separator for list settings.
pub const DEFAULT_SEPARATOR: &str = ",";

/// The five kinds of value a setting can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    String,
    Int,
    Bool,
    List,
    Map,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingKind::String => "string",
            SettingKind::Int => "int",
            SettingKind::Bool => "bool",
            SettingKind::List => "list",
            SettingKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// A typed setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
    Map(MultiMap),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::String(_) => SettingKind::String,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::List(_) => SettingKind::List,
            SettingValue::Map(_) => SettingKind::Map,
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Environment,
    CommandLine,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Environment => f.write_str("environment"),
            Source::CommandLine => f.write_str("command line"),
        }
    }
}

/// Input that was skipped instead of applied.
///
/// None of these stop resolution. They are collected so callers that want
/// stricter behaviour can inspect them after the fact.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A map item without exactly one `:` was dropped.
    MalformedMapItem {
        name: String,
        item: String,
        source: Source,
    },
    /// An integer setting received text that is not a base-10 integer.
    InvalidInteger {
        name: String,
        value: String,
        source: Source,
    },
    /// A record field whose shape has no setting kind was not bound.
    UnsupportedField { field: String },
    /// A resolved value the record field could not hold; the field kept its
    /// previous value.
    RejectedValue { field: String, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedMapItem { name, item, source } => {
                write!(f, "Discarded map item '{item}' for '{name}' from {source}")
            }
            Diagnostic::InvalidInteger {
                name,
                value,
                source,
            } => write!(f, "Ignored non-integer '{value}' for '{name}' from {source}"),
            Diagnostic::UnsupportedField { field } => {
                write!(f, "Skipped field '{field}': unsupported shape")
            }
            Diagnostic::RejectedValue { field, reason } => {
                write!(f, "Kept previous value of field '{field}': {reason}")
            }
        }
    }
}

/// Fixed truthiness table: exactly `y`, `true` and `yes` are true.
///
/// Matching is case-sensitive and there is no explicit-false list; any other
/// text, including the empty string, is false.
pub fn truthiness(s: &str) -> bool {
    matches!(s, "y" | "true" | "yes")
}
