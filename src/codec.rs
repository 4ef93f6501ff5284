//! Single-line text form of a string-keyed multi-value map.
//!
//! `{"a": ["1", "2"], "b": ["3"]}` travels as `a:1,2;b:3`, which fits in one
//! environment variable or one flag value. Keys and values must not contain
//! any of the three delimiters; such input does not survive a round-trip.

use std::collections::HashSet;

use crate::types::MultiMap;

/// Separates `key:values` items.
pub const ITEM_DELIMITER: char = ';';
/// Separates a key from its values.
pub const KEY_SEPARATOR: char = ':';
/// Separates the values of one key.
pub const VALUE_SEPARATOR: char = ',';

/// Result of decoding a line: the map plus every item that was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub map: MultiMap,
    pub discarded: Vec<String>,
}

/// Encode a map as `k1:v1,v2;k2:v3`, items in key order.
pub fn encode(map: &MultiMap) -> String {
    let mut items: Vec<_> = map.iter().collect();
    items.sort_by(|a, b| a.0.cmp(b.0));
    items
        .into_iter()
        .map(|(key, values)| {
            format!(
                "{key}{KEY_SEPARATOR}{}",
                values.join(&VALUE_SEPARATOR.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join(&ITEM_DELIMITER.to_string())
}

/// Decode a line, keeping track of the items that were discarded.
///
/// An item is valid iff it holds exactly one `:`. An empty right-hand side
/// yields a single empty value. A repeated key keeps its last values.
pub fn decode(line: &str) -> Decoded {
    let mut decoded = Decoded::default();
    for item in line.split(ITEM_DELIMITER) {
        match parse_item(item) {
            Some((key, values)) => {
                decoded.map.insert(key.to_string(), values);
            }
            None => decoded.discarded.push(item.to_string()),
        }
    }
    decoded
}

/// Decode a line, returning only the map. Discarded items are logged.
pub fn decode_map(line: &str) -> MultiMap {
    let decoded = decode(line);
    for item in &decoded.discarded {
        tracing::warn!(item = %item, "Unable to parse map item, discarded");
    }
    decoded.map
}

fn parse_item(item: &str) -> Option<(&str, Vec<String>)> {
    let (key, rest) = item.split_once(KEY_SEPARATOR)?;
    if rest.contains(KEY_SEPARATOR) {
        return None;
    }
    let values = rest.split(VALUE_SEPARATOR).map(str::to_string).collect();
    Some((key, values))
}

/// Every distinct value across every key. Order is not guaranteed.
pub fn flatten(map: &MultiMap) -> Vec<String> {
    let unique: HashSet<&String> = map.values().flatten().collect();
    unique.into_iter().cloned().collect()
}
