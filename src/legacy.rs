//! The flat legacy settings format.
//!
//! Older versions of the script persisted their settings as a single, non-nested
//! mapping of string keys to booleans and numbers. Numbers that were infinite are
//! stored as `null`, which is what the browser's JSON encoder makes of them. The key
//! naming is deterministic
//! per field kind (see the [`keys`] module); sections write into a [`LegacyWriter`]
//! and read back from a [`LegacyStorage`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;


/// A single primitive value stored in the legacy format.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum LegacyValue {
    Bool(bool),
    Number(f64),
    /// A number that was not finite when it was encoded.
    Null,
}

impl From<bool> for LegacyValue {
    fn from(value: bool) -> Self {
        LegacyValue::Bool(value)
    }
}

impl From<f64> for LegacyValue {
    fn from(value: f64) -> Self {
        LegacyValue::Number(value)
    }
}


#[derive(Error, Debug)]
pub enum LegacyFormatError {
    #[error("legacy settings are not valid JSON")]
    Malformed(#[source] serde_json::Error),

    #[error("legacy settings are neither a flat key/value object nor a toggles/triggers/items document")]
    UnrecognizedShape,

    #[error("failed to encode legacy settings")]
    Encode(#[source] serde_json::Error),
}


/// The flat key/value mapping of the legacy format.
///
/// This is only ever read from and written to during a single call;
/// the settings tree never keeps a reference to it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct LegacyStorage {
    items: BTreeMap<String, LegacyValue>,
}

/// Keeps the primitive entries of a JSON object. Anything else belongs to some
/// other feature sharing the namespace and is dropped.
fn primitive_entries(object: Map<String, Value>) -> BTreeMap<String, LegacyValue> {
    object
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Bool(value) => LegacyValue::Bool(value),
                Value::Number(number) => match number.as_f64() {
                    Some(value) => LegacyValue::Number(value),
                    None => {
                        debug!(%key, "Dropping legacy entry with an unrepresentable number.");
                        return None;
                    }
                },
                Value::Null => LegacyValue::Null,
                Value::String(_) | Value::Array(_) | Value::Object(_) => {
                    debug!(%key, "Dropping legacy entry that is not a boolean or a number.");
                    return None;
                }
            };

            Some((key, value))
        })
        .collect()
}

fn nested_table(document: &mut Map<String, Value>, name: &str) -> BTreeMap<String, LegacyValue> {
    match document.remove(name) {
        Some(Value::Object(table)) => primitive_entries(table),
        _ => BTreeMap::new(),
    }
}


impl LegacyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored legacy blob.
    ///
    /// Both the flat mapping and the older nested `toggles`/`triggers`/`items`
    /// document are accepted; the latter is flattened into the same namespace.
    pub fn from_json_str(json: &str) -> Result<Self, LegacyFormatError> {
        let document = match serde_json::from_str::<Value>(json)
            .map_err(LegacyFormatError::Malformed)?
        {
            Value::Object(document) => document,
            _ => return Err(LegacyFormatError::UnrecognizedShape),
        };

        // Older exports kept per-item keys under `items` and moved section
        // toggles and triggers into tables of their own.
        if matches!(document.get("items"), Some(Value::Object(_))) {
            return Ok(Self::from_nested(document));
        }

        Ok(Self {
            items: primitive_entries(document),
        })
    }

    fn from_nested(mut document: Map<String, Value>) -> Self {
        let mut items = nested_table(&mut document, "items");

        for (alias, value) in nested_table(&mut document, "toggles") {
            items.entry(keys::toggle(&alias)).or_insert(value);
        }
        for (alias, value) in nested_table(&mut document, "triggers") {
            items.entry(keys::trigger(&alias)).or_insert(value);
        }

        Self { items }
    }

    pub fn to_json_string_pretty(&self) -> Result<String, LegacyFormatError> {
        serde_json::to_string_pretty(self).map_err(LegacyFormatError::Encode)
    }

    pub fn get(&self, key: &str) -> Option<LegacyValue> {
        self.items.get(key).copied()
    }

    /// Reads a boolean. Missing keys and keys holding a number yield `None`.
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.items.get(key) {
            Some(LegacyValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Reads a number. Missing keys, `null` and keys holding a boolean yield `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.items.get(key) {
            Some(LegacyValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Overwrites `target` with the boolean stored under `key`, if there is one.
    /// Otherwise `target` keeps its current (default) value.
    pub fn read_bool_into(&self, key: &str, target: &mut bool) {
        if let Some(value) = self.bool(key) {
            *target = value;
        }
    }

    /// Overwrites `target` with the number stored under `key`, if there is one.
    pub fn read_number_into(&self, key: &str, target: &mut f64) {
        if let Some(value) = self.number(key) {
            *target = value;
        }
    }

    /// Unconditionally sets `key`, replacing any previous value.
    pub fn insert<V: Into<LegacyValue>>(&mut self, key: impl Into<String>, value: V) {
        self.items.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LegacyValue)> {
        self.items.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Yields the remainder of every key that starts with `prefix` and ends with `suffix`.
    pub fn infixes<'s>(
        &'s self,
        prefix: &'s str,
        suffix: &'s str,
    ) -> impl Iterator<Item = &'s str> + 's {
        self.items.keys().filter_map(move |key| {
            key.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
        })
    }
}

impl FromIterator<(String, LegacyValue)> for LegacyStorage {
    fn from_iter<I: IntoIterator<Item = (String, LegacyValue)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}


/// Write side of the legacy format.
///
/// Every key may be written exactly once per serialization pass. Two fields mapping
/// onto the same flat key is a bug in the settings schema, so it panics.
#[derive(Debug, Default)]
pub struct LegacyWriter {
    storage: LegacyStorage,
}

impl LegacyWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<LegacyValue>>(&mut self, key: String, value: V) {
        if self.storage.items.contains_key(&key) {
            panic!("legacy key `{key}` is registered by more than one setting");
        }

        self.storage.items.insert(key, value.into());
    }

    pub fn finish(self) -> LegacyStorage {
        self.storage
    }
}


/// Flat key naming convention.
pub mod keys {
    use std::fmt::Display;

    /// `toggle-<name>`: section and item enable flags.
    pub fn toggle(name: impl Display) -> String {
        format!("toggle-{name}")
    }

    /// `trigger-<alias>`: section-level trigger.
    pub fn trigger(alias: impl Display) -> String {
        format!("trigger-{alias}")
    }

    /// `toggle-<name>-trigger`: trigger of an item nested inside a section.
    pub fn nested_trigger(name: impl Display) -> String {
        format!("toggle-{name}-trigger")
    }

    /// `set-<name>-max`
    pub fn max(name: impl Display) -> String {
        format!("set-{name}-max")
    }

    /// `toggle-limited-<name>`
    pub fn limited(name: impl Display) -> String {
        format!("toggle-limited-{name}")
    }

    /// `toggle-<name>-<season>`
    pub fn seasonal(name: impl Display, season: impl Display) -> String {
        format!("toggle-{name}-{season}")
    }

    /// `set-<name>-<field>`: any other per-item numeric field.
    pub fn value(name: impl Display, field: &str) -> String {
        format!("set-{name}-{field}")
    }
}
