//! A single part of the descriptor

use serde_yaml::{Mapping, Value};

const SOURCE_KEY: &str = "source";
const PLUGIN_KEY: &str = "plugin";

/// Source used when a part declares none
pub const DEFAULT_SOURCE: &str = ".";

/// One named part; every key is kept so the part is written back verbatim
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    data: Mapping,
}

impl Component {
    pub fn new(data: Mapping) -> Self {
        Self { data }
    }

    pub(crate) fn from_value(value: &Value) -> Self {
        Self::new(value.as_mapping().cloned().unwrap_or_default())
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Mapping(self.data)
    }

    /// Declared source location, `.` when absent
    pub fn source(&self) -> &str {
        self.option_str(SOURCE_KEY).unwrap_or(DEFAULT_SOURCE)
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        let source: String = source.into();
        self.set_option(SOURCE_KEY, source);
    }

    /// Declared plugin identifier
    pub fn plugin(&self) -> Option<&str> {
        self.option_str(PLUGIN_KEY).filter(|p| !p.is_empty())
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// String list option; scalar strings are treated as a one-element list
    pub fn option_list(&self, key: &str) -> Vec<String> {
        match self.data.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(item)) => vec![item.clone()],
            _ => Vec::new(),
        }
    }

    pub fn set_option(&mut self, key: &str, value: impl Into<Value>) {
        self.data.insert(Value::from(key), value.into());
    }

    pub fn remove_option(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn contains_option(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}
