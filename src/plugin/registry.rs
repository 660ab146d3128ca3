//! Static plugin registry
//!
//! Maps plugin identifiers to factories. Identifiers for parts that need no
//! vendoring (plain copies) are registered as pass-through and resolve to a
//! no-op; anything else unknown is reported to the caller.

use std::collections::{BTreeSet, HashMap};

use super::python::PythonPlugin;
use super::{DependencyPlugin, PluginContext};

/// Builds a plugin for one part
pub type PluginFactory = Box<dyn Fn(PluginContext) -> Box<dyn DependencyPlugin>>;

/// Plugin identifiers that copy sources verbatim and need no vendoring
pub const PASS_THROUGH_PLUGINS: [&str; 3] = ["copy", "dump", "nil"];

/// Result of looking up a plugin identifier
pub enum Resolution<'a> {
    Handler(&'a PluginFactory),
    PassThrough,
    Unknown,
}

impl std::fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Handler(_) => f.write_str("Handler"),
            Resolution::PassThrough => f.write_str("PassThrough"),
            Resolution::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Registry of plugin factories, populated once at startup
#[derive(Default)]
pub struct PluginRegistry {
    factories: HashMap<String, PluginFactory>,
    pass_through: BTreeSet<String>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in plugins
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("python", |ctx| Box::new(PythonPlugin::new(ctx)));
        for id in PASS_THROUGH_PLUGINS {
            registry.register_pass_through(id);
        }
        registry
    }

    /// Register (or replace) the factory for `id`
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(PluginContext) -> Box<dyn DependencyPlugin> + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Register `id` as a no-op
    pub fn register_pass_through(&mut self, id: impl Into<String>) {
        self.pass_through.insert(id.into());
    }

    pub fn resolve(&self, id: &str) -> Resolution<'_> {
        if let Some(factory) = self.factories.get(id) {
            Resolution::Handler(factory)
        } else if self.pass_through.contains(id) {
            Resolution::PassThrough
        } else {
            Resolution::Unknown
        }
    }

    /// Registered handler identifiers, sorted
    pub fn handler_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("handlers", &self.handler_ids())
            .field("pass_through", &self.pass_through)
            .finish()
    }
}
