//! Build descriptor (snapcraft.yaml) model
//!
//! The descriptor is kept as a YAML mapping so keys this tool does not know
//! about survive the rewrite untouched. Typed accessors cover the keys the
//! vendoring run reads and writes: `name`, `parts` and `vendoring`.

mod component;
mod locate;

use std::path::Path;

use serde_yaml::{Mapping, Value};

pub use component::Component;
pub use locate::{DESCRIPTOR_LOCATIONS, locate_descriptor, resolve_relative};

use crate::error::{Result, config, fs};

const NAME_KEY: &str = "name";
const PARTS_KEY: &str = "parts";
const VENDORING_KEY: &str = "vendoring";

/// Parsed build descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct BuildDescriptor {
    document: Mapping,
}

impl BuildDescriptor {
    /// Parse a descriptor from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        let Value::Mapping(document) = value else {
            return Err(config::invalid("descriptor must be a mapping"));
        };

        let descriptor = Self { document };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Load and parse the descriptor at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| fs::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            crate::error::VendorizeError::DescriptorParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.document.get(NAME_KEY).and_then(Value::as_str).is_none() {
            return Err(config::invalid("missing 'name'"));
        }
        match self.document.get(PARTS_KEY) {
            Some(Value::Mapping(parts)) => {
                for (name, part) in parts {
                    let Some(name) = name.as_str() else {
                        return Err(config::invalid("part names must be strings"));
                    };
                    if !matches!(part, Value::Mapping(_) | Value::Null) {
                        return Err(config::invalid(format!("part '{name}' must be a mapping")));
                    }
                }
                Ok(())
            }
            Some(_) => Err(config::invalid("'parts' must be a mapping")),
            None => Err(config::invalid("missing 'parts'")),
        }
    }

    /// Declared project name
    pub fn name(&self) -> &str {
        self.document
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn parts(&self) -> Option<&Mapping> {
        self.document.get(PARTS_KEY).and_then(Value::as_mapping)
    }

    /// Component names in declaration order
    pub fn component_names(&self) -> Vec<String> {
        self.parts()
            .map(|parts| {
                parts
                    .keys()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A copy of the named component
    pub fn component(&self, name: &str) -> Option<Component> {
        self.parts()?.get(name).map(Component::from_value)
    }

    /// Replace the named component
    pub fn set_component(&mut self, name: &str, component: Component) {
        let parts = self
            .document
            .entry(Value::from(PARTS_KEY))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if let Value::Mapping(parts) = parts {
            parts.insert(Value::from(name), component.into_value());
        }
    }

    /// Allowed hosts declared by the descriptor, if any
    pub fn allowed_hosts(&self) -> Option<Vec<String>> {
        let hosts = self.document.get(VENDORING_KEY)?.as_sequence()?;
        Some(
            hosts
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        )
    }

    /// Record the allowed hosts the run used
    pub fn set_allowed_hosts(&mut self, hosts: &[String]) {
        let hosts = hosts.iter().map(|h| Value::from(h.as_str())).collect();
        self.document
            .insert(Value::from(VENDORING_KEY), Value::Sequence(hosts));
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.document)?)
    }

    /// Serialize the descriptor to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_yaml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| fs::write_failed(parent.display().to_string(), e.to_string()))?;
        }
        std::fs::write(path, content)
            .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
    }
}
