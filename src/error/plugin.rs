//! Dependency plugin errors

use super::VendorizeError;

/// Creates an unknown plugin error
pub fn unknown(plugin: impl Into<String>) -> VendorizeError {
    VendorizeError::UnknownPlugin {
        plugin: plugin.into(),
    }
}

/// Creates a plugin failed error
pub fn failed(plugin: impl Into<String>, message: impl Into<String>) -> VendorizeError {
    VendorizeError::PluginFailed {
        plugin: plugin.into(),
        message: message.into(),
    }
}
