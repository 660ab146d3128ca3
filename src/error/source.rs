//! Component source errors

use super::VendorizeError;

/// Creates an unsupported source error
pub fn unsupported(location: impl Into<String>) -> VendorizeError {
    VendorizeError::UnsupportedSource {
        location: location.into(),
    }
}

/// Creates a missing plugin error
pub fn missing_plugin(part: impl Into<String>) -> VendorizeError {
    VendorizeError::MissingPlugin { part: part.into() }
}

/// Creates a command failed error
pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::CommandFailed {
        command: command.into(),
        reason: reason.into(),
    }
}
