//! Descriptor and run configuration errors

use super::VendorizeError;

/// Creates a descriptor not found error
pub fn not_found(path: impl Into<String>) -> VendorizeError {
    VendorizeError::DescriptorNotFound { path: path.into() }
}

/// Creates a descriptor parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::DescriptorParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid descriptor error
pub fn invalid(message: impl Into<String>) -> VendorizeError {
    VendorizeError::DescriptorInvalid {
        message: message.into(),
    }
}

/// Creates a path-not-relative error
pub fn not_relative(path: impl Into<String>) -> VendorizeError {
    VendorizeError::PathNotRelative { path: path.into() }
}

/// Creates a foreign target error
pub fn foreign_target(url: impl Into<String>) -> VendorizeError {
    VendorizeError::ForeignTarget { url: url.into() }
}
