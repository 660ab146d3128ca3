//! File system errors

use super::VendorizeError;

/// Creates a read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an archive failed error
pub fn archive_failed(path: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::ArchiveFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
