//! Git operation errors

use super::VendorizeError;

/// Creates a generic git operation error
pub fn operation_failed(message: impl Into<String>) -> VendorizeError {
    VendorizeError::GitOperationFailed {
        message: message.into(),
    }
}

/// Creates a clone failed error
pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a branch preparation error
pub fn branch_failed(
    branch: impl Into<String>,
    path: impl Into<String>,
    reason: impl Into<String>,
) -> VendorizeError {
    VendorizeError::GitBranchFailed {
        branch: branch.into(),
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a push failed error
pub fn push_failed(branch: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::GitPushFailed {
        branch: branch.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid branch name error
pub fn invalid_branch(name: impl Into<String>) -> VendorizeError {
    VendorizeError::InvalidBranchName { name: name.into() }
}
