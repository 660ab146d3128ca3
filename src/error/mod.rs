//! Error types and handling for vendorize
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Descriptor and run configuration errors
//! - [`source`]: Component source classification errors
//! - [`plugin`]: Dependency plugin errors
//! - [`git`]: Git operation errors
//! - [`fs`]: File system and archive errors
//!
//! Every variant is fatal for the run. Recoverable skips (a single dependency
//! failing to download) are logged by the plugin and never become an error.

pub mod config;
pub mod fs;
pub mod git;
pub mod plugin;
pub mod source;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for vendorize operations
#[derive(Error, Diagnostic, Debug)]
pub enum VendorizeError {
    // Configuration errors
    #[error("No snapcraft.yaml found in {path}")]
    #[diagnostic(
        code(vendorize::config::descriptor_not_found),
        help("Expected one of snapcraft.yaml, .snapcraft.yaml or snap/snapcraft.yaml")
    )]
    DescriptorNotFound { path: String },

    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(code(vendorize::config::parse_failed))]
    DescriptorParseFailed { path: String, reason: String },

    #[error("Invalid descriptor: {message}")]
    #[diagnostic(code(vendorize::config::invalid))]
    DescriptorInvalid { message: String },

    #[error("Path '{path}' is not relative")]
    #[diagnostic(
        code(vendorize::config::not_relative),
        help("Pass the descriptor path relative to the project directory")
    )]
    PathNotRelative { path: String },

    #[error("'{url}' is not in the allowed hosts")]
    #[diagnostic(
        code(vendorize::config::foreign_target),
        help("Add the target host with --allowed-host")
    )]
    ForeignTarget { url: String },

    // Source errors
    #[error("Unsupported source '{location}'")]
    #[diagnostic(code(vendorize::source::unsupported))]
    UnsupportedSource { location: String },

    #[error("No vendoring for remote parts ('{part}' declares no plugin)")]
    #[diagnostic(
        code(vendorize::source::no_plugin),
        help("Declare a plugin for the part, e.g. 'plugin: nil'")
    )]
    MissingPlugin { part: String },

    #[error("Command '{command}' failed: {reason}")]
    #[diagnostic(code(vendorize::source::command_failed))]
    CommandFailed { command: String, reason: String },

    // Plugin errors
    #[error("No vendoring for '{plugin}'")]
    #[diagnostic(
        code(vendorize::plugin::unknown),
        help("Supported plugins: python (pass-through: copy, dump, nil)")
    )]
    UnknownPlugin { plugin: String },

    #[error("Plugin '{plugin}' failed: {message}")]
    #[diagnostic(code(vendorize::plugin::failed))]
    PluginFailed { plugin: String, message: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(vendorize::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(vendorize::git::clone_failed),
        help("Check that URL is correct and you have access to repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to prepare branch '{branch}' in {path}: {reason}")]
    #[diagnostic(code(vendorize::git::branch_failed))]
    GitBranchFailed {
        branch: String,
        path: String,
        reason: String,
    },

    #[error("Failed to push branch '{branch}': {reason}")]
    #[diagnostic(
        code(vendorize::git::push_failed),
        help("Check that you have write access to the target repository")
    )]
    GitPushFailed { branch: String, reason: String },

    #[error("Invalid branch name: {name}")]
    #[diagnostic(
        code(vendorize::git::invalid_branch),
        help("Project and part names must be valid git reference components")
    )]
    InvalidBranchName { name: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to unpack archive {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::archive_failed))]
    ArchiveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(vendorize::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for VendorizeError {
    fn from(err: std::io::Error) -> Self {
        VendorizeError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for VendorizeError {
    fn from(err: serde_yaml::Error) -> Self {
        VendorizeError::DescriptorParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for VendorizeError {
    fn from(err: serde_json::Error) -> Self {
        VendorizeError::DescriptorParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VendorizeError {
    fn from(err: toml::de::Error) -> Self {
        VendorizeError::DescriptorParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for VendorizeError {
    fn from(err: git2::Error) -> Self {
        VendorizeError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, VendorizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = VendorizeError::ForeignTarget {
            url: "https://untrusted.example.com/repo.git".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'https://untrusted.example.com/repo.git' is not in the allowed hosts"
        );
    }

    #[test]
    fn test_error_code() {
        let err = VendorizeError::UnknownPlugin {
            plugin: "rust".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("vendorize::plugin::unknown".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VendorizeError = io_err.into();
        assert!(matches!(err, VendorizeError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: VendorizeError = parse_result.unwrap_err().into();
        assert!(matches!(err, VendorizeError::DescriptorParseFailed { .. }));
    }

    #[test]
    fn test_git_error_conversion() {
        let err: VendorizeError = git2::Error::from_str("git error").into();
        assert!(matches!(err, VendorizeError::GitOperationFailed { .. }));
    }

    test_error_contains!(
        test_missing_plugin_error,
        VendorizeError::MissingPlugin {
            part: "app".to_string()
        },
        "No vendoring for remote parts",
        "app"
    );

    test_error_contains!(
        test_unsupported_source_error,
        source::unsupported("/abs/path"),
        "Unsupported source",
        "/abs/path"
    );

    test_error_contains!(
        test_descriptor_not_found_error,
        config::not_found("/project"),
        "No snapcraft.yaml found"
    );

    test_error_contains!(
        test_push_failed_error,
        git::push_failed("demo_app", "rejected"),
        "demo_app",
        "rejected"
    );

    test_error_contains!(
        test_plugin_failed_error,
        plugin::failed("python", "External requirements are not supported"),
        "Plugin 'python' failed"
    );
}
