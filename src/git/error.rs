//! Git error handling
//!
//! Turns git2 errors into short messages suitable for the one-line
//! `Error: ...` output of a failed run.

use git2::{Error, ErrorClass, ErrorCode};

/// Interpret a git2 error and provide a more user-friendly message
pub fn interpret_git_error(err: &Error) -> String {
    let message = err.message().to_lowercase();

    if message.contains("not found")
        || message.contains("404")
        || message.contains("too many redirects")
        || message.contains("authentication replays")
    {
        "Repository not found".to_string()
    } else if message.contains("authentication") || message.contains("credentials") {
        "Authentication failed".to_string()
    } else if message.contains("permission denied") || message.contains("access denied") {
        "Permission denied".to_string()
    } else if message.contains("connection")
        || message.contains("network")
        || message.contains("timeout")
        || message.contains("timed out")
    {
        "Network error".to_string()
    } else if err.code() == ErrorCode::NotFastForward {
        "Remote branch has diverged (not a fast-forward)".to_string()
    } else if err.class() == ErrorClass::Http {
        format!("HTTP error: {}", err.message())
    } else if err.class() == ErrorClass::Ssh {
        format!("SSH error: {}", err.message())
    } else {
        err.message().to_string()
    }
}
