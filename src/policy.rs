//! Host policy evaluation
//!
//! Decides whether a source location lives on a host that is already trusted.
//! Locations without a host component (relative paths, `file://` URLs, SCP-style
//! shorthands that do not parse as URLs) are never foreign.

use url::Url;

/// Allowed-hosts policy for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPolicy {
    allowed_hosts: Vec<String>,
}

impl HostPolicy {
    /// Create a policy from an ordered list of allowed host names
    pub fn new<I, S>(allowed_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_hosts: allowed_hosts.into_iter().map(Into::into).collect(),
        }
    }

    /// The allowed hosts, in declaration order
    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed_hosts
    }

    /// Returns true when `location` has a host that is not an exact,
    /// case-sensitive match of an allowed host.
    pub fn is_foreign(&self, location: &str) -> bool {
        match host_of(location) {
            Some(host) => !self.allowed_hosts.iter().any(|allowed| *allowed == host),
            None => false,
        }
    }
}

/// Extract `host[:port]` from a location, if it parses as a URL with a host
///
/// The host is returned as the URL parser reports it: lower-cased for special
/// schemes (`http`, `https`, `file`, ...) and verbatim for the rest, including
/// `git+ssh` and `ssh`.
pub fn host_of(location: &str) -> Option<String> {
    let url = Url::parse(location).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
