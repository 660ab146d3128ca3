//! Vendorize - snap source vendoring
//!
//! Takes a snapcraft project and a target git repository, and rewrites the
//! project so every source its build reads comes from a branch of that
//! repository: each part, each Python dependency of a part, and finally the
//! rewritten project itself on `master`.
//!
//! The pieces:
//! - [`policy`]: which hosts are trusted as-is
//! - [`branch`]: branch naming and pin addresses
//! - [`descriptor`]: reading and rewriting `snapcraft.yaml`
//! - [`git`]: clone, commit and push through git2
//! - [`plugin`]: per-language dependency vendoring
//! - [`orchestrator`]: one run from descriptor to published branches

pub mod branch;
pub mod cli;
pub mod common;
pub mod descriptor;
pub mod error;
pub mod git;
pub mod logging;
pub mod orchestrator;
pub mod plugin;
pub mod policy;
pub mod ui;

pub use error::{Result, VendorizeError};
