//! Shared utilities for repository adapters

#[cfg(feature = "repository-mongodb")]
pub mod documents;
pub mod call_guard;

pub use call_guard::CallGuard;
