//! Application Layer - Flowdesk
//!
//! Use cases built on the repository port. Depends only on
//! `flowdesk-domain`; adapters are injected by the caller.
//!
//! ## Use Cases
//!
//! - Workflow board persistence: create, list, update and delete canvas
//!   components

pub mod domain_services;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
