//! Use case interfaces

pub mod workflow;

pub use workflow::WorkflowServiceInterface;
