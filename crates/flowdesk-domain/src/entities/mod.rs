//! Domain Entities
//!
//! Record types persisted by the application.

/// Workflow canvas components
pub mod workflow;

pub use workflow::{
    CanvasComponent, ConnectionAnchor, ConnectionAttributes, ConnectionComponent, LineAttributes,
    LineComponent, Point, RectangleAttributes, RectangleComponent,
};
