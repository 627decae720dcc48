//! Workflow canvas components
//!
//! The shapes a workflow board stores: rectangles, free lines and
//! connections between rectangles. Field names follow the stored document
//! layout (`componentType`, `rectangleAttr`, ...).

use crate::constants::IDENTITY_FIELD;
use crate::ports::Record;
use serde::{Deserialize, Serialize};

/// A point on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One component of a workflow board, tagged by `componentType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "componentType")]
pub enum CanvasComponent {
    Rectangle(RectangleComponent),
    Line(LineComponent),
    Connection(ConnectionComponent),
}

impl CanvasComponent {
    /// Stored identity, absent until the component has been persisted
    pub fn object_id(&self) -> Option<&str> {
        match self {
            Self::Rectangle(c) => c.object_id.as_deref(),
            Self::Line(c) => c.object_id.as_deref(),
            Self::Connection(c) => c.object_id.as_deref(),
        }
    }

    /// Board-local numeric id
    pub fn id(&self) -> i64 {
        match self {
            Self::Rectangle(c) => c.id,
            Self::Line(c) => c.id,
            Self::Connection(c) => c.id,
        }
    }

    /// Tag as stored in `componentType`
    pub fn component_type(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "Rectangle",
            Self::Line(_) => "Line",
            Self::Connection(_) => "Connection",
        }
    }
}

impl Record for CanvasComponent {
    const COLLECTION: &'static str = "Workflow";
    const PRIMARY_KEY: &'static str = IDENTITY_FIELD;
}

/// A labelled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleComponent {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub id: i64,
    #[serde(rename = "rectangleAttr")]
    pub attributes: RectangleAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub background_color: String,
    pub width: f64,
    pub height: f64,
    pub start: Point,
}

/// A free line segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineComponent {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub id: i64,
    #[serde(rename = "lineAttr")]
    pub attributes: LineAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAttributes {
    pub start: Point,
    pub end: Point,
}

/// A connector between two rectangles; `end` is unset while being drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionComponent {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub id: i64,
    #[serde(rename = "connectionAttr")]
    pub attributes: ConnectionAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionAttributes {
    pub start: ConnectionAnchor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<ConnectionAnchor>,
}

/// Where a connection attaches to a rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAnchor {
    pub rectangle_id: i64,
    pub rectangle_point_location: Point,
}
