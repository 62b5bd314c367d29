use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A position on the canvas, in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A finished pen stroke, submitted once as a whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeData {
    pub color: String,
    pub width: u32,
    pub points: Vec<Point>,
}

impl StrokeData {
    /// A stroke needs at least one point and a non-zero width
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && !self.points.is_empty()
    }
}

/// The edit carried by an operation, keyed by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum OperationKind {
    Stroke(StrokeData),
}

/// One committed entry in a room's log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub author_id: String,
    #[serde(flatten)]
    pub kind: OperationKind,
}

impl Operation {
    /// Stamp an edit with a fresh id and the current time
    pub fn new(author_id: String, kind: OperationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            author_id,
            kind,
        }
    }
}
