//! Touch input model
//!
//! Identifiers, locations and phase batches as delivered by the host UI
//! runtime. Nothing in here knows about buttons or states.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a single contact on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub u64);

impl std::fmt::Display for TouchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "touch#{}", self.0)
    }
}

/// A location in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One contact within an input batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub id: TouchId,
    #[serde(flatten)]
    pub location: Point,
}

impl Touch {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: TouchId(id),
            location: Point::new(x, y),
        }
    }
}

/// Lifecycle phase shared by every touch in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

impl std::fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TouchPhase::Began => write!(f, "began"),
            TouchPhase::Moved => write!(f, "moved"),
            TouchPhase::Ended => write!(f, "ended"),
            TouchPhase::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A batch of touches that changed phase together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchBatch {
    pub phase: TouchPhase,
    pub touches: Vec<Touch>,
}

impl TouchBatch {
    pub fn new(phase: TouchPhase, touches: Vec<Touch>) -> Self {
        Self { phase, touches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_deserialization() {
        let json = r#"{"phase":"began","touches":[{"id":3,"x":10.0,"y":20.5}]}"#;
        let batch: TouchBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.phase, TouchPhase::Began);
        assert_eq!(batch.touches, vec![Touch::new(3, 10.0, 20.5)]);
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let json = r#"{"phase":"hovered","touches":[]}"#;
        assert!(serde_json::from_str::<TouchBatch>(json).is_err());
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(a.distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}
