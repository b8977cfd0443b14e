//! Drawing plan data model
//!
//! A [`Plan`] is the immutable output of the plan fetcher for one prompt: an
//! overall explanation plus ordered [`Step`]s. Each step carries the caption
//! shown while it plays and the drawing operations that sketch it. Once a
//! plan is handed to the playback orchestrator it is never mutated.
//!
//! Coordinates live in a fixed 100x100 canvas space with the origin at the
//! bottom-left, matching the bounds the TUI canvas is rendered with.

use serde::{Deserialize, Serialize};

/// Side length of the square canvas coordinate space
pub const CANVAS_SIZE: f64 = 100.0;

/// A point in canvas space
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

/// One drawing primitive
///
/// The wire format is tagged (`{"type": "line", ...}`) so the plan fetcher
/// can hand the schema to the model verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DrawOp {
    /// Straight segment between two points
    Line { from: Point, to: Point },
    /// Freehand polyline through the given points
    Stroke { points: Vec<Point> },
    /// Circle outline
    Circle { center: Point, radius: f64 },
    /// Axis-aligned rectangle outline, `origin` is the bottom-left corner
    Rect { origin: Point, width: f64, height: f64 },
    /// Short text placed at a point
    Label { at: Point, text: String },
}

/// One unit of the plan: a caption plus the operations that draw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Step {
    /// Caption shown while this step is drawn
    pub explanation: String,

    /// Ordered drawing operations for this step
    #[serde(default)]
    pub drawing_instructions: Vec<DrawOp>,
}

impl Step {
    pub fn new(explanation: impl Into<String>, drawing_instructions: Vec<DrawOp>) -> Self {
        Self {
            explanation: explanation.into(),
            drawing_instructions,
        }
    }
}

/// The full AI-generated output for one prompt
///
/// `steps` may be empty: the model can answer with an overall explanation
/// and nothing to draw, in which case playback finishes immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Overall explanation, shown before the first step activates
    pub explanation: String,

    /// Ordered drawing steps
    #[serde(rename = "whiteboard", default)]
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn new(explanation: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            explanation: explanation.into(),
            steps,
        }
    }

    /// Structural validation of a freshly parsed plan
    ///
    /// An empty step list is valid; blank explanations are not, since the
    /// caption panel would go dark mid-playback.
    pub fn validate(&self) -> Result<(), String> {
        if self.explanation.trim().is_empty() {
            return Err("plan has no overall explanation".to_string());
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.explanation.trim().is_empty() {
                return Err(format!("step {index} has no explanation"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_deserializes_wire_format() {
        let json = r#"{
            "explanation": "Water flows over the barrier because of pressure difference.",
            "whiteboard": [
                {
                    "explanation": "Draw the two containers",
                    "drawing-instructions": [
                        {"type": "rect", "origin": {"x": 10, "y": 10}, "width": 20, "height": 30},
                        {"type": "rect", "origin": {"x": 70, "y": 5}, "width": 20, "height": 20}
                    ]
                },
                {
                    "explanation": "Connect them with a tube",
                    "drawing-instructions": [
                        {"type": "stroke", "points": [{"x": 30, "y": 35}, {"x": 50, "y": 50}, {"x": 70, "y": 20}]},
                        {"type": "label", "at": {"x": 50, "y": 55}, "text": "siphon"}
                    ]
                }
            ]
        }"#;

        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].drawing_instructions.len(), 2);
        assert!(matches!(
            plan.steps[1].drawing_instructions[1],
            DrawOp::Label { ref text, .. } if text == "siphon"
        ));
        plan.validate().unwrap();
    }

    #[test]
    fn test_plan_without_steps_is_valid() {
        let json = r#"{"explanation": "Nothing to draw here.", "whiteboard": []}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert!(plan.steps.is_empty());
        plan.validate().unwrap();
    }

    #[test]
    fn test_missing_whiteboard_defaults_to_empty() {
        let json = r#"{"explanation": "Just words."}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert!(plan.steps.is_empty());
    }

    #[test]
    fn test_blank_explanation_rejected() {
        let plan = Plan::new("  ", vec![]);
        assert!(plan.validate().is_err());

        let plan = Plan::new("fine", vec![Step::new("", vec![])]);
        let err = plan.validate().unwrap_err();
        assert!(err.contains("step 0"));
    }

    #[test]
    fn test_draw_op_round_trip() {
        let op = DrawOp::Circle {
            center: Point::new(50.0, 50.0),
            radius: 12.5,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains(r#""type":"circle""#));
        let back: DrawOp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }
}
