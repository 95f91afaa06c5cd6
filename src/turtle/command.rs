use crate::foundation::color::Color;
use crate::foundation::core::Point;

/// One queued rendering operation.
///
/// Commands are immutable once issued and are played back strictly in issuance order; each
/// assumes every earlier command has completed (position and heading continuity). All points are
/// in raster space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationCommand {
    /// Travel to `to`. `strokes == false` is a pen-up reposition: position still animates but
    /// nothing is drawn.
    Line {
        /// Logical position when the command was issued.
        from: Point,
        /// Destination.
        to: Point,
        /// Stroke color.
        color: Color,
        /// Stroke width in logical pixels.
        width: f64,
        /// Whether the travelled segment is stroked.
        strokes: bool,
    },
    /// Rotate the facing from `from_angle` to `to_angle` (internal degrees, not normalized).
    Turn {
        /// Heading when the command was issued.
        from_angle: f64,
        /// Target heading; may lie outside `[0, 360)` to preserve turn direction.
        to_angle: f64,
    },
    /// Fill the closed polygon through `path`; rendered atomically.
    Fill {
        /// Polygon vertices in order.
        path: Vec<Point>,
        /// Fill color.
        color: Color,
    },
}

impl AnimationCommand {
    /// Short stable name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { strokes: true, .. } => "line",
            Self::Line { strokes: false, .. } => "move",
            Self::Turn { .. } => "turn",
            Self::Fill { .. } => "fill",
        }
    }
}
