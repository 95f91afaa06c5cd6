use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, Point, Vec2};
use crate::geometry::{self, CircleSteps};
use crate::turtle::command::AnimationCommand;

/// Default pen color of a fresh session (`#22C55E`).
pub const DEFAULT_PEN_COLOR: Color = Color::rgb(0x22, 0xc5, 0x5e);
/// Default pen width of a fresh session.
pub const DEFAULT_PEN_WIDTH: f64 = 2.0;

/// Logical position and heading.
///
/// Always the *target* state: updated synchronously by every motion or turn call, ahead of
/// whatever the player has rendered so far.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Pose {
    /// Raster-space position in logical pixels.
    pub position: Point,
    /// Internal heading in degrees, normalized to `[0, 360)`.
    pub heading: f64,
}

/// Drawing attributes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PenState {
    /// Whether motion strokes.
    pub down: bool,
    /// Stroke color.
    pub color: Color,
    /// Stroke width, always positive.
    pub width: f64,
    /// Fill color; `None` falls back to the pen color.
    pub fill_color: Option<Color>,
    /// Whether a fill is being recorded.
    pub filling: bool,
    /// Vertices recorded since `begin_fill`.
    pub fill_path: Vec<Point>,
    /// Cursor visibility; does not affect strokes.
    pub visible: bool,
}

/// Starting pen and pose attributes applied whenever a session is (re)bound.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TurtleDefaults {
    /// Initial pen color.
    pub pen_color: Color,
    /// Initial pen width.
    pub pen_width: f64,
    /// Initial heading in compass degrees (0 = north).
    pub heading: f64,
    /// Arc approximation resolution.
    pub circle: CircleSteps,
}

impl Default for TurtleDefaults {
    fn default() -> Self {
        Self {
            pen_color: DEFAULT_PEN_COLOR,
            pen_width: DEFAULT_PEN_WIDTH,
            heading: 0.0,
            circle: CircleSteps::default(),
        }
    }
}

/// The turtle's logical state for one bound surface.
///
/// Every operation is total: it mutates state immediately and returns the commands to enqueue.
#[derive(Clone, Debug)]
pub struct Turtle {
    canvas: Canvas,
    circle: CircleSteps,
    pose: Pose,
    pen: PenState,
}

impl Turtle {
    /// Fresh turtle at the canvas center.
    pub fn new(canvas: Canvas, defaults: &TurtleDefaults) -> Self {
        let pen_width = if defaults.pen_width.is_finite() && defaults.pen_width > 0.0 {
            defaults.pen_width
        } else {
            DEFAULT_PEN_WIDTH
        };
        Self {
            canvas,
            circle: defaults.circle,
            pose: Pose {
                position: canvas.center(),
                heading: geometry::compass_to_internal(defaults.heading),
            },
            pen: PenState {
                down: true,
                color: defaults.pen_color,
                width: pen_width,
                fill_color: None,
                filling: false,
                fill_path: Vec::new(),
                visible: true,
            },
        }
    }

    /// Logical pose (raster space, internal heading).
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Pen attributes.
    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    /// Canvas this turtle draws on.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Logical position in turtle space (origin at center, y up).
    pub fn position(&self) -> Point {
        geometry::raster_to_turtle(self.canvas, self.pose.position)
    }

    /// Logical heading in compass degrees.
    pub fn heading(&self) -> f64 {
        geometry::internal_to_compass(self.pose.heading)
    }

    /// Move by a raster-space displacement.
    pub fn move_by(&mut self, dx: f64, dy: f64) -> AnimationCommand {
        self.move_to(self.pose.position + Vec2::new(dx, dy))
    }

    /// Move along the current heading; negative distances move backward.
    pub fn forward(&mut self, distance: f64) -> AnimationCommand {
        let to = geometry::advance(self.pose.position, self.pose.heading, distance);
        self.move_to(to)
    }

    /// Move against the current heading.
    pub fn backward(&mut self, distance: f64) -> AnimationCommand {
        self.forward(-distance)
    }

    /// Move to a turtle-space position.
    pub fn set_position(&mut self, x: f64, y: f64) -> AnimationCommand {
        let to = geometry::turtle_to_raster(self.canvas, Point::new(x, y));
        self.move_to(to)
    }

    /// Rotate by `delta` degrees; positive turns clockwise on screen.
    pub fn turn_by(&mut self, delta: f64) -> AnimationCommand {
        let from_angle = self.pose.heading;
        let to_angle = from_angle + delta;
        self.pose.heading = geometry::normalize_degrees(to_angle);
        AnimationCommand::Turn {
            from_angle,
            to_angle,
        }
    }

    /// Turn clockwise.
    pub fn right(&mut self, angle: f64) -> AnimationCommand {
        self.turn_by(angle)
    }

    /// Turn counter-clockwise.
    pub fn left(&mut self, angle: f64) -> AnimationCommand {
        self.turn_by(-angle)
    }

    /// Face an absolute compass heading.
    pub fn set_heading(&mut self, compass_deg: f64) -> AnimationCommand {
        let from_angle = self.pose.heading;
        let to_angle = geometry::compass_to_internal(compass_deg);
        self.pose.heading = to_angle;
        AnimationCommand::Turn {
            from_angle,
            to_angle,
        }
    }

    /// Approximate an arc with chained forward/turn commands.
    pub fn circle(&mut self, radius: f64, extent_deg: f64) -> Vec<AnimationCommand> {
        let plan = self.circle.plan(radius, extent_deg);
        let mut out = Vec::with_capacity(plan.steps as usize * 2);
        for _ in 0..plan.steps {
            out.push(self.forward(plan.step_len));
            out.push(self.turn_by(plan.step_turn));
        }
        out
    }

    /// Lift or lower the pen.
    pub fn set_pen(&mut self, down: bool) {
        self.pen.down = down;
    }

    /// Set the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.pen.color = color;
    }

    /// Set the stroke width; non-positive or non-finite widths are ignored.
    pub fn set_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.pen.width = width;
        } else {
            tracing::trace!(width, "ignoring non-positive pen width");
        }
    }

    /// Set the fill color used by `end_fill`.
    pub fn set_fill_color(&mut self, color: Color) {
        self.pen.fill_color = Some(color);
    }

    /// Start recording a fill polygon at the current position.
    pub fn begin_fill(&mut self) {
        self.pen.filling = true;
        self.pen.fill_path = vec![self.pose.position];
    }

    /// Stop recording and emit the fill for the recorded polygon.
    pub fn end_fill(&mut self) -> AnimationCommand {
        let path = std::mem::take(&mut self.pen.fill_path);
        self.pen.filling = false;
        AnimationCommand::Fill {
            path,
            color: self.pen.fill_color.unwrap_or(self.pen.color),
        }
    }

    /// Show or hide the cursor.
    pub fn set_visible(&mut self, visible: bool) {
        self.pen.visible = visible;
    }

    fn move_to(&mut self, to: Point) -> AnimationCommand {
        let cmd = AnimationCommand::Line {
            from: self.pose.position,
            to,
            color: self.pen.color,
            width: self.pen.width,
            strokes: self.pen.down,
        };
        if self.pen.filling {
            self.pen.fill_path.push(to);
        }
        self.pose.position = to;
        cmd
    }
}

#[cfg(test)]
#[path = "../../tests/unit/turtle/state.rs"]
mod tests;
