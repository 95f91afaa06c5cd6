//! Stateless turtle geometry.
//!
//! Two spaces are involved:
//!
//! - **Turtle space**: origin at the surface center, y axis up. Host coordinates (`goto`,
//!   `position`) live here.
//! - **Raster space**: origin top-left, y axis down, logical pixels. Pose and commands live here.
//!
//! Internal headings are degrees in raster space: 0° points east and angles grow clockwise on
//! screen, so `(cos θ, sin θ)` is the unit step directly. The public compass convention (0° north,
//! 90° east, clockwise) is `90 − public` measured counter-clockwise in turtle space; flipping the y
//! axis negates that angle, giving `internal = public − 90`.

use crate::foundation::core::{Canvas, Point, Vec2};

/// Map a turtle-space point to raster space.
pub fn turtle_to_raster(canvas: Canvas, p: Point) -> Point {
    let c = canvas.center();
    Point::new(c.x + p.x, c.y - p.y)
}

/// Map a raster-space point to turtle space.
pub fn raster_to_turtle(canvas: Canvas, p: Point) -> Point {
    let c = canvas.center();
    Point::new(p.x - c.x, c.y - p.y)
}

/// Normalize degrees into `[0, 360)` using the Euclidean remainder.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Compass heading (0° north, clockwise) to internal raster heading.
pub fn compass_to_internal(compass_deg: f64) -> f64 {
    normalize_degrees(compass_deg - 90.0)
}

/// Internal raster heading to compass heading.
pub fn internal_to_compass(internal_deg: f64) -> f64 {
    normalize_degrees(internal_deg + 90.0)
}

/// Move `distance` along `heading_deg` (internal convention) from `from`.
///
/// Negative distances move backward.
pub fn advance(from: Point, heading_deg: f64, distance: f64) -> Point {
    let rad = heading_deg.to_radians();
    from + Vec2::new(distance * rad.cos(), distance * rad.sin())
}

/// Linearly interpolate between two points with clamped parameter `t`.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    let t = t.clamp(0.0, 1.0);
    Point::new(a.x + ((b.x - a.x) * t), a.y + ((b.y - a.y) * t))
}

/// A fill path with two or fewer points encloses no area and renders nothing.
pub fn is_degenerate_polygon(path: &[Point]) -> bool {
    path.len() <= 2
}

/// Upper bound on polygon edges for a single arc, whatever the configured resolution.
pub const MAX_CIRCLE_STEPS: u32 = 4096;

/// Polygon resolution used to approximate circles and arcs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CircleSteps {
    /// Degrees of extent per polygon edge.
    pub divisor: f64,
    /// Minimum number of edges for any arc.
    pub min_steps: u32,
}

impl Default for CircleSteps {
    fn default() -> Self {
        Self {
            divisor: 4.0,
            min_steps: 15,
        }
    }
}

/// Chained forward/turn steps approximating one arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirclePlan {
    /// Number of forward+turn pairs.
    pub steps: u32,
    /// Length of each forward step.
    pub step_len: f64,
    /// Signed internal heading change after each step (negative turns left).
    pub step_turn: f64,
}

impl CircleSteps {
    /// Plan an arc of `radius` spanning `extent_deg`.
    ///
    /// A positive radius curves left (counter-clockwise on screen), zero or negative curves right.
    /// Extents beyond one full turn are folded into `(360, 720)` degrees: extra full turns retrace
    /// the same circle and leave the end pose unchanged, so the plan stays bounded.
    pub fn plan(self, radius: f64, extent_deg: f64) -> CirclePlan {
        let divisor = if self.divisor > 0.0 { self.divisor } else { 4.0 };
        let extent = fold_extent(extent_deg);
        let edges = (extent.abs() / divisor).round();
        let steps = edges
            .max(f64::from(self.min_steps.max(1)))
            .min(f64::from(MAX_CIRCLE_STEPS)) as u32;
        let step_angle = extent / f64::from(steps);
        let step_len =
            (2.0 * std::f64::consts::PI * radius.abs() * extent.abs()) / (360.0 * f64::from(steps));
        let step_turn = if radius > 0.0 { -step_angle } else { step_angle };
        CirclePlan {
            steps,
            step_len,
            step_turn,
        }
    }
}

fn fold_extent(extent_deg: f64) -> f64 {
    let abs = extent_deg.abs();
    if abs <= 360.0 {
        return extent_deg;
    }
    let folded = 360.0 + (abs - 360.0).rem_euclid(360.0);
    folded.copysign(extent_deg)
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
