use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::TurtleResult;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Resolved stroke attributes for one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in logical pixels.
    pub width: f64,
}

/// Faint reference grid drawn behind every drawing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridStyle {
    /// Draw the grid at all.
    pub enabled: bool,
    /// Distance between grid lines in logical pixels.
    pub spacing: f64,
    /// Grid line color.
    pub color: Color,
    /// Grid line width in logical pixels.
    pub width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            spacing: 20.0,
            // rgba(255, 255, 255, 0.04)
            color: Color::rgba(255, 255, 255, 10),
            width: 1.0,
        }
    }
}

/// Facing indicator overlaid on snapshots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Visual position (raster space).
    pub position: Point,
    /// Visual heading (internal degrees).
    pub heading: f64,
    /// Fill color.
    pub color: Color,
    /// Distance from the position to the arrow tip.
    pub size: f64,
}

/// Raster operations the player issues against a drawing surface.
///
/// Implementations perform no interpolation: every call carries fully resolved geometry in
/// logical raster coordinates. Draw calls may be batched until [`RasterBackend::flush`].
pub trait RasterBackend {
    /// Discard everything drawn and fill the surface with `background`.
    fn clear(&mut self, background: Color) -> TurtleResult<()>;

    /// Draw the reference grid.
    fn draw_grid(&mut self, grid: &GridStyle) -> TurtleResult<()>;

    /// Stroke the segment `from -> to` with round caps and joins.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> TurtleResult<()>;

    /// Fill the closed polygon through `path` at `alpha` opacity.
    fn fill_polygon(&mut self, path: &[Point], color: Color, alpha: f32) -> TurtleResult<()>;

    /// Commit batched draw calls to the persistent surface.
    fn flush(&mut self) -> TurtleResult<()>;

    /// Read back the surface, with an optional cursor overlaid on the copy only.
    fn snapshot(&mut self, cursor: Option<&Cursor>) -> TurtleResult<FrameRGBA>;
}
