use crate::foundation::error::{TurtleError, TurtleResult};

pub use kurbo::{Point, Vec2};

/// Horizontal padding the hosting layout reserves around the drawing surface.
const LAYOUT_PADDING_PX: f64 = 32.0;
/// Narrowest logical surface width produced by [`SurfaceDesc::from_layout`].
const LAYOUT_MIN_WIDTH_PX: f64 = 300.0;
/// Fixed logical surface height used by the hosting layout.
const LAYOUT_HEIGHT_PX: u32 = 360;

/// 0-based index of a rendered playback frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> TurtleResult<Self> {
        if den == 0 {
            return Err(TurtleError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TurtleError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Logical drawing-surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl Canvas {
    /// Center of the canvas in raster space; turtle-space origin maps here.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Description of a raster surface an engine binds to.
///
/// Drawing happens in logical pixels (`canvas`); the backing pixmap is scaled by
/// `device_scale`, mirroring high-DPI canvases.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceDesc {
    /// Logical size.
    pub canvas: Canvas,
    /// Backing-store pixels per logical pixel.
    pub device_scale: f64,
}

impl SurfaceDesc {
    /// Surface of the given logical size at scale 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas { width, height },
            device_scale: 1.0,
        }
    }

    /// Size a surface from the width of its hosting container.
    ///
    /// The surface takes the container width minus padding (never narrower than 300 px) and a
    /// fixed height of 360 px.
    pub fn from_layout(container_width: f64, device_scale: f64) -> Self {
        let width = if container_width.is_finite() {
            (container_width - LAYOUT_PADDING_PX).max(LAYOUT_MIN_WIDTH_PX)
        } else {
            LAYOUT_MIN_WIDTH_PX
        };
        Self {
            canvas: Canvas {
                width: width.floor() as u32,
                height: LAYOUT_HEIGHT_PX,
            },
            device_scale,
        }
    }

    /// Return a copy with a different device scale.
    pub fn with_device_scale(mut self, device_scale: f64) -> Self {
        self.device_scale = device_scale;
        self
    }

    /// Backing pixmap size, validated against the raster limits.
    pub fn backing_size(&self) -> TurtleResult<(u16, u16)> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(TurtleError::validation("surface width and height must be > 0"));
        }
        if !self.device_scale.is_finite() || self.device_scale <= 0.0 {
            return Err(TurtleError::validation(
                "surface device_scale must be finite and > 0",
            ));
        }
        let scaled = |v: u32| (f64::from(v) * self.device_scale).ceil();
        let to_u16 = |v: f64, what: &str| -> TurtleResult<u16> {
            if v < 1.0 || v > f64::from(u16::MAX) {
                return Err(TurtleError::validation(format!(
                    "surface backing {what} {v} is outside 1..={}",
                    u16::MAX
                )));
            }
            Ok(v as u16)
        };
        Ok((
            to_u16(scaled(self.canvas.width), "width")?,
            to_u16(scaled(self.canvas.height), "height")?,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
