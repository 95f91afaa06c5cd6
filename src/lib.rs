//! Turtle Canvas is an animated turtle-graphics engine.
//!
//! Drawing calls update the turtle's logical pose immediately and queue rendering commands; a
//! single-consumer player then animates those commands frame by frame onto a CPU raster surface.
//! The public API is engine-oriented:
//!
//! - Create a [`TurtleEngine`] and bind it to a surface with [`TurtleEngine::init`]
//! - Drive it from a script host through a [`Bridge`] (or [`HostCall`] data)
//! - Advance playback with [`TurtleEngine::tick`] or stream frames into a [`FrameSink`]
//!
//! ```
//! use turtle_canvas::{Bridge, SharedEngine, SurfaceDesc, TurtleEngine};
//!
//! # fn main() -> turtle_canvas::TurtleResult<()> {
//! let mut engine = TurtleEngine::default();
//! engine.init(SurfaceDesc::new(320, 240))?;
//! let shared = SharedEngine::new(engine);
//!
//! let turtle = Bridge::new(shared.clone());
//! for _ in 0..4 {
//!     turtle.forward(80.0);
//!     turtle.right(90.0);
//! }
//!
//! let mut engine = shared.lock();
//! engine.run_until_idle(10_000)?;
//! let frame = engine.frame()?.expect("bound engine");
//! assert_eq!((frame.width, frame.height), (320, 240));
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod bridge;
pub(crate) mod engine;
/// Pure turtle-space and raster-space math.
pub mod geometry;
pub(crate) mod playback;
pub(crate) mod render;
pub(crate) mod turtle;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, SurfaceDesc, Vec2};
pub use crate::foundation::error::{TurtleError, TurtleResult};

pub use crate::bridge::adapter::Bridge;
pub use crate::bridge::call::{ColorArg, HostCall};
pub use crate::engine::config::{EngineConfig, PLAYBACK_ENV};
pub use crate::engine::session::{PlaybackOpts, PlaybackStats, SharedEngine, TurtleEngine};
pub use crate::engine::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::geometry::{CirclePlan, CircleSteps};
pub use crate::playback::player::{PlaybackConfig, PlaybackMode, Tick, VisualPose};
pub use crate::playback::queue::CommandQueue;
pub use crate::render::backend::{Cursor, FrameRGBA, GridStyle, RasterBackend, StrokeStyle};
pub use crate::render::cpu::CpuRenderer;
pub use crate::turtle::command::AnimationCommand;
pub use crate::turtle::state::{
    DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, PenState, Pose, Turtle, TurtleDefaults,
};
