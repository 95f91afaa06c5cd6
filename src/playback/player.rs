use crate::foundation::core::Point;
use crate::foundation::error::TurtleResult;
use crate::geometry;
use crate::playback::queue::CommandQueue;
use crate::render::backend::{RasterBackend, StrokeStyle};
use crate::turtle::command::AnimationCommand;

/// How fast commands are played back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Lines and turns animate over several frames.
    #[default]
    Animated,
    /// Every line and turn completes in a single frame.
    Instant,
}

/// Player tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Animated or instant playback.
    pub mode: PlaybackMode,
    /// Lower bound of the per-frame line speed, in logical pixels.
    pub min_speed_px: f64,
    /// Lines travel at `distance / speed_divisor` per frame (at least `min_speed_px`).
    pub speed_divisor: f64,
    /// Sub-steps per animated turn.
    pub turn_frames: u32,
    /// Opacity of filled polygons.
    pub fill_alpha: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::Animated,
            min_speed_px: 6.0,
            speed_divisor: 20.0,
            turn_frames: 10,
            fill_alpha: 0.35,
        }
    }
}

impl PlaybackConfig {
    fn line_speed(&self, distance: f64) -> f64 {
        match self.mode {
            PlaybackMode::Instant => f64::INFINITY,
            PlaybackMode::Animated => {
                let divisor = if self.speed_divisor > 0.0 {
                    self.speed_divisor
                } else {
                    20.0
                };
                let speed = (distance / divisor).max(self.min_speed_px);
                if speed > 0.0 { speed } else { distance }
            }
        }
    }

    fn turn_steps(&self) -> u32 {
        match self.mode {
            PlaybackMode::Instant => 1,
            PlaybackMode::Animated => self.turn_frames.max(1),
        }
    }
}

/// Position and heading as currently reflected on the surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VisualPose {
    /// Raster-space position.
    pub position: Point,
    /// Internal heading in degrees; not normalized.
    pub heading: f64,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to play; the player is (now) idle.
    Idle,
    /// One animation step ran and the command continues next tick.
    Stepped,
    /// The current command finished during this tick.
    Completed,
}

#[derive(Clone, Debug)]
enum Active {
    Line {
        start: Point,
        to: Point,
        distance: f64,
        speed: f64,
        progress: f64,
        stroke: Option<StrokeStyle>,
    },
    Turn {
        from: f64,
        to: f64,
        step: u32,
        steps: u32,
    },
}

/// Single-consumer frame scheduler.
///
/// Drains the queue one command at a time; each command is animated to completion over one or
/// more ticks before the next is dequeued. A tick is one "next frame" callback from the host.
#[derive(Debug)]
pub struct Player {
    cfg: PlaybackConfig,
    playing: bool,
    active: Option<Active>,
    visual: VisualPose,
    completed: u64,
}

impl Player {
    /// Idle player whose visual pose starts at `visual`.
    pub fn new(cfg: PlaybackConfig, visual: VisualPose) -> Self {
        Self {
            cfg,
            playing: false,
            active: None,
            visual,
            completed: 0,
        }
    }

    /// Return `true` while a drain cycle is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current visual pose.
    pub fn visual(&self) -> VisualPose {
        self.visual
    }

    /// Commands played to completion since construction.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Playback tuning in effect.
    pub fn config(&self) -> &PlaybackConfig {
        &self.cfg
    }

    /// Start a drain cycle.
    ///
    /// Returns `false` without side effects when a cycle is already running; a second drain loop
    /// must never interleave with the first.
    pub fn start(&mut self) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        true
    }

    /// Stop immediately, abandoning any in-flight animation, and snap the visual pose.
    pub fn stop(&mut self, visual: VisualPose) {
        if self.active.take().is_some() {
            tracing::debug!("abandoning in-flight animation");
        }
        self.playing = false;
        self.visual = visual;
    }

    /// Run one frame of playback.
    pub fn tick<B: RasterBackend + ?Sized>(
        &mut self,
        queue: &mut CommandQueue,
        backend: &mut B,
    ) -> TurtleResult<Tick> {
        if !self.playing {
            return Ok(Tick::Idle);
        }

        let active = match self.active.take() {
            Some(active) => active,
            None => {
                let Some(cmd) = queue.pop_front() else {
                    self.playing = false;
                    tracing::debug!(completed = self.completed, "queue drained");
                    return Ok(Tick::Idle);
                };
                tracing::trace!(kind = cmd.kind(), "dequeue");
                match self.begin(cmd, backend)? {
                    Some(active) => active,
                    None => {
                        self.completed += 1;
                        return Ok(Tick::Completed);
                    }
                }
            }
        };

        match self.step(active, backend)? {
            Some(active) => {
                self.active = Some(active);
                Ok(Tick::Stepped)
            }
            None => {
                self.completed += 1;
                Ok(Tick::Completed)
            }
        }
    }

    /// Set up the animation for `cmd`, or complete it on the spot when it needs no frames.
    fn begin<B: RasterBackend + ?Sized>(
        &mut self,
        cmd: AnimationCommand,
        backend: &mut B,
    ) -> TurtleResult<Option<Active>> {
        match cmd {
            AnimationCommand::Line {
                to,
                color,
                width,
                strokes,
                ..
            } => {
                let start = self.visual.position;
                let distance = (to - start).hypot();
                if !distance.is_finite() || distance == 0.0 {
                    self.visual.position = to;
                    return Ok(None);
                }
                Ok(Some(Active::Line {
                    start,
                    to,
                    distance,
                    speed: self.cfg.line_speed(distance),
                    progress: 0.0,
                    stroke: strokes.then_some(StrokeStyle { color, width }),
                }))
            }
            AnimationCommand::Turn {
                from_angle,
                to_angle,
            } => {
                if to_angle == from_angle || !(to_angle - from_angle).is_finite() {
                    self.visual.heading = to_angle;
                    return Ok(None);
                }
                Ok(Some(Active::Turn {
                    from: from_angle,
                    to: to_angle,
                    step: 0,
                    steps: self.cfg.turn_steps(),
                }))
            }
            AnimationCommand::Fill { path, color } => {
                if !geometry::is_degenerate_polygon(&path) {
                    backend.fill_polygon(&path, color, self.cfg.fill_alpha)?;
                }
                Ok(None)
            }
        }
    }

    fn step<B: RasterBackend + ?Sized>(
        &mut self,
        active: Active,
        backend: &mut B,
    ) -> TurtleResult<Option<Active>> {
        match active {
            Active::Line {
                start,
                to,
                distance,
                speed,
                progress,
                stroke,
            } => {
                let progress = (progress + speed).min(distance);
                let done = progress >= distance;
                let current = if done {
                    to
                } else {
                    geometry::lerp_point(start, to, progress / distance)
                };
                if let Some(style) = &stroke {
                    // Only the increment since the previous frame is stroked.
                    backend.stroke_segment(self.visual.position, current, style)?;
                }
                self.visual.position = current;
                Ok((!done).then_some(Active::Line {
                    start,
                    to,
                    distance,
                    speed,
                    progress,
                    stroke,
                }))
            }
            Active::Turn {
                from,
                to,
                step,
                steps,
            } => {
                let step = step + 1;
                if step >= steps {
                    self.visual.heading = to;
                    return Ok(None);
                }
                self.visual.heading = from + (to - from) * f64::from(step) / f64::from(steps);
                Ok(Some(Active::Turn {
                    from,
                    to,
                    step,
                    steps,
                }))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
