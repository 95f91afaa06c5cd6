use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::config::EngineConfig;
use crate::engine::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, SurfaceDesc};
use crate::foundation::error::{TurtleError, TurtleResult};
use crate::playback::player::{Player, Tick, VisualPose};
use crate::playback::queue::CommandQueue;
use crate::render::backend::{Cursor, FrameRGBA, RasterBackend};
use crate::render::cpu::CpuRenderer;
use crate::turtle::command::AnimationCommand;
use crate::turtle::state::Turtle;

/// Options for [`TurtleEngine::play_into`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackOpts {
    /// Push every n-th frame (`0` and `1` push all). The final frame is always pushed.
    pub every_nth: u64,
    /// Stop after this many ticks even if commands remain.
    pub max_frames: u64,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            every_nth: 1,
            max_frames: 1_000_000,
        }
    }
}

/// Summary of a [`TurtleEngine::play_into`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Ticks driven.
    pub frames_played: u64,
    /// Frames handed to the sink.
    pub frames_written: u64,
    /// Whether the player drained the queue before `max_frames`.
    pub idle: bool,
}

struct Session {
    desc: SurfaceDesc,
    backend: Box<dyn RasterBackend + Send>,
    turtle: Turtle,
    queue: CommandQueue,
    player: Player,
    frame: FrameIndex,
}

impl Session {
    fn fresh(
        config: &EngineConfig,
        desc: SurfaceDesc,
        backend: Box<dyn RasterBackend + Send>,
    ) -> Self {
        let turtle = Turtle::new(desc.canvas, &config.turtle);
        let pose = turtle.pose();
        let player = Player::new(
            config.playback,
            VisualPose {
                position: pose.position,
                heading: pose.heading,
            },
        );
        Self {
            desc,
            backend,
            turtle,
            queue: CommandQueue::new(),
            player,
            frame: FrameIndex(0),
        }
    }
}

/// Paint background and grid onto a surface about to start a session.
fn prepare_surface(config: &EngineConfig, backend: &mut dyn RasterBackend) -> TurtleResult<()> {
    backend.clear(config.background)?;
    backend.draw_grid(&config.grid)?;
    backend.flush()
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("desc", &self.desc)
            .field("turtle", &self.turtle)
            .field("queue", &self.queue)
            .field("player", &self.player)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

/// One turtle drawing engine.
///
/// The engine is either *unbound* (no surface; every drawing call is a no-op) or bound to exactly
/// one surface. Binding again tears down the previous session entirely.
#[derive(Debug)]
pub struct TurtleEngine {
    config: EngineConfig,
    session: Option<Session>,
}

impl TurtleEngine {
    /// Unbound engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Configuration applied on every bind.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bind (or rebind) to a fresh CPU surface.
    pub fn init(&mut self, desc: SurfaceDesc) -> TurtleResult<()> {
        let backend = CpuRenderer::new(desc)?;
        self.init_with_backend(desc, Box::new(backend))
    }

    /// Bind (or rebind) to a caller-provided raster backend sized for `desc`.
    ///
    /// The previous session is only torn down once the new surface is prepared; on error the
    /// engine keeps whatever it was bound to before.
    #[tracing::instrument(skip(self, backend))]
    pub fn init_with_backend(
        &mut self,
        desc: SurfaceDesc,
        mut backend: Box<dyn RasterBackend + Send>,
    ) -> TurtleResult<()> {
        desc.backing_size()?;
        prepare_surface(&self.config, backend.as_mut())?;
        let session = Session::fresh(&self.config, desc, backend);
        if let Some(old) = self.session.replace(session) {
            tracing::debug!(
                discarded = old.queue.len(),
                "tore down previous session"
            );
        }
        tracing::debug!("session bound");
        Ok(())
    }

    /// Drop the session; drawing calls become no-ops.
    pub fn unbind(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("session unbound");
        }
    }

    /// Return `true` while a surface is bound.
    pub fn is_bound(&self) -> bool {
        self.session.is_some()
    }

    /// Surface of the bound session.
    pub fn surface(&self) -> Option<SurfaceDesc> {
        self.session.as_ref().map(|s| s.desc)
    }

    /// Discard pending commands, stop the player and restart the bound surface from scratch.
    ///
    /// In-flight animation is abandoned; the visual pose snaps to the fresh session's pose. If the
    /// surface cannot be repainted the engine stays bound to its previous session, queue included,
    /// and the error is returned.
    pub fn reset(&mut self) -> TurtleResult<()> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };
        if let Err(err) = prepare_surface(&self.config, session.backend.as_mut()) {
            tracing::warn!(error = %err, "reset failed; keeping previous session");
            self.session = Some(session);
            return Err(err);
        }
        tracing::debug!(dropped = session.queue.len(), "reset");
        self.session = Some(Session::fresh(&self.config, session.desc, session.backend));
        Ok(())
    }

    /// Run a motion or turn operation and enqueue the commands it produces.
    ///
    /// Starts the player when it is idle. Returns `false` (and does nothing) when unbound.
    pub fn perform<C>(&mut self, op: impl FnOnce(&mut Turtle) -> C) -> bool
    where
        C: IntoIterator<Item = AnimationCommand>,
    {
        let Some(session) = self.session.as_mut() else {
            tracing::trace!("ignoring drawing call on unbound engine");
            return false;
        };
        let mut issued = false;
        for cmd in op(&mut session.turtle) {
            session.queue.enqueue(cmd);
            issued = true;
        }
        if issued && session.player.start() {
            tracing::debug!(pending = session.queue.len(), "player started");
        }
        true
    }

    /// Mutate pen or visibility state without issuing commands. Returns `false` when unbound.
    pub fn update(&mut self, op: impl FnOnce(&mut Turtle)) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::trace!("ignoring state change on unbound engine");
            return false;
        };
        op(&mut session.turtle);
        true
    }

    /// Logical turtle state of the bound session.
    pub fn turtle(&self) -> Option<&Turtle> {
        self.session.as_ref().map(|s| &s.turtle)
    }

    /// Pose currently reflected on the surface.
    pub fn visual_pose(&self) -> Option<VisualPose> {
        self.session.as_ref().map(|s| s.player.visual())
    }

    /// Commands waiting in the queue (excluding one being animated).
    pub fn pending_commands(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.queue.len())
    }

    /// Pending commands, oldest first.
    pub fn queued_commands(&self) -> impl Iterator<Item = &AnimationCommand> {
        self.session.iter().flat_map(|s| s.queue.iter())
    }

    /// Commands played to completion in this session.
    pub fn completed_commands(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.player.completed())
    }

    /// Return `true` while the player is draining.
    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.player.is_playing())
    }

    /// Ticks driven in this session.
    pub fn frame_index(&self) -> FrameIndex {
        self.session.as_ref().map_or(FrameIndex(0), |s| s.frame)
    }

    /// One frame callback: advance playback by one step and commit it to the surface.
    pub fn tick(&mut self) -> TurtleResult<Tick> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Tick::Idle);
        };
        let tick = session
            .player
            .tick(&mut session.queue, session.backend.as_mut())?;
        session.backend.flush()?;
        if tick != Tick::Idle {
            session.frame = FrameIndex(session.frame.0 + 1);
        }
        Ok(tick)
    }

    /// Read back the surface, with the facing indicator when the turtle is visible.
    pub fn frame(&mut self) -> TurtleResult<Option<FrameRGBA>> {
        let cursor_size = self.config.cursor_size;
        let cursor_color = self.config.cursor_color;
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let pen = session.turtle.pen();
        let cursor = pen.visible.then(|| {
            let visual = session.player.visual();
            Cursor {
                position: visual.position,
                heading: visual.heading,
                color: cursor_color.unwrap_or(pen.color),
                size: cursor_size,
            }
        });
        session.backend.snapshot(cursor.as_ref()).map(Some)
    }

    /// Drive ticks until the player is idle or `max_frames` ticks ran. Returns the ticks driven.
    #[tracing::instrument(skip(self))]
    pub fn run_until_idle(&mut self, max_frames: u64) -> TurtleResult<u64> {
        let mut frames = 0;
        while self.is_playing() && frames < max_frames {
            self.tick()?;
            frames += 1;
        }
        if self.is_playing() {
            tracing::warn!(
                frames,
                pending = self.pending_commands(),
                "frame cap reached before queue drained"
            );
        }
        Ok(frames)
    }

    /// Play pending commands, pushing snapshots into `sink`.
    ///
    /// The current surface is pushed first as frame 0; afterwards every `every_nth` frame and the
    /// final frame are pushed.
    #[tracing::instrument(skip(self, sink))]
    pub fn play_into(
        &mut self,
        sink: &mut dyn FrameSink,
        opts: PlaybackOpts,
    ) -> TurtleResult<PlaybackStats> {
        let desc = self
            .surface()
            .ok_or_else(|| TurtleError::validation("engine is not bound to a surface"))?;
        let (width, height) = desc.backing_size()?;
        let fps = Fps::new(self.config.fps.num, self.config.fps.den)?;
        sink.begin(SinkConfig {
            width: u32::from(width),
            height: u32::from(height),
            fps,
        })?;

        let every = opts.every_nth.max(1);
        let mut stats = PlaybackStats {
            frames_played: 0,
            frames_written: 0,
            idle: false,
        };
        self.push_snapshot(sink, FrameIndex(0), &mut stats)?;
        let mut last_pushed = 0;

        while self.is_playing() && stats.frames_played < opts.max_frames {
            self.tick()?;
            stats.frames_played += 1;
            let idx = stats.frames_played;
            if idx % every == 0 {
                self.push_snapshot(sink, FrameIndex(idx), &mut stats)?;
                last_pushed = idx;
            }
        }
        if last_pushed != stats.frames_played {
            self.push_snapshot(sink, FrameIndex(stats.frames_played), &mut stats)?;
        }
        sink.end()?;

        stats.idle = !self.is_playing();
        tracing::debug!(
            played = stats.frames_played,
            written = stats.frames_written,
            idle = stats.idle,
            "playback finished"
        );
        Ok(stats)
    }

    fn push_snapshot(
        &mut self,
        sink: &mut dyn FrameSink,
        idx: FrameIndex,
        stats: &mut PlaybackStats,
    ) -> TurtleResult<()> {
        let Some(frame) = self.frame()? else {
            return Err(TurtleError::validation("engine is not bound to a surface"));
        };
        sink.push_frame(idx, &frame)?;
        stats.frames_written += 1;
        Ok(())
    }
}

impl Default for TurtleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Engine handle shared between the bridge and the host's frame loop.
///
/// Enqueueing and ticking are serialized by the lock, so the bridge may be driven from a
/// different execution context than the frame callbacks.
#[derive(Clone, Debug, Default)]
pub struct SharedEngine(Arc<Mutex<TurtleEngine>>);

impl SharedEngine {
    /// Wrap `engine`.
    pub fn new(engine: TurtleEngine) -> Self {
        Self(Arc::new(Mutex::new(engine)))
    }

    /// Lock the engine. A poisoned lock is recovered: engine state stays structurally valid
    /// after a panic in a caller.
    pub fn lock(&self) -> MutexGuard<'_, TurtleEngine> {
        self.0.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!("recovering poisoned engine lock");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/session.rs"]
mod tests;
