use crate::bridge::call::{ColorArg, HostCall};
use crate::engine::session::SharedEngine;
use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::turtle::command::AnimationCommand;
use crate::turtle::state::Turtle;

/// Drawing API exposed to the script host.
///
/// Every call returns as soon as the logical state is updated and the resulting commands are
/// queued; the visual effect plays back later. Calls on an unbound bridge (or on a bridge whose
/// engine has no surface) are no-ops, and drawing calls never report failures to the host.
#[derive(Clone, Debug, Default)]
pub struct Bridge {
    engine: Option<SharedEngine>,
}

impl Bridge {
    /// Bridge with no engine attached.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Bridge attached to `engine`.
    pub fn new(engine: SharedEngine) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Attach to `engine`, replacing any previous one.
    pub fn bind(&mut self, engine: SharedEngine) {
        self.engine = Some(engine);
    }

    /// Detach; later calls are no-ops.
    pub fn unbind(&mut self) {
        self.engine = None;
    }

    /// Return `true` when attached to an engine that is bound to a surface.
    pub fn is_bound(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.lock().is_bound())
    }

    /// Engine this bridge drives.
    pub fn engine(&self) -> Option<&SharedEngine> {
        self.engine.as_ref()
    }

    /// Move forward along the heading.
    pub fn forward(&self, distance: f64) {
        if let Some(d) = finite("forward", distance) {
            self.issue(|t| Some(t.forward(d)));
        }
    }

    /// Move backward against the heading.
    pub fn backward(&self, distance: f64) {
        if let Some(d) = finite("backward", distance) {
            self.issue(|t| Some(t.backward(d)));
        }
    }

    /// Turn clockwise by `angle` degrees.
    pub fn right(&self, angle: f64) {
        if let Some(a) = finite("right", angle) {
            self.issue(|t| Some(t.right(a)));
        }
    }

    /// Turn counter-clockwise by `angle` degrees.
    pub fn left(&self, angle: f64) {
        if let Some(a) = finite("left", angle) {
            self.issue(|t| Some(t.left(a)));
        }
    }

    /// Move to turtle-space `(x, y)`; strokes when the pen is down.
    pub fn goto(&self, x: f64, y: f64) {
        if let (Some(x), Some(y)) = (finite("goto", x), finite("goto", y)) {
            self.issue(|t| Some(t.set_position(x, y)));
        }
    }

    /// Face a compass heading (0 = north, 90 = east).
    pub fn setheading(&self, angle: f64) {
        if let Some(a) = finite("setheading", angle) {
            self.issue(|t| Some(t.set_heading(a)));
        }
    }

    /// Lift the pen; motion no longer strokes.
    pub fn penup(&self) {
        self.update(|t| t.set_pen(false));
    }

    /// Lower the pen.
    pub fn pendown(&self) {
        self.update(|t| t.set_pen(true));
    }

    /// Set both pen and fill color.
    pub fn color(&self, color: impl Into<ColorArg>) {
        if let Some(c) = resolve("color", color.into()) {
            self.update(|t| {
                t.set_color(c);
                t.set_fill_color(c);
            });
        }
    }

    /// Set the stroke color. Unparseable colors are ignored.
    pub fn pencolor(&self, color: impl Into<ColorArg>) {
        if let Some(c) = resolve("pencolor", color.into()) {
            self.update(|t| t.set_color(c));
        }
    }

    /// Set the fill color. Unparseable colors are ignored.
    pub fn fillcolor(&self, color: impl Into<ColorArg>) {
        if let Some(c) = resolve("fillcolor", color.into()) {
            self.update(|t| t.set_fill_color(c));
        }
    }

    /// Set the pen width; non-positive or non-finite widths are ignored.
    pub fn pensize(&self, width: f64) {
        if !(width.is_finite() && width > 0.0) {
            tracing::warn!(width, "ignoring invalid pensize");
            return;
        }
        self.update(|t| t.set_width(width));
    }

    /// Draw an arc of `radius`; `extent` defaults to a full circle.
    pub fn circle(&self, radius: f64, extent: Option<f64>) {
        let extent = extent.unwrap_or(360.0);
        if let (Some(r), Some(e)) = (finite("circle", radius), finite("circle", extent)) {
            self.issue(|t| t.circle(r, e));
        }
    }

    /// Start recording a fill polygon.
    pub fn begin_fill(&self) {
        self.update(Turtle::begin_fill);
    }

    /// Fill the polygon recorded since `begin_fill`.
    pub fn end_fill(&self) {
        self.issue(|t| Some(t.end_fill()));
    }

    /// Hide the cursor.
    pub fn hideturtle(&self) {
        self.update(|t| t.set_visible(false));
    }

    /// Show the cursor.
    pub fn showturtle(&self) {
        self.update(|t| t.set_visible(true));
    }

    /// Logical position in turtle space.
    pub fn position(&self) -> Option<Point> {
        self.query(Turtle::position)
    }

    /// Logical heading in compass degrees.
    pub fn heading(&self) -> Option<f64> {
        self.query(Turtle::heading)
    }

    /// Whether the pen is down.
    pub fn isdown(&self) -> Option<bool> {
        self.query(|t| t.pen().down)
    }

    /// Whether the cursor is shown.
    pub fn isvisible(&self) -> Option<bool> {
        self.query(|t| t.pen().visible)
    }

    /// Whether a fill is being recorded.
    pub fn filling(&self) -> Option<bool> {
        self.query(|t| t.pen().filling)
    }

    /// Apply one host call.
    pub fn dispatch(&self, call: &HostCall) {
        match call {
            HostCall::Forward { distance } => self.forward(*distance),
            HostCall::Backward { distance } => self.backward(*distance),
            HostCall::Right { angle } => self.right(*angle),
            HostCall::Left { angle } => self.left(*angle),
            HostCall::Goto { x, y } => self.goto(*x, *y),
            HostCall::Setheading { angle } => self.setheading(*angle),
            HostCall::Penup => self.penup(),
            HostCall::Pendown => self.pendown(),
            HostCall::Color { color } => self.color(color.clone()),
            HostCall::Pencolor { color } => self.pencolor(color.clone()),
            HostCall::Fillcolor { color } => self.fillcolor(color.clone()),
            HostCall::Pensize { width } => self.pensize(*width),
            HostCall::Circle { radius, extent } => self.circle(*radius, Some(*extent)),
            HostCall::BeginFill => self.begin_fill(),
            HostCall::EndFill => self.end_fill(),
            HostCall::Hideturtle => self.hideturtle(),
            HostCall::Showturtle => self.showturtle(),
        }
    }

    /// Apply calls in program order.
    pub fn dispatch_all<'a>(&self, calls: impl IntoIterator<Item = &'a HostCall>) {
        for call in calls {
            self.dispatch(call);
        }
    }

    fn issue<C>(&self, op: impl FnOnce(&mut Turtle) -> C)
    where
        C: IntoIterator<Item = AnimationCommand>,
    {
        match &self.engine {
            Some(engine) => {
                engine.lock().perform(op);
            }
            None => tracing::trace!("ignoring drawing call on unbound bridge"),
        }
    }

    fn update(&self, op: impl FnOnce(&mut Turtle)) {
        match &self.engine {
            Some(engine) => {
                engine.lock().update(op);
            }
            None => tracing::trace!("ignoring state change on unbound bridge"),
        }
    }

    fn query<R>(&self, op: impl FnOnce(&Turtle) -> R) -> Option<R> {
        let engine = self.engine.as_ref()?.lock();
        engine.turtle().map(op)
    }
}

fn finite(op: &'static str, value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        tracing::warn!(op, value, "ignoring non-finite argument");
        None
    }
}

fn resolve(op: &'static str, color: ColorArg) -> Option<Color> {
    match color.resolve() {
        Ok(c) => Some(c),
        Err(err) => {
            tracing::warn!(op, %err, "ignoring unparseable color");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/adapter.rs"]
mod tests;
