use crate::foundation::color::Color;
use crate::foundation::error::{TurtleError, TurtleResult};

/// A color argument as the script host passes it: a CSS-style string or unit-range components.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ColorArg {
    /// `#rgb`, `#rrggbb`, `#rrggbbaa`, or a named color.
    Text(String),
    /// `[r, g, b]` or `[r, g, b, a]` in `0..=1`.
    Components(Vec<f64>),
}

impl ColorArg {
    /// Resolve to a concrete color.
    pub fn resolve(&self) -> TurtleResult<Color> {
        match self {
            Self::Text(s) => Color::parse(s),
            Self::Components(v) => match v.as_slice() {
                [r, g, b] => Ok(Color::from_unit(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Color::from_unit(*r, *g, *b, *a)),
                _ => Err(TurtleError::validation(format!(
                    "color components must have len 3 or 4, got {}",
                    v.len()
                ))),
            },
        }
    }
}

impl From<&str> for ColorArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for ColorArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Color> for ColorArg {
    fn from(c: Color) -> Self {
        Self::Text(c.to_string())
    }
}

fn full_turn() -> f64 {
    360.0
}

/// One drawing call from the script host, as data.
///
/// Serialized as `{"op": "forward", "distance": 50}`; the usual turtle abbreviations are accepted
/// as `op` aliases.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostCall {
    /// Move forward.
    #[serde(alias = "fd")]
    Forward {
        /// Distance in logical pixels.
        distance: f64,
    },
    /// Move backward.
    #[serde(alias = "bk", alias = "back")]
    Backward {
        /// Distance in logical pixels.
        distance: f64,
    },
    /// Turn clockwise.
    #[serde(alias = "rt")]
    Right {
        /// Degrees.
        angle: f64,
    },
    /// Turn counter-clockwise.
    #[serde(alias = "lt")]
    Left {
        /// Degrees.
        angle: f64,
    },
    /// Move to a turtle-space position.
    #[serde(alias = "setpos", alias = "setposition")]
    Goto {
        /// Turtle-space x.
        x: f64,
        /// Turtle-space y (up is positive).
        y: f64,
    },
    /// Face a compass heading.
    #[serde(alias = "seth")]
    Setheading {
        /// Compass degrees, 0 = north.
        angle: f64,
    },
    /// Lift the pen.
    #[serde(alias = "pu", alias = "up")]
    Penup,
    /// Lower the pen.
    #[serde(alias = "pd", alias = "down")]
    Pendown,
    /// Set pen and fill color.
    Color {
        /// Color value.
        color: ColorArg,
    },
    /// Set the pen color.
    Pencolor {
        /// Color value.
        color: ColorArg,
    },
    /// Set the fill color.
    Fillcolor {
        /// Color value.
        color: ColorArg,
    },
    /// Set the pen width.
    #[serde(alias = "width")]
    Pensize {
        /// Width in logical pixels.
        width: f64,
    },
    /// Draw an arc.
    Circle {
        /// Positive curves left, negative curves right.
        radius: f64,
        /// Degrees of arc.
        #[serde(default = "full_turn")]
        extent: f64,
    },
    /// Start recording a fill.
    BeginFill,
    /// Fill the recorded polygon.
    EndFill,
    /// Hide the cursor.
    #[serde(alias = "ht")]
    Hideturtle,
    /// Show the cursor.
    #[serde(alias = "st")]
    Showturtle,
}

impl HostCall {
    /// Parse a JSON array of calls.
    pub fn parse_program(json: &str) -> TurtleResult<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| TurtleError::serde(format!("parse program: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/call.rs"]
mod tests;
