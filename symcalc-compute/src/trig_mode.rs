use std::fmt::{Display, Formatter, Result};

#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The trigonometric mode of a symbol table. This will affect the evaluation of input to
/// trigonometric functions, and output from inverse trigonometric functions.
///
/// Quantities measured in an angle unit ignore the mode, since they already carry their unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum TrigMode {
    /// Use radians.
    #[default]
    Radians,

    /// Use degrees.
    Degrees,
}

impl TrigMode {
    /// Converts an angle given in this mode into radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            TrigMode::Radians => angle,
            TrigMode::Degrees => angle.to_radians(),
        }
    }

    /// Converts an angle in radians into this mode.
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            TrigMode::Radians => angle,
            TrigMode::Degrees => angle.to_degrees(),
        }
    }
}

impl Display for TrigMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TrigMode::Radians => write!(f, "radians"),
            TrigMode::Degrees => write!(f, "degrees"),
        }
    }
}

impl std::str::FromStr for TrigMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rad" | "radian" | "radians" => Ok(TrigMode::Radians),
            "deg" | "degree" | "degrees" => Ok(TrigMode::Degrees),
            _ => Err(()),
        }
    }
}
