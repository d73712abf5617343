//! Easing curves for tweens and counters.
//!
//! Curves follow the GSAP "power" family the page was designed with:
//! `power1` is quadratic, `power2` cubic, `power4` quintic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Easing curve identifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// No easing.
    Linear,
    /// Fast start, slow finish. `PowerOut(2)` is `power2.out`.
    PowerOut(u8),
    /// Slow start and finish, fast middle. `PowerInOut(2)` is `power2.inOut`.
    PowerInOut(u8),
}

impl Ease {
    /// Evaluate the curve at progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerOut(power) => {
                let exp = i32::from(power) + 1;
                1.0 - (1.0 - t).powi(exp)
            }
            Ease::PowerInOut(power) => {
                let exp = i32::from(power) + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::PowerOut(1)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::PowerOut(p) => write!(f, "power{}.out", p),
            Ease::PowerInOut(p) => write!(f, "power{}.inOut", p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown ease `{0}`")]
pub struct UnknownEase(pub String);

impl FromStr for Ease {
    type Err = UnknownEase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" || s == "linear" {
            return Ok(Ease::Linear);
        }
        let (family, kind) = s.split_once('.').ok_or_else(|| UnknownEase(s.to_string()))?;
        let power = family
            .strip_prefix("power")
            .and_then(|p| p.parse::<u8>().ok())
            .filter(|p| (1..=4).contains(p))
            .ok_or_else(|| UnknownEase(s.to_string()))?;
        match kind {
            "out" => Ok(Ease::PowerOut(power)),
            "inOut" => Ok(Ease::PowerInOut(power)),
            _ => Err(UnknownEase(s.to_string())),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = UnknownEase;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}
