use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CollageError, Result};

/// Width / height ratio parsed from a `"W:H"` string.
///
/// Only the height is checked (it must not be zero). Negative or absurd
/// ratios parse fine; the layout stage rejects the pixel sizes they imply.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Square tiles.
    pub const SQUARE: AspectRatio = AspectRatio(1.0);

    /// Wraps an already computed ratio.
    pub fn new(ratio: f64) -> Self {
        Self(ratio)
    }

    /// Parses `"<number>:<number>"` into `width / height`.
    pub fn parse(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() != 2 {
            return Err(CollageError::InvalidFormat(value.to_string()));
        }
        let w: f64 = parts[0].parse().map_err(|_| CollageError::InvalidNumber {
            part: "width",
            value: parts[0].to_string(),
        })?;
        let h: f64 = parts[1].parse().map_err(|_| CollageError::InvalidNumber {
            part: "height",
            value: parts[1].to_string(),
        })?;
        if h == 0.0 {
            return Err(CollageError::ZeroHeight);
        }
        Ok(Self(w / h))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for AspectRatio {
    type Err = CollageError;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
