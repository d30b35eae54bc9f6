//! Habit card colors.
//!
//! Colors travel on the wire as `"r,g,b"` strings with each channel in
//! `0..=255`. Generated colors keep every channel at 25 or above so cards
//! never render near-black.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::CoreError;

/// Lowest channel value for generated colors.
const RANDOM_CHANNEL_MIN: u8 = 25;

/// An RGB triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Generate a random color with each channel in `25..=254`.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Rgb {
            r: rng.random_range(RANDOM_CHANNEL_MIN..u8::MAX),
            g: rng.random_range(RANDOM_CHANNEL_MIN..u8::MAX),
            b: rng.random_range(RANDOM_CHANNEL_MIN..u8::MAX),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CoreError::Validation(format!(
                "Invalid color '{s}': expected 'r,g,b'"
            )));
        }
        let channel = |part: &str| {
            part.parse::<u8>().map_err(|_| {
                CoreError::Validation(format!(
                    "Invalid color channel '{part}': expected an integer in 0..=255"
                ))
            })
        };
        Ok(Rgb {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
        })
    }
}
