//! Whole-degree rotation used for the avatar spin and the sky phase

use serde::{Deserialize, Serialize};

const FULL_TURN: i32 = 360;

/// An angle in whole degrees, always in `[0, 359]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Rotation(u16);

impl From<i32> for Rotation {
    fn from(degrees: i32) -> Self {
        Self::new(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl Rotation {
    /// Reduce any degree value into `[0, 359]`
    pub fn new(degrees: i32) -> Self {
        Self(degrees.rem_euclid(FULL_TURN) as u16)
    }

    pub fn degrees(self) -> i32 {
        i32::from(self.0)
    }

    /// Advance by one degree
    pub fn next(self) -> Self {
        Self::new(self.degrees() + 1)
    }

    /// Advance by `times` single-degree steps.
    ///
    /// Negative counts turn backwards: `-20` lands where `340` steps forward would.
    pub fn next_by(self, times: i32) -> Self {
        Self::new(self.degrees() + times.rem_euclid(FULL_TURN))
    }
}
