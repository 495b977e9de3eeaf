//! Recall quality as chosen by the learner: three buttons instead of SM-2's 0-5 scale.
use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    Hard = 1,
    Good = 3,
    Easy = 5,
}

impl Quality {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Good and Easy count as a correct answer
    pub fn is_correct(self) -> bool {
        self != Quality::Hard
    }

    /// Base XP before the status multiplier is applied.
    pub fn base_xp(self) -> f64 {
        match self {
            Quality::Hard => 2.0,
            Quality::Good => 5.0,
            Quality::Easy => 10.0,
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quality::Hard),
            3 => Ok(Quality::Good),
            5 => Ok(Quality::Easy),
            other => Err(Error::InvalidQuality(other)),
        }
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> u8 {
        quality.value()
    }
}
