use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::error::ServoError;

/// Inclusive movement bounds of a servo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub min: i32,
    pub max: i32,
}

impl Limits {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, position: i32) -> bool {
        self.min <= position && position <= self.max
    }

    pub fn clamp(&self, position: i32) -> i32 {
        position.clamp(self.min, self.max)
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Servo configuration as accepted by the registry and as found in the servo blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoSpec {
    pub limits: Limits,
    pub channel: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

/// Serialized form of a servo: `{position, channel, limits: {min, max}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoSnapshot {
    pub position: i32,
    pub channel: u16,
    pub limits: Limits,
}

/// Partial servo update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoUpdate {
    #[serde(default)]
    pub limit_min: Option<i32>,
    #[serde(default)]
    pub limit_max: Option<i32>,
    #[serde(default)]
    pub channel: Option<u16>,
}

pub type ServosDump = BTreeMap<String, ServoSnapshot>;
/// Servo name to target position, as stored for one preset.
pub type PresetTargets = BTreeMap<String, i32>;
pub type PresetsDump = BTreeMap<String, PresetTargets>;

/// A single rejected item of a batch move.
#[derive(Debug)]
pub struct MoveFailure {
    pub item: String,
    pub error: ServoError,
}

/// Result of moving several servos in one request.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Every servo moved.
    Complete { positions: BTreeMap<String, i32> },
    /// Some servos moved, the rest were rejected.
    Partial {
        positions: BTreeMap<String, i32>,
        failures: Vec<MoveFailure>,
    },
    /// Nothing moved.
    Failed { failures: Vec<MoveFailure> },
}

impl BatchOutcome {
    pub fn from_parts(positions: BTreeMap<String, i32>, failures: Vec<MoveFailure>) -> Self {
        if failures.is_empty() {
            BatchOutcome::Complete { positions }
        } else if positions.is_empty() {
            BatchOutcome::Failed { failures }
        } else {
            BatchOutcome::Partial {
                positions,
                failures,
            }
        }
    }

    /// Whether at least one servo changed position.
    pub fn moved_any(&self) -> bool {
        match self {
            BatchOutcome::Complete { positions } | BatchOutcome::Partial { positions, .. } => {
                !positions.is_empty()
            }
            BatchOutcome::Failed { .. } => false,
        }
    }

    pub fn failures(&self) -> &[MoveFailure] {
        match self {
            BatchOutcome::Complete { .. } => &[],
            BatchOutcome::Partial { failures, .. } | BatchOutcome::Failed { failures } => failures,
        }
    }
}
