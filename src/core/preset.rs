use crate::core::servo::Servo;
use crate::core::servo_registry::ServoRegistry;
use crate::domain::model::PresetTargets;
use crate::utils::error::{Result, ServoError};
use std::collections::HashSet;

/// A servo name paired with the position it should take when the preset is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetMember {
    servo: String,
    position: i32,
}

impl PresetMember {
    /// Validates `position` against the servo's limits as they are right now.
    pub fn new(servo: &Servo, position: i32) -> Result<Self> {
        let limits = servo.limits();
        if !limits.contains(position) {
            return Err(ServoError::PresetMemberPositionOutOfRange {
                servo: servo.name().to_string(),
                desired: position,
                min: limits.min,
                max: limits.max,
            });
        }

        Ok(Self {
            servo: servo.name().to_string(),
            position,
        })
    }

    /// Member for a persisted target. Only the servo must exist; range is checked on apply.
    fn restore(servo: &Servo, position: i32) -> Self {
        Self {
            servo: servo.name().to_string(),
            position,
        }
    }

    pub fn servo(&self) -> &str {
        &self.servo
    }

    pub fn position(&self) -> i32 {
        self.position
    }
}

/// Ordered collection of members, each servo at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    members: Vec<PresetMember>,
}

impl Preset {
    pub fn new(name: &str, members: Vec<PresetMember>) -> Result<Self> {
        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(member.servo.as_str()) {
                return Err(ServoError::DuplicatePresetMember {
                    preset: name.to_string(),
                    servo: member.servo.clone(),
                });
            }
        }
        Ok(Self { members })
    }

    /// Resolves every target against `servos` before anything is committed.
    pub fn from_targets(name: &str, targets: &PresetTargets, servos: &ServoRegistry) -> Result<Self> {
        let members = targets
            .iter()
            .map(|(servo, &position)| PresetMember::new(servos.get(servo)?, position))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, members)
    }

    /// Rebuilds a persisted preset. Unknown servos are an error, stale targets are not.
    pub fn restore(name: &str, targets: &PresetTargets, servos: &ServoRegistry) -> Result<Self> {
        let members = targets
            .iter()
            .map(|(servo, &position)| Ok(PresetMember::restore(servos.get(servo)?, position)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, members)
    }

    pub fn members(&self) -> &[PresetMember] {
        &self.members
    }

    /// Moves every member's servo to its target, in member order.
    ///
    /// All members are checked against the current registry first; on any failure nothing moves
    /// and the first error is returned.
    pub fn apply(&self, servos: &mut ServoRegistry) -> Result<()> {
        for member in &self.members {
            servos.get(&member.servo)?.check_target(member.position)?;
        }
        for member in &self.members {
            servos.move_absolute(&member.servo, member.position)?;
        }
        Ok(())
    }

    pub fn serialize(&self) -> PresetTargets {
        self.members
            .iter()
            .map(|member| (member.servo.clone(), member.position))
            .collect()
    }
}
