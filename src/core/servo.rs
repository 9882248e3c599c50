use crate::core::ActuatorSink;
use crate::domain::model::{Limits, ServoSnapshot, ServoSpec, ServoUpdate};
use crate::utils::error::{Result, ServoError};

/// A single named actuator with a channel, inclusive limits and last commanded position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Servo {
    name: String,
    channel: u16,
    limits: Limits,
    position: i32,
}

impl Servo {
    /// Builds a servo from its spec. The position defaults to `limits.min`.
    pub fn new(name: impl Into<String>, spec: ServoSpec) -> Result<Self> {
        let name = name.into();
        if !spec.limits.is_ordered() {
            return Err(ServoError::InvalidLimits {
                min: spec.limits.min,
                max: spec.limits.max,
            });
        }

        let position = spec.position.unwrap_or(spec.limits.min);
        if !spec.limits.contains(position) {
            return Err(ServoError::InvalidServoSpec {
                name,
                reason: format!(
                    "position {} outside limits {}..={}",
                    position, spec.limits.min, spec.limits.max
                ),
            });
        }

        Ok(Self {
            name,
            channel: spec.channel,
            limits: spec.limits,
            position,
        })
    }

    /// Rebuilds a persisted servo as it was dumped. Only the limit ordering is checked; the
    /// position may sit outside the limits after a limit update.
    pub fn restore(name: impl Into<String>, snapshot: ServoSnapshot) -> Result<Self> {
        if !snapshot.limits.is_ordered() {
            return Err(ServoError::InvalidLimits {
                min: snapshot.limits.min,
                max: snapshot.limits.max,
            });
        }

        Ok(Self {
            name: name.into(),
            channel: snapshot.channel,
            limits: snapshot.limits,
            position: snapshot.position,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel(&self) -> u16 {
        self.channel
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// Checks that `target` is reachable without moving.
    pub fn check_target(&self, target: i32) -> Result<()> {
        if self.limits.contains(target) {
            Ok(())
        } else {
            Err(ServoError::MovementOutOfRange {
                servo: self.name.clone(),
                current: self.position,
                desired: target,
                min: self.limits.min,
                max: self.limits.max,
            })
        }
    }

    pub fn move_absolute(&mut self, target: i32, sink: &dyn ActuatorSink) -> Result<&Self> {
        self.check_target(target)?;
        self.position = target;
        self.command(sink);
        Ok(self)
    }

    /// Moves by `delta`, saturating at the limits instead of failing.
    pub fn move_relative(&mut self, delta: i32, sink: &dyn ActuatorSink) -> &Self {
        self.position = self.limits.clamp(self.position.saturating_add(delta));
        self.command(sink);
        self
    }

    /// Applies the fields set in `update`. The current position is not re-checked.
    pub fn update(&mut self, update: &ServoUpdate) -> Result<&Self> {
        let limits = Limits::new(
            update.limit_min.unwrap_or(self.limits.min),
            update.limit_max.unwrap_or(self.limits.max),
        );
        if !limits.is_ordered() {
            return Err(ServoError::InvalidLimits {
                min: limits.min,
                max: limits.max,
            });
        }

        self.limits = limits;
        if let Some(channel) = update.channel {
            self.channel = channel;
        }

        if !self.limits.contains(self.position) {
            tracing::warn!(
                servo = %self.name,
                position = self.position,
                min = self.limits.min,
                max = self.limits.max,
                "Servo position is outside its updated limits"
            );
        }
        Ok(self)
    }

    pub fn serialize(&self) -> ServoSnapshot {
        ServoSnapshot {
            position: self.position,
            channel: self.channel,
            limits: self.limits,
        }
    }

    fn command(&self, sink: &dyn ActuatorSink) {
        tracing::debug!(
            servo = %self.name,
            channel = self.channel,
            position = self.position,
            "Commanding actuator"
        );
        sink.set_position(self.channel, self.position);
    }
}
