use crate::core::ActuatorSink;
use std::sync::{Mutex, PoisonError};

/// Host stand-in for the PWM driver: logs the register write it would perform.
#[derive(Debug, Clone, Default)]
pub struct LoggingActuator;

impl LoggingActuator {
    pub fn new() -> Self {
        Self
    }
}

impl ActuatorSink for LoggingActuator {
    fn set_position(&self, channel: u16, position: i32) {
        tracing::info!(channel, position, "set_pwm({}, 0, {})", channel, position);
    }
}

/// Keeps every command in order. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    commands: Mutex<Vec<(u16, i32)>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<(u16, i32)> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ActuatorSink for RecordingActuator {
    fn set_position(&self, channel: u16, position: i32) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((channel, position));
    }
}
