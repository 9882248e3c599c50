use crate::core::servo::Servo;
use crate::core::ActuatorSink;
use crate::domain::model::{BatchOutcome, MoveFailure, ServoSpec, ServoUpdate, ServosDump};
use crate::utils::error::{Result, ServoError};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owns every servo by unique name and routes moves to the actuator.
pub struct ServoRegistry {
    servos: BTreeMap<String, Servo>,
    sink: Arc<dyn ActuatorSink>,
}

impl ServoRegistry {
    pub fn new(sink: Arc<dyn ActuatorSink>) -> Self {
        Self {
            servos: BTreeMap::new(),
            sink,
        }
    }

    /// Creates or replaces the servo called `name`.
    pub fn insert(&mut self, name: &str, spec: ServoSpec) -> Result<&Servo> {
        let servo = Servo::new(name, spec)?;
        self.servos.insert(name.to_string(), servo);
        Ok(&self.servos[name])
    }

    pub fn get(&self, name: &str) -> Result<&Servo> {
        self.servos
            .get(name)
            .ok_or_else(|| ServoError::servo_not_found(name))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Servo> {
        self.servos
            .get_mut(name)
            .ok_or_else(|| ServoError::servo_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.servos.contains_key(name)
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.servos
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ServoError::servo_not_found(name))
    }

    pub fn len(&self) -> usize {
        self.servos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servos.is_empty()
    }

    pub fn move_absolute(&mut self, name: &str, target: i32) -> Result<&Servo> {
        let sink = Arc::clone(&self.sink);
        self.get_mut(name)?.move_absolute(target, sink.as_ref())
    }

    pub fn move_relative(&mut self, name: &str, delta: i32) -> Result<&Servo> {
        let sink = Arc::clone(&self.sink);
        Ok(self.get_mut(name)?.move_relative(delta, sink.as_ref()))
    }

    pub fn update(&mut self, name: &str, update: &ServoUpdate) -> Result<&Servo> {
        self.get_mut(name)?.update(update)
    }

    /// Moves each named servo independently; rejected items do not stop the others.
    pub fn move_batch(&mut self, targets: &BTreeMap<String, i32>) -> BatchOutcome {
        let mut positions = BTreeMap::new();
        let mut failures = Vec::new();

        for (name, &target) in targets {
            match self.move_absolute(name, target) {
                Ok(servo) => {
                    positions.insert(name.clone(), servo.position());
                }
                Err(error) => {
                    tracing::warn!(servo = %name, desired = target, "Batch move rejected: {}", error);
                    failures.push(MoveFailure {
                        item: name.clone(),
                        error,
                    });
                }
            }
        }

        BatchOutcome::from_parts(positions, failures)
    }

    pub fn positions(&self) -> BTreeMap<String, i32> {
        self.servos
            .iter()
            .map(|(name, servo)| (name.clone(), servo.position()))
            .collect()
    }

    pub fn dump(&self) -> ServosDump {
        self.servos
            .iter()
            .map(|(name, servo)| (name.clone(), servo.serialize()))
            .collect()
    }

    /// Restores every dumped servo, skipping entries with inverted limits. Returns how many were loaded.
    pub fn populate(&mut self, dump: ServosDump) -> usize {
        let mut loaded = 0;
        for (name, snapshot) in dump {
            match Servo::restore(name.as_str(), snapshot) {
                Ok(servo) => {
                    self.servos.insert(name, servo);
                    loaded += 1;
                }
                Err(e) => tracing::warn!(servo = %name, "Skipping persisted servo: {}", e),
            }
        }
        loaded
    }
}

impl std::fmt::Debug for ServoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServoRegistry")
            .field("servos", &self.servos)
            .finish_non_exhaustive()
    }
}
