pub mod preset;
pub mod preset_registry;
pub mod servo;
pub mod servo_registry;
pub mod state;

pub use crate::domain::model::{BatchOutcome, Limits, ServoSpec, ServoUpdate};
pub use crate::domain::ports::{ActuatorSink, BlobStore};
pub use crate::utils::error::Result;
