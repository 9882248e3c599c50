// Adapters layer: concrete implementations of the domain ports (blob storage, actuator output).

pub mod actuator;
pub mod storage;

pub use actuator::{LoggingActuator, RecordingActuator};
pub use storage::{FileStore, MemoryStore};
