pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use adapters::{FileStore, LoggingActuator, MemoryStore, RecordingActuator};
pub use config::{CliArgs, ServiceConfig};
pub use core::state::{State, StorageKeys};
pub use utils::error::{Result, ServoError};
pub use web::{create_router, AppState};
