use crate::utils::error::Result;

/// Hardware output that receives final position commands.
///
/// Calls are synchronous and assumed to succeed; there is no feedback path.
pub trait ActuatorSink: Send + Sync {
    fn set_position(&self, channel: u16, position: i32);
}

/// Key-value store for the persisted servo and preset blobs.
pub trait BlobStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn save(&self, key: &str, data: &[u8]) -> Result<()>;
}
