//! ObjectId-based identifier generator
//!
//! Identifiers are the 24-character hex form of a BSON ObjectId: a 4-byte
//! timestamp, a 5-byte per-process random value and a 3-byte counter, so
//! concurrent creators never collide without coordination.

use bson::oid::ObjectId;
use flowdesk_domain::ports::IdGenerator;

/// Generates hex-encoded ObjectIds
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdGenerator;

impl ObjectIdGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for ObjectIdGenerator {
    fn generate(&self) -> String {
        ObjectId::new().to_hex()
    }
}
