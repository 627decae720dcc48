//! Identifier Generator Port

/// Source of fresh record identifiers
///
/// Implementations must be collision resistant without coordination between
/// concurrent callers (timestamp plus randomness, not a counter).
pub trait IdGenerator: Send + Sync + std::fmt::Debug {
    /// Produce a new identifier
    fn generate(&self) -> String;
}
