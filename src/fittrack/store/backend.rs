use crate::error::Result;

/// Abstract interface for raw key-value I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (collections, ownership, write policy).
///
/// Methods take `&self`; implementations use interior mutability or are
/// stateless I/O.
pub trait KvBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    /// Returns Err only when the medium itself fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic: readers see either the old or the new value, never a mix.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
