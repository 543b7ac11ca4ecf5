use crate::domain::error::DomainError;

/// Narrow durable key-value storage port.
///
/// Everything stateful in this crate (pending notifications, read ids,
/// table preferences) goes through these three operations, so tests can
/// swap in an in-memory store without touching the reconciliation logic.
/// Values are JSON strings; callers own the encoding.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
