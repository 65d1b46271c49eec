//! Storage seams the services depend on.

pub mod snapshots;

pub use snapshots::{MemorySnapshotStore, SnapshotStore, StoreError};
