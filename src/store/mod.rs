// Store module for tracked forecasts.
// Persists forecast snapshots in a single JSON file.

pub mod paths;
pub mod tracked;

pub use tracked::{TrackedEntry, TrackedStore, tracking_key};
