//! Shared fixtures for integration tests.

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{capture_registry, current_thread_name, quiet_registry};
