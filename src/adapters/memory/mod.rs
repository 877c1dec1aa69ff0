//! In-memory adapters.
//!
//! Used when no database is configured and throughout the test suite.

mod flow_sessions;
mod store;

pub use flow_sessions::InMemoryFlowSessionStore;
pub use store::InMemoryStore;
