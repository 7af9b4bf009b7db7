// State management module
// The agent registry is the single owner of all wallboard state

pub mod registry;

pub use registry::{
    Agent, AgentCode, AgentRegistry, AgentStatus, DashboardStats, RegistryError, StatusBreakdown,
    StatusChange, StatusSlice,
};

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the registry
///
/// A single coarse lock over the whole registry; operations are in-memory and
/// cheap, so contention is negligible at this scale.
pub type SharedRegistry = Arc<RwLock<AgentRegistry>>;

/// Wrap a registry for use as axum state
pub fn shared(registry: AgentRegistry) -> SharedRegistry {
    Arc::new(RwLock::new(registry))
}
