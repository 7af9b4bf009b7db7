// Agent registry and status model
// Owns all mutable wallboard state; the HTTP layer only borrows it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::info;

/// Unique identifier for an agent (e.g. "A001")
pub type AgentCode = String;

/// Agent work-state enumeration
///
/// Closed set; the wire spellings ("Wrap-up", "Not Ready") are part of the
/// public API and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    /// Ready to take work
    Available,
    /// Currently handling a contact
    Active,
    /// Finishing after-call work
    #[serde(rename = "Wrap-up")]
    WrapUp,
    /// Logged in but not taking work
    #[serde(rename = "Not Ready")]
    NotReady,
    /// Logged out
    Offline,
}

impl AgentStatus {
    /// All valid statuses, in display order
    pub const ALL: [AgentStatus; 5] = [
        AgentStatus::Available,
        AgentStatus::Active,
        AgentStatus::WrapUp,
        AgentStatus::NotReady,
        AgentStatus::Offline,
    ];

    /// Wire spelling of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Available => "Available",
            AgentStatus::Active => "Active",
            AgentStatus::WrapUp => "Wrap-up",
            AgentStatus::NotReady => "Not Ready",
            AgentStatus::Offline => "Offline",
        }
    }

    /// Parse a wire spelling, returning None for anything outside the set
    pub fn parse(value: &str) -> Option<AgentStatus> {
        Self::ALL.iter().find(|s| s.as_str() == value).copied()
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent record
///
/// `code` is immutable after seeding; everything else mutates only through
/// the registry operations below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique agent code
    pub code: AgentCode,
    /// Display name
    pub name: String,
    /// Current work-state
    pub status: AgentStatus,
    /// Set while logged in, cleared on logout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_time: Option<DateTime<Utc>>,
    /// Time of the most recent mutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status_change: Option<DateTime<Utc>>,
}

impl Agent {
    /// Create a logged-in agent record with the given status
    pub fn new(code: impl Into<AgentCode>, name: impl Into<String>, status: AgentStatus) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            status,
            login_time: Some(Utc::now()),
            last_status_change: None,
        }
    }
}

/// Domain errors raised by registry operations
///
/// Every failure is synchronous and leaves the registry untouched; the HTTP
/// layer maps each variant to a status code in `crate::error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No agent with the given code
    #[error("Agent not found")]
    AgentNotFound(AgentCode),
    /// Status value outside the enumerated set
    #[error("Invalid status")]
    InvalidStatus(String),
    /// A required request field was absent or empty
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Result of a successful status change
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// Status before the change
    pub previous: AgentStatus,
    /// The updated record
    pub agent: Agent,
}

/// Per-status slice of the dashboard breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSlice {
    /// Number of agents currently in this status
    pub count: usize,
    /// Share of the total, rounded to a whole percent
    pub percent: u32,
}

/// Counts and percentages for all five statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    /// Agents in `Available`
    pub available: StatusSlice,
    /// Agents in `Active`
    pub active: StatusSlice,
    /// Agents in `Wrap-up`
    pub wrap_up: StatusSlice,
    /// Agents in `Not Ready`
    pub not_ready: StatusSlice,
    /// Agents in `Offline`
    pub offline: StatusSlice,
}

/// Dashboard aggregation, computed fresh on every call
///
/// Percentages are rounded independently and need not sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Total number of agents in the registry
    pub total: usize,
    /// Per-status counts and percentages
    pub status_breakdown: StatusBreakdown,
    /// When this aggregation was computed
    pub timestamp: DateTime<Utc>,
}

/// In-memory agent registry
///
/// Backed by a `Vec` so listing preserves seed order. Holds a handful of
/// records; every operation is a cheap linear scan.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given records
    pub fn with_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Create the registry with the fixed wallboard seed data
    pub fn seeded() -> Self {
        Self::with_agents(vec![
            Agent::new("A001", "Kaito Kid", AgentStatus::Available),
            Agent::new("A002", "Conan", AgentStatus::WrapUp),
            Agent::new("A003", "Idk", AgentStatus::Active),
            Agent::new("A004", "Ran", AgentStatus::NotReady),
        ])
    }

    /// All agents in seed order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Number of agents in the registry
    pub fn count(&self) -> usize {
        self.agents.len()
    }

    /// Look up an agent by code
    pub fn find(&self, code: &str) -> Result<&Agent, RegistryError> {
        self.agents
            .iter()
            .find(|a| a.code == code)
            .ok_or_else(|| RegistryError::AgentNotFound(code.to_string()))
    }

    fn find_mut(&mut self, code: &str) -> Result<&mut Agent, RegistryError> {
        self.agents
            .iter_mut()
            .find(|a| a.code == code)
            .ok_or_else(|| RegistryError::AgentNotFound(code.to_string()))
    }

    /// Change an agent's status
    ///
    /// Any status may change to any other; there is no transition table.
    /// Never touches `login_time` or `name`.
    pub fn change_status(
        &mut self,
        code: &str,
        new_status: &str,
    ) -> Result<StatusChange, RegistryError> {
        let agent = self.find_mut(code)?;
        let status = AgentStatus::parse(new_status)
            .ok_or_else(|| RegistryError::InvalidStatus(new_status.to_string()))?;

        let previous = agent.status;
        agent.status = status;
        agent.last_status_change = Some(Utc::now());

        info!("Agent {}: {} → {}", agent.code, previous, status);

        Ok(StatusChange {
            previous,
            agent: agent.clone(),
        })
    }

    /// Log an agent in
    ///
    /// Overwrites the display name and unconditionally resets the status to
    /// `Available`, even if the agent is already logged in (reset-on-login).
    pub fn login(&mut self, code: &str, name: &str) -> Result<Agent, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::MissingField("Agent name"));
        }

        let agent = self.find_mut(code)?;
        let now = Utc::now();
        agent.name = name.to_string();
        agent.status = AgentStatus::Available;
        agent.login_time = Some(now);
        agent.last_status_change = Some(now);

        info!("Agent {} logged in", agent.code);

        Ok(agent.clone())
    }

    /// Log an agent out
    ///
    /// Forces `Offline` and clears `login_time`; the name is untouched.
    /// Idempotent apart from the `last_status_change` timestamp.
    pub fn logout(&mut self, code: &str) -> Result<Agent, RegistryError> {
        let agent = self.find_mut(code)?;
        agent.status = AgentStatus::Offline;
        agent.login_time = None;
        agent.last_status_change = Some(Utc::now());

        info!("Agent {} logged out", agent.code);

        Ok(agent.clone())
    }

    /// Compute dashboard statistics over the current state
    pub fn stats(&self) -> DashboardStats {
        let total = self.agents.len();

        let slice = |status: AgentStatus| {
            let count = self.agents.iter().filter(|a| a.status == status).count();
            let percent = if total > 0 {
                (count as f64 / total as f64 * 100.0).round() as u32
            } else {
                0
            };
            StatusSlice { count, percent }
        };

        DashboardStats {
            total,
            status_breakdown: StatusBreakdown {
                available: slice(AgentStatus::Available),
                active: slice(AgentStatus::Active),
                wrap_up: slice(AgentStatus::WrapUp),
                not_ready: slice(AgentStatus::NotReady),
                offline: slice(AgentStatus::Offline),
            },
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trip() {
        for status in AgentStatus::ALL {
            assert_eq!(AgentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AgentStatus::parse("Busy"), None);
        assert_eq!(AgentStatus::parse(""), None);
    }

    #[test]
    fn test_seeded_registry() {
        let registry = AgentRegistry::seeded();
        assert_eq!(registry.count(), 4);
        // Seed order is the listing order
        let codes: Vec<&str> = registry.agents().iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["A001", "A002", "A003", "A004"]);

        let agent = registry.find("A002").unwrap();
        assert_eq!(agent.name, "Conan");
        assert_eq!(agent.status, AgentStatus::WrapUp);
        assert!(agent.login_time.is_some());
        assert!(agent.last_status_change.is_none());
    }

    #[test]
    fn test_find_unknown_code() {
        let registry = AgentRegistry::seeded();
        assert_eq!(
            registry.find("ZZZ9"),
            Err(RegistryError::AgentNotFound("ZZZ9".to_string()))
        );
    }

    #[test]
    fn test_change_status_updates_record() {
        let mut registry = AgentRegistry::seeded();
        let before = registry.find("A001").unwrap().clone();

        let change = registry.change_status("A001", "Not Ready").unwrap();
        assert_eq!(change.previous, AgentStatus::Available);
        assert_eq!(change.agent.status, AgentStatus::NotReady);
        assert!(change.agent.last_status_change.is_some());
        // Status changes never touch the session or the name
        assert_eq!(change.agent.login_time, before.login_time);
        assert_eq!(change.agent.name, before.name);

        assert_eq!(registry.find("A001").unwrap(), &change.agent);
    }

    #[test]
    fn test_change_status_invalid_leaves_agent_unchanged() {
        let mut registry = AgentRegistry::seeded();
        let before = registry.find("A001").unwrap().clone();

        let err = registry.change_status("A001", "Busy").unwrap_err();
        assert_eq!(err, RegistryError::InvalidStatus("Busy".to_string()));
        assert_eq!(registry.find("A001").unwrap(), &before);
    }

    #[test]
    fn test_change_status_unknown_code() {
        let mut registry = AgentRegistry::seeded();
        let err = registry.change_status("ZZZ9", "Available").unwrap_err();
        assert_eq!(err, RegistryError::AgentNotFound("ZZZ9".to_string()));
    }

    #[test]
    fn test_login_resets_status_and_name() {
        let mut registry = AgentRegistry::seeded();
        // A004 is seeded Not Ready
        let agent = registry.login("A004", "Conan").unwrap();
        assert_eq!(agent.status, AgentStatus::Available);
        assert_eq!(agent.name, "Conan");
        assert!(agent.login_time.is_some());
        assert!(agent.last_status_change.is_some());
    }

    #[test]
    fn test_login_resets_already_logged_in_agent() {
        let mut registry = AgentRegistry::seeded();
        registry.change_status("A003", "Wrap-up").unwrap();

        // Logging in again silently resets the session
        let agent = registry.login("A003", "Heiji").unwrap();
        assert_eq!(agent.status, AgentStatus::Available);
        assert_eq!(agent.name, "Heiji");
    }

    #[test]
    fn test_login_empty_name_rejected() {
        let mut registry = AgentRegistry::seeded();
        let before = registry.find("A001").unwrap().clone();

        for name in ["", "   "] {
            let err = registry.login("A001", name).unwrap_err();
            assert_eq!(err, RegistryError::MissingField("Agent name"));
        }
        assert_eq!(registry.find("A001").unwrap(), &before);
    }

    #[test]
    fn test_login_unknown_code() {
        let mut registry = AgentRegistry::seeded();
        let err = registry.login("ZZZ9", "Conan").unwrap_err();
        assert_eq!(err, RegistryError::AgentNotFound("ZZZ9".to_string()));
    }

    #[test]
    fn test_logout_clears_session() {
        let mut registry = AgentRegistry::seeded();
        let agent = registry.logout("A001").unwrap();
        assert_eq!(agent.status, AgentStatus::Offline);
        assert!(agent.login_time.is_none());
        assert_eq!(agent.name, "Kaito Kid");
        assert!(agent.last_status_change.is_some());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut registry = AgentRegistry::seeded();
        let first = registry.logout("A001").unwrap();
        let second = registry.logout("A001").unwrap();
        assert_eq!(second.status, first.status);
        assert_eq!(second.login_time, first.login_time);
        assert_eq!(second.name, first.name);
    }

    #[test]
    fn test_logout_unknown_code() {
        let mut registry = AgentRegistry::seeded();
        let err = registry.logout("ZZZ9").unwrap_err();
        assert_eq!(err, RegistryError::AgentNotFound("ZZZ9".to_string()));
    }

    #[test]
    fn test_stats_over_seed_data() {
        let registry = AgentRegistry::seeded();
        let stats = registry.stats();
        assert_eq!(stats.total, 4);

        let b = stats.status_breakdown;
        for slice in [b.available, b.active, b.wrap_up, b.not_ready] {
            assert_eq!(slice, StatusSlice { count: 1, percent: 25 });
        }
        assert_eq!(b.offline, StatusSlice { count: 0, percent: 0 });
    }

    #[test]
    fn test_stats_empty_registry() {
        let registry = AgentRegistry::new();
        let stats = registry.stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.status_breakdown.available, StatusSlice { count: 0, percent: 0 });
        assert_eq!(stats.status_breakdown.offline, StatusSlice { count: 0, percent: 0 });
    }

    #[test]
    fn test_stats_percentages_round_independently() {
        let registry = AgentRegistry::with_agents(vec![
            Agent::new("A001", "One", AgentStatus::Available),
            Agent::new("A002", "Two", AgentStatus::Active),
            Agent::new("A003", "Three", AgentStatus::Offline),
        ]);
        let stats = registry.stats();
        let b = stats.status_breakdown;
        // 1/3 rounds to 33 three times; the sum is 99, not normalized
        assert_eq!(b.available.percent, 33);
        assert_eq!(b.active.percent, 33);
        assert_eq!(b.offline.percent, 33);
    }

    #[test]
    fn test_agent_json_shape() {
        let mut registry = AgentRegistry::seeded();
        let agent = registry.logout("A001").unwrap();
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["code"], "A001");
        assert_eq!(json["status"], "Offline");
        // loginTime is omitted entirely when absent
        assert!(json.get("loginTime").is_none());
        assert!(json.get("lastStatusChange").is_some());
    }

    #[test]
    fn test_breakdown_json_keys() {
        let stats = AgentRegistry::seeded().stats();
        let json = serde_json::to_value(&stats).unwrap();
        let breakdown = &json["statusBreakdown"];
        for key in ["available", "active", "wrapUp", "notReady", "offline"] {
            assert!(breakdown.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(breakdown["wrapUp"]["count"], 1);
        assert_eq!(breakdown["wrapUp"]["percent"], 25);
    }
}
