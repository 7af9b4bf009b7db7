//! Agent API handlers
//!
//! Contains HTTP request handlers for listing agents and for the three
//! lifecycle operations (status change, login, logout).

use crate::error::AppError;
use crate::state::{Agent, SharedRegistry};
use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agents list response
#[derive(Debug, Serialize)]
pub struct AgentListResponse {
    /// Always true on the success path
    pub success: bool,
    /// All agents in seed order
    pub data: Vec<Agent>,
    /// Total number of agents
    pub count: usize,
    /// When the listing was taken
    pub timestamp: DateTime<Utc>,
}

/// Response for the three lifecycle operations
#[derive(Debug, Serialize)]
pub struct AgentActionResponse {
    /// Always true on the success path
    pub success: bool,
    /// Human-readable description of what happened
    pub message: String,
    /// The updated agent record
    pub data: Agent,
}

/// Change status request body
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// Requested status; anything outside the enum is rejected
    #[serde(default)]
    pub status: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Display name to record for the session
    #[serde(default)]
    pub name: String,
}

/// GET /api/agents - List all agents
pub async fn list_agents(State(registry): State<SharedRegistry>) -> Json<AgentListResponse> {
    let registry = registry.read().await;
    Json(AgentListResponse {
        success: true,
        data: registry.agents().to_vec(),
        count: registry.count(),
        timestamp: Utc::now(),
    })
}

/// PATCH /api/agents/:code/status - Change an agent's status
pub async fn change_status(
    State(registry): State<SharedRegistry>,
    Path(code): Path<String>,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<Json<AgentActionResponse>, AppError> {
    let mut registry = registry.write().await;
    let change = registry.change_status(&code, &request.status)?;

    Ok(Json(AgentActionResponse {
        success: true,
        message: format!(
            "Agent {} status changed from {} to {}",
            code, change.previous, change.agent.status
        ),
        data: change.agent,
    }))
}

/// POST /api/agents/:code/login - Log an agent in
pub async fn login(
    State(registry): State<SharedRegistry>,
    Path(code): Path<String>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AgentActionResponse>, AppError> {
    let mut registry = registry.write().await;
    let agent = registry.login(&code, &request.name)?;

    Ok(Json(AgentActionResponse {
        success: true,
        message: format!("Agent {} logged in successfully", code),
        data: agent,
    }))
}

/// POST /api/agents/:code/logout - Log an agent out
pub async fn logout(
    State(registry): State<SharedRegistry>,
    Path(code): Path<String>,
) -> Result<Json<AgentActionResponse>, AppError> {
    let mut registry = registry.write().await;
    let agent = registry.logout(&code)?;

    Ok(Json(AgentActionResponse {
        success: true,
        message: format!("Agent {} logged out successfully", code),
        data: agent,
    }))
}
