//! API module
//!
//! Contains HTTP request handlers for the wallboard endpoints

pub mod agents;
pub mod dashboard;
