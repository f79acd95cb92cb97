//! Weekly Pulse - Conversational Weekly Status Updates
//!
//! This crate interviews a team member over a multi-turn conversation,
//! collects the structured pieces of a weekly update, and persists a
//! summarized report for their manager.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
