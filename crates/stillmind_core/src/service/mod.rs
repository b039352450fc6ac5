//! Use-case services over the persistence gateway.
//!
//! # Responsibility
//! - Orchestrate staging and queries into the flows the UI invokes.
//! - Keep collaborators decoupled from SQL and staging details.
//!
//! # Invariants
//! - Services never bypass store validation or the staged-save contract.
//! - The reminder surface is read-only; it never mutates domain records.

pub mod achievement_service;
pub mod checkin_service;
pub mod reminder_service;
