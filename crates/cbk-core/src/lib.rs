//! # cbk-core
//!
//! Core types, transition tables, and error types for Casebook.
//!
//! This crate provides the foundational types shared across all Casebook crates:
//! - Case and audit entry structs
//! - Status enums with per-kind state machine tables
//! - The tagged `Action` payloads and the pure transition engine
//! - ID prefix constants and generation
//! - Cross-cutting error types
//! - Audit detail sub-types and the export document
//! - An injectable clock

pub mod action;
pub mod audit_detail;
pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod transition;
