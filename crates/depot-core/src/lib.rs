//! # depot-core
//!
//! Core types, clock abstraction, and error types for the depot notification
//! ledger.
//!
//! This crate provides the foundational types shared across all depot crates:
//! - The `NotificationEvent` entity recorded for every artifact refresh attempt
//! - The open-ended `EventStatus` tag
//! - Artifact `Coordinate` parsing and formatting
//! - The injectable `Clock` used to stamp and bound events
//! - Cross-cutting error types and the event validation hook

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod validation;
