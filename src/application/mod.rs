//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `GrantEngine`, the primary entry point for
//! administrative grants, and the `Notifier` that dispatches the resulting
//! sender/recipient messages.

pub mod engine;
pub mod notifier;
