//! Core domain types for the amber-relay workflow engine.
//!
//! This crate provides the opaque identifier types and registration-key
//! construction shared by the workflow and scheduler crates.

pub mod id;
pub mod key;

pub use id::{BlockId, TriggerId, WorkflowId};
pub use key::RegistrationKey;
