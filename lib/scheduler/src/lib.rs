//! Trigger scheduling for amber-relay workflows.
//!
//! This crate provides:
//!
//! - **Trigger Registry**: replace-all registration of a workflow's
//!   declared triggers against the external host services, with fail-open
//!   clean-up
//! - **Trigger Strategies**: one per trigger kind, from periodic alarms to
//!   context-menu leaves
//! - **Schedule math**: pure date/weekday computations behind the one-shot
//!   strategies
//! - **Service contracts**: injected traits for the clock service, menu
//!   host, and key-value store

pub mod error;
pub mod registry;
pub mod schedule;
pub mod services;

pub use error::{ClockError, MenuError, RegistrationError, ScheduleError, StoreError};
pub use registry::{TriggerRegistry, VisitWebEntry, CONTEXT_MENU_PARENT_ID};
pub use services::{AlarmInfo, AlarmSchedule, ClockService, KeyValueStore, MenuEntry, MenuHost};
