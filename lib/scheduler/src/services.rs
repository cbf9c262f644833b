//! Injected collaborator contracts for the external host services.
//!
//! The registry and its strategies never touch a live host environment
//! directly; everything goes through these traits so the scheduling logic
//! is testable with in-memory fakes.

use crate::error::{ClockError, MenuError, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// Schedule parameters for a named alarm.
///
/// `when` and `period_in_minutes` are mutually independent: a one-shot
/// activation sets only `when`, a repeating activation sets the period and
/// optionally an extra first-fire delay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlarmSchedule {
    /// Absolute instant of a one-shot activation.
    pub when: Option<DateTime<Utc>>,
    /// Repeat period in minutes.
    pub period_in_minutes: Option<f64>,
    /// Extra delay in minutes before the first fire.
    pub delay_in_minutes: Option<f64>,
}

/// A scheduled alarm as reported by the clock service.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmInfo {
    /// The alarm's name; for alarms owned by this subsystem this is a
    /// registration key.
    pub name: String,
    /// The alarm's schedule.
    pub schedule: AlarmSchedule,
}

/// The external clock service scheduling named wake-ups.
#[async_trait]
pub trait ClockService: Send + Sync {
    /// Creates (or replaces) the alarm with the given name.
    async fn create_alarm(&self, name: &str, schedule: AlarmSchedule) -> Result<(), ClockError>;

    /// Lists every scheduled alarm.
    async fn all_alarms(&self) -> Result<Vec<AlarmInfo>, ClockError>;

    /// Clears the alarm with the given name.
    async fn clear_alarm(&self, name: &str) -> Result<(), ClockError>;
}

/// One entry of the hierarchical command menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub id: String,
    /// Parent entry id; `None` for a root entry.
    pub parent_id: Option<String>,
    pub title: String,
    /// Page-context types the entry appears in.
    pub contexts: Vec<String>,
    /// Url patterns of documents the entry is shown on.
    pub document_url_patterns: Vec<String>,
}

/// The external menu host.
#[async_trait]
pub trait MenuHost: Send + Sync {
    /// Creates a menu entry.
    ///
    /// # Errors
    ///
    /// Reports [`MenuError::MissingParent`] when `parent_id` names an
    /// entry that does not exist, so callers can self-heal.
    async fn create_entry(&self, entry: MenuEntry) -> Result<(), MenuError>;

    /// Removes a menu entry by id.
    async fn remove_entry(&self, id: &str) -> Result<(), MenuError>;

    /// Rebuilds the visible menu. Hosts without a refresh operation
    /// inherit this no-op.
    async fn refresh(&self) -> Result<(), MenuError> {
        Ok(())
    }
}

/// The process-durable key-value store.
///
/// Values are JSON-compatible; shapes are owned by the callers.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a key, `None` when unset.
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError>;

    /// Writes a key.
    async fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError>;

    /// Removes a key.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
