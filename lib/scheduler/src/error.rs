//! Error types for the scheduler crate.
//!
//! - `ClockError` / `MenuError` / `StoreError`: reported by the injected
//!   collaborator services
//! - `ScheduleError`: malformed time or date parameters
//! - `RegistrationError`: what `TriggerRegistry::register` surfaces to its
//!   caller, wrapping the lower layers

use std::fmt;

/// Errors from the clock service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The service rejected the operation.
    Failed { message: String },
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { message } => write!(f, "clock service failed: {message}"),
        }
    }
}

impl std::error::Error for ClockError {}

/// Errors from the menu host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The named parent entry does not exist.
    MissingParent { parent_id: String },
    /// The entry to remove does not exist.
    NotFound { id: String },
    /// Any other host failure.
    Failed { message: String },
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParent { parent_id } => {
                write!(f, "menu parent does not exist: {parent_id}")
            }
            Self::NotFound { id } => write!(f, "menu entry not found: {id}"),
            Self::Failed { message } => write!(f, "menu host failed: {message}"),
        }
    }
}

impl std::error::Error for MenuError {}

/// Errors from the key-value store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store rejected the operation.
    Failed { message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { message } => write!(f, "key-value store failed: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors from schedule parameter parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A time-of-day string is not `HH:MM` or `HH:MM:SS`.
    InvalidTime { value: String },
    /// A calendar date string is not `YYYY-MM-DD`, or names no valid
    /// local instant.
    InvalidDate { value: String },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime { value } => write!(f, "invalid time of day: '{value}'"),
            Self::InvalidDate { value } => write!(f, "invalid date: '{value}'"),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Errors surfaced by trigger registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A trigger carries malformed parameters.
    InvalidTrigger { reason: String },
    /// The clock service failed.
    Clock(ClockError),
    /// The menu host failed.
    Menu(MenuError),
    /// The key-value store failed.
    Store(StoreError),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTrigger { reason } => write!(f, "invalid trigger: {reason}"),
            Self::Clock(err) => err.fmt(f),
            Self::Menu(err) => err.fmt(f),
            Self::Store(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTrigger { .. } => None,
            Self::Clock(err) => Some(err),
            Self::Menu(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ClockError> for RegistrationError {
    fn from(err: ClockError) -> Self {
        Self::Clock(err)
    }
}

impl From<MenuError> for RegistrationError {
    fn from(err: MenuError) -> Self {
        Self::Menu(err)
    }
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ScheduleError> for RegistrationError {
    fn from(err: ScheduleError) -> Self {
        Self::InvalidTrigger {
            reason: err.to_string(),
        }
    }
}
