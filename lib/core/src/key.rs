//! Registration keys for scheduled trigger state.
//!
//! A registration key is the string under which one trigger's scheduled
//! state lives across every external service: alarm names, keyboard-shortcut
//! map keys, passive url-match record ids, and menu entry ids all use it.
//! The format is persisted host-side and must stay stable across versions,
//! because clean-up finds a workflow's entries by substring containment.

use crate::id::{TriggerId, WorkflowId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The key identifying one trigger's scheduled state across services.
///
/// List-form trigger entries get `trigger:<workflowId>:<triggerId>`; the
/// legacy single-trigger form uses the bare workflow id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationKey(String);

impl RegistrationKey {
    /// Key for one entry of a list-form trigger configuration.
    #[must_use]
    pub fn scoped(workflow_id: &WorkflowId, trigger_id: &TriggerId) -> Self {
        Self(format!("trigger:{workflow_id}:{trigger_id}"))
    }

    /// Key for a legacy single-form trigger configuration.
    #[must_use]
    pub fn legacy(workflow_id: &WorkflowId) -> Self {
        Self(workflow_id.as_str().to_owned())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key belongs to the given workflow.
    ///
    /// Substring containment, not segment equality: this mirrors how the
    /// host-side state is swept, so a workflow id that is a substring of
    /// another workflow's id would over-match. Generated ids are fixed-width
    /// ULIDs, which cannot contain one another.
    #[must_use]
    pub fn belongs_to(&self, workflow_id: &WorkflowId) -> bool {
        self.0.contains(workflow_id.as_str())
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegistrationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_key_format() {
        let key = RegistrationKey::scoped(&WorkflowId::from("wf1"), &TriggerId::from("t9"));
        assert_eq!(key.as_str(), "trigger:wf1:t9");
    }

    #[test]
    fn legacy_key_is_the_bare_workflow_id() {
        let key = RegistrationKey::legacy(&WorkflowId::from("wf1"));
        assert_eq!(key.as_str(), "wf1");
    }

    #[test]
    fn belongs_to_matches_by_containment() {
        let wf = WorkflowId::from("wf1");
        let other = WorkflowId::from("wf2");
        let key = RegistrationKey::scoped(&wf, &TriggerId::from("t1"));

        assert!(key.belongs_to(&wf));
        assert!(!key.belongs_to(&other));
        assert!(RegistrationKey::legacy(&wf).belongs_to(&wf));
    }
}
