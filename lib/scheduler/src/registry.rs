//! The trigger registry: makes external scheduling state match a
//! workflow's declared trigger configuration, exactly.
//!
//! Registration is replace-all, never additive: every call tears down the
//! workflow's scheduled state first, which makes re-registration
//! idempotent regardless of the previous configuration. Clean-up is
//! fail-open — it logs and swallows its own failures so a broken host
//! never blocks re-registration.

use crate::error::{MenuError, RegistrationError, StoreError};
use crate::schedule;
use crate::services::{AlarmSchedule, ClockService, KeyValueStore, MenuEntry, MenuHost};
use amber_relay_core::{RegistrationKey, WorkflowId};
use amber_relay_workflow::trigger::{
    ContextMenuTrigger, DateTrigger, IntervalTrigger, ShortcutTrigger, SpecificDayTrigger,
    TriggerConfig, TriggerData, VisitWebTrigger,
};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

/// Store key of the keyboard-shortcut map (`registration key -> shortcut`).
pub const SHORTCUTS_KEY: &str = "shortcuts";
/// Store key of the passive url-match record list.
pub const VISIT_WEB_TRIGGERS_KEY: &str = "visitWebTriggers";
/// Store key of the startup-trigger id list.
pub const STARTUP_TRIGGERS_KEY: &str = "onStartupTriggers";
/// Store key of the queue of scheduled-but-not-yet-run workflow instances.
pub const WORKFLOW_QUEUE_KEY: &str = "workflowQueue";

/// Reserved root entry all workflow menu leaves hang under.
pub const CONTEXT_MENU_PARENT_ID: &str = "amberRelayContextMenu";
const CONTEXT_MENU_PARENT_TITLE: &str = "Run Amber Relay workflow";

fn document_url_patterns() -> Vec<String> {
    vec!["https://*/*".to_owned(), "http://*/*".to_owned()]
}

/// One durable record the passive url-matcher consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitWebEntry {
    /// The registration key this record belongs to.
    pub id: String,
    /// Url or pattern to match visited pages against.
    pub url: String,
    /// Whether `url` is a regular expression.
    pub is_regex: bool,
}

/// Converts trigger configurations into scheduled activations and tears
/// them down again.
///
/// The registry is the sole writer of entries whose keys derive from a
/// workflow id; collaborators are injected so none of this needs a live
/// host environment.
pub struct TriggerRegistry {
    clock: Arc<dyn ClockService>,
    menus: Arc<dyn MenuHost>,
    store: Arc<dyn KeyValueStore>,
}

impl TriggerRegistry {
    /// Creates a registry over the given collaborator services.
    pub fn new(
        clock: Arc<dyn ClockService>,
        menus: Arc<dyn MenuHost>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            clock,
            menus,
            store,
        }
    }

    /// Replaces the workflow's scheduled state with what `config` declares.
    ///
    /// # Errors
    ///
    /// Strategy failures are logged and re-thrown; state registered by
    /// earlier entries of a list-form configuration may remain (an
    /// accepted inconsistency window — the next registration cleans it).
    pub async fn register(
        &self,
        workflow_id: &WorkflowId,
        config: &TriggerConfig,
    ) -> Result<(), RegistrationError> {
        self.clean(workflow_id).await;

        let outcome = self.register_inner(workflow_id, config).await;
        if let Err(err) = &outcome {
            tracing::error!(workflow = %workflow_id, error = %err, "trigger registration failed");
        }
        outcome
    }

    async fn register_inner(
        &self,
        workflow_id: &WorkflowId,
        config: &TriggerConfig,
    ) -> Result<(), RegistrationError> {
        match config {
            TriggerConfig::Multiple { triggers } => {
                for entry in triggers {
                    let key = RegistrationKey::scoped(workflow_id, &entry.id);
                    self.dispatch(&key, &entry.data).await?;
                }
            }
            TriggerConfig::Single(legacy) => {
                let key = RegistrationKey::legacy(workflow_id);
                self.dispatch(&key, &legacy.to_data()).await?;
            }
        }
        Ok(())
    }

    /// One strategy per trigger kind, checked exhaustively.
    async fn dispatch(
        &self,
        key: &RegistrationKey,
        data: &TriggerData,
    ) -> Result<(), RegistrationError> {
        match data {
            TriggerData::Interval(data) => self.register_interval(key, data).await,
            TriggerData::Date(data) => self.register_specific_date(key, data).await,
            TriggerData::SpecificDay(data) => self.register_specific_day(key, data).await,
            TriggerData::VisitWeb(data) => self.register_visit_web(key, data).await,
            TriggerData::ContextMenu(data) => self.register_context_menu(key, data).await,
            TriggerData::KeyboardShortcut(data) => {
                self.register_keyboard_shortcut(key, data).await
            }
            // Activation happens via the host startup event, outside this
            // subsystem; nothing to schedule.
            TriggerData::OnStartup => Ok(()),
        }
    }

    /// Tears down every scheduled activation belonging to the workflow.
    ///
    /// Fail-open: a failure partway is logged and swallowed so clean-up
    /// never blocks a subsequent registration.
    pub async fn clean(&self, workflow_id: &WorkflowId) {
        if let Err(err) = self.clean_inner(workflow_id).await {
            tracing::error!(workflow = %workflow_id, error = %err, "trigger clean-up failed");
        }
    }

    async fn clean_inner(&self, workflow_id: &WorkflowId) -> Result<(), RegistrationError> {
        for alarm in self.clock.all_alarms().await? {
            if alarm.name.contains(workflow_id.as_str()) {
                self.clock.clear_alarm(&alarm.name).await?;
            }
        }

        let mut shortcuts = self.read_shortcut_map().await?;
        shortcuts.retain(|key, _| !key.contains(workflow_id.as_str()));

        let mut startup_triggers = self.read_string_list(STARTUP_TRIGGERS_KEY).await?;
        startup_triggers.retain(|id| !id.contains(workflow_id.as_str()));

        let mut visit_web = self.read_visit_web_triggers().await?;
        visit_web.retain(|entry| !entry.id.contains(workflow_id.as_str()));

        self.remove_from_workflow_queue(workflow_id).await?;

        self.store
            .set(SHORTCUTS_KEY, JsonValue::Object(shortcuts))
            .await?;
        self.set_json(STARTUP_TRIGGERS_KEY, &startup_triggers).await?;
        self.set_json(VISIT_WEB_TRIGGERS_KEY, &visit_web).await?;

        // Menu removal is best-effort: the leaf may never have existed.
        if let Err(err) = self.menus.remove_entry(workflow_id.as_str()).await {
            tracing::warn!(workflow = %workflow_id, error = %err, "context menu removal skipped");
        }
        Ok(())
    }

    async fn register_interval(
        &self,
        key: &RegistrationKey,
        data: &IntervalTrigger,
    ) -> Result<(), RegistrationError> {
        let mut alarm = AlarmSchedule {
            period_in_minutes: Some(data.interval),
            ..AlarmSchedule::default()
        };
        if data.delay > 0.0 && !data.fixed_delay {
            alarm.delay_in_minutes = Some(data.delay);
        }

        self.clock.create_alarm(key.as_str(), alarm).await?;
        Ok(())
    }

    async fn register_specific_date(
        &self,
        key: &RegistrationKey,
        data: &DateTrigger,
    ) -> Result<(), RegistrationError> {
        let when =
            schedule::specific_date_instant(data.date.as_deref(), &data.time, &Local::now())?;

        self.clock
            .create_alarm(
                key.as_str(),
                AlarmSchedule {
                    when: Some(when.with_timezone(&Utc)),
                    ..AlarmSchedule::default()
                },
            )
            .await?;
        Ok(())
    }

    async fn register_specific_day(
        &self,
        key: &RegistrationKey,
        data: &SpecificDayTrigger,
    ) -> Result<(), RegistrationError> {
        let Some(when) = schedule::next_weekly_occurrence(&data.days, &data.time, &Local::now())?
        else {
            return Ok(());
        };
        tracing::debug!(key = %key, when = %when, "scheduling weekly activation");

        self.clock
            .create_alarm(
                key.as_str(),
                AlarmSchedule {
                    when: Some(when.with_timezone(&Utc)),
                    ..AlarmSchedule::default()
                },
            )
            .await?;
        Ok(())
    }

    async fn register_visit_web(
        &self,
        key: &RegistrationKey,
        data: &VisitWebTrigger,
    ) -> Result<(), RegistrationError> {
        if data.url.trim().is_empty() {
            return Ok(());
        }

        let mut entries = self.read_visit_web_triggers().await?;
        let payload = VisitWebEntry {
            id: key.as_str().to_owned(),
            url: data.url.clone(),
            is_regex: data.is_url_regex,
        };
        match entries.iter_mut().find(|entry| entry.id == payload.id) {
            Some(existing) => *existing = payload,
            None => entries.insert(0, payload),
        }

        self.set_json(VISIT_WEB_TRIGGERS_KEY, &entries).await?;
        Ok(())
    }

    async fn register_context_menu(
        &self,
        key: &RegistrationKey,
        data: &ContextMenuTrigger,
    ) -> Result<(), RegistrationError> {
        let contexts = if data.context_types.is_empty() {
            vec!["all".to_owned()]
        } else {
            data.context_types.clone()
        };
        let leaf = MenuEntry {
            id: key.as_str().to_owned(),
            parent_id: Some(CONTEXT_MENU_PARENT_ID.to_owned()),
            title: data.context_menu_name.clone(),
            contexts,
            document_url_patterns: document_url_patterns(),
        };

        match self.menus.create_entry(leaf.clone()).await {
            Ok(()) => {}
            Err(MenuError::MissingParent { .. }) => {
                let parent = MenuEntry {
                    id: CONTEXT_MENU_PARENT_ID.to_owned(),
                    parent_id: None,
                    title: CONTEXT_MENU_PARENT_TITLE.to_owned(),
                    contexts: vec!["all".to_owned()],
                    document_url_patterns: document_url_patterns(),
                };
                self.menus.create_entry(parent).await?;
                // Retried exactly once; a second missing-parent failure
                // surfaces like any other menu error.
                self.menus.create_entry(leaf).await?;
            }
            Err(err) => return Err(err.into()),
        }

        self.menus.refresh().await?;
        Ok(())
    }

    async fn register_keyboard_shortcut(
        &self,
        key: &RegistrationKey,
        data: &ShortcutTrigger,
    ) -> Result<(), RegistrationError> {
        let mut shortcuts = self.read_shortcut_map().await?;
        shortcuts.insert(
            key.as_str().to_owned(),
            JsonValue::String(data.shortcut.clone()),
        );

        self.store
            .set(SHORTCUTS_KEY, JsonValue::Object(shortcuts))
            .await?;
        Ok(())
    }

    /// Removes the first queued instance belonging to the workflow.
    ///
    /// The queue is only written back when an entry was actually removed.
    async fn remove_from_workflow_queue(
        &self,
        workflow_id: &WorkflowId,
    ) -> Result<(), RegistrationError> {
        let mut queue = self.read_string_list(WORKFLOW_QUEUE_KEY).await?;
        let Some(index) = queue
            .iter()
            .position(|id| id.contains(workflow_id.as_str()))
        else {
            return Ok(());
        };
        queue.remove(index);

        self.set_json(WORKFLOW_QUEUE_KEY, &queue).await?;
        Ok(())
    }

    /// Reads the shortcut map, normalizing a legacy array-shaped value
    /// (persisted by early releases) to an empty map.
    async fn read_shortcut_map(&self) -> Result<Map<String, JsonValue>, RegistrationError> {
        Ok(match self.store.get(SHORTCUTS_KEY).await? {
            Some(JsonValue::Object(map)) => map,
            _ => Map::new(),
        })
    }

    async fn read_visit_web_triggers(&self) -> Result<Vec<VisitWebEntry>, RegistrationError> {
        Ok(match self.store.get(VISIT_WEB_TRIGGERS_KEY).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Vec::new(),
        })
    }

    async fn read_string_list(&self, key: &str) -> Result<Vec<String>, RegistrationError> {
        Ok(match self.store.get(key).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Vec::new(),
        })
    }

    async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), RegistrationError> {
        let value = serde_json::to_value(value).map_err(|err| StoreError::Failed {
            message: err.to_string(),
        })?;
        self.store.set(key, value).await?;
        Ok(())
    }
}
