//! Declarative trigger configuration for workflows.
//!
//! A workflow carries either a single legacy trigger object or a list of
//! trigger entries. Both forms share the same per-kind parameter shapes;
//! only the envelope differs. The wire tags and field names are persisted
//! host-side and must stay stable.

use amber_relay_core::TriggerId;
use serde::{Deserialize, Serialize};

/// Parameters for a repeating interval trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalTrigger {
    /// Activation period in minutes.
    pub interval: f64,
    /// Extra delay in minutes before the first activation.
    #[serde(default)]
    pub delay: f64,
    /// When set, the period already encodes the delay and no extra
    /// first-fire offset is applied.
    #[serde(default)]
    pub fixed_delay: bool,
}

/// Parameters for a one-shot absolute-date trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTrigger {
    /// Calendar date, `YYYY-MM-DD`. Absent means "60 seconds from now".
    #[serde(default)]
    pub date: Option<String>,
    /// Time of day, `HH:MM` or `HH:MM:SS`.
    #[serde(default = "default_time")]
    pub time: String,
}

/// Parameters for a weekly recurring trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificDayTrigger {
    /// Weekday selections, either bare ids or `{id, times}` objects.
    #[serde(default)]
    pub days: Vec<DayEntry>,
    /// Shared time of day for bare weekday ids.
    #[serde(default = "default_time")]
    pub time: String,
}

/// One weekday selection within a [`SpecificDayTrigger`].
///
/// Weekday ids count from Sunday (`0`) through Saturday (`6`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayEntry {
    /// A bare weekday id using the trigger's shared time.
    Day(u8),
    /// A weekday with its own list of times.
    WithTimes {
        id: u8,
        times: Vec<String>,
    },
}

/// Parameters for a passive url-match trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitWebTrigger {
    /// Url or pattern the passive matcher compares visited pages against.
    pub url: String,
    /// Whether `url` is a regular expression.
    #[serde(default)]
    pub is_url_regex: bool,
}

/// Parameters for a context-menu trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuTrigger {
    /// Title of the menu leaf.
    pub context_menu_name: String,
    /// Page-context types the leaf appears in; empty means all contexts.
    #[serde(default)]
    pub context_types: Vec<String>,
}

/// Parameters for a keyboard-shortcut trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutTrigger {
    /// The shortcut combination, e.g. `mod+shift+a`.
    pub shortcut: String,
}

/// One trigger's kind and parameters.
///
/// This is the canonical dispatch type: the registry matches on it
/// exhaustively, one strategy per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum TriggerData {
    /// Repeating periodic activation.
    Interval(IntervalTrigger),
    /// One-shot activation at an absolute instant.
    Date(DateTrigger),
    /// One-shot activation at the next selected weekday occurrence.
    SpecificDay(SpecificDayTrigger),
    /// Passive activation when a visited page matches.
    VisitWeb(VisitWebTrigger),
    /// User-invoked activation from the page context menu.
    ContextMenu(ContextMenuTrigger),
    /// User-invoked activation from a keyboard shortcut.
    KeyboardShortcut(ShortcutTrigger),
    /// Activation on host startup; registered outside this subsystem.
    OnStartup,
}

/// The legacy single-trigger form, `{type, ...params}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LegacyTrigger {
    Interval(IntervalTrigger),
    Date(DateTrigger),
    SpecificDay(SpecificDayTrigger),
    VisitWeb(VisitWebTrigger),
    ContextMenu(ContextMenuTrigger),
    KeyboardShortcut(ShortcutTrigger),
    OnStartup,
}

impl LegacyTrigger {
    /// Converts the legacy form into the canonical dispatch type.
    #[must_use]
    pub fn to_data(&self) -> TriggerData {
        match self {
            Self::Interval(d) => TriggerData::Interval(d.clone()),
            Self::Date(d) => TriggerData::Date(d.clone()),
            Self::SpecificDay(d) => TriggerData::SpecificDay(d.clone()),
            Self::VisitWeb(d) => TriggerData::VisitWeb(d.clone()),
            Self::ContextMenu(d) => TriggerData::ContextMenu(d.clone()),
            Self::KeyboardShortcut(d) => TriggerData::KeyboardShortcut(d.clone()),
            Self::OnStartup => TriggerData::OnStartup,
        }
    }
}

/// One entry of a list-form trigger configuration, `{id, type, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEntry {
    /// Entry id, joined into the registration key.
    pub id: TriggerId,
    /// Kind and parameters.
    #[serde(flatten)]
    pub data: TriggerData,
}

/// A workflow's declared trigger configuration.
///
/// The variant order matters: deserialization tries the list form first,
/// so a payload carrying both shapes resolves to the list form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerConfig {
    /// List form; takes precedence over the legacy form.
    Multiple { triggers: Vec<TriggerEntry> },
    /// Legacy single-trigger form.
    Single(LegacyTrigger),
}

fn default_time() -> String {
    "00:00:00".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_form_deserializes_by_type_tag() {
        let config: TriggerConfig = serde_json::from_value(json!({
            "type": "interval",
            "interval": 15.0,
            "delay": 5.0,
            "fixedDelay": false,
        }))
        .expect("deserialize");

        match config {
            TriggerConfig::Single(LegacyTrigger::Interval(data)) => {
                assert_eq!(data.interval, 15.0);
                assert_eq!(data.delay, 5.0);
                assert!(!data.fixed_delay);
            }
            other => panic!("wrong form: {other:?}"),
        }
    }

    #[test]
    fn list_form_takes_precedence_over_legacy_fields() {
        let config: TriggerConfig = serde_json::from_value(json!({
            "type": "interval",
            "interval": 15.0,
            "triggers": [
                {"id": "t1", "type": "visit-web", "data": {"url": "https://example.com"}}
            ],
        }))
        .expect("deserialize");

        match config {
            TriggerConfig::Multiple { triggers } => {
                assert_eq!(triggers.len(), 1);
                assert_eq!(triggers[0].id.as_str(), "t1");
                assert!(matches!(triggers[0].data, TriggerData::VisitWeb(_)));
            }
            TriggerConfig::Single(_) => panic!("list form must win"),
        }
    }

    #[test]
    fn entry_uses_adjacent_type_and_data_fields() {
        let entry: TriggerEntry = serde_json::from_value(json!({
            "id": "t2",
            "type": "context-menu",
            "data": {"contextMenuName": "Scrape this page", "contextTypes": ["selection"]},
        }))
        .expect("deserialize");

        match entry.data {
            TriggerData::ContextMenu(data) => {
                assert_eq!(data.context_menu_name, "Scrape this page");
                assert_eq!(data.context_types, vec!["selection".to_owned()]);
            }
            other => panic!("wrong kind: {other:?}"),
        }
    }

    #[test]
    fn on_startup_entry_needs_no_data() {
        let entry: TriggerEntry =
            serde_json::from_value(json!({"id": "t3", "type": "on-startup"}))
                .expect("deserialize");
        assert_eq!(entry.data, TriggerData::OnStartup);
    }

    #[test]
    fn day_entries_accept_bare_ids_and_objects() {
        let trigger: SpecificDayTrigger = serde_json::from_value(json!({
            "days": [1, {"id": 3, "times": ["10:00:00", "18:30:00"]}],
            "time": "08:00:00",
        }))
        .expect("deserialize");

        assert_eq!(trigger.days.len(), 2);
        assert_eq!(trigger.days[0], DayEntry::Day(1));
        assert_eq!(
            trigger.days[1],
            DayEntry::WithTimes {
                id: 3,
                times: vec!["10:00:00".to_owned(), "18:30:00".to_owned()],
            }
        );
    }

    #[test]
    fn legacy_to_data_preserves_parameters() {
        let legacy = LegacyTrigger::VisitWeb(VisitWebTrigger {
            url: "https://example.com/*".to_owned(),
            is_url_regex: true,
        });

        match legacy.to_data() {
            TriggerData::VisitWeb(data) => {
                assert_eq!(data.url, "https://example.com/*");
                assert!(data.is_url_regex);
            }
            other => panic!("wrong kind: {other:?}"),
        }
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = TriggerConfig::Multiple {
            triggers: vec![TriggerEntry {
                id: TriggerId::from("t1"),
                data: TriggerData::Interval(IntervalTrigger {
                    interval: 30.0,
                    delay: 0.0,
                    fixed_delay: true,
                }),
            }],
        };

        let json = serde_json::to_string(&config).expect("serialize");
        let parsed: TriggerConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, parsed);
    }
}
