//! Notification events.
//!
//! Defines the events a run emits and their priority levels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MediaKind, RunTrigger};
use crate::runner::RunStats;

/// Maximum number of titles listed per side of a change notification.
const MAX_LISTED_TITLES: usize = 10;

/// Maximum length of an error description.
const MAX_ERROR_DESCRIPTION: usize = 2000;

/// Static metadata about a supported notification event type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NotificationEventTypeInfo {
    /// Canonical subscription key (snake_case).
    pub event_type: &'static str,
    /// Human-friendly label.
    pub label: &'static str,
    /// Additional accepted subscription keys.
    pub aliases: &'static [&'static str],
}

const NOTIFICATION_EVENT_TYPES: &[NotificationEventTypeInfo] = &[
    NotificationEventTypeInfo {
        event_type: "run_started",
        label: "Run Started",
        aliases: &["run_start", "run.started", "RunStarted"],
    },
    NotificationEventTypeInfo {
        event_type: "run_completed",
        label: "Run Completed",
        aliases: &["run_end", "run.completed", "RunCompleted"],
    },
    NotificationEventTypeInfo {
        event_type: "collection_changed",
        label: "Collection Changed",
        aliases: &["changes", "collection.changed", "CollectionChanged"],
    },
    NotificationEventTypeInfo {
        event_type: "media_requested",
        label: "Media Requested",
        aliases: &["media.requested", "MediaRequested"],
    },
    NotificationEventTypeInfo {
        event_type: "error",
        label: "Error",
        aliases: &["errors", "run.error"],
    },
];

pub fn notification_event_types() -> &'static [NotificationEventTypeInfo] {
    NOTIFICATION_EVENT_TYPES
}

pub fn canonicalize_subscription_event_name(input: &str) -> Option<&'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized_input = normalize_subscription_key(trimmed);
    NOTIFICATION_EVENT_TYPES
        .iter()
        .find(|info| {
            normalize_subscription_key(info.event_type) == normalized_input
                || info
                    .aliases
                    .iter()
                    .any(|alias| normalize_subscription_key(alias) == normalized_input)
        })
        .map(|info| info.event_type)
}

fn normalize_subscription_key(input: &str) -> String {
    input
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !matches!(c, '_' | '.' | '-' | ' '))
        .collect()
}

/// Priority level for notifications.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum NotificationPriority {
    /// Informational only.
    Low,
    /// Standard notifications.
    #[default]
    Normal,
    /// Important events.
    High,
    /// Requires immediate attention.
    Critical,
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A named value rendered alongside an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EventField {
    fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

/// Events that can trigger notifications.
#[derive(Debug, Clone, Serialize)]
pub enum NotificationEvent {
    RunStarted {
        libraries: Vec<String>,
        trigger: RunTrigger,
        timestamp: DateTime<Utc>,
    },
    RunCompleted {
        duration_secs: f64,
        collections_updated: usize,
        items_added: usize,
        items_removed: usize,
        errors: usize,
        timestamp: DateTime<Utc>,
    },
    CollectionChanged {
        collection: String,
        library: String,
        added: Vec<String>,
        removed: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    MediaRequested {
        title: String,
        year: Option<i32>,
        kind: MediaKind,
        manager: String,
        collection: String,
        timestamp: DateTime<Utc>,
    },
    Error {
        title: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
    /// Sent by `test-notifications`.
    Test { timestamp: DateTime<Utc> },
}

impl NotificationEvent {
    pub fn run_completed(stats: &RunStats) -> Self {
        Self::RunCompleted {
            duration_secs: stats.duration.as_secs_f64(),
            collections_updated: stats.collections_updated,
            items_added: stats.items_added,
            items_removed: stats.items_removed,
            errors: stats.errors,
            timestamp: Utc::now(),
        }
    }

    /// Get the priority of this event.
    pub fn priority(&self) -> NotificationPriority {
        match self {
            Self::RunStarted { .. } => NotificationPriority::Normal,
            Self::RunCompleted { errors, .. } => {
                if *errors > 0 {
                    NotificationPriority::High
                } else {
                    NotificationPriority::Normal
                }
            }
            Self::CollectionChanged { .. } => NotificationPriority::Normal,
            Self::MediaRequested { .. } => NotificationPriority::Normal,
            Self::Error { .. } => NotificationPriority::High,
            Self::Test { .. } => NotificationPriority::Critical,
        }
    }

    /// Get the event type as a string.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::RunCompleted { .. } => "run_completed",
            Self::CollectionChanged { .. } => "collection_changed",
            Self::MediaRequested { .. } => "media_requested",
            Self::Error { .. } => "error",
            Self::Test { .. } => "test",
        }
    }

    /// Get a human-readable title for this event.
    pub fn title(&self) -> String {
        match self {
            Self::RunStarted { .. } => "Collection Update Started".to_string(),
            Self::RunCompleted { .. } => "Collection Update Completed".to_string(),
            Self::CollectionChanged { collection, .. } => {
                format!("Collection Updated: {}", collection)
            }
            Self::MediaRequested { title, year, .. } => match year {
                Some(year) => format!("Media Requested: {} ({})", title, year),
                None => format!("Media Requested: {}", title),
            },
            Self::Error { title, .. } => format!("Error: {}", title),
            Self::Test { .. } => "Test Notification".to_string(),
        }
    }

    /// Get a detailed description of this event.
    pub fn description(&self) -> String {
        match self {
            Self::RunStarted { libraries, .. } => {
                format!("Processing {} libraries", libraries.len())
            }
            Self::RunCompleted {
                collections_updated,
                errors,
                ..
            } => format!("{} collections updated, {} errors", collections_updated, errors),
            Self::CollectionChanged { library, .. } => format!("Library: {}", library),
            Self::MediaRequested { manager, .. } => format!("Added to {}", manager),
            Self::Error { message, .. } => {
                message.chars().take(MAX_ERROR_DESCRIPTION).collect()
            }
            Self::Test { .. } => "Notification channel is configured correctly".to_string(),
        }
    }

    /// Structured fields rendered below the description.
    pub fn fields(&self) -> Vec<EventField> {
        match self {
            Self::RunStarted {
                libraries, trigger, ..
            } => {
                let listed = if libraries.is_empty() {
                    "All".to_string()
                } else {
                    libraries
                        .iter()
                        .map(|lib| format!("- {}", lib))
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                vec![
                    EventField::new("Libraries", listed, false),
                    EventField::new("Trigger", trigger.to_string(), true),
                ]
            }
            Self::RunCompleted {
                duration_secs,
                collections_updated,
                items_added,
                items_removed,
                errors,
                ..
            } => {
                let mut fields = vec![
                    EventField::new("Duration", format_duration(*duration_secs), true),
                    EventField::new("Collections Updated", collections_updated.to_string(), true),
                    EventField::new("Items Added", items_added.to_string(), true),
                    EventField::new("Items Removed", items_removed.to_string(), true),
                ];
                if *errors > 0 {
                    fields.push(EventField::new("Errors", errors.to_string(), true));
                }
                fields
            }
            Self::CollectionChanged { added, removed, .. } => {
                let mut fields = Vec::new();
                if !added.is_empty() {
                    fields.push(EventField::new(
                        format!("Added ({})", added.len()),
                        title_list('+', added),
                        false,
                    ));
                }
                if !removed.is_empty() {
                    fields.push(EventField::new(
                        format!("Removed ({})", removed.len()),
                        title_list('-', removed),
                        false,
                    ));
                }
                fields
            }
            Self::MediaRequested {
                kind, collection, ..
            } => vec![
                EventField::new("Type", capitalize(kind.as_str()), true),
                EventField::new("Collection", collection.clone(), true),
            ],
            Self::Error { .. } | Self::Test { .. } => Vec::new(),
        }
    }

    /// Get the timestamp of this event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::RunStarted { timestamp, .. }
            | Self::RunCompleted { timestamp, .. }
            | Self::CollectionChanged { timestamp, .. }
            | Self::MediaRequested { timestamp, .. }
            | Self::Error { timestamp, .. }
            | Self::Test { timestamp } => *timestamp,
        }
    }

    pub fn event_type_info(event_type: &str) -> Option<NotificationEventTypeInfo> {
        let canonical = canonicalize_subscription_event_name(event_type)?;
        notification_event_types()
            .iter()
            .copied()
            .find(|e| e.event_type == canonical)
    }
}

fn title_list(marker: char, titles: &[String]) -> String {
    let mut lines: Vec<String> = titles
        .iter()
        .take(MAX_LISTED_TITLES)
        .map(|t| format!("{} {}", marker, t))
        .collect();
    if titles.len() > MAX_LISTED_TITLES {
        lines.push(format!("... and {} more", titles.len() - MAX_LISTED_TITLES));
    }
    lines.join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format duration in seconds into human-readable string.
pub(crate) fn format_duration(secs: f64) -> String {
    let total_secs = secs as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
