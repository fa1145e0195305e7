//! Supported external systems and their module table.

use serde::{Deserialize, Serialize};

/// External system a scenario can talk to.
///
/// The declaration order is the iteration order of detected service sets.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
    strum::Display
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ServiceTag {
    /// Form intake.
    Typeform,
    /// Generic inbound webhook.
    Webhook,
    /// Spreadsheet.
    Sheets,
    /// Chat notification.
    Slack,
    /// Email.
    Gmail,
    /// Notes.
    Notion,
    Calendar,
}

/// Downstream bucket of a service, used to order action modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCategory {
    /// Records or persists the AI output.
    Persist,
    /// Notifies someone about the AI output.
    Notify,
}

/// Operation identifier plus its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: &'static str,
    pub label: &'static str,
}

/// Module table entry for one service.
#[derive(Debug, Clone, Copy)]
pub struct AppSpec {
    pub app: &'static str,
    pub action: Option<Operation>,
    pub watch: Option<Operation>,
    pub category: Option<ServiceCategory>,
}

const fn op(
    kind: &'static str,
    label: &'static str,
) -> Option<Operation> {
    Some(Operation { kind, label })
}

/// Generic module used for service names outside the table.
pub const FALLBACK_APP: AppSpec = AppSpec {
    app: "Tool",
    action: op("noop", "Step"),
    watch: None,
    category: None,
};

/// Downstream action order: persist category first, then notify.
pub const DOWNSTREAM_ORDER: [ServiceTag; 5] = [ServiceTag::Sheets, ServiceTag::Notion, ServiceTag::Calendar, ServiceTag::Slack, ServiceTag::Gmail];

/// Preference order when a detected service has to act as the trigger.
pub const WATCH_PREFERENCE: [ServiceTag; 5] = [ServiceTag::Typeform, ServiceTag::Gmail, ServiceTag::Notion, ServiceTag::Sheets, ServiceTag::Slack];

impl ServiceTag {
    /// Looks up the module table entry for this service.
    pub fn app_spec(self) -> AppSpec {
        match self {
            ServiceTag::Typeform => AppSpec {
                app: "Typeform",
                action: None,
                watch: op("watch-responses", "Watch Responses"),
                category: None,
            },
            ServiceTag::Webhook => AppSpec {
                app: "Webhooks",
                action: None,
                watch: op("custom-webhook", "Webhook"),
                category: None,
            },
            ServiceTag::Sheets => AppSpec {
                app: "Google Sheets",
                action: op("add-row", "Add Row"),
                watch: op("watch-rows", "Watch Rows"),
                category: Some(ServiceCategory::Persist),
            },
            ServiceTag::Notion => AppSpec {
                app: "Notion",
                action: op("create-page", "Create Page"),
                watch: op("watch-database-items", "Watch Database Items"),
                category: Some(ServiceCategory::Persist),
            },
            ServiceTag::Calendar => AppSpec {
                app: "Google Calendar",
                action: op("create-event", "Create Event"),
                watch: None,
                category: Some(ServiceCategory::Persist),
            },
            ServiceTag::Slack => AppSpec {
                app: "Slack",
                action: op("post-message", "Post Message"),
                watch: op("watch-messages", "Watch Messages"),
                category: Some(ServiceCategory::Notify),
            },
            ServiceTag::Gmail => AppSpec {
                app: "Gmail",
                action: op("send-email", "Send Email"),
                watch: op("watch-emails", "Watch Emails"),
                category: Some(ServiceCategory::Notify),
            },
        }
    }

    /// Whether this service can start a scenario by being watched.
    pub fn supports_watch(self) -> bool {
        self.app_spec().watch.is_some()
    }

    /// Whether this service contributes a downstream action module.
    pub fn has_action(self) -> bool {
        let spec = self.app_spec();
        spec.action.is_some() && spec.category.is_some()
    }
}
