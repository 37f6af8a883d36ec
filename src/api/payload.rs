use serde::{Deserialize, Serialize};

use crate::core::Question;

/// Project-level settings sent alongside the questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMeta {
    pub title: String,
    pub description: String,
    pub language_ids: Vec<i64>,
    pub active: bool,
    /// RFC 3339 timestamps; absent means open-ended.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub reward_points: i64,
    pub code: String,
    pub project_type: String,
    pub mode: String,
    pub display_welcome_message: bool,
    pub welcome_message: String,
    pub display_thankyou_message: bool,
    pub thankyou_message: String,
    pub quotefull_message: String,
    pub terminate_message: String,
    pub navigation_message: String,
    pub participant_limit: i64,
    pub start_btn_text: String,
    pub complete_btn_text: String,
    pub previous_btn_text: String,
    pub next_btn_text: String,
    pub show_progress_bar: bool,
    pub answer_preview: bool,
}

impl ProjectMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPayload {
    #[serde(flatten)]
    pub meta: ProjectMeta,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ProjectPayload {
    pub fn new(meta: ProjectMeta, questions: Vec<Question>) -> Self {
        Self { meta, questions }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
