use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::question_type::QuestionType;
use crate::core::response::Response;
use crate::core::value::Value;

pub const QUESTION_TEXT: &str = "questionText";
pub const DESCRIPTION: &str = "description";
pub const RESPONSES: &str = "responses";

const RESERVED: [&str; 3] = ["id", "type", RESPONSES];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Values seeded into freshly created questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionDefaults {
    pub welcome_text: String,
    pub welcome_button_text: String,
    pub radio_choice_count: usize,
}

impl Default for QuestionDefaults {
    fn default() -> Self {
        Self {
            welcome_text: "Hello, Thanks for joining. Please take 10 - 15 minutes to complete \
                           the survey. The survey is based on your personal preferences and choices"
                .to_string(),
            welcome_button_text: "lets go".to_string(),
            radio_choice_count: 4,
        }
    }
}

/// A single survey node.
///
/// Type-specific settings live in `fields`, keyed by their wire name. Entries
/// that do not apply to the current type are kept but never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default = "QuestionId::generate")]
    id: QuestionId,
    #[serde(rename = "type")]
    kind: QuestionType,
    #[serde(default)]
    question_text: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    responses: Vec<Response>,
    #[serde(flatten)]
    fields: IndexMap<String, Value>,
}

impl Question {
    /// A bare question with no type defaults applied.
    pub fn with_id(id: impl Into<QuestionId>, kind: QuestionType) -> Self {
        Self {
            id: id.into(),
            kind,
            question_text: String::new(),
            description: String::new(),
            responses: Vec::new(),
            fields: IndexMap::new(),
        }
    }

    /// A fully populated question of `kind` under a fresh id.
    pub fn create(kind: QuestionType, defaults: &QuestionDefaults) -> Self {
        let id = if kind.is_welcome() {
            QuestionId::new("welcome")
        } else {
            QuestionId::generate()
        };
        let mut question = Self::with_id(id, kind);
        question.apply_defaults(defaults);
        question
    }

    fn apply_defaults(&mut self, defaults: &QuestionDefaults) {
        match self.kind {
            QuestionType::Welcome => {
                self.question_text = defaults.welcome_text.clone();
                self.set_field("buttonText", defaults.welcome_button_text.as_str().into());
                self.set_field("timeToComplete", false.into());
                self.set_field("numberOfSubmissions", false.into());
                return;
            }
            QuestionType::Rating => {
                self.set_field("ratingCount", Value::Number(3));
                self.set_field("ratingShape", "star".into());
                self.set_field("questionType", "text".into());
                self.set_field("answerType", "rating".into());
                self.set_field("required", false.into());
            }
            QuestionType::Radio => {
                self.responses = (1..=defaults.radio_choice_count)
                    .map(Response::choice)
                    .collect();
            }
            _ => {}
        }
        self.set_field("variableName", "".into());
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn kind(&self) -> &QuestionType {
        &self.kind
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.question_text = text.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn set_responses(&mut self, responses: Vec<Response>) {
        self.responses = responses;
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Reads a field by wire name. Absent fields read as `Value::None`.
    pub fn get(&self, name: &str) -> Value {
        match name {
            QUESTION_TEXT => Value::Text(self.question_text.clone()),
            DESCRIPTION => Value::Text(self.description.clone()),
            _ => self.fields.get(name).cloned().unwrap_or_default(),
        }
    }

    /// Writes a field by wire name. Returns `false` for names that cannot be
    /// written generically (`id`, `type`, `responses`).
    pub fn set_field(&mut self, name: &str, value: Value) -> bool {
        if RESERVED.contains(&name) {
            return false;
        }
        match name {
            QUESTION_TEXT => self.question_text = value.to_text_scalar().unwrap_or_default(),
            DESCRIPTION => self.description = value.to_text_scalar().unwrap_or_default(),
            _ => {
                self.fields.insert(name.to_string(), value);
            }
        }
        true
    }

    pub fn text_field(&self, name: &str) -> String {
        self.get(name).to_text_scalar().unwrap_or_default()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).truthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_defaults_to_four_unique_choices() {
        let q = Question::create(QuestionType::Radio, &QuestionDefaults::default());
        assert_eq!(q.responses().len(), 4);
        assert_eq!(q.responses()[0], Response::choice(1));
        assert!(crate::core::response::duplicate_values(q.responses()).is_empty());
    }

    #[test]
    fn rating_defaults() {
        let q = Question::create(QuestionType::Rating, &QuestionDefaults::default());
        assert_eq!(q.get("ratingCount"), Value::Number(3));
        assert_eq!(q.text_field("ratingShape"), "star");
        assert!(!q.flag("required"));
        assert!(q.responses().is_empty());
    }

    #[test]
    fn welcome_uses_fixed_id_and_button() {
        let q = Question::create(QuestionType::Welcome, &QuestionDefaults::default());
        assert_eq!(q.id().as_str(), "welcome");
        assert_eq!(q.text_field("buttonText"), "lets go");
        assert!(!q.question_text().is_empty());
    }

    #[test]
    fn generated_ids_are_unique() {
        let defaults = QuestionDefaults::default();
        let a = Question::create(QuestionType::Text, &defaults);
        let b = Question::create(QuestionType::Text, &defaults);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn reserved_names_are_not_writable() {
        let mut q = Question::with_id("q1", QuestionType::Text);
        assert!(!q.set_field("type", "radio".into()));
        assert!(!q.set_field("id", "other".into()));
        assert_eq!(q.kind(), &QuestionType::Text);
        assert!(q.set_field(QUESTION_TEXT, "Hi".into()));
        assert_eq!(q.question_text(), "Hi");
    }

    #[test]
    fn absent_field_reads_as_none() {
        let q = Question::with_id("q1", QuestionType::Timer);
        assert_eq!(q.get("ratingCount"), Value::None);
        assert_eq!(q.text_field("variableName"), "");
    }

    #[test]
    fn json_shape_is_flat_camel_case() {
        let mut q = Question::with_id("q1", QuestionType::Rating);
        q.set_question_text("How?");
        q.set_field("ratingCount", Value::Number(5));
        let json = serde_json::to_value(&q).expect("serialize");
        assert_eq!(json["type"], "rating");
        assert_eq!(json["questionText"], "How?");
        assert_eq!(json["ratingCount"], 5);
    }

    #[test]
    fn unsupported_type_keeps_its_fields() {
        let json = r#"{"id":"s1","type":"slider","questionText":"How far?","min":0,"max":10}"#;
        let q: Question = serde_json::from_str(json).expect("decode");
        assert_eq!(q.kind(), &QuestionType::Unsupported("slider".to_string()));
        assert_eq!(q.question_text(), "How far?");
        let back = serde_json::to_value(&q).expect("encode");
        assert_eq!(back["type"], "slider");
        assert_eq!(back["max"], 10);
    }
}
