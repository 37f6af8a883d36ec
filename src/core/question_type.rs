use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::ui::style::Color;

/// Question kinds. Fixed when a question is created.
///
/// A wire name this build does not know loads as `Unsupported` and is written
/// back unchanged, so newer documents still open.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Welcome,
    Radio,
    Rating,
    Timer,
    Checkbox,
    Grid,
    View,
    Number,
    Text,
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question type `{0}`")]
pub struct QuestionTypeError(pub String);

/// Types offered by the "add content" dialog, in display order.
pub const ADDABLE: [QuestionType; 8] = [
    QuestionType::Radio,
    QuestionType::Rating,
    QuestionType::Timer,
    QuestionType::Checkbox,
    QuestionType::Grid,
    QuestionType::View,
    QuestionType::Number,
    QuestionType::Text,
];

impl QuestionType {
    pub fn key(&self) -> &str {
        match self {
            Self::Welcome => "welcome",
            Self::Radio => "radio",
            Self::Rating => "rating",
            Self::Timer => "timer",
            Self::Checkbox => "checkbox",
            Self::Grid => "grid",
            Self::View => "view",
            Self::Number => "number",
            Self::Text => "text",
            Self::Unsupported(key) => key.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome Screen",
            Self::Radio => "Radio (Single Select)",
            Self::Rating => "Rating",
            Self::Timer => "Timer",
            Self::Checkbox => "Checkbox",
            Self::Grid => "Grid",
            Self::View => "View",
            Self::Number => "Number",
            Self::Text => "Text",
            Self::Unsupported(_) => "Unsupported",
        }
    }

    pub fn is_welcome(&self) -> bool {
        matches!(self, Self::Welcome)
    }

    /// Whether the type carries an ordered response list.
    pub fn has_responses(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Grid)
    }

    pub fn node_color(&self) -> Color {
        match self {
            Self::Welcome => Color::DarkGrey,
            Self::Radio => Color::Magenta,
            Self::Grid => Color::Blue,
            Self::View => Color::Green,
            _ => Color::Cyan,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Case-insensitive filter over the labels shown in the add dialog.
    pub fn search(query: &str) -> Vec<QuestionType> {
        let needle = query.trim().to_lowercase();
        ADDABLE
            .into_iter()
            .filter(|kind| needle.is_empty() || kind.label().to_lowercase().contains(&needle))
            .collect()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<String> for QuestionType {
    fn from(key: String) -> Self {
        key.parse().unwrap_or(Self::Unsupported(key))
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Unsupported(key) => key,
            known => known.key().to_string(),
        }
    }
}

/// Parses known wire names only.
impl FromStr for QuestionType {
    type Err = QuestionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        std::iter::once(Self::Welcome)
            .chain(ADDABLE)
            .find(|kind| kind.key() == s)
            .ok_or_else(|| QuestionTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::QuestionType;

    #[test]
    fn parses_every_key() {
        for key in [
            "welcome", "radio", "rating", "timer", "checkbox", "grid", "view", "number", "text",
        ] {
            let kind: QuestionType = key.parse().expect("known type");
            assert_eq!(kind.key(), key);
        }
        assert!("slider".parse::<QuestionType>().is_err());
    }

    #[test]
    fn unknown_wire_name_is_kept() {
        let kind: QuestionType = serde_json::from_str(r#""slider""#).expect("any string loads");
        assert_eq!(kind, QuestionType::Unsupported("slider".to_string()));
        assert!(!kind.is_supported());
        assert_eq!(kind.key(), "slider");
        assert_eq!(serde_json::to_string(&kind).expect("encode"), r#""slider""#);

        let radio: QuestionType = serde_json::from_str(r#""radio""#).expect("radio");
        assert_eq!(radio, QuestionType::Radio);
    }

    #[test]
    fn search_matches_labels() {
        assert_eq!(QuestionType::search("single"), vec![QuestionType::Radio]);
        assert_eq!(QuestionType::search("NUM"), vec![QuestionType::Number]);
        assert!(QuestionType::search("radio (").contains(&QuestionType::Radio));
        assert_eq!(QuestionType::search("").len(), 8);
        assert!(QuestionType::search("zzz").is_empty());
    }

    #[test]
    fn welcome_is_never_addable() {
        assert!(!QuestionType::search("welcome").contains(&QuestionType::Welcome));
    }
}
