use crate::core::{QuestionId, QuestionType, Value};
use crate::input::KeyEvent;
use crate::settings::FieldEdit;

/// Where a widget's committed value is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTarget {
    pub question: QuestionId,
    pub field: String,
}

impl ValueTarget {
    pub fn new(question: impl Into<QuestionId>, field: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            field: field.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub target: ValueTarget,
    pub value: Value,
}

impl ValueChange {
    pub fn new(target: ValueTarget, value: Value) -> Self {
        Self { target, value }
    }
}

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the form builder.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    ValueChanged { change: ValueChange },
}

/// Which inline-editable region of the selected question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    QuestionText,
    Description,
}

/// User interactions dispatched to the form builder, applied strictly in order.
#[derive(Debug, Clone)]
pub enum FormAction {
    AddQuestion(QuestionType),
    Select(QuestionId),
    Delete(QuestionId),
    Move { id: QuestionId, index: usize },
    /// A settings-panel edit against the selected question.
    Edit(FieldEdit),
    BeginEdit(EditableField),
    Key(KeyEvent),
    /// Pointer press on a row of the rendered preview; rows past the end are outside it.
    Click { row: usize },
    Blur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Whether repeating the action that failed may succeed.
    pub retryable: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn error(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            retryable,
        }
    }
}
