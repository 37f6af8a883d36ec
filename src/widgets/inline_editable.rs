use tracing::trace;

use crate::core::Value;
use crate::input::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::runtime::event::ValueTarget;
use crate::ui::span::Span;
use crate::ui::style::Style;
use crate::widgets::text_edit;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive};

/// Classification of a pointer press made while an edit session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the editable region's own container.
    Inside,
    /// An option, button or nested control rendered next to the text.
    InteractiveOption,
    /// Anything else.
    Outside,
}

/// Text region edited in place inside the preview.
///
/// While a session is open the draft is owned by the widget: external value
/// updates are recorded but never written over the draft. Ending the session
/// by commit emits exactly one `ValueChanged`; cancelling emits nothing.
#[derive(Debug, Clone)]
pub struct InlineEditable {
    target: ValueTarget,
    placeholder: String,
    style: Style,
    value: String,
    last_external_value: String,
    editing: bool,
    draft: String,
    cursor: usize,
}

impl InlineEditable {
    pub fn new(target: ValueTarget, placeholder: impl Into<String>) -> Self {
        Self {
            target,
            placeholder: placeholder.into(),
            style: Style::default(),
            value: String::new(),
            last_external_value: String::new(),
            editing: false,
            draft: String::new(),
            cursor: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.last_external_value = value.clone();
        self.draft = value.clone();
        self.value = value;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn target(&self) -> &ValueTarget {
        &self.target
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Opens an edit session seeded from the current value. No-op if one is open.
    pub fn begin(&mut self) -> InteractionResult {
        if self.editing {
            return InteractionResult::consumed();
        }
        self.editing = true;
        self.draft = self.value.clone();
        self.cursor = text_edit::char_count(&self.draft);
        trace!(field = %self.target.field, "inline edit started");
        InteractionResult::handled()
    }

    /// Applies a value coming from the store. Returns whether the surface changed.
    pub fn sync_external(&mut self, value: &str) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value.to_string();
        if self.editing {
            return false;
        }
        self.last_external_value = self.value.clone();
        self.draft = self.value.clone();
        true
    }

    /// Ends the session, writing the draft back verbatim.
    pub fn commit(&mut self) -> InteractionResult {
        if !self.editing {
            return InteractionResult::ignored();
        }
        self.editing = false;
        let text = self.draft.clone();
        self.value = text.clone();
        self.last_external_value = text.clone();
        trace!(field = %self.target.field, "inline edit committed");
        InteractionResult::value_changed(self.target.clone(), Value::Text(text))
    }

    /// Ends the session restoring the last external value, without writing.
    pub fn cancel(&mut self) -> InteractionResult {
        if !self.editing {
            return InteractionResult::ignored();
        }
        self.editing = false;
        self.draft = self.last_external_value.clone();
        if self.value != self.last_external_value {
            // An external update arrived mid-session; surface it now.
            self.last_external_value = self.value.clone();
            self.draft = self.value.clone();
        }
        trace!(field = %self.target.field, "inline edit cancelled");
        InteractionResult::handled()
    }

    pub fn blur(&mut self) -> InteractionResult {
        self.commit()
    }

    pub fn on_click(&mut self, target: ClickTarget) -> InteractionResult {
        if !self.editing {
            return InteractionResult::ignored();
        }
        match target {
            ClickTarget::Inside | ClickTarget::InteractiveOption => InteractionResult::consumed(),
            ClickTarget::Outside => self.blur(),
        }
    }

    fn edited(&self) -> InteractionResult {
        InteractionResult::handled()
    }
}

impl Interactive for InlineEditable {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.editing {
            return InteractionResult::ignored();
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                text_edit::insert_char(&mut self.draft, &mut self.cursor, '\n');
                self.edited()
            }
            KeyCode::Enter => self.commit(),
            KeyCode::Esc => self.cancel(),
            KeyCode::Char('w') if ctrl => {
                if text_edit::delete_word_left(&mut self.draft, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::consumed()
            }
            KeyCode::Char(ch) if !ctrl => {
                text_edit::insert_char(&mut self.draft, &mut self.cursor, ch);
                self.edited()
            }
            KeyCode::Backspace if ctrl => {
                if text_edit::delete_word_left(&mut self.draft, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::consumed()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.draft, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::consumed()
            }
            KeyCode::Delete if ctrl => {
                if text_edit::delete_word_right(&mut self.draft, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::consumed()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.draft, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::consumed()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.draft) {
                    return InteractionResult::handled();
                }
                InteractionResult::consumed()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.draft) {
                    return InteractionResult::handled();
                }
                InteractionResult::consumed()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.draft);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.editing
            .then(|| text_edit::cursor_position(&self.draft, self.cursor))
    }
}

impl Drawable for InlineEditable {
    fn draw(&self) -> DrawOutput {
        let text = if self.editing { &self.draft } else { &self.value };
        if text.trim().is_empty() && !self.editing {
            return DrawOutput {
                lines: vec![vec![Span::styled(self.placeholder.clone(), Style::placeholder())]],
            };
        }
        DrawOutput {
            lines: text
                .split('\n')
                .map(|line| vec![Span::styled(line.to_string(), self.style)])
                .collect(),
        }
    }
}
