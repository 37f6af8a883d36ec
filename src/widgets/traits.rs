use crate::core::value::Value;
use crate::input::{CursorPos, KeyEvent};
use crate::runtime::event::{ValueChange, ValueTarget, WidgetAction};
use crate::ui::span::SpanLine;

// ---------------------------------------------------------------------------
// Render output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

impl DrawOutput {
    pub fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn draw(&self) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn value_changed(target: ValueTarget, value: Value) -> Self {
        Self::with_action(WidgetAction::ValueChanged {
            change: ValueChange::new(target, value),
        })
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }
}
