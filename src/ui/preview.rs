use unicode_width::UnicodeWidthStr;

use crate::core::response::letter_label;
use crate::core::{Question, QuestionType};
use crate::input::CursorPos;
use crate::runtime::event::EditableField;
use crate::settings::panel::{rating_count, rating_shape};
use crate::ui::frame_json::lines_to_json;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::inline_editable::{ClickTarget, InlineEditable};
use crate::widgets::traits::{DrawOutput, Drawable, Interactive};

pub const QUESTION_PLACEHOLDER: &str = "Your question here. Recall information with @";
pub const DESCRIPTION_PLACEHOLDER: &str = "Description (optional)";

/// What a preview row is made of, for pointer hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    QuestionText,
    Description,
    Option(usize),
    RatingScale,
    AddChoice,
    StartButton,
    Static,
}

impl Region {
    fn field(self) -> Option<EditableField> {
        match self {
            Region::QuestionText => Some(EditableField::QuestionText),
            Region::Description => Some(EditableField::Description),
            _ => None,
        }
    }

    fn is_interactive(self) -> bool {
        matches!(
            self,
            Region::Option(_) | Region::RatingScale | Region::AddChoice | Region::StartButton
        )
    }
}

/// Rendered preview of one question, one region per line.
#[derive(Debug, Clone, Default)]
pub struct PreviewView {
    pub lines: Vec<SpanLine>,
    pub regions: Vec<Region>,
    pub cursor: Option<CursorPos>,
}

/// Inline editors bound to the previewed question.
pub struct PreviewEditors<'a> {
    pub question_text: &'a InlineEditable,
    pub description: &'a InlineEditable,
}

impl PreviewView {
    pub fn region_at(&self, row: usize) -> Option<Region> {
        self.regions.get(row).copied()
    }

    /// Classifies a press on `row` relative to the editor of `active`.
    pub fn hit_test(&self, row: usize, active: EditableField) -> ClickTarget {
        match self.region_at(row) {
            Some(region) if region.field() == Some(active) => ClickTarget::Inside,
            Some(region) if region.is_interactive() => ClickTarget::InteractiveOption,
            _ => ClickTarget::Outside,
        }
    }

    /// The editable field drawn on `row`, if any.
    pub fn editable_at(&self, row: usize) -> Option<EditableField> {
        self.region_at(row).and_then(Region::field)
    }

    pub fn to_json(&self) -> serde_json::Value {
        lines_to_json(&self.lines, self.cursor)
    }

    fn push(&mut self, line: SpanLine, region: Region) {
        self.lines.push(line);
        self.regions.push(region);
    }

    fn blank(&mut self) {
        self.push(Vec::new(), Region::Static);
    }

    /// Draws `editor` with `prefix` spans on its first line, tracking the cursor.
    fn push_editor(&mut self, prefix: Vec<Span>, editor: &InlineEditable, region: Region) {
        let prefix_width: usize = prefix.iter().map(|span| span.text.width()).sum();
        let start_row = self.lines.len();
        let drawn = editor.draw();
        for (idx, line) in drawn.lines.into_iter().enumerate() {
            let mut row = if idx == 0 {
                prefix.clone()
            } else {
                vec![Span::new(" ".repeat(prefix_width))]
            };
            row.extend(line);
            self.push(row, region);
        }
        if let Some(pos) = editor.cursor_pos() {
            self.cursor = Some(CursorPos {
                col: pos.col.saturating_add(prefix_width.min(u16::MAX as usize) as u16),
                row: pos.row.saturating_add(start_row.min(u16::MAX as usize) as u16),
            });
        }
    }
}

impl Drawable for PreviewView {
    fn draw(&self) -> DrawOutput {
        DrawOutput {
            lines: self.lines.clone(),
        }
    }
}

/// Projects `question` for display. `number` is its position among
/// non-welcome questions. Never touches the store.
pub fn render(question: &Question, number: Option<usize>, editors: &PreviewEditors<'_>) -> PreviewView {
    let mut view = PreviewView::default();
    if question.kind().is_welcome() {
        render_welcome(&mut view, question);
        return view;
    }

    let header = match number {
        Some(n) => format!("{n} → "),
        None => "→ ".to_string(),
    };
    view.push_editor(
        vec![Span::styled(header, Style::new().color(Color::Blue).bold()).no_wrap()],
        editors.question_text,
        Region::QuestionText,
    );
    view.push_editor(vec![Span::new("  ")], editors.description, Region::Description);
    view.blank();

    match question.kind() {
        QuestionType::Rating => render_rating(&mut view, question),
        QuestionType::Radio => render_radio(&mut view, question),
        _ => render_default(&mut view, question),
    }
    view
}

/// Placeholder shown when no question is selected.
pub fn empty() -> PreviewView {
    let mut view = PreviewView::default();
    view.push(
        vec![Span::styled("Select a question to edit", Style::placeholder())],
        Region::Static,
    );
    view
}

fn render_welcome(view: &mut PreviewView, question: &Question) {
    for line in question.question_text().split('\n') {
        view.push(vec![Span::new(line.to_string())], Region::Static);
    }
    view.blank();
    view.push(
        vec![Span::styled(DESCRIPTION_PLACEHOLDER, Style::placeholder())],
        Region::Static,
    );
    let button = question.text_field("buttonText");
    let button = if button.is_empty() { "lets go".to_string() } else { button };
    view.push(
        vec![Span::styled(
            format!("[ {button} ]"),
            Style::new().color(Color::White).background(Color::Blue).bold(),
        )
        .no_wrap()],
        Region::StartButton,
    );
    view.push(
        vec![Span::styled("press Enter", Style::new().color(Color::DarkGrey))],
        Region::Static,
    );
    if question.flag("timeToComplete") {
        view.push(
            vec![Span::styled("⏱ Takes X minutes", Style::new().color(Color::DarkGrey))],
            Region::Static,
        );
    }
}

fn render_rating(view: &mut PreviewView, question: &Question) {
    let count = rating_count(question);
    let glyph = match rating_shape(question).as_str() {
        "heart" => "♡",
        _ => "☆",
    };
    let mut shapes = Vec::new();
    let mut numbers = Vec::new();
    for n in 1..=count {
        let sep = if n == 1 { "" } else { "  " };
        shapes.push(Span::styled(format!("{sep}{glyph}"), Style::new().color(Color::Yellow)));
        numbers.push(Span::styled(format!("{sep}{n}"), Style::new().color(Color::DarkGrey)));
    }
    view.push(shapes, Region::RatingScale);
    view.push(numbers, Region::RatingScale);
}

fn render_radio(view: &mut PreviewView, question: &Question) {
    if question.responses().is_empty() {
        view.push(
            vec![Span::styled("No options added yet", Style::placeholder())],
            Region::Static,
        );
    }
    for (idx, response) in question.responses().iter().enumerate() {
        view.push(
            vec![
                Span::styled(format!("{} ", letter_label(idx)), Style::new().bold()),
                Span::new(response.option.clone()),
            ],
            Region::Option(idx),
        );
    }
    view.push(
        vec![Span::styled("+ Add choice", Style::new().color(Color::Blue))],
        Region::AddChoice,
    );
}

fn render_default(view: &mut PreviewView, question: &Question) {
    for (idx, response) in question.responses().iter().enumerate() {
        view.push(
            vec![Span::new(format!("  {}", response.option))],
            Region::Option(idx),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::question::{DESCRIPTION, QUESTION_TEXT};
    use crate::core::{QuestionDefaults, Response};
    use crate::runtime::event::ValueTarget;
    use crate::ui::span::plain_text;

    fn editors_for(question: &Question) -> (InlineEditable, InlineEditable) {
        (
            InlineEditable::new(ValueTarget::new(question.id().clone(), QUESTION_TEXT), QUESTION_PLACEHOLDER)
                .with_value(question.question_text()),
            InlineEditable::new(ValueTarget::new(question.id().clone(), DESCRIPTION), DESCRIPTION_PLACEHOLDER)
                .with_value(question.description()),
        )
    }

    fn text_of(view: &PreviewView) -> Vec<String> {
        view.lines.iter().map(|line| plain_text(line)).collect()
    }

    #[test]
    fn radio_preview_lists_lettered_choices() {
        let q = Question::create(QuestionType::Radio, &QuestionDefaults::default());
        let (text, desc) = editors_for(&q);
        let view = render(&q, Some(2), &PreviewEditors { question_text: &text, description: &desc });
        let lines = text_of(&view);
        assert_eq!(lines[0], format!("2 → {QUESTION_PLACEHOLDER}"));
        assert!(lines.contains(&"A Choice 1".to_string()));
        assert!(lines.contains(&"D Choice 4".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("+ Add choice"));
    }

    #[test]
    fn radio_without_options_says_so() {
        let q = Question::with_id("r", QuestionType::Radio);
        let (text, desc) = editors_for(&q);
        let view = render(&q, Some(1), &PreviewEditors { question_text: &text, description: &desc });
        assert!(text_of(&view).contains(&"No options added yet".to_string()));
    }

    #[test]
    fn rating_preview_numbers_each_shape() {
        let mut q = Question::create(QuestionType::Rating, &QuestionDefaults::default());
        q.set_field("ratingCount", crate::core::Value::Number(5));
        let (text, desc) = editors_for(&q);
        let view = render(&q, Some(1), &PreviewEditors { question_text: &text, description: &desc });
        let lines = text_of(&view);
        assert!(lines.contains(&"☆  ☆  ☆  ☆  ☆".to_string()));
        assert!(lines.contains(&"1  2  3  4  5".to_string()));
    }

    #[test]
    fn welcome_preview_shows_button() {
        let mut q = Question::create(QuestionType::Welcome, &QuestionDefaults::default());
        q.set_field("timeToComplete", true.into());
        let (text, desc) = editors_for(&q);
        let view = render(&q, None, &PreviewEditors { question_text: &text, description: &desc });
        let lines = text_of(&view);
        assert!(lines.contains(&"[ lets go ]".to_string()));
        assert!(lines.contains(&"press Enter".to_string()));
        assert!(lines.iter().any(|l| l.contains("Takes X minutes")));
    }

    #[test]
    fn hit_test_classifies_rows() {
        let mut q = Question::create(QuestionType::Radio, &QuestionDefaults::default());
        q.set_responses(vec![Response::choice(1)]);
        let (text, desc) = editors_for(&q);
        let view = render(&q, Some(1), &PreviewEditors { question_text: &text, description: &desc });

        assert_eq!(view.hit_test(0, EditableField::QuestionText), ClickTarget::Inside);
        assert_eq!(view.hit_test(1, EditableField::QuestionText), ClickTarget::Outside);
        assert_eq!(view.hit_test(1, EditableField::Description), ClickTarget::Inside);
        assert_eq!(view.hit_test(3, EditableField::QuestionText), ClickTarget::InteractiveOption);
        assert_eq!(view.hit_test(4, EditableField::QuestionText), ClickTarget::InteractiveOption);
        assert_eq!(view.hit_test(99, EditableField::QuestionText), ClickTarget::Outside);
    }

    #[test]
    fn cursor_is_offset_past_header() {
        let q = Question::with_id("t", QuestionType::Text);
        let (mut text, desc) = editors_for(&q);
        text.begin();
        text.on_key(crate::input::KeyEvent::plain(crate::input::KeyCode::Char('a')));
        let view = render(&q, Some(3), &PreviewEditors { question_text: &text, description: &desc });
        assert_eq!(view.cursor, Some(CursorPos { col: 5, row: 0 }));
        assert_eq!(view.to_json()["cursor"]["col"], 5);
    }
}
