use std::sync::LazyLock;

use regex::Regex;

use crate::core::{Question, QuestionId, QuestionType};
use crate::state::store::QuestionStore;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Drawable};

const LABEL_CHARS: usize = 30;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<[^>]*>").expect("markup tag pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Start,
    Number(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowNode {
    pub id: QuestionId,
    pub kind: QuestionType,
    pub badge: Badge,
    pub label: String,
    pub color: Color,
    /// Response count, shown on radio nodes only.
    pub option_count: Option<usize>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEdge {
    pub from: QuestionId,
    pub to: QuestionId,
}

/// Linear chain of every question in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workflow {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
}

impl Workflow {
    pub fn project(store: &QuestionStore) -> Self {
        let selected = store.selected_id();
        let nodes: Vec<WorkflowNode> = store
            .iter()
            .map(|question| {
                let number = store.number_of(question.id());
                WorkflowNode {
                    id: question.id().clone(),
                    kind: question.kind().clone(),
                    badge: match number {
                        Some(n) => Badge::Number(n),
                        None => Badge::Start,
                    },
                    label: node_label(question, number),
                    color: question.kind().node_color(),
                    option_count: matches!(question.kind(), QuestionType::Radio)
                        .then(|| question.responses().len()),
                    selected: selected == Some(question.id()),
                }
            })
            .collect();

        let edges = nodes
            .windows(2)
            .map(|pair| WorkflowEdge {
                from: pair[0].id.clone(),
                to: pair[1].id.clone(),
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node(&self, id: &QuestionId) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}

/// First characters of the question text with markup stripped, or a
/// numbered fallback when the text is blank.
pub fn node_label(question: &Question, number: Option<usize>) -> String {
    let text = strip_tags(question.question_text());
    let text = text.trim();
    if text.is_empty() {
        return match number {
            Some(n) => format!("Question {n}"),
            None => question.kind().label().to_string(),
        };
    }
    if text.chars().count() <= LABEL_CHARS {
        return text.to_string();
    }
    let mut label: String = text.chars().take(LABEL_CHARS).collect();
    label.push_str("...");
    label
}

fn strip_tags(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").replace('\n', " ")
}

impl Drawable for Workflow {
    fn draw(&self) -> DrawOutput {
        let mut out = DrawOutput::default();
        if self.nodes.is_empty() {
            out.push(vec![Span::styled("No questions yet", Style::placeholder())]);
            return out;
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                out.push(vec![Span::styled("   │", Style::new().color(Color::DarkGrey))]);
            }
            let badge = match node.badge {
                Badge::Start => "▶".to_string(),
                Badge::Number(n) => n.to_string(),
            };
            let marker = if node.selected { "›" } else { " " };
            let mut line = vec![
                Span::styled(marker, Style::new().color(Color::Blue).bold()).no_wrap(),
                Span::styled(format!("[{badge}]"), Style::new().color(node.color).bold()).no_wrap(),
                Span::new(" "),
                Span::styled(
                    node.label.clone(),
                    if node.selected {
                        Style::new().bold()
                    } else {
                        Style::default()
                    },
                ),
            ];
            if let Some(count) = node.option_count {
                line.push(Span::styled(
                    format!("  ({count} options)"),
                    Style::new().color(Color::DarkGrey),
                ));
            }
            out.push(line);
        }
        out
    }
}
