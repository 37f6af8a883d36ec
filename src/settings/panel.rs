use thiserror::Error;
use tracing::debug;

use crate::core::response::{self, letter_label};
use crate::core::{Question, ResponseKey, Value};
use crate::settings::schema::{
    DEFAULT_RATING_COUNT, FieldSpec, RATING_COUNT_RANGE, RATING_SHAPES, Schema, schema_for,
    schema_for_key,
};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Drawable};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("question type `{0}` has no settings")]
    UnsupportedType(String),
    #[error("`{0}` is not a setting of this question type")]
    UnknownField(String),
    #[error("`{value}` is not an option of `{field}`")]
    InvalidOption { field: String, value: String },
    #[error("`{0}` cannot be set directly")]
    ReadOnly(String),
    #[error("this question type has no response list")]
    NoResponses,
    #[error("response index {index} out of range (have {len})")]
    ResponseIndex { index: usize, len: usize },
    #[error("rating count must be between 1 and 10, got {0}")]
    RatingCount(i64),
}

/// An edit made through the settings panel.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Set { name: String, value: Value },
    AddResponse,
    DeleteResponse(usize),
    EditResponse {
        index: usize,
        key: ResponseKey,
        text: String,
    },
    ToggleAnchor(usize),
    RatingCount(i64),
    RatingShape(String),
}

impl FieldEdit {
    pub fn set(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Set {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRow {
    pub letter: String,
    pub option: String,
    pub value: String,
    pub anchor: bool,
}

/// A rendered settings control with its current value resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldView {
    Text {
        name: &'static str,
        label: &'static str,
        value: String,
        /// `(used, max)` character counter for capped fields.
        counter: Option<(usize, usize)>,
    },
    Select {
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        selected: String,
    },
    Toggle {
        name: &'static str,
        label: &'static str,
        on: bool,
    },
    Editor {
        name: &'static str,
        label: &'static str,
        value: String,
    },
    Choice {
        name: &'static str,
        label: &'static str,
        options: &'static [(&'static str, &'static str)],
        selected: String,
    },
    RatingConfig {
        label: &'static str,
        count: i64,
        shape: String,
    },
    Responses {
        rows: Vec<ResponseRow>,
        duplicates: Vec<String>,
    },
    Image {
        name: &'static str,
        label: &'static str,
        source: Option<String>,
    },
    Branching {
        label: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: &'static str,
    pub type_label: &'static str,
    pub fields: Vec<FieldView>,
}

/// Renders the panel for the question's own type. A type without a schema
/// renders nothing.
pub fn render(question: &Question) -> Option<PanelView> {
    render_for_key(question.kind().key(), question)
}

/// Renders the panel for a type given by wire name. Unknown names render nothing.
pub fn render_for_key(type_key: &str, question: &Question) -> Option<PanelView> {
    schema_for_key(type_key).map(|schema| render_schema(schema, question))
}

fn render_schema(schema: &'static Schema, question: &Question) -> PanelView {
    let fields = schema
        .fields
        .iter()
        .map(|field| match field.spec {
            FieldSpec::Text { max_len } => {
                let value = question.text_field(field.name);
                FieldView::Text {
                    name: field.name,
                    label: field.label,
                    counter: max_len.map(|max| (value.chars().count(), max)),
                    value,
                }
            }
            FieldSpec::Select { options } => FieldView::Select {
                name: field.name,
                label: field.label,
                options,
                selected: read_option(question, field.name, options.iter().copied()),
            },
            FieldSpec::Toggle => FieldView::Toggle {
                name: field.name,
                label: field.label,
                on: question.flag(field.name),
            },
            FieldSpec::Editor => FieldView::Editor {
                name: field.name,
                label: field.label,
                value: question.text_field(field.name),
            },
            FieldSpec::Choice { options } => FieldView::Choice {
                name: field.name,
                label: field.label,
                options,
                selected: read_option(question, field.name, options.iter().map(|(v, _)| *v)),
            },
            FieldSpec::RatingConfig => FieldView::RatingConfig {
                label: field.label,
                count: rating_count(question),
                shape: rating_shape(question),
            },
            FieldSpec::ResponseList => FieldView::Responses {
                rows: question
                    .responses()
                    .iter()
                    .enumerate()
                    .map(|(idx, r)| ResponseRow {
                        letter: letter_label(idx),
                        option: r.option.clone(),
                        value: r.value.clone(),
                        anchor: r.anchor,
                    })
                    .collect(),
                duplicates: response::duplicate_values(question.responses())
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
            FieldSpec::Image => FieldView::Image {
                name: field.name,
                label: field.label,
                source: Some(question.text_field(field.name)).filter(|s| !s.is_empty()),
            },
            FieldSpec::Branching => FieldView::Branching { label: field.label },
        })
        .collect();

    PanelView {
        title: schema.title,
        type_label: question.kind().label(),
        fields,
    }
}

fn read_option<'a>(
    question: &Question,
    name: &str,
    mut options: impl Iterator<Item = &'a str>,
) -> String {
    let stored = question.text_field(name);
    if stored.is_empty() {
        return options.next().unwrap_or_default().to_string();
    }
    stored
}

pub fn rating_count(question: &Question) -> i64 {
    question
        .get("ratingCount")
        .as_number()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_RATING_COUNT)
}

pub fn rating_shape(question: &Question) -> String {
    let shape = question.text_field("ratingShape");
    if shape.is_empty() {
        return RATING_SHAPES[0].to_string();
    }
    shape
}

/// Applies `edit` to a copy of `question`. The caller writes the result back
/// through the store.
pub fn apply(question: &Question, edit: FieldEdit) -> Result<Question, SettingsError> {
    let schema = schema_for(question.kind())
        .ok_or_else(|| SettingsError::UnsupportedType(question.kind().key().to_string()))?;
    let mut next = question.clone();
    match edit {
        FieldEdit::Set { name, value } => {
            let field = schema
                .field(&name)
                .ok_or_else(|| SettingsError::UnknownField(name.clone()))?;
            let value = coerce(&name, field.spec, value)?;
            debug!(question_id = %question.id(), field = %name, "setting changed");
            next.set_field(&name, value);
        }
        FieldEdit::AddResponse => {
            require_responses(schema)?;
            next.set_responses(response::append(question.responses()));
        }
        FieldEdit::DeleteResponse(index) => {
            require_responses(schema)?;
            check_index(question, index)?;
            next.set_responses(response::remove(question.responses(), index));
        }
        FieldEdit::EditResponse { index, key, text } => {
            require_responses(schema)?;
            check_index(question, index)?;
            next.set_responses(response::edit(question.responses(), index, key, &text));
        }
        FieldEdit::ToggleAnchor(index) => {
            require_responses(schema)?;
            check_index(question, index)?;
            next.set_responses(response::toggle_anchor(question.responses(), index));
        }
        FieldEdit::RatingCount(count) => {
            require_rating(schema)?;
            if !RATING_COUNT_RANGE.contains(&count) {
                return Err(SettingsError::RatingCount(count));
            }
            next.set_field("ratingCount", Value::Number(count));
        }
        FieldEdit::RatingShape(shape) => {
            require_rating(schema)?;
            if !RATING_SHAPES.contains(&shape.as_str()) {
                return Err(SettingsError::InvalidOption {
                    field: "ratingShape".to_string(),
                    value: shape,
                });
            }
            next.set_field("ratingShape", Value::Text(shape));
        }
    }
    Ok(next)
}

fn coerce(name: &str, spec: FieldSpec, value: Value) -> Result<Value, SettingsError> {
    match spec {
        FieldSpec::Text { max_len } => {
            let text = value.to_text_scalar().unwrap_or_default();
            Ok(Value::Text(match max_len {
                Some(max) => text.chars().take(max).collect(),
                None => text,
            }))
        }
        FieldSpec::Toggle => Ok(Value::Bool(value.truthy())),
        FieldSpec::Select { options } => one_of(name, value, options.iter().copied()),
        FieldSpec::Choice { options } => one_of(name, value, options.iter().map(|(v, _)| *v)),
        FieldSpec::Editor | FieldSpec::Image => {
            Ok(Value::Text(value.to_text_scalar().unwrap_or_default()))
        }
        FieldSpec::RatingConfig | FieldSpec::ResponseList | FieldSpec::Branching => {
            Err(SettingsError::ReadOnly(name.to_string()))
        }
    }
}

fn one_of<'a>(
    name: &str,
    value: Value,
    mut options: impl Iterator<Item = &'a str>,
) -> Result<Value, SettingsError> {
    let text = value.to_text_scalar().unwrap_or_default();
    if options.any(|option| option == text) {
        return Ok(Value::Text(text));
    }
    Err(SettingsError::InvalidOption {
        field: name.to_string(),
        value: text,
    })
}

fn require_responses(schema: &Schema) -> Result<(), SettingsError> {
    if schema.has_responses() {
        Ok(())
    } else {
        Err(SettingsError::NoResponses)
    }
}

fn require_rating(schema: &Schema) -> Result<(), SettingsError> {
    if schema
        .fields
        .iter()
        .any(|field| field.spec == FieldSpec::RatingConfig)
    {
        Ok(())
    } else {
        Err(SettingsError::UnknownField("ratingConfig".to_string()))
    }
}

fn check_index(question: &Question, index: usize) -> Result<(), SettingsError> {
    let len = question.responses().len();
    if index < len {
        Ok(())
    } else {
        Err(SettingsError::ResponseIndex { index, len })
    }
}

impl Drawable for PanelView {
    fn draw(&self) -> DrawOutput {
        let label_style = Style::new().color(Color::DarkGrey);
        let mut out = DrawOutput::default();
        out.push(vec![
            Span::styled(self.title, Style::new().bold()).no_wrap(),
            Span::styled(format!("  [{}]", self.type_label), label_style).no_wrap(),
        ]);

        for field in &self.fields {
            match field {
                FieldView::Text {
                    label,
                    value,
                    counter,
                    ..
                } => {
                    let mut line = vec![
                        Span::styled(format!("{label}: "), label_style),
                        Span::new(value.clone()),
                    ];
                    if let Some((used, max)) = counter {
                        line.push(Span::styled(format!("  {used}/{max}"), label_style));
                    }
                    out.push(line);
                }
                FieldView::Select {
                    label, selected, ..
                } => out.push(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::new(format!("{selected} ▾")),
                ]),
                FieldView::Toggle { label, on, .. } => out.push(vec![
                    Span::new(if *on { "[x] " } else { "[ ] " }),
                    Span::new(*label),
                ]),
                FieldView::Editor { label, value, .. } => {
                    out.push(vec![Span::styled(format!("{label}:"), label_style)]);
                    for line in value.split('\n') {
                        out.push(vec![Span::new(format!("  {line}"))]);
                    }
                }
                FieldView::Choice {
                    label,
                    options,
                    selected,
                    ..
                } => {
                    let mut line = vec![Span::styled(format!("{label}: "), label_style)];
                    for (value, text) in options.iter() {
                        let style = if *value == selected.as_str() {
                            Style::new().color(Color::Blue).bold()
                        } else {
                            Style::default()
                        };
                        line.push(Span::styled(format!("({text}) "), style));
                    }
                    out.push(line);
                }
                FieldView::RatingConfig {
                    label,
                    count,
                    shape,
                } => out.push(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::new(format!("{count} × {shape}")),
                ]),
                FieldView::Responses { rows, duplicates } => {
                    out.push(vec![
                        Span::styled("Responses", Style::new().bold()),
                        Span::styled("  + Add", Style::new().color(Color::Blue)),
                    ]);
                    for row in rows {
                        let mut line = vec![
                            Span::new(format!("  {} ", row.letter)),
                            Span::new(row.option.clone()),
                            Span::styled(format!(" = {}", row.value), label_style),
                        ];
                        if row.anchor {
                            line.push(Span::styled(" ⚓", Style::new().color(Color::Yellow)));
                        }
                        out.push(line);
                    }
                    if !duplicates.is_empty() {
                        out.push(vec![Span::styled(
                            format!("  duplicate values: {}", duplicates.join(", ")),
                            Style::new().color(Color::Yellow),
                        )]);
                    }
                }
                FieldView::Image { label, source, .. } => out.push(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::new(source.clone().unwrap_or_else(|| "+ Add".to_string())),
                ]),
                FieldView::Branching { label } => out.push(vec![
                    Span::styled(*label, Style::new().bold()),
                    Span::styled("  +", Style::new().color(Color::Blue)),
                ]),
            }
        }
        out
    }
}
