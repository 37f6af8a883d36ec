use crate::core::QuestionType;

pub const ROTATION_OPTIONS: &[&str] = &["No Rotation", "Forward", "Backward", "Random"];
pub const RATING_SHAPES: &[&str] = &["star", "heart"];
pub const RATING_COUNT_RANGE: std::ops::RangeInclusive<i64> = 1..=10;
pub const DEFAULT_RATING_COUNT: i64 = 3;
pub const BUTTON_TEXT_MAX: usize = 24;

/// How a settings field is read, written and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    /// Free text, optionally capped to a number of characters.
    Text { max_len: Option<usize> },
    /// One of a fixed option list; absent reads as the first option.
    Select { options: &'static [&'static str] },
    Toggle,
    /// Multi-line rich text.
    Editor,
    /// Segmented button group of `(value, label)` pairs.
    Choice {
        options: &'static [(&'static str, &'static str)],
    },
    /// Rating count and shape, stored as `ratingCount` / `ratingShape`.
    RatingConfig,
    ResponseList,
    Image,
    /// Heading for branching rules. Holds no value yet.
    Branching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub spec: FieldSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub title: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has_responses(&self) -> bool {
        self.fields
            .iter()
            .any(|field| field.spec == FieldSpec::ResponseList)
    }
}

const fn field(name: &'static str, label: &'static str, spec: FieldSpec) -> Field {
    Field { name, label, spec }
}

const VARIABLE_NAME: Field = field("variableName", "Variable Name", FieldSpec::Text { max_len: None });
const QUESTION_TEXT: Field = field("questionText", "Question Text", FieldSpec::Editor);
const REQUIRED: Field = field("required", "Required", FieldSpec::Toggle);
const ROTATION: Field = field(
    "rotation",
    "Option Rotation",
    FieldSpec::Select {
        options: ROTATION_OPTIONS,
    },
);
const RESPONSES: Field = field("responses", "Responses", FieldSpec::ResponseList);
const IMAGE: Field = field("image", "Image or video", FieldSpec::Image);

static WELCOME: Schema = Schema {
    title: "Welcome Screen",
    fields: &[
        field("timeToComplete", "Time to complete", FieldSpec::Toggle),
        field("numberOfSubmissions", "Number of submissions", FieldSpec::Toggle),
        field(
            "buttonText",
            "Button",
            FieldSpec::Text {
                max_len: Some(BUTTON_TEXT_MAX),
            },
        ),
        IMAGE,
    ],
};

static RADIO: Schema = Schema {
    title: "Radio (Single Select) Settings",
    fields: &[
        VARIABLE_NAME,
        REQUIRED,
        field("isFirst", "Is first question ?", FieldSpec::Toggle),
        ROTATION,
        field("allowOther", "Allow Other", FieldSpec::Toggle),
        RESPONSES,
    ],
};

static RATING: Schema = Schema {
    title: "Rating Settings",
    fields: &[
        field(
            "questionType",
            "Question",
            FieldSpec::Choice {
                options: &[("text", "Text"), ("video", "Video")],
            },
        ),
        field(
            "answerType",
            "Answer",
            FieldSpec::Select {
                options: &["rating"],
            },
        ),
        REQUIRED,
        field("ratingConfig", "Rating Configuration", FieldSpec::RatingConfig),
        IMAGE,
        field("branching", "Branching", FieldSpec::Branching),
    ],
};

static TIMER: Schema = Schema {
    title: "Timer Settings",
    fields: &[QUESTION_TEXT, VARIABLE_NAME, REQUIRED],
};

static CHECKBOX: Schema = Schema {
    title: "Checkbox Settings",
    fields: &[QUESTION_TEXT, VARIABLE_NAME, REQUIRED, ROTATION, RESPONSES],
};

static GRID: Schema = Schema {
    title: "Grid Settings",
    fields: &[QUESTION_TEXT, VARIABLE_NAME, REQUIRED, RESPONSES],
};

static VIEW: Schema = Schema {
    title: "View Settings",
    fields: &[QUESTION_TEXT, VARIABLE_NAME],
};

static NUMBER: Schema = Schema {
    title: "Number Settings",
    fields: &[QUESTION_TEXT, VARIABLE_NAME, REQUIRED],
};

static TEXT: Schema = Schema {
    title: "Text Settings",
    fields: &[QUESTION_TEXT, VARIABLE_NAME, REQUIRED],
};

/// Schema of a supported type. `Unsupported` types have none.
pub fn schema_for(kind: &QuestionType) -> Option<&'static Schema> {
    let schema = match kind {
        QuestionType::Welcome => &WELCOME,
        QuestionType::Radio => &RADIO,
        QuestionType::Rating => &RATING,
        QuestionType::Timer => &TIMER,
        QuestionType::Checkbox => &CHECKBOX,
        QuestionType::Grid => &GRID,
        QuestionType::View => &VIEW,
        QuestionType::Number => &NUMBER,
        QuestionType::Text => &TEXT,
        QuestionType::Unsupported(_) => return None,
    };
    Some(schema)
}

/// Lookup by wire type name. Unknown names have no schema.
pub fn schema_for_key(key: &str) -> Option<&'static Schema> {
    schema_for(&QuestionType::from(key.to_string()))
}
