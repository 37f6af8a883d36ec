use std::cell::RefCell;

use survey_builder::api::{ApiError, ProjectAck, ProjectApi, ProjectPayload};
use survey_builder::config::BuilderConfig;
use survey_builder::core::response::{self, ResponseKey};
use survey_builder::core::{Question, QuestionDefaults, QuestionId, QuestionType, Response};
use survey_builder::input::{KeyCode, KeyEvent};
use survey_builder::runtime::{
    EditableField, Effect, FormAction, FormBuilder, Notification, NotificationLevel,
};
use survey_builder::settings::FieldEdit;
use survey_builder::state::{QuestionStore, StoreError};
use survey_builder::ui::span::plain_text;
use survey_builder::ui::workflow::Badge;

/// Records every payload and answers with a canned result.
struct FakeProjectApi {
    sent: RefCell<Vec<ProjectPayload>>,
    fail_with: Option<(u16, &'static str)>,
}

impl FakeProjectApi {
    fn accepting() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_with: None,
        }
    }

    fn rejecting(status: u16, body: &'static str) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_with: Some((status, body)),
        }
    }
}

impl ProjectApi for FakeProjectApi {
    fn create_project(&self, payload: &ProjectPayload) -> Result<ProjectAck, ApiError> {
        self.sent.borrow_mut().push(payload.clone());
        match self.fail_with {
            Some((status, body)) => Err(ApiError::rejected(status, body)),
            None => Ok(ProjectAck {
                status: 201,
                body: serde_json::json!({ "id": 42 }),
            }),
        }
    }
}

fn typed(builder: &mut FormBuilder, text: &str) -> Vec<Effect> {
    KeyEvent::typed(text)
        .into_iter()
        .flat_map(|key| builder.dispatch(FormAction::Key(key)))
        .collect()
}

fn committed(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Action(_)))
        .count()
}

fn notifications(effects: &[Effect]) -> Vec<&Notification> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notification) => Some(notification),
            _ => None,
        })
        .collect()
}

#[test]
fn numbering_skips_welcome_and_follows_order() {
    let mut builder = FormBuilder::new(BuilderConfig::default());
    for kind in [QuestionType::Radio, QuestionType::Rating, QuestionType::Text] {
        builder.dispatch(FormAction::AddQuestion(kind));
    }

    let badges: Vec<Badge> = builder.workflow().nodes.iter().map(|node| node.badge).collect();
    assert_eq!(
        badges,
        vec![Badge::Start, Badge::Number(1), Badge::Number(2), Badge::Number(3)]
    );

    let last = builder.store().selected_id().cloned().expect("text question");
    builder.dispatch(FormAction::Move { id: last.clone(), index: 1 });
    assert_eq!(builder.store().number_of(&last), Some(1));
    assert_eq!(builder.store().number_of(&QuestionId::new("welcome")), None);
}

#[test]
fn updating_with_an_unchanged_question_is_a_no_op() {
    let defaults = QuestionDefaults::default();
    let radio = Question::create(QuestionType::Radio, &defaults);
    let mut store = QuestionStore::from_questions([
        Question::create(QuestionType::Welcome, &defaults),
        radio.clone(),
    ])
    .expect("store");

    let before: Vec<Question> = store.iter().cloned().collect();
    let revision = store.revision();
    store.update_question(radio.clone()).expect("update");
    assert_eq!(store.iter().cloned().collect::<Vec<_>>(), before);
    assert_eq!(store.revision(), revision);

    let stray = Question::with_id("missing", QuestionType::Text);
    assert_eq!(
        store.update_question(stray),
        Err(StoreError::UnknownQuestion(QuestionId::new("missing")))
    );
}

#[test]
fn deleting_the_selected_question_falls_back_to_the_first() {
    let mut builder = FormBuilder::new(BuilderConfig::default());
    builder.dispatch(FormAction::AddQuestion(QuestionType::Checkbox));
    let checkbox = builder.store().selected_id().cloned().expect("checkbox");

    builder.dispatch(FormAction::Delete(checkbox.clone()));
    assert!(!builder.store().contains(&checkbox));
    assert_eq!(builder.store().selected_id(), Some(&QuestionId::new("welcome")));

    let mut store = QuestionStore::from_questions([Question::with_id("only", QuestionType::Text)])
        .expect("store");
    store.delete_question(&QuestionId::new("only")).expect("delete");
    assert!(store.selected().is_none());
}

#[test]
fn editing_one_response_leaves_the_others_alone() {
    let original: Vec<Response> = (1..=4).map(Response::choice).collect();
    let edited = response::edit(&original, 2, ResponseKey::Option, "Teal");

    assert_eq!(original[2].option, "Choice 3");
    assert_eq!(edited.len(), original.len());
    for (index, (before, after)) in original.iter().zip(&edited).enumerate() {
        if index == 2 {
            assert_eq!(after.option, "Teal");
            assert_eq!(after.value, before.value);
        } else {
            assert_eq!(after, before);
        }
    }
}

#[test]
fn inline_commit_and_escape() {
    let mut builder = FormBuilder::new(BuilderConfig::default());
    builder.dispatch(FormAction::AddQuestion(QuestionType::Text));

    builder.dispatch(FormAction::BeginEdit(EditableField::QuestionText));
    typed(&mut builder, "Hello");
    let effects = builder.dispatch(FormAction::Key(KeyEvent::plain(KeyCode::Enter)));
    assert_eq!(committed(&effects), 1);
    assert_eq!(
        builder.store().selected().map(Question::question_text),
        Some("Hello")
    );

    builder.dispatch(FormAction::BeginEdit(EditableField::QuestionText));
    typed(&mut builder, " world");
    let effects = builder.dispatch(FormAction::Key(KeyEvent::plain(KeyCode::Esc)));
    assert_eq!(committed(&effects), 0);
    assert_eq!(
        builder.store().selected().map(Question::question_text),
        Some("Hello")
    );
    assert_eq!(
        builder.editor(EditableField::QuestionText).map(|e| e.draft()),
        Some("Hello")
    );
}

#[test]
fn clicks_on_options_do_not_end_the_session() {
    let mut builder = FormBuilder::new(BuilderConfig::default());
    builder.dispatch(FormAction::AddQuestion(QuestionType::Radio));
    builder.dispatch(FormAction::BeginEdit(EditableField::QuestionText));
    typed(&mut builder, "Hi");

    let preview = builder.preview();
    let add_choice = preview
        .lines
        .iter()
        .position(|line| plain_text(line) == "+ Add choice")
        .expect("add choice row");
    let effects = builder.dispatch(FormAction::Click { row: add_choice });
    assert_eq!(committed(&effects), 0);
    assert_eq!(builder.active_field(), Some(EditableField::QuestionText));

    let effects = builder.dispatch(FormAction::Click { row: add_choice + 5 });
    assert_eq!(committed(&effects), 1);
    assert_eq!(builder.active_field(), None);
    assert_eq!(builder.store().selected().map(Question::question_text), Some("Hi"));
}

#[test]
fn payload_round_trip_preserves_questions() {
    let mut builder = FormBuilder::new(BuilderConfig::default());
    builder.dispatch(FormAction::AddQuestion(QuestionType::Radio));
    builder.dispatch(FormAction::Edit(FieldEdit::EditResponse {
        index: 0,
        key: ResponseKey::Value,
        text: "red".to_string(),
    }));
    builder.dispatch(FormAction::Edit(FieldEdit::set("rotation", "Backward")));
    builder.dispatch(FormAction::AddQuestion(QuestionType::Rating));
    builder.dispatch(FormAction::Edit(FieldEdit::RatingCount(5)));

    let payload = builder.payload();
    let json = payload.to_json().expect("encode");
    let back = ProjectPayload::from_json(json).expect("decode");
    assert_eq!(back, payload);

    let reopened = FormBuilder::from_payload(BuilderConfig::default(), back).expect("reopen");
    let kinds: Vec<&QuestionType> = reopened.store().iter().map(Question::kind).collect();
    assert_eq!(
        kinds,
        vec![&QuestionType::Welcome, &QuestionType::Radio, &QuestionType::Rating]
    );
    let radio = reopened.store().iter().nth(1).expect("radio");
    assert_eq!(radio.responses()[0].value, "red");
    assert_eq!(radio.text_field("rotation"), "Backward");
}

#[test]
fn save_sends_payload_and_reports_success() {
    let mut builder = FormBuilder::new(BuilderConfig::default());
    builder.dispatch(FormAction::AddQuestion(QuestionType::Number));
    builder.dispatch(FormAction::BeginEdit(EditableField::QuestionText));
    typed(&mut builder, "How many?");

    let api = FakeProjectApi::accepting();
    let effects = builder.save(&api);

    let sent = api.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].questions[1].question_text(), "How many?");
    let notes = notifications(&effects);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Success);
}

#[test]
fn failed_save_leaves_store_untouched() {
    let mut builder = FormBuilder::new(BuilderConfig::default());
    builder.dispatch(FormAction::AddQuestion(QuestionType::Grid));
    let before: Vec<Question> = builder.store().iter().cloned().collect();
    let revision = builder.store().revision();

    let api = FakeProjectApi::rejecting(400, r#"{"detail":"Title is required"}"#);
    let effects = builder.save(&api);

    let notes = notifications(&effects);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, "Title is required");
    assert_eq!(builder.store().iter().cloned().collect::<Vec<_>>(), before);
    assert_eq!(builder.store().revision(), revision);

    let effects = builder.save(&FakeProjectApi::rejecting(502, "Bad Gateway"));
    let notes = notifications(&effects);
    assert_eq!(notes[0].message, "Something went wrong");
    assert!(notes[0].retryable);
}
