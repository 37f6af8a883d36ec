use tracing::{debug, info, warn};

use crate::api::{ProjectApi, ProjectMeta, ProjectPayload};
use crate::config::BuilderConfig;
use crate::core::question::{DESCRIPTION, QUESTION_TEXT};
use crate::core::{Question, QuestionId, QuestionType};
use crate::input::KeyEvent;
use crate::runtime::effect::Effect;
use crate::runtime::event::{EditableField, FormAction, Notification, ValueTarget, WidgetAction};
use crate::settings::{self, FieldEdit, PanelView};
use crate::state::store::{QuestionStore, StoreError};
use crate::ui::preview::{self, DESCRIPTION_PLACEHOLDER, PreviewEditors, PreviewView, QUESTION_PLACEHOLDER};
use crate::ui::workflow::Workflow;
use crate::widgets::inline_editable::{ClickTarget, InlineEditable};
use crate::widgets::traits::{InteractionResult, Interactive};

pub const SAVED_MESSAGE: &str = "Project created successfully!";

/// Inline editors bound to the selected question.
#[derive(Debug)]
struct Editors {
    question_text: InlineEditable,
    description: InlineEditable,
}

impl Editors {
    fn bind(question: &Question) -> Self {
        let id = question.id().clone();
        Self {
            question_text: InlineEditable::new(
                ValueTarget::new(id.clone(), QUESTION_TEXT),
                QUESTION_PLACEHOLDER,
            )
            .with_value(question.question_text()),
            description: InlineEditable::new(ValueTarget::new(id, DESCRIPTION), DESCRIPTION_PLACEHOLDER)
                .with_value(question.description()),
        }
    }

    fn question(&self) -> &QuestionId {
        &self.question_text.target().question
    }

    fn get(&self, field: EditableField) -> &InlineEditable {
        match field {
            EditableField::QuestionText => &self.question_text,
            EditableField::Description => &self.description,
        }
    }

    fn get_mut(&mut self, field: EditableField) -> &mut InlineEditable {
        match field {
            EditableField::QuestionText => &mut self.question_text,
            EditableField::Description => &mut self.description,
        }
    }

    fn active(&self) -> Option<EditableField> {
        [EditableField::QuestionText, EditableField::Description]
            .into_iter()
            .find(|field| self.get(*field).is_editing())
    }

    fn sync(&mut self, question: &Question) -> bool {
        let text = self.question_text.sync_external(question.question_text());
        let description = self.description.sync_external(question.description());
        text || description
    }
}

/// Owns the survey being edited and applies user actions to it.
///
/// Actions are applied strictly in the order they are dispatched. Every
/// mutation goes through the store; the views returned by `workflow`,
/// `preview` and `settings` are rebuilt from it on demand.
#[derive(Debug)]
pub struct FormBuilder {
    config: BuilderConfig,
    meta: ProjectMeta,
    store: QuestionStore,
    editors: Option<Editors>,
}

impl FormBuilder {
    /// A fresh survey holding only the welcome screen.
    pub fn new(config: BuilderConfig) -> Self {
        let welcome = Question::create(QuestionType::Welcome, &config.defaults);
        let store = QuestionStore::from_questions([welcome]).unwrap_or_default();
        let meta = ProjectMeta::titled(config.form_name.clone());
        Self::with_store(config, meta, store)
    }

    pub fn from_payload(config: BuilderConfig, payload: ProjectPayload) -> Result<Self, StoreError> {
        let store = QuestionStore::from_questions(payload.questions)?;
        Ok(Self::with_store(config, payload.meta, store))
    }

    fn with_store(config: BuilderConfig, meta: ProjectMeta, store: QuestionStore) -> Self {
        let editors = store.selected().map(Editors::bind);
        Self {
            config,
            meta,
            store,
            editors,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn meta(&self) -> &ProjectMeta {
        &self.meta
    }

    pub fn active_field(&self) -> Option<EditableField> {
        self.editors.as_ref().and_then(Editors::active)
    }

    pub fn editor(&self, field: EditableField) -> Option<&InlineEditable> {
        self.editors.as_ref().map(|editors| editors.get(field))
    }

    pub fn dispatch(&mut self, action: FormAction) -> Vec<Effect> {
        debug!(?action, "dispatch");
        match action {
            FormAction::AddQuestion(kind) => self.add_question(kind),
            FormAction::Select(id) => self.select(&id),
            FormAction::Delete(id) => self.delete(&id),
            FormAction::Move { id, index } => self.move_question(&id, index),
            FormAction::Edit(edit) => self.edit_selected(edit),
            FormAction::BeginEdit(field) => self.begin_edit(field),
            FormAction::Key(key) => self.key(key),
            FormAction::Click { row } => self.click(row),
            FormAction::Blur => self.flush_edit(),
        }
    }

    /// Sends the survey to `api`. A failure is reported as a notification
    /// and leaves the questions as they were.
    pub fn save(&mut self, api: &dyn ProjectApi) -> Vec<Effect> {
        let mut effects = self.flush_edit();
        let payload = self.payload();
        info!(questions = payload.questions.len(), title = %payload.meta.title, "saving survey");
        match api.create_project(&payload) {
            Ok(ack) => {
                info!(status = ack.status, "survey saved");
                effects.push(Effect::Notify(Notification::success(SAVED_MESSAGE)));
            }
            Err(err) => {
                warn!(error = %err, "survey save failed");
                effects.push(Effect::Notify(Notification::error(
                    err.user_message(),
                    err.is_retryable(),
                )));
            }
        }
        effects.push(Effect::RequestRender);
        effects
    }

    pub fn payload(&self) -> ProjectPayload {
        ProjectPayload::new(self.meta.clone(), self.store.iter().cloned().collect())
    }

    pub fn workflow(&self) -> Workflow {
        Workflow::project(&self.store)
    }

    pub fn preview(&self) -> PreviewView {
        match (self.store.selected(), self.editors.as_ref()) {
            (Some(question), Some(editors)) => preview::render(
                question,
                self.store.number_of(question.id()),
                &PreviewEditors {
                    question_text: &editors.question_text,
                    description: &editors.description,
                },
            ),
            _ => preview::empty(),
        }
    }

    /// Settings panel of the selected question. `None` when nothing is
    /// selected or its type has no settings.
    pub fn settings(&self) -> Option<PanelView> {
        self.store.selected().and_then(settings::render)
    }

    fn add_question(&mut self, kind: QuestionType) -> Vec<Effect> {
        if !kind.is_supported() {
            return vec![Effect::Notify(Notification::error(
                format!("`{kind}` questions cannot be added"),
                false,
            ))];
        }
        let mut effects = self.flush_edit();
        let welcome = kind.is_welcome();
        let question = Question::create(kind, &self.config.defaults);
        let id = question.id().clone();
        if let Err(err) = self.store.add_question(question) {
            effects.push(store_error(err));
            return effects;
        }
        if welcome {
            if let Err(err) = self.store.move_question(&id, 0) {
                effects.push(store_error(err));
            }
        }
        self.rebind();
        effects.push(Effect::RequestRender);
        effects
    }

    fn select(&mut self, id: &QuestionId) -> Vec<Effect> {
        if self.store.selected_id() == Some(id) {
            return Vec::new();
        }
        if !self.store.contains(id) {
            return vec![store_error(StoreError::UnknownQuestion(id.clone()))];
        }
        let mut effects = self.flush_edit();
        if let Err(err) = self.store.set_selected(id) {
            effects.push(store_error(err));
            return effects;
        }
        self.rebind();
        effects.push(Effect::RequestRender);
        effects
    }

    fn delete(&mut self, id: &QuestionId) -> Vec<Effect> {
        let Some(question) = self.store.get(id) else {
            return vec![store_error(StoreError::UnknownQuestion(id.clone()))];
        };
        if question.kind().is_welcome() {
            return vec![Effect::Notify(Notification::error(
                "The welcome screen cannot be deleted",
                false,
            ))];
        }

        let mut effects = Vec::new();
        match self.editors.as_mut() {
            Some(editors) if editors.question() == id => {
                if let Some(field) = editors.active() {
                    editors.get_mut(field).cancel();
                }
            }
            _ => effects = self.flush_edit(),
        }
        if let Err(err) = self.store.delete_question(id) {
            effects.push(store_error(err));
            return effects;
        }
        self.rebind();
        effects.push(Effect::RequestRender);
        effects
    }

    /// Reorders a question. The welcome screen stays at the front.
    fn move_question(&mut self, id: &QuestionId, index: usize) -> Vec<Effect> {
        let Some(question) = self.store.get(id) else {
            return vec![store_error(StoreError::UnknownQuestion(id.clone()))];
        };
        let welcome_first = self.store.iter().next().is_some_and(|q| q.kind().is_welcome());
        let index = match (question.kind().is_welcome(), welcome_first) {
            (true, _) => 0,
            (false, true) => index.max(1),
            (false, false) => index,
        };
        match self.store.move_question(id, index) {
            Ok(()) => vec![Effect::RequestRender],
            Err(err) => vec![store_error(err)],
        }
    }

    fn edit_selected(&mut self, edit: FieldEdit) -> Vec<Effect> {
        let mut effects = self.flush_edit();
        let Some(question) = self.store.selected() else {
            effects.push(Effect::Notify(Notification::error("No question selected", false)));
            return effects;
        };
        let next = match settings::apply(question, edit) {
            Ok(next) => next,
            Err(err) => {
                warn!(question_id = %question.id(), error = %err, "settings edit rejected");
                effects.push(Effect::Notify(Notification::error(err.to_string(), false)));
                return effects;
            }
        };
        if let Err(err) = self.store.update_question(next) {
            effects.push(store_error(err));
            return effects;
        }
        self.sync_editors();
        effects.push(Effect::RequestRender);
        effects
    }

    fn begin_edit(&mut self, field: EditableField) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.active_field() {
            Some(active) if active == field => return effects,
            Some(_) => effects = self.flush_edit(),
            None => {}
        }
        let Some(editors) = self.editors.as_mut() else {
            return effects;
        };
        let result = editors.get_mut(field).begin();
        effects.extend(self.collect(result));
        effects
    }

    fn key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Some(field) = self.active_field() else {
            return Vec::new();
        };
        let Some(editors) = self.editors.as_mut() else {
            return Vec::new();
        };
        let result = editors.get_mut(field).on_key(key);
        self.collect(result)
    }

    fn click(&mut self, row: usize) -> Vec<Effect> {
        let view = self.preview();
        let mut effects = Vec::new();
        if let Some(active) = self.active_field() {
            let target = view.hit_test(row, active);
            if let Some(editors) = self.editors.as_mut() {
                let result = editors.get_mut(active).on_click(target);
                effects.extend(self.collect(result));
            }
            if target != ClickTarget::Outside {
                return effects;
            }
        }
        if let Some(field) = view.editable_at(row) {
            effects.extend(self.begin_edit(field));
        }
        effects
    }

    /// Commits the open inline edit, if any.
    fn flush_edit(&mut self) -> Vec<Effect> {
        let Some(field) = self.active_field() else {
            return Vec::new();
        };
        let Some(editors) = self.editors.as_mut() else {
            return Vec::new();
        };
        let result = editors.get_mut(field).blur();
        self.collect(result)
    }

    fn collect(&mut self, result: InteractionResult) -> Vec<Effect> {
        let mut effects = Vec::new();
        for action in result.actions {
            match self.apply_action(&action) {
                Ok(()) => effects.push(Effect::Action(action)),
                Err(err) => effects.push(store_error(err)),
            }
        }
        if result.request_render {
            effects.push(Effect::RequestRender);
        }
        effects
    }

    fn apply_action(&mut self, action: &WidgetAction) -> Result<(), StoreError> {
        let WidgetAction::ValueChanged { change } = action;
        let Some(current) = self.store.get(&change.target.question) else {
            warn!(question_id = %change.target.question, "value change for a missing question");
            return Err(StoreError::UnknownQuestion(change.target.question.clone()));
        };
        let mut next = current.clone();
        next.set_field(&change.target.field, change.value.clone());
        self.store.update_question(next)?;
        self.sync_editors();
        Ok(())
    }

    /// Rebinds the editors when the selection moved, otherwise re-syncs them.
    fn rebind(&mut self) {
        let Some(selected) = self.store.selected() else {
            self.editors = None;
            return;
        };
        match self.editors.as_mut() {
            Some(editors) if editors.question() == selected.id() => {
                editors.sync(selected);
            }
            _ => self.editors = Some(Editors::bind(selected)),
        }
    }

    fn sync_editors(&mut self) {
        if let (Some(editors), Some(question)) = (self.editors.as_mut(), self.store.selected()) {
            if editors.question() == question.id() {
                editors.sync(question);
            }
        }
    }
}

fn store_error(err: StoreError) -> Effect {
    Effect::Notify(Notification::error(err.to_string(), false))
}
