pub mod api;
pub mod config;
pub mod core;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod settings;
pub mod state;
pub mod ui;
pub mod widgets;

pub use crate::api::{ApiError, HttpProjectApi, ProjectApi, ProjectMeta, ProjectPayload};
pub use crate::config::BuilderConfig;
pub use crate::core::{Question, QuestionId, QuestionType, Response, Value};
pub use crate::runtime::{Effect, FormAction, FormBuilder};
pub use crate::state::QuestionStore;
