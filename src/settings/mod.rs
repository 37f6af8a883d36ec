pub mod panel;
pub mod schema;

pub use panel::{FieldEdit, FieldView, PanelView, ResponseRow, SettingsError, apply, render, render_for_key};
pub use schema::{Field, FieldSpec, Schema, schema_for, schema_for_key};
