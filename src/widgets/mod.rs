pub mod inline_editable;
pub mod text_edit;
pub mod traits;
