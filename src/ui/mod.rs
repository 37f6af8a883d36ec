pub mod frame_json;
pub mod preview;
pub mod span;
pub mod style;
pub mod workflow;
