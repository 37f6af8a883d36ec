pub mod client;
pub mod error;
pub mod payload;

pub use client::{HttpProjectApi, ProjectAck, ProjectApi};
pub use error::{ApiError, message_from_body};
pub use payload::{ProjectMeta, ProjectPayload};
