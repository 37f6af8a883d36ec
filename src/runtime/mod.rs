pub mod builder;
pub mod effect;
pub mod event;

pub use builder::FormBuilder;
pub use effect::Effect;
pub use event::{EditableField, FormAction, Notification, NotificationLevel};
