use crate::runtime::event::{Notification, WidgetAction};

/// Outcome of a dispatched action, for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A widget action that was applied to the store.
    Action(WidgetAction),
    Notify(Notification),
    RequestRender,
}
