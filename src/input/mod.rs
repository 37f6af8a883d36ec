pub mod key;

pub use key::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
