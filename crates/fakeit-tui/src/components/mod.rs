//! Reusable UI components
//!
//! - `TextArea` - A multi-line text input widget
//! - `Popup` - Modal popup dialogs using tui-popup

mod editor;

pub use editor::TextArea;

// Re-export ecosystem widgets for convenience
pub use tui_popup::Popup;
