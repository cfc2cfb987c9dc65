//! TUI widgets for the tracker

pub mod add_form;
pub mod input;
pub mod roster;
pub mod status_bar;
pub mod summary;

pub use add_form::AddFormWidget;
pub use input::InputWidget;
pub use roster::RosterWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
pub use summary::SummaryWidget;
