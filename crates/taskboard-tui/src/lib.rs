pub mod app;
pub mod components;
pub mod dialog;
pub mod editable;
pub mod events;
pub mod login;
pub mod selection;
pub mod theme;
pub mod ui;

pub use app::App;
pub use editable::{CommitOutcome, EditableField, StyleDescriptor};
