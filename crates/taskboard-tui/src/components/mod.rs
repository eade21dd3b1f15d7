pub mod editable_text;
pub mod popup;

pub use editable_text::render_editable;
pub use popup::{centered_rect, render_confirm_popup, render_input_popup};
