//! Click-to-edit text.
//!
//! An [`EditableField`] shows a saved value until it is activated, then
//! overlays an input in the same place and with the same look. Escape,
//! Enter or a click outside the field closes the editor; closing hands
//! the trimmed value to an async save callback when it is non-empty and
//! differs from what was there before.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Margin, Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Padding};
use std::future::Future;
use taskboard_core::{InputState, TaskboardResult};

/// Visual properties of the element a field replaces while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub style: Style,
    pub borders: Borders,
    pub border_type: BorderType,
    pub padding: Padding,
    pub margin: Margin,
}

impl StyleDescriptor {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            borders: Borders::NONE,
            border_type: BorderType::Plain,
            padding: Padding::ZERO,
            margin: Margin::new(0, 0),
        }
    }

    pub fn with_borders(mut self, borders: Borders, border_type: BorderType) -> Self {
        self.borders = borders;
        self.border_type = border_type;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn block(&self) -> Block<'static> {
        Block::default()
            .borders(self.borders)
            .border_type(self.border_type)
            .padding(self.padding)
            .style(self.style)
    }

    /// The area left once the margin is taken off.
    pub fn outer(&self, area: Rect) -> Rect {
        area.inner(self.margin)
    }
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Escape,
    Enter,
    ClickOutside,
}

const ALL_TRIGGERS: [CloseTrigger; 3] = [
    CloseTrigger::Escape,
    CloseTrigger::Enter,
    CloseTrigger::ClickOutside,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Display,
    Editing,
}

/// What a routed input event did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// Not for this field; route it elsewhere.
    Ignored,
    /// Consumed by the editor.
    Edited,
    /// A close trigger fired; the owner should call [`EditableField::commit`].
    Close(CloseTrigger),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Saved(String),
    /// Empty or unchanged after trimming; nothing was sent.
    Discarded,
    /// The field was not editing, or a commit was already running.
    Skipped,
}

pub struct EditableField {
    saved: String,
    prev_value: String,
    input: InputState,
    state: FieldState,
    multiline: bool,
    committing: bool,
    listeners: Vec<CloseTrigger>,
    area: Option<Rect>,
    style: StyleDescriptor,
    last_error: Option<String>,
}

impl EditableField {
    pub fn new(text: &str) -> Self {
        Self {
            saved: text.to_string(),
            prev_value: String::new(),
            input: InputState::new(),
            state: FieldState::Display,
            multiline: false,
            committing: false,
            listeners: Vec::new(),
            area: None,
            style: StyleDescriptor::default(),
            last_error: None,
        }
    }

    /// A field whose editor accepts newlines (Alt+Enter).
    pub fn multiline(text: &str) -> Self {
        Self {
            multiline: true,
            ..Self::new(text)
        }
    }

    /// Zero means unlimited.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.input.set_max_chars(max_chars);
        self
    }

    pub fn text(&self) -> &str {
        &self.saved
    }

    pub fn is_editing(&self) -> bool {
        self.state == FieldState::Editing
    }

    pub fn is_committing(&self) -> bool {
        self.committing
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    pub fn listeners(&self) -> &[CloseTrigger] {
        &self.listeners
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records where the field was last drawn, for click-outside detection.
    pub fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn activate(&mut self, style: StyleDescriptor) {
        if self.is_editing() {
            return;
        }
        self.prev_value = self.saved.clone();
        self.input.set(self.saved.clone());
        self.input.select_all();
        self.style = style;
        self.last_error = None;
        self.listeners = ALL_TRIGGERS.to_vec();
        self.state = FieldState::Editing;
    }

    /// The displayed value changed underneath the field (a refreshed
    /// snapshot, another field's save). While editing, the editor picks up
    /// the new text and selects all of it.
    pub fn set_source(&mut self, text: &str) {
        if self.saved == text {
            return;
        }
        self.saved = text.to_string();
        if self.is_editing() {
            self.input.set(self.saved.clone());
            self.input.select_all();
            self.prev_value = self.saved.clone();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FieldEvent {
        if !self.is_editing() {
            return FieldEvent::Ignored;
        }
        match key.code {
            KeyCode::Esc => self.fire(CloseTrigger::Escape),
            KeyCode::Enter if self.multiline && key.modifiers.contains(KeyModifiers::ALT) => {
                self.input.insert_char('\n');
                FieldEvent::Edited
            }
            KeyCode::Enter => self.fire(CloseTrigger::Enter),
            KeyCode::Char(c) => {
                if !self.input.insert_char(c) {
                    tracing::debug!("Input rejected at {} characters", self.input.max_chars());
                }
                FieldEvent::Edited
            }
            KeyCode::Backspace => {
                self.input.backspace();
                FieldEvent::Edited
            }
            KeyCode::Delete => {
                self.input.delete();
                FieldEvent::Edited
            }
            KeyCode::Left => {
                self.input.move_left();
                FieldEvent::Edited
            }
            KeyCode::Right => {
                self.input.move_right();
                FieldEvent::Edited
            }
            KeyCode::Home => {
                self.input.move_home();
                FieldEvent::Edited
            }
            KeyCode::End => {
                self.input.move_end();
                FieldEvent::Edited
            }
            _ => FieldEvent::Edited,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> FieldEvent {
        if !self.is_editing() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return FieldEvent::Ignored;
        }
        let inside = self
            .area
            .map(|area| area.contains(Position::new(mouse.column, mouse.row)))
            .unwrap_or(false);
        if inside {
            FieldEvent::Edited
        } else {
            self.fire(CloseTrigger::ClickOutside)
        }
    }

    fn fire(&self, trigger: CloseTrigger) -> FieldEvent {
        if self.committing || !self.listeners.contains(&trigger) {
            return FieldEvent::Edited;
        }
        FieldEvent::Close(trigger)
    }

    /// First half of a commit. Returns the value to save, or `None` when the
    /// editor closed without anything to send. Leaves the field committing
    /// until [`finish_commit`](Self::finish_commit).
    pub fn begin_commit(&mut self) -> Result<Option<String>, CommitOutcome> {
        if !self.is_editing() || self.committing {
            return Err(CommitOutcome::Skipped);
        }
        let value = self.input.as_str().trim().to_string();
        if value.is_empty() || value == self.prev_value {
            self.close();
            return Ok(None);
        }
        self.committing = true;
        Ok(Some(value))
    }

    pub fn finish_commit(&mut self, value: String, result: TaskboardResult<()>) -> TaskboardResult<CommitOutcome> {
        self.committing = false;
        self.close();
        match result {
            Ok(()) => {
                self.saved = value.clone();
                Ok(CommitOutcome::Saved(value))
            }
            Err(e) => {
                self.saved = self.prev_value.clone();
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Closes the editor, saving through `save` when the trimmed value is
    /// non-empty and changed. On failure the previous value stays on
    /// display and the error is returned.
    pub async fn commit<F, Fut>(&mut self, save: F) -> TaskboardResult<CommitOutcome>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = TaskboardResult<()>>,
    {
        let value = match self.begin_commit() {
            Err(outcome) => return Ok(outcome),
            Ok(None) => return Ok(CommitOutcome::Discarded),
            Ok(Some(value)) => value,
        };
        let result = save(value.clone()).await;
        self.finish_commit(value, result)
    }

    /// Leaves the editor without saving.
    pub fn cancel(&mut self) {
        if self.is_editing() && !self.committing {
            self.close();
        }
    }

    fn close(&mut self) {
        self.listeners.clear();
        self.state = FieldState::Display;
        self.input.clear();
    }
}
