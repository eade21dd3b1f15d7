use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_core::InputState;
use taskboard_domain::payload::{PASSWORD_MAX_CHARS, USERNAME_MAX_CHARS};

use crate::dialog::{handle_dialog_input, DialogAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Quit,
}

/// The login / register form.
pub struct AuthForm {
    pub mode: AuthMode,
    pub focus: AuthField,
    pub email: InputState,
    pub username: InputState,
    pub password: InputState,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            focus: AuthField::Username,
            email: InputState::with_max_chars(254),
            username: InputState::with_max_chars(USERNAME_MAX_CHARS),
            password: InputState::with_max_chars(PASSWORD_MAX_CHARS),
            error: None,
            notice: None,
        }
    }

    pub fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Username, AuthField::Password],
            AuthMode::Register => &[AuthField::Email, AuthField::Username, AuthField::Password],
        }
    }

    pub fn input(&self, field: AuthField) -> &InputState {
        match field {
            AuthField::Email => &self.email,
            AuthField::Username => &self.username,
            AuthField::Password => &self.password,
        }
    }

    fn input_mut(&mut self, field: AuthField) -> &mut InputState {
        match field {
            AuthField::Email => &mut self.email,
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.focus = self.fields()[0];
        self.password.clear();
        self.error = None;
        self.notice = None;
    }

    fn focus_next(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    /// Back to an empty login form after a logout or an expired session.
    pub fn reset(&mut self, error: Option<String>) {
        *self = Self::new();
        self.error = error;
    }

    /// After a successful registration: switch to login with the new
    /// username filled in.
    pub fn registered(&mut self) {
        let username = self.username.as_str().to_string();
        self.reset(None);
        self.username.set(username);
        self.focus = AuthField::Password;
        self.notice = Some("Account created, please log in".to_string());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') => {
                    self.toggle_mode();
                    FormAction::None
                }
                KeyCode::Char('c') => FormAction::Quit,
                _ => FormAction::None,
            };
        }

        let focus = self.focus;
        let last = self.fields().last().copied() == Some(focus);
        match handle_dialog_input(self.input_mut(focus), key, false) {
            DialogAction::Cancel => FormAction::Quit,
            DialogAction::NextField => {
                self.focus_next();
                FormAction::None
            }
            DialogAction::Confirm if last => FormAction::Submit,
            DialogAction::Confirm => {
                self.focus_next();
                FormAction::None
            }
            DialogAction::None => FormAction::None,
        }
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}
