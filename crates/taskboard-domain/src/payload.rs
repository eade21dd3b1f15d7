//! Request bodies for the board service, with the client-side checks that
//! keep obviously invalid input off the network.

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard_core::{TaskboardError, TaskboardResult};

use crate::due::format_due_date;
use crate::field_update::FieldUpdate;
use crate::tag::TagId;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 255;
pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 64;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 256;

fn validate_name(field: &str, value: &str) -> TaskboardResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskboardError::validation(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(TaskboardError::validation(format!(
            "{} must be at most {} characters",
            field, NAME_MAX_CHARS
        )));
    }
    Ok(())
}

fn validate_description(value: &str) -> TaskboardResult<()> {
    if value.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(TaskboardError::validation(format!(
            "description must be at most {} characters",
            DESCRIPTION_MAX_CHARS
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBoard {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewBoard {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            description: None,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        validate_name("board name", &self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BoardUpdate {
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.trim().to_string()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        if let Some(name) = &self.name {
            validate_name("board name", name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewColumn {
    pub name: String,
}

impl NewColumn {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        validate_name("list name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColumnUpdate {
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.trim().to_string()),
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        match &self.name {
            Some(name) => validate_name("list name", name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewTask {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            description: None,
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        validate_name("task name", &self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub due_date: FieldUpdate<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<TagId>>,
}

impl TaskUpdate {
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.trim().to_string()),
            ..Default::default()
        }
    }

    pub fn describe(description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    pub fn done(is_done: bool) -> Self {
        Self {
            is_done: Some(is_done),
            ..Default::default()
        }
    }

    pub fn due(due: DateTime<Utc>) -> Self {
        Self {
            due_date: FieldUpdate::Set(format_due_date(due)),
            ..Default::default()
        }
    }

    pub fn clear_due() -> Self {
        Self {
            due_date: FieldUpdate::Clear,
            ..Default::default()
        }
    }

    pub fn tags(tag_ids: Vec<TagId>) -> Self {
        Self {
            tag_ids: Some(tag_ids),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_done.is_none()
            && self.due_date.is_no_change()
            && self.tag_ids.is_none()
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        if let Some(name) = &self.name {
            validate_name("task name", name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let FieldUpdate::Set(due) = &self.due_date {
            if crate::due::parse_due_date(due).is_none() {
                return Err(TaskboardError::validation(format!(
                    "invalid due date: {}",
                    due
                )));
            }
        }
        Ok(())
    }
}

/// Form fields of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(TaskboardError::validation(
                "username and password are required",
            ));
        }
        Ok(())
    }
}

/// JSON body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Registration {
    pub fn new(email: &str, username: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> TaskboardResult<()> {
        let username_len = self.username.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_len) {
            return Err(TaskboardError::validation(format!(
                "username must be {} to {} characters",
                USERNAME_MIN_CHARS, USERNAME_MAX_CHARS
            )));
        }
        let password_len = self.password.chars().count();
        if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&password_len) {
            return Err(TaskboardError::validation(format!(
                "password must be {} to {} characters",
                PASSWORD_MIN_CHARS, PASSWORD_MAX_CHARS
            )));
        }
        let well_formed = self
            .email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !well_formed {
            return Err(TaskboardError::validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}
