//! Session state shared by every screen: who is logged in, and the token
//! that proves it.

use std::sync::Arc;
use taskboard_core::TaskboardResult;
use taskboard_domain::{Credentials, Registration, User};

use crate::api::BoardApi;
use crate::credentials::CredentialStore;

pub struct AuthContext {
    api: Arc<dyn BoardApi>,
    credentials: Arc<dyn CredentialStore>,
    user: Option<User>,
}

impl AuthContext {
    pub fn new(api: Arc<dyn BoardApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            credentials,
            user: None,
        }
    }

    pub fn api(&self) -> Arc<dyn BoardApi> {
        Arc::clone(&self.api)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Restores a stored session. Any failure while fetching the user drops
    /// the token and leaves the context anonymous.
    pub async fn initialize(&mut self) -> TaskboardResult<()> {
        if self.credentials.get()?.is_none() {
            tracing::debug!("No stored session");
            self.user = None;
            return Ok(());
        }

        match self.api.current_user().await {
            Ok(user) => {
                tracing::info!("Restored session for {}", user.username);
                self.user = Some(user);
            }
            Err(e) => {
                tracing::warn!("Stored session rejected: {}", e);
                self.credentials.clear()?;
                self.user = None;
            }
        }
        Ok(())
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TaskboardResult<&User> {
        let credentials = Credentials::new(username, password);
        credentials.validate()?;

        let token = self.api.login(&credentials).await?;
        self.credentials.set(&token)?;

        let user = match self.api.current_user().await {
            Ok(user) => user,
            Err(e) => {
                self.credentials.clear()?;
                return Err(e);
            }
        };
        tracing::info!("Logged in as {}", user.username);
        Ok(self.user.insert(user))
    }

    /// Creates the account. The caller logs in afterwards.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> TaskboardResult<()> {
        let registration = Registration::new(email, username, password);
        registration.validate()?;
        self.api.register(&registration).await?;
        tracing::info!("Registered {}", registration.username);
        Ok(())
    }

    /// Logs out.
    pub fn teardown(&mut self) -> TaskboardResult<()> {
        self.user = None;
        self.credentials.clear()
    }
}
