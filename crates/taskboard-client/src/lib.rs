pub mod api;
pub mod auth;
pub mod credentials;
pub mod directory;
pub mod session;

pub use api::{BoardApi, HttpApi};
pub use auth::AuthContext;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use directory::BoardDirectory;
pub use session::{BoardSession, Workspace};
