pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod result;

pub use config::AppConfig;
pub use error::TaskboardError;
pub use input::InputState;
pub use result::TaskboardResult;
