pub mod loader;
pub mod tokens;

pub use loader::{ConfigError, ConfigLoader};
pub use tokens::ApiTokens;
