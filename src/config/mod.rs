pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, OllamaConfig};
pub use loader::{load_config, validate_host, validate_model};
