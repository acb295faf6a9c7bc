pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, FetchConfig};
pub use loader::load_config;
