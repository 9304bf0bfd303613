mod config;
mod paths;
mod theme_store;

pub use config::*;
pub use paths::*;
pub use theme_store::FileThemeStore;
