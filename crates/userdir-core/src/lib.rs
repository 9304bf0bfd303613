pub mod collate;
pub mod navigation;
pub mod pipeline;
mod state;
mod theme;

pub use collate::locale_compare;
pub use state::{Directory, Event};
pub use theme::{MemoryThemeStore, ThemeStore};
