use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use userdir_core::ThemeStore;
use userdir_types::Theme;

use crate::paths::get_theme_path;

/// Theme preference kept as a single word in a state file.
pub struct FileThemeStore {
    path: PathBuf,
    current: Theme,
}

impl FileThemeStore {
    pub fn open(default: Theme) -> Self {
        Self::open_at(get_theme_path(), default)
    }

    /// Reads the stored theme, falling back to `default` when the file is
    /// missing or holds anything other than `light` or `dark`.
    pub fn open_at(path: PathBuf, default: Theme) -> Self {
        let current = match std::fs::read_to_string(&path) {
            Ok(content) => match content.parse::<Theme>() {
                Ok(theme) => theme,
                Err(e) => {
                    warn!("Ignoring stored theme at {}: {}", path.display(), e);
                    default
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => default,
            Err(e) => {
                warn!("Failed to read theme from {}: {}", path.display(), e);
                default
            }
        };
        debug!("Theme is {} ({})", current, path.display());
        Self { path, current }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.current.as_str())
    }
}

impl ThemeStore for FileThemeStore {
    fn get(&self) -> Theme {
        self.current
    }

    fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.persist() {
            warn!("Failed to save theme to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::open_at(dir.path().join("theme"), Theme::Dark);
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn test_set_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("theme");

        let mut store = FileThemeStore::open_at(path.clone(), Theme::Light);
        store.set(Theme::Dark);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dark");

        let reopened = FileThemeStore::open_at(path, Theme::Light);
        assert_eq!(reopened.get(), Theme::Dark);
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "purple").unwrap();
        let store = FileThemeStore::open_at(path, Theme::Light);
        assert_eq!(store.get(), Theme::Light);
    }

    #[test]
    fn test_stored_value_tolerates_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "dark\n").unwrap();
        let store = FileThemeStore::open_at(path, Theme::Light);
        assert_eq!(store.get(), Theme::Dark);
    }
}
