use userdir_types::Theme;

/// Holds the viewer's theme preference.
///
/// Implementations own their persistence; a failed write is logged by the store
/// and the new value still applies for the rest of the session.
pub trait ThemeStore {
    fn get(&self) -> Theme;
    fn set(&mut self, theme: Theme);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    theme: Theme,
}

impl MemoryThemeStore {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self) -> Theme {
        self.theme
    }

    fn set(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

impl<S: ThemeStore + ?Sized> ThemeStore for Box<S> {
    fn get(&self) -> Theme {
        (**self).get()
    }

    fn set(&mut self, theme: Theme) {
        (**self).set(theme)
    }
}
