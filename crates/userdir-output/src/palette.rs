use userdir_types::Theme;

/// ANSI styles for one theme. Every field is empty when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub accent: &'static str,
    pub active: &'static str,
    pub inactive: &'static str,
    pub muted: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub const PLAIN: Palette = Palette {
        reset: "",
        bold: "",
        dim: "",
        accent: "",
        active: "",
        inactive: "",
        muted: "",
        border: "",
    };

    const LIGHT: Palette = Palette {
        reset: "\x1b[0m",
        bold: "\x1b[1m",
        dim: "\x1b[2m",
        accent: "\x1b[38;5;61m",
        active: "\x1b[38;5;28m",
        inactive: "\x1b[38;5;160m",
        muted: "\x1b[38;5;242m",
        border: "\x1b[38;5;250m",
    };

    const DARK: Palette = Palette {
        reset: "\x1b[0m",
        bold: "\x1b[1m",
        dim: "\x1b[2m",
        accent: "\x1b[38;5;111m",
        active: "\x1b[38;5;77m",
        inactive: "\x1b[38;5;203m",
        muted: "\x1b[38;5;250m",
        border: "\x1b[38;5;240m",
    };

    pub fn for_theme(theme: Theme, color: bool) -> Self {
        if !color {
            return Self::PLAIN;
        }
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }

    pub fn paint(&self, style: &str, text: &str) -> String {
        if style.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", style, text, self.reset)
        }
    }
}
