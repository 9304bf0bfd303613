use userdir_types::*;

use crate::Palette;

pub const EMPTY_STATE: &str = "No users found.";

const GAP: usize = 2;
const MIN_CARD_WIDTH: usize = 24;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub color: bool,
    /// Terminal width in columns.
    pub width: usize,
    /// Fixed number of cards per row; `None` derives it from `width`.
    pub columns: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            width: 80,
            columns: None,
        }
    }
}

/// Cards per row for a terminal `width`.
pub fn columns_for_width(width: usize) -> usize {
    if width < 60 {
        1
    } else if width < 90 {
        2
    } else if width < 120 {
        3
    } else {
        4
    }
}

pub fn format_directory(view: &DirectoryView, options: &RenderOptions) -> String {
    let palette = Palette::for_theme(view.theme, options.color);
    let mut lines = vec![
        format_header(view.theme, &palette),
        format_status_line(&view.query, view.list.total_matches, &palette),
        String::new(),
    ];

    if view.list.is_empty() {
        lines.push(format_empty_state(&palette));
    } else {
        lines.push(format_grid(&view.list.users, options, &palette));
    }

    lines.push(String::new());
    lines.push(format_pagination(view, &palette));
    lines.join("\n")
}

pub fn format_header(theme: Theme, palette: &Palette) -> String {
    let title = palette.paint(palette.bold, &palette.paint(palette.accent, "User Directory"));
    let indicator = match theme {
        Theme::Light => "☾ light",
        Theme::Dark => "☀ dark",
    };
    format!("{}  {}", title, palette.paint(palette.muted, indicator))
}

pub fn format_status_line(query: &ListQuery, total_matches: usize, palette: &Palette) -> String {
    let search = if query.query.is_empty() {
        "(none)".to_string()
    } else {
        format!("\"{}\"", query.query)
    };
    let matches = if total_matches == 1 {
        "1 match".to_string()
    } else {
        format!("{} matches", total_matches)
    };
    palette.paint(
        palette.muted,
        &format!(
            "Search: {}  Status: {}  Sort: {}  ({})",
            search,
            query.status,
            query.sort.label(),
            matches
        ),
    )
}

pub fn format_empty_state(palette: &Palette) -> String {
    palette.paint(palette.muted, EMPTY_STATE)
}

/// A bordered card, `width` columns wide, one line per entry.
pub fn format_card(user: &User, width: usize, palette: &Palette) -> Vec<String> {
    let inner = width.saturating_sub(4);
    let status_style = if user.status.is_active() {
        palette.active
    } else {
        palette.inactive
    };

    let rows = [
        (palette.bold, user.name.clone()),
        (status_style, format!("● {}", user.status)),
        (palette.muted, format!("✉ {}", user.email)),
        (palette.muted, format!("☎ {}", user.mobile)),
    ];

    let rule = "─".repeat(width.saturating_sub(2));
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(palette.paint(palette.border, &format!("╭{}╮", rule)));
    for (style, text) in rows {
        lines.push(format!(
            "{} {} {}",
            palette.paint(palette.border, "│"),
            palette.paint(style, &fit(&text, inner)),
            palette.paint(palette.border, "│")
        ));
    }
    lines.push(palette.paint(palette.border, &format!("╰{}╯", rule)));
    lines
}

pub fn format_grid(users: &[User], options: &RenderOptions, palette: &Palette) -> String {
    let columns = options
        .columns
        .unwrap_or_else(|| columns_for_width(options.width))
        .max(1);
    let width = card_width(options.width, columns);
    let gap = " ".repeat(GAP);

    let mut rows = Vec::new();
    for chunk in users.chunks(columns) {
        let cards: Vec<Vec<String>> = chunk
            .iter()
            .map(|user| format_card(user, width, palette))
            .collect();
        let height = cards.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(height);
        for i in 0..height {
            let line: Vec<&str> = cards
                .iter()
                .map(|card| card.get(i).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(line.join(&gap));
        }
        rows.push(lines.join("\n"));
    }
    rows.join("\n")
}

pub fn format_pagination(view: &DirectoryView, palette: &Palette) -> String {
    let prev = format_control("« Prev", view.can_prev, palette);
    let next = format_control("Next »", view.can_next, palette);
    format!(
        "{}   Page {} of {}   {}",
        prev,
        palette.paint(palette.bold, &view.list.page.to_string()),
        view.list.total_pages,
        next
    )
}

pub fn format_theme(theme: Theme) -> String {
    format!("Theme: {}", theme)
}

pub fn format_json(view: &DirectoryView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

fn format_control(label: &str, enabled: bool, palette: &Palette) -> String {
    if enabled {
        palette.paint(palette.accent, label)
    } else if palette.dim.is_empty() {
        " ".repeat(label.chars().count())
    } else {
        palette.paint(palette.dim, label)
    }
}

fn card_width(total_width: usize, columns: usize) -> usize {
    let gaps = GAP * columns.saturating_sub(1);
    (total_width.saturating_sub(gaps) / columns).max(MIN_CARD_WIDTH)
}

/// Pads `text` to exactly `width` characters, truncating with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - len));
        out
    } else if width == 0 {
        String::new()
    } else {
        let mut out: String = text.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}
