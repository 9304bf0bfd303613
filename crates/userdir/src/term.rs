use std::os::unix::io::AsRawFd;

pub const FALLBACK_WIDTH: usize = 80;

/// Column count of the terminal attached to stdout, if there is one.
pub fn tty_width() -> Option<usize> {
    let stdout = std::io::stdout();
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(stdout.as_raw_fd(), libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 {
        Some(size.ws_col as usize)
    } else {
        None
    }
}

/// An exported `$COLUMNS` overrides the tty size.
pub fn resolve_width(columns_env: Option<&str>, tty: Option<usize>) -> usize {
    columns_env
        .and_then(|c| c.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
        .or(tty)
        .unwrap_or(FALLBACK_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tty_width_is_used_without_columns() {
        assert_eq!(resolve_width(None, Some(200)), 200);
    }

    #[test]
    fn test_columns_env_overrides_tty() {
        assert_eq!(resolve_width(Some("100"), Some(200)), 100);
        assert_eq!(resolve_width(Some(" 42 "), None), 42);
    }

    #[test]
    fn test_unusable_columns_falls_through() {
        assert_eq!(resolve_width(Some("wide"), Some(132)), 132);
        assert_eq!(resolve_width(Some("0"), None), FALLBACK_WIDTH);
        assert_eq!(resolve_width(None, None), FALLBACK_WIDTH);
    }
}
