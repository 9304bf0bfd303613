use anyhow::{anyhow, Result};
use userdir_core::Event;
use userdir_types::{SortOrder, StatusFilter};

pub const HELP: &str = "Commands:
  /TEXT, search TEXT   search names (case-insensitive)
  clear                clear the search
  status all|active|inactive
  sort [asc|desc]      set the sort order, or flip it
  next [N], n          next page
  prev [N], p          previous page
  theme, t             toggle light/dark theme
  redraw, r            print the current page again
  help, ?              show this help
  quit, q              exit";

#[derive(Debug, PartialEq)]
pub enum Command {
    Dispatch(Event),
    /// Flip the current sort order.
    FlipSort,
    Redraw,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    if let Some(text) = line.strip_prefix('/') {
        return Ok(Command::Dispatch(Event::QueryChanged(text.trim().to_string())));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" => Command::Dispatch(Event::QueryChanged(rest.to_string())),
        "clear" => Command::Dispatch(Event::QueryChanged(String::new())),
        "status" => {
            if rest.is_empty() {
                return Err(anyhow!("Usage: status all|active|inactive"));
            }
            let status: StatusFilter = rest.parse()?;
            Command::Dispatch(Event::StatusFilterChanged(status))
        }
        "sort" => {
            if rest.is_empty() {
                Command::FlipSort
            } else {
                let order: SortOrder = rest.parse()?;
                Command::Dispatch(Event::SortOrderChanged(order))
            }
        }
        "next" | "n" => Command::Dispatch(Event::PageChanged(page_count(rest)?)),
        "prev" | "p" => Command::Dispatch(Event::PageChanged(-page_count(rest)?)),
        "theme" | "t" => Command::Dispatch(Event::ThemeToggled),
        "redraw" | "r" => Command::Redraw,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => {
            return Err(anyhow!(
                "Unknown command '{}' (type 'help' for commands)",
                word
            ))
        }
    };
    Ok(command)
}

fn page_count(arg: &str) -> Result<i64> {
    if arg.is_empty() {
        return Ok(1);
    }
    let count: u32 = arg
        .parse()
        .map_err(|_| anyhow!("Expected a page count, got '{}'", arg))?;
    Ok(i64::from(count))
}
