use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use userdir_config::{get_config_path, Config, FileThemeStore};
use userdir_core::{Directory, Event, MemoryThemeStore, ThemeStore};
use userdir_output::*;
use userdir_source::{fetch_users, FetchOptions, Source};
use userdir_types::*;

mod browse;
mod term;

use browse::Command;

static PROFILING_ENABLED: AtomicBool = AtomicBool::new(false);

fn profile_start(name: &str) -> (Instant, &str) {
    (Instant::now(), name)
}

fn profile_end((start, name): (Instant, &str)) {
    if PROFILING_ENABLED.load(Ordering::Relaxed) {
        let elapsed = start.elapsed();
        eprintln!(
            "[profile] {:>8.2}ms  {}",
            elapsed.as_secs_f64() * 1000.0,
            name
        );
    }
}

const MAIN_HELP: &str = r#"userdir is a terminal browser for a user directory. It loads a JSON list of
users once, from a URL or a local file, and shows them as cards that can be
searched by name, filtered by status, sorted alphabetically and paged through.

`userdir list` prints a single page and exits. `userdir browse` keeps the
directory open and reads commands (search, status, sort, next, prev, theme)
from stdin. The light/dark theme is remembered between runs.

The location of the users document comes from --source, $USERDIR_SOURCE or
the `source.location` key in the config file (see `userdir config`).

See `userdir COMMAND --help` for more documentation and command-specific options."#;

#[derive(Parser)]
#[command(name = "userdir")]
#[command(about = MAIN_HELP)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,

    #[arg(long, global = true, help = "Print timing information for profiling")]
    profile: bool,

    #[arg(
        long,
        global = true,
        env = "USERDIR_SOURCE",
        help = "URL or path of the users JSON document"
    )]
    source: Option<String>,

    #[arg(long, global = true, help = "Disable colored output")]
    no_color: bool,

    #[arg(long, global = true, help = "Do not save theme changes")]
    no_persist: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print one page of the directory.")]
    List {
        #[arg(short = 'q', long, default_value = "", help = "Search names (case-insensitive)")]
        query: String,
        #[arg(
            short = 's',
            long,
            default_value = "all",
            help = "Status filter: all, active, inactive"
        )]
        status: StatusFilter,
        #[arg(short = 'o', long, default_value = "asc", help = "Sort order: asc, desc")]
        sort: SortOrder,
        #[arg(
            short = 'p',
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Page number"
        )]
        page: u32,
    },

    #[command(about = "Browse the directory interactively, reading commands from stdin.")]
    Browse,

    #[command(about = "Show or change the light/dark theme.")]
    Theme {
        #[arg(value_enum, help = "Change the theme instead of showing it")]
        action: Option<ThemeAction>,
    },

    #[command(about = "Print config file location and contents.")]
    Config {
        #[arg(long, help = "Write the current settings to the config file if it is missing")]
        init: bool,
    },

    #[command(about = "Print help for all commands.")]
    HelpAll,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

struct Session<'a> {
    config: &'a Config,
    source: Option<&'a str>,
    json: bool,
    no_color: bool,
    no_persist: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let total_start = profile_start("total");
    let cli = Cli::parse();

    if cli.profile {
        PROFILING_ENABLED.store(true, Ordering::Relaxed);
    }

    let config = Config::load()?;
    init_logging(&config);

    let session = Session {
        config: &config,
        source: cli.source.as_deref(),
        json: cli.json,
        no_color: cli.no_color,
        no_persist: cli.no_persist,
    };

    let result = match cli.command {
        Commands::Config { init } => handle_config(&session, init),
        Commands::HelpAll => handle_help_all(),
        Commands::Theme { action } => handle_theme(&session, action),
        Commands::List {
            query,
            status,
            sort,
            page,
        } => {
            let list_query = ListQuery {
                query,
                status,
                sort,
                page: page as usize,
            };
            handle_list(&session, list_query).await
        }
        Commands::Browse => handle_browse(&session).await,
    };

    profile_end(total_start);
    result
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("USERDIR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn handle_help_all() -> Result<()> {
    use clap::CommandFactory;

    let mut cmd = Cli::command();

    cmd.write_long_help(&mut std::io::stdout())?;
    println!("\n");

    let subcommands: Vec<_> = cmd
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .collect();
    for name in subcommands {
        if name == "help-all" || name == "help" {
            continue;
        }
        let mut subcmd = Cli::command();
        if let Some(sub) = subcmd.find_subcommand_mut(&name) {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("userdir {}", name);
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            sub.write_long_help(&mut std::io::stdout())?;
            println!("\n");
        }
    }

    Ok(())
}

fn handle_config(session: &Session<'_>, init: bool) -> Result<()> {
    let config_path = get_config_path();
    if init && !config_path.exists() {
        session.config.save()?;
        println!("Wrote {}", config_path.display());
    }

    let theme_store = FileThemeStore::open(session.config.display.default_theme);
    println!("Config file: {}", config_path.display());
    println!("Theme file: {} ({})", theme_store.path().display(), theme_store.get());
    println!();

    if config_path.exists() {
        println!("{}", std::fs::read_to_string(&config_path)?);
    } else {
        println!("(file does not exist, using defaults)");
    }
    Ok(())
}

fn handle_theme(session: &Session<'_>, action: Option<ThemeAction>) -> Result<()> {
    let mut store = open_theme_store(session);

    match action {
        None => {}
        Some(ThemeAction::Toggle) => {
            let next = store.get().toggle();
            store.set(next);
        }
        Some(ThemeAction::Light) => store.set(Theme::Light),
        Some(ThemeAction::Dark) => store.set(Theme::Dark),
    }

    if session.json {
        println!("{}", serde_json::to_string_pretty(&json!({ "theme": store.get() }))?);
    } else {
        println!("{}", format_theme(store.get()));
    }
    Ok(())
}

async fn handle_list(session: &Session<'_>, query: ListQuery) -> Result<()> {
    let mut directory = Directory::new(
        open_theme_store(session),
        session.config.display.page_size,
    )
    .with_query(query);

    let records = load_records(session).await;

    let pipeline = profile_start("pipeline");
    let view = directory.update(Event::RecordsLoaded(records));
    profile_end(pipeline);

    print_view(session, &view, &render_options(session))
}

async fn handle_browse(session: &Session<'_>) -> Result<()> {
    let mut directory = Directory::new(
        open_theme_store(session),
        session.config.display.page_size,
    );
    let options = render_options(session);

    let records = load_records(session).await;
    let view = directory.update(Event::RecordsLoaded(records));
    print_view(session, &view, &options)?;
    if !session.json {
        println!("\nType 'help' for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match browse::parse_command(&line) {
            Ok(Command::Dispatch(event)) => event,
            Ok(Command::FlipSort) => Event::SortOrderChanged(match directory.query().sort {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            }),
            Ok(Command::Redraw) => {
                print_view(session, &directory.view(), &options)?;
                continue;
            }
            Ok(Command::Help) => {
                println!("{}", browse::HELP);
                continue;
            }
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let pipeline = profile_start("pipeline");
        let view = directory.update(event);
        profile_end(pipeline);
        print_view(session, &view, &options)?;
    }

    debug!("Browse session ended");
    Ok(())
}

/// Loads the record set exactly once; failures leave the directory empty.
async fn load_records(session: &Session<'_>) -> Vec<User> {
    let location = session
        .source
        .unwrap_or(session.config.source.location.as_str());
    let source = Source::parse(location);
    let options = FetchOptions::default().with_timeout_secs(session.config.source.request_timeout);

    let load = profile_start("load");
    let users = fetch_users(&source, &options).await;
    profile_end(load);
    users
}

fn open_theme_store(session: &Session<'_>) -> Box<dyn ThemeStore> {
    let store = FileThemeStore::open(session.config.display.default_theme);
    if session.no_persist {
        Box::new(MemoryThemeStore::new(store.get()))
    } else {
        Box::new(store)
    }
}

fn render_options(session: &Session<'_>) -> RenderOptions {
    let color = session.config.display.color
        && !session.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();

    let width = term::resolve_width(std::env::var("COLUMNS").ok().as_deref(), term::tty_width());

    let columns = match session.config.display.columns {
        0 => None,
        n => Some(n as usize),
    };

    RenderOptions {
        color,
        width,
        columns,
    }
}

fn print_view(session: &Session<'_>, view: &DirectoryView, options: &RenderOptions) -> Result<()> {
    if session.json {
        println!("{}", format_json(view)?);
    } else {
        println!("{}", format_directory(view, options));
    }
    Ok(())
}
