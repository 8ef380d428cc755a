use anyhow::{Context, Result};
use clap::{builder::RangedU64ValueParser, error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use verse_trainer::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, Runner, Step},
    session::TypingSession,
    verses,
};

const POLL_INTERVAL_MS: u64 = 250;

/// typing practice through a fixed set of Bible verses
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type each verse as shown. Speed and accuracy update as you go, and a finished verse shows your final score before moving on to the next."
)]
pub struct Cli {
    /// verse to start on, counting from 1 (see --list)
    #[clap(short = 'v', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    verse: Option<usize>,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// file to write logs to
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// print the practice verses and exit
    #[clap(long)]
    list: bool,

    /// save the effective settings to the config file and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command line flags win over the stored config
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(verse) = self.verse {
            config.start_verse = verse - 1;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        print_verses();
        return Ok(());
    }

    let store = cli.config_store();
    let config = cli.apply_to(store.load());

    if cli.write_config {
        store
            .save(&config)
            .with_context(|| format!("writing {}", store.path().display()))?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(&cli, &config);

    let session = TypingSession::starting_at(verses::all().to_vec(), config.start_verse)
        .context("no verses to practice")?;
    let mut app = App::new(session);
    info!(
        "starting on {} ({}/{})",
        app.session.verse().reference,
        app.session.current_index() + 1,
        app.session.entry_count()
    );

    let result = setup_terminal().and_then(|mut terminal| start_tui(&mut terminal, &mut app));
    restore_terminal();
    result
}

fn print_verses() {
    for (idx, verse) in verses::all().iter().enumerate() {
        println!("{:>2}. {:<20} {}", idx + 1, verse.reference, verse.text);
    }
}

fn init_logging(cli: &Cli, config: &Config) {
    let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) else {
        return;
    };

    if let Err(e) = logging::init(&path, &config.log_level) {
        eprintln!("Warning: logging disabled, {}: {e}", path.display());
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

// Best effort: runs on both the happy path and after errors
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    let _ = execute!(io::stdout(), crossterm::cursor::Show);
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(POLL_INTERVAL_MS),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let flow = match runner.step() {
            Step::Event(event) => app.handle_event(event, Instant::now()),
            Step::Idle => continue,
            Step::Closed => Flow::Quit,
        };

        if flow == Flow::Quit {
            break;
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    info!("quit on {}", app.session.verse().reference);
    Ok(())
}
