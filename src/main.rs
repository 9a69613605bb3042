use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::game::{GameOutcome, Session};
use connect_four::ui::{self, App};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Play over stdin/stdout instead of the full-screen UI
    #[arg(long)]
    text: bool,

    /// Write logs to this file (the full-screen UI logs nothing otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if cli.text {
        let mut session = Session::new(config.game.first_player);
        let outcome = ui::text::run(&mut session, io::stdin().lock(), io::stdout().lock())
            .context("text mode")?;
        if let Some(GameOutcome::Winner(player)) = outcome {
            info!("{} won in text mode", player.name());
        }
        return Ok(());
    }

    run_tui(config).context("terminal UI")
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder
                .filter_level(cli.log_level)
                .write_style(env_logger::WriteStyle::Never)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr is fine while the terminal stays in line mode
        None if cli.text => {
            builder.filter_level(cli.log_level);
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.try_init().context("initializing logger")
}

fn run_tui(config: AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = terminal.show_cursor();

    if let Some(outcome) = app.session().outcome() {
        match outcome {
            GameOutcome::Winner(player) => println!("{} Wins!!", player.name()),
            GameOutcome::Draw => println!("It's a draw!"),
        }
    }

    res
}
