use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use termodoro_core::{Silent, SoundCue, TimerConfig};
use tracing::{error, info};

mod app;
mod config;
mod logging;
mod sound;
mod ui;

use app::App;
use sound::NotifySound;

const KEY_HELP: &str = "\
while running press:
  p - pause
  r - reset
  s - skip to next phase
  q - quit

reset and quit ask for confirmation (y/enter to confirm, n/esc to cancel)";

#[derive(Parser, Debug)]
#[command(name = "termodoro", version)]
#[command(about = "A pomodoro timer for the terminal", long_about = None)]
#[command(after_help = KEY_HELP)]
struct Cli {
    /// Work phase length in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    work: Option<u64>,
    /// Short break length in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    short_break: Option<u64>,
    /// Long break length in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    long_break: Option<u64>,
    /// Work rounds per cycle before the long break
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    rounds: Option<u32>,
    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Start with the timer paused
    #[arg(long)]
    paused: bool,
    /// Disable the sound cue on phase changes
    #[arg(long)]
    mute: bool,
    /// Log level, overridden by TERMODORO_LOG
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Applies command line durations over the file values.
    fn timer_config(&self, base: TimerConfig) -> Result<TimerConfig> {
        let timer = TimerConfig {
            work_seconds: self.work.unwrap_or(base.work_seconds),
            short_break_seconds: self.short_break.unwrap_or(base.short_break_seconds),
            long_break_seconds: self.long_break.unwrap_or(base.long_break_seconds),
            rounds_per_cycle: self.rounds.unwrap_or(base.rounds_per_cycle),
        };
        timer.validate()?;
        Ok(timer)
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Passes `result` through, running `restore` first when it is an error.
fn restore_on_err<T>(result: io::Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    result.map_err(|err| {
        if let Err(restore_err) = restore() {
            error!("failed to restore terminal: {:?}", restore_err);
        }
        err.into()
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;
    config.timer = cli.timer_config(config.timer)?;

    let log_file = logging::init_logging(&cli.log_level)?;
    info!(?log_file, timer = ?config.timer, "starting termodoro");

    let cue: Box<dyn SoundCue> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(NotifySound::new())
    };
    let app = App::new(&config, cue, cli.paused);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    restore_on_err(execute!(stdout, EnterAlternateScreen), restore_terminal)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = restore_on_err(Terminal::new(backend), restore_terminal)?;

    let res = app::run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("event loop failed: {:?}", err);
        return Err(err);
    }

    info!("bye");
    Ok(())
}
