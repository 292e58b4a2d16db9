use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use termodoro_core::{Action, Clock, Dispatcher, Outcome, PhaseEngine, Snapshot, SoundCue};
use tracing::{debug, info};

use crate::config::{Config, Theme};
use crate::ui;

pub struct App {
    pub engine: PhaseEngine<Box<dyn SoundCue>>,
    pub dispatcher: Dispatcher,
    pub clock: Clock,
    pub theme: Theme,
}

enum LoopEvent {
    Tick,
    Input(Option<std::io::Result<Event>>),
}

impl App {
    pub fn new(config: &Config, cue: Box<dyn SoundCue>, start_paused: bool) -> Self {
        let mut engine = PhaseEngine::new(config.timer, cue);
        if start_paused {
            engine = engine.start_paused();
        }
        Self {
            engine,
            dispatcher: Dispatcher::new(),
            clock: Clock::every_second(),
            theme: config.theme.clone(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn pending(&self) -> Option<Action> {
        self.dispatcher.pending()
    }

    pub fn on_tick(&mut self) {
        if let Some(transition) = self.engine.tick() {
            debug!(?transition, "tick ended phase");
        }
    }

    /// Routes a key press through the dispatcher and keeps the clock in step
    /// with the pause flag.
    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.kind != KeyEventKind::Press {
            return Outcome::Ignored;
        }

        let outcome = if self.dispatcher.pending().is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.dispatcher.confirm(&mut self.engine)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.dispatcher.cancel(),
                _ => Outcome::Ignored,
            }
        } else {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.dispatcher.press(Action::Quit.key(), &mut self.engine)
                }
                KeyCode::Char(c) => self.dispatcher.press(c, &mut self.engine),
                _ => Outcome::Ignored,
            }
        };

        self.sync_clock();
        outcome
    }

    /// Runs the clock only while the engine is not paused.
    pub fn sync_clock(&mut self) {
        self.clock.set_running(!self.engine.is_paused());
    }
}

pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    app.sync_clock();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let event = tokio::select! {
            _ = app.clock.tick() => LoopEvent::Tick,
            event = events.next() => LoopEvent::Input(event),
        };

        match event {
            LoopEvent::Tick => app.on_tick(),
            LoopEvent::Input(Some(Ok(Event::Key(key)))) => {
                if app.handle_key(key) == Outcome::Quit {
                    app.clock.stop();
                    info!("quit confirmed");
                    return Ok(());
                }
            }
            LoopEvent::Input(Some(Ok(_))) => {}
            LoopEvent::Input(Some(Err(e))) => return Err(e.into()),
            LoopEvent::Input(None) => {
                info!("input stream closed");
                return Ok(());
            }
        }
    }
}
