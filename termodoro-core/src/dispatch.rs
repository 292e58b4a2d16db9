//! Single-key command dispatch with a confirmation gate.
//!
//! Pause and skip apply straight away. Reset and quit park in the gate until
//! the user confirms or cancels, and every other key press is dropped while
//! something is parked.

use tracing::{debug, info};

use crate::engine::PhaseEngine;
use crate::sound::SoundCue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    TogglePause,
    Skip,
    Reset,
    Quit,
}

impl Action {
    /// Key commands in the order they are listed to the user.
    pub const ALL: [Action; 4] = [Action::TogglePause, Action::Reset, Action::Skip, Action::Quit];

    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'p' => Some(Action::TogglePause),
            's' => Some(Action::Skip),
            'r' => Some(Action::Reset),
            'q' => Some(Action::Quit),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Action::TogglePause => 'p',
            Action::Skip => 's',
            Action::Reset => 'r',
            Action::Quit => 'q',
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Action::TogglePause => "pause",
            Action::Skip => "skip to next phase",
            Action::Reset => "reset",
            Action::Quit => "quit",
        }
    }

    /// Destructive actions wait for an explicit confirm.
    pub fn needs_confirmation(self) -> bool {
        matches!(self, Action::Reset | Action::Quit)
    }
}

/// What a key press turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened.
    Ignored,
    /// The action ran against the engine.
    Applied(Action),
    /// The action is waiting for confirmation.
    Pending(Action),
    /// A pending action was discarded.
    Cancelled(Action),
    /// Quit was confirmed; the caller should shut down and exit 0.
    Quit,
}

#[derive(Debug, Default)]
pub struct Dispatcher {
    pending: Option<Action>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The action waiting in the confirmation gate, if any.
    pub fn pending(&self) -> Option<Action> {
        self.pending
    }

    pub fn press<S: SoundCue>(&mut self, key: char, engine: &mut PhaseEngine<S>) -> Outcome {
        if let Some(pending) = self.pending {
            debug!(?key, ?pending, "input dropped while awaiting confirmation");
            return Outcome::Ignored;
        }

        let Some(action) = Action::from_key(key) else {
            debug!(?key, "unbound key");
            return Outcome::Ignored;
        };

        if action.needs_confirmation() {
            info!(?action, "awaiting confirmation");
            self.pending = Some(action);
            return Outcome::Pending(action);
        }

        Self::apply(action, engine)
    }

    /// Runs the pending action and clears the gate.
    pub fn confirm<S: SoundCue>(&mut self, engine: &mut PhaseEngine<S>) -> Outcome {
        match self.pending.take() {
            Some(action) => {
                info!(?action, "confirmed");
                Self::apply(action, engine)
            }
            None => Outcome::Ignored,
        }
    }

    /// Drops the pending action without touching the engine.
    pub fn cancel(&mut self) -> Outcome {
        match self.pending.take() {
            Some(action) => {
                info!(?action, "cancelled");
                Outcome::Cancelled(action)
            }
            None => Outcome::Ignored,
        }
    }

    fn apply<S: SoundCue>(action: Action, engine: &mut PhaseEngine<S>) -> Outcome {
        match action {
            Action::TogglePause => {
                engine.toggle_pause();
            }
            Action::Skip => {
                engine.skip();
            }
            Action::Reset => engine.reset(),
            Action::Quit => return Outcome::Quit,
        }
        Outcome::Applied(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Phase, Silent, TimerConfig};

    fn engine() -> PhaseEngine<Silent> {
        PhaseEngine::new(TimerConfig::default(), Silent)
    }

    #[test]
    fn keys_map_to_actions() {
        for action in Action::ALL {
            assert_eq!(Action::from_key(action.key()), Some(action));
        }
        assert_eq!(Action::from_key('x'), None);
        assert_eq!(Action::from_key('P'), None);
    }

    #[test]
    fn pause_and_skip_apply_immediately() {
        let mut engine = engine();
        let mut dispatcher = Dispatcher::new();

        assert_eq!(
            dispatcher.press('p', &mut engine),
            Outcome::Applied(Action::TogglePause)
        );
        assert!(engine.is_paused());
        assert_eq!(dispatcher.press('s', &mut engine), Outcome::Applied(Action::Skip));
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(dispatcher.pending(), None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut engine = engine();
        let before = engine.state().clone();
        let mut dispatcher = Dispatcher::new();
        for key in ['x', ' ', '1', 'Q', '\n'] {
            assert_eq!(dispatcher.press(key, &mut engine), Outcome::Ignored);
        }
        assert_eq!(engine.state(), &before);
        assert_eq!(dispatcher.pending(), None);
    }

    #[test]
    fn reset_waits_for_confirmation() {
        let mut engine = engine();
        engine.skip();
        engine.tick();
        let mut dispatcher = Dispatcher::new();

        assert_eq!(dispatcher.press('r', &mut engine), Outcome::Pending(Action::Reset));
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(dispatcher.pending(), Some(Action::Reset));

        assert_eq!(dispatcher.confirm(&mut engine), Outcome::Applied(Action::Reset));
        assert_eq!(engine.phase(), Phase::Work);
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(dispatcher.pending(), None);
    }

    #[test]
    fn cancelled_reset_leaves_state_alone() {
        let mut engine = engine();
        engine.skip();
        engine.tick();
        let before = engine.state().clone();
        let mut dispatcher = Dispatcher::new();

        dispatcher.press('r', &mut engine);
        assert_eq!(dispatcher.cancel(), Outcome::Cancelled(Action::Reset));
        assert_eq!(engine.state(), &before);
        assert_eq!(dispatcher.pending(), None);
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut engine = engine();
        let before = engine.state().clone();
        let mut dispatcher = Dispatcher::new();

        assert_eq!(dispatcher.press('q', &mut engine), Outcome::Pending(Action::Quit));
        assert_eq!(dispatcher.cancel(), Outcome::Cancelled(Action::Quit));
        assert_eq!(engine.state(), &before);

        dispatcher.press('q', &mut engine);
        assert_eq!(dispatcher.confirm(&mut engine), Outcome::Quit);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn other_input_is_dropped_while_pending() {
        let mut engine = engine();
        let mut dispatcher = Dispatcher::new();
        dispatcher.press('r', &mut engine);

        assert_eq!(dispatcher.press('p', &mut engine), Outcome::Ignored);
        assert_eq!(dispatcher.press('s', &mut engine), Outcome::Ignored);
        assert_eq!(dispatcher.press('q', &mut engine), Outcome::Ignored);
        assert!(!engine.is_paused());
        assert_eq!(engine.phase(), Phase::Work);
        assert_eq!(dispatcher.pending(), Some(Action::Reset));
    }

    #[test]
    fn confirm_and_cancel_without_pending_are_noops() {
        let mut engine = engine();
        let before = engine.state().clone();
        let mut dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.confirm(&mut engine), Outcome::Ignored);
        assert_eq!(dispatcher.cancel(), Outcome::Ignored);
        assert_eq!(engine.state(), &before);
    }
}
