//! Phase engine: the pomodoro state machine.
//!
//! The engine has no timer of its own. The caller delivers one [`tick`] per
//! second while the timer runs and forwards user commands; the engine keeps
//! the counters consistent and fires the sound cue on every phase change.
//!
//! ```text
//! Work ──(rounds_in_cycle <= rounds_per_cycle)──> ShortBreak ──> Work
//! Work ──(rounds_in_cycle >  rounds_per_cycle)──> LongBreak  ──> Work
//! ```
//!
//! [`tick`]: PhaseEngine::tick

use tracing::{debug, info};

use crate::config::TimerConfig;
use crate::phase::Phase;
use crate::sound::SoundCue;

/// Formats a second count as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours; a 100 minute phase shows `100:00`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Everything the engine owns about the running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub elapsed_seconds: u64,
    pub target_seconds: u64,
    pub rounds_in_cycle: u32,
    /// Work rounds over the whole session, cosmetic.
    pub total_rounds: u32,
    pub is_paused: bool,
}

impl TimerState {
    fn initial(config: &TimerConfig, is_paused: bool) -> Self {
        Self {
            phase: Phase::Work,
            elapsed_seconds: 0,
            target_seconds: config.target_for(Phase::Work),
            rounds_in_cycle: 1,
            total_rounds: 1,
            is_paused,
        }
    }
}

/// A completed phase change, as reported by [`PhaseEngine::tick`] and
/// [`PhaseEngine::skip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub rounds_in_cycle: u32,
    pub total_rounds: u32,
}

/// Read-only projection handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub time_text: String,
    pub elapsed_seconds: u64,
    pub target_seconds: u64,
    pub remaining_seconds: u64,
    /// Fraction of the current phase already spent, `0.0..=1.0`.
    pub progress: f64,
    pub rounds_in_cycle: u32,
    pub rounds_per_cycle: u32,
    pub total_rounds: u32,
    pub paused: bool,
}

pub struct PhaseEngine<S> {
    config: TimerConfig,
    state: TimerState,
    time_text: String,
    cue: S,
}

impl<S: SoundCue> PhaseEngine<S> {
    /// Creates a running engine at the start of the first work round.
    pub fn new(config: TimerConfig, cue: S) -> Self {
        let state = TimerState::initial(&config, false);
        Self {
            config,
            time_text: format_clock(state.elapsed_seconds),
            state,
            cue,
        }
    }

    /// Starts the session paused instead of running.
    pub fn start_paused(mut self) -> Self {
        self.state.is_paused = true;
        self
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    /// The `MM:SS` elapsed time as of the last mutation.
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Advances the clock by one second.
    ///
    /// Ticks that arrive while paused are dropped. Once elapsed time passes
    /// the phase target the engine moves to the next phase and returns the
    /// transition.
    pub fn tick(&mut self) -> Option<Transition> {
        if self.state.is_paused {
            debug!("tick ignored while paused");
            return None;
        }

        self.state.elapsed_seconds = self.state.elapsed_seconds.saturating_add(1);
        let transition = if self.state.elapsed_seconds > self.state.target_seconds {
            Some(self.advance_phase())
        } else {
            None
        };
        self.refresh_time_text();
        transition
    }

    /// Ends the current phase immediately, whatever the elapsed time.
    pub fn skip(&mut self) -> Transition {
        info!(phase = %self.state.phase, elapsed = self.state.elapsed_seconds, "skipping phase");
        let transition = self.advance_phase();
        self.refresh_time_text();
        transition
    }

    /// Returns to the first work round. The pause flag is left as is.
    pub fn reset(&mut self) {
        info!(phase = %self.state.phase, "resetting timer");
        self.state = TimerState::initial(&self.config, self.state.is_paused);
        self.refresh_time_text();
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.is_paused = !self.state.is_paused;
        info!(paused = self.state.is_paused, "pause toggled");
        self.state.is_paused
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let progress = if state.target_seconds == 0 {
            0.0
        } else {
            (state.elapsed_seconds as f64 / state.target_seconds as f64).min(1.0)
        };
        Snapshot {
            phase: state.phase,
            time_text: self.time_text.clone(),
            elapsed_seconds: state.elapsed_seconds,
            target_seconds: state.target_seconds,
            remaining_seconds: state.target_seconds.saturating_sub(state.elapsed_seconds),
            progress,
            rounds_in_cycle: state.rounds_in_cycle,
            rounds_per_cycle: self.config.rounds_per_cycle,
            total_rounds: state.total_rounds,
            paused: state.is_paused,
        }
    }

    fn advance_phase(&mut self) -> Transition {
        let from = self.state.phase;
        let to = match from {
            Phase::Work if self.state.rounds_in_cycle > self.config.rounds_per_cycle => {
                self.state.total_rounds = self.state.total_rounds.saturating_add(1);
                self.state.rounds_in_cycle = 1;
                Phase::LongBreak
            }
            Phase::Work => {
                self.state.total_rounds = self.state.total_rounds.saturating_add(1);
                self.state.rounds_in_cycle = self.state.rounds_in_cycle.saturating_add(1);
                Phase::ShortBreak
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };

        self.state.phase = to;
        self.state.elapsed_seconds = 0;
        self.state.target_seconds = self.config.target_for(to);

        info!(
            %from,
            %to,
            rounds_in_cycle = self.state.rounds_in_cycle,
            total_rounds = self.state.total_rounds,
            "phase changed"
        );
        self.cue.play(to.clip());

        Transition {
            from,
            to,
            rounds_in_cycle: self.state.rounds_in_cycle,
            total_rounds: self.state.total_rounds,
        }
    }

    fn refresh_time_text(&mut self) {
        self.time_text = format_clock(self.state.elapsed_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl SoundCue for Recorder {
        fn play(&self, clip: &'static str) {
            self.0.borrow_mut().push(clip);
        }
    }

    fn short_config() -> TimerConfig {
        TimerConfig {
            work_seconds: 15,
            short_break_seconds: 3,
            long_break_seconds: 9,
            rounds_per_cycle: 2,
        }
    }

    fn engine() -> (PhaseEngine<Recorder>, Recorder) {
        let recorder = Recorder::default();
        (PhaseEngine::new(short_config(), recorder.clone()), recorder)
    }

    /// Ticks until the current phase ends and returns the transition.
    fn finish_phase(engine: &mut PhaseEngine<Recorder>) -> Transition {
        loop {
            if let Some(transition) = engine.tick() {
                return transition;
            }
        }
    }

    #[test]
    fn format_clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(100 * 60 + 1), "100:01");
    }

    #[test]
    fn starts_at_first_work_round() {
        let (engine, _) = engine();
        let state = engine.state();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.elapsed_seconds, 0);
        assert_eq!(state.target_seconds, 15);
        assert_eq!(state.rounds_in_cycle, 1);
        assert_eq!(state.total_rounds, 1);
        assert!(!state.is_paused);
        assert_eq!(engine.time_text(), "00:00");
    }

    #[test]
    fn start_paused_only_sets_pause_flag() {
        let (engine, _) = engine();
        let engine = engine.start_paused();
        assert!(engine.is_paused());
        assert_eq!(engine.state().elapsed_seconds, 0);
    }

    #[test]
    fn tick_increments_and_formats() {
        let (mut engine, _) = engine();
        for _ in 0..5 {
            assert_eq!(engine.tick(), None);
        }
        assert_eq!(engine.state().elapsed_seconds, 5);
        assert_eq!(engine.time_text(), "00:05");
    }

    #[test]
    fn transition_waits_until_target_is_exceeded() {
        let (mut engine, recorder) = engine();
        for _ in 0..15 {
            assert_eq!(engine.tick(), None);
        }
        assert_eq!(engine.state().elapsed_seconds, 15);
        assert!(recorder.0.borrow().is_empty());

        let transition = engine.tick().expect("16th tick ends the work phase");
        assert_eq!(transition.from, Phase::Work);
        assert_eq!(transition.to, Phase::ShortBreak);
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(engine.state().target_seconds, 3);
        assert_eq!(engine.time_text(), "00:00");
    }

    #[test]
    fn paused_ticks_are_dropped() {
        let (mut engine, _) = engine();
        engine.tick();
        engine.toggle_pause();
        for _ in 0..100 {
            assert_eq!(engine.tick(), None);
        }
        assert_eq!(engine.state().elapsed_seconds, 1);
        assert_eq!(engine.phase(), Phase::Work);
    }

    #[test]
    fn full_cycle_reaches_long_break_after_threshold() {
        let (mut engine, _) = engine();

        let t = finish_phase(&mut engine);
        assert_eq!((t.from, t.to), (Phase::Work, Phase::ShortBreak));
        assert_eq!(engine.state().rounds_in_cycle, 2);
        assert_eq!(engine.state().total_rounds, 2);

        let t = finish_phase(&mut engine);
        assert_eq!((t.from, t.to), (Phase::ShortBreak, Phase::Work));
        assert_eq!(engine.state().rounds_in_cycle, 2);

        let t = finish_phase(&mut engine);
        assert_eq!((t.from, t.to), (Phase::Work, Phase::ShortBreak));
        assert_eq!(engine.state().rounds_in_cycle, 3);

        finish_phase(&mut engine);
        let t = finish_phase(&mut engine);
        assert_eq!((t.from, t.to), (Phase::Work, Phase::LongBreak));
        assert_eq!(engine.state().rounds_in_cycle, 1);
        assert_eq!(engine.state().total_rounds, 4);
        assert_eq!(engine.state().target_seconds, 9);

        let t = finish_phase(&mut engine);
        assert_eq!((t.from, t.to), (Phase::LongBreak, Phase::Work));
        assert_eq!(engine.state().target_seconds, 15);
        assert_eq!(engine.state().total_rounds, 4);
    }

    #[test]
    fn skip_advances_from_zero_elapsed() {
        let (mut engine, recorder) = engine();
        let t = engine.skip();
        assert_eq!(t.to, Phase::ShortBreak);
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(*recorder.0.borrow(), vec![Phase::ShortBreak.clip()]);

        let t = engine.skip();
        assert_eq!(t.to, Phase::Work);
        assert_eq!(engine.state().target_seconds, 15);
    }

    #[test]
    fn skip_works_while_paused_and_keeps_pause() {
        let (mut engine, _) = engine();
        engine.toggle_pause();
        engine.skip();
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert!(engine.is_paused());
    }

    #[test]
    fn cue_fires_once_per_transition() {
        let (mut engine, recorder) = engine();
        for _ in 0..(16 + 4 + 16) {
            engine.tick();
        }
        engine.skip();
        assert_eq!(
            *recorder.0.borrow(),
            vec![
                Phase::ShortBreak.clip(),
                Phase::Work.clip(),
                Phase::ShortBreak.clip(),
                Phase::Work.clip(),
            ]
        );
    }

    #[test]
    fn reset_restores_initial_counters() {
        let (mut engine, _) = engine();
        engine.skip();
        engine.skip();
        engine.tick();
        engine.tick();
        engine.toggle_pause();

        engine.reset();

        let state = engine.state();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.elapsed_seconds, 0);
        assert_eq!(state.target_seconds, 15);
        assert_eq!(state.rounds_in_cycle, 1);
        assert_eq!(state.total_rounds, 1);
        assert!(state.is_paused);
        assert_eq!(engine.time_text(), "00:00");
    }

    #[test]
    fn toggle_pause_twice_is_identity() {
        let (mut engine, _) = engine();
        engine.tick();
        let before = engine.state().clone();
        assert!(engine.toggle_pause());
        assert!(!engine.toggle_pause());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn snapshot_reports_remaining_and_progress() {
        let (mut engine, _) = engine();
        for _ in 0..5 {
            engine.tick();
        }
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.time_text, "00:05");
        assert_eq!(snapshot.remaining_seconds, 10);
        assert!((snapshot.progress - 5.0 / 15.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.rounds_per_cycle, 2);
        assert!(!snapshot.paused);
    }
}
