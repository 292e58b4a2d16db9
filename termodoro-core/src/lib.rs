//! Timer core shared by the termodoro front end.
//!
//! Everything in here is synchronous and side-effect free except for the
//! [`Clock`], which wraps a tokio interval, and the [`SoundCue`] seam, which
//! the caller implements. The front end owns one [`PhaseEngine`] and one
//! [`Dispatcher`] and drives both from a single event loop.

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod phase;
pub mod sound;

pub use clock::Clock;
pub use config::TimerConfig;
pub use dispatch::{Action, Dispatcher, Outcome};
pub use engine::{format_clock, PhaseEngine, Snapshot, TimerState, Transition};
pub use error::ConfigError;
pub use phase::Phase;
pub use sound::{SoundCue, Silent};
