use std::fmt;

/// The interval the user is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Work, Phase::ShortBreak, Phase::LongBreak];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Sound clip played when this phase is entered.
    ///
    /// Names follow the freedesktop sound theme so desktop notification
    /// daemons can resolve them.
    pub fn clip(self) -> &'static str {
        match self {
            Phase::Work => "alarm-clock-elapsed",
            Phase::ShortBreak => "complete",
            Phase::LongBreak => "bell",
        }
    }

    /// Inverse of [`Phase::clip`].
    pub fn from_clip(clip: &str) -> Option<Phase> {
        Phase::ALL.into_iter().find(|phase| phase.clip() == clip)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
