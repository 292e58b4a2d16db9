//! Desktop notification sound cue.

use notify_rust::{Notification, Timeout};
use termodoro_core::{Phase, SoundCue};
use tracing::{debug, warn};

/// Plays the phase clip through the desktop notification daemon.
///
/// The notification is shown on tokio's blocking pool and never awaited, so a
/// slow or missing daemon cannot hold up the event loop.
#[derive(Debug, Clone)]
pub struct NotifySound {
    appname: &'static str,
}

impl NotifySound {
    pub fn new() -> Self {
        Self {
            appname: "termodoro",
        }
    }
}

impl Default for NotifySound {
    fn default() -> Self {
        Self::new()
    }
}

pub fn notification_body(clip: &str) -> String {
    match Phase::from_clip(clip) {
        Some(Phase::Work) => "Back to work".to_string(),
        Some(phase) => format!("Time for a {}", phase.label().to_lowercase()),
        None => "Phase changed".to_string(),
    }
}

impl SoundCue for NotifySound {
    fn play(&self, clip: &'static str) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(clip, "no runtime available, sound cue skipped");
            return;
        };
        let appname = self.appname;
        handle.spawn_blocking(move || {
            if let Err(e) = Notification::new()
                .summary("Termodoro")
                .body(&notification_body(clip))
                .appname(appname)
                .sound_name(clip)
                .timeout(Timeout::Milliseconds(5000))
                .show()
            {
                warn!(clip, "Failed to play sound cue: {}", e);
            } else {
                debug!(clip, "sound cue played");
            }
        });
    }
}
