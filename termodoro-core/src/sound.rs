//! Audio cue seam.

/// Plays a short clip when the timer changes phase.
///
/// Implementations must return immediately. Anything slow or fallible runs
/// elsewhere and reports failures through `tracing`, never to the caller.
pub trait SoundCue {
    fn play(&self, clip: &'static str);
}

/// A cue that makes no sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundCue for Silent {
    fn play(&self, clip: &'static str) {
        tracing::trace!(clip, "sound cue muted");
    }
}

impl<S: SoundCue + ?Sized> SoundCue for Box<S> {
    fn play(&self, clip: &'static str) {
        (**self).play(clip)
    }
}
