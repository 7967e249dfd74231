//! Audio port
//!
//! Sound effects are procedurally generated single tones - no asset files.
//! The simulation never talks to a device directly: each game buffers the
//! cues it wants played during a tick, and the host drains that buffer
//! through an [`AudioPort`] after the tick. Playback failures are logged
//! and dropped so nothing throws back into the simulation path.

use std::io;

/// Oscillator waveform for a generated tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A fire-and-forget tone request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_secs: f32,
    pub waveform: Waveform,
}

impl Tone {
    pub const fn new(freq_hz: f32, duration_secs: f32, waveform: Waveform) -> Self {
        Self {
            freq_hz,
            duration_secs,
            waveform,
        }
    }
}

/// Playback sink for generated tones. Implementations must not block the
/// caller; a tone is a request, not a synchronization point.
pub trait AudioPort {
    fn play_tone(&mut self, tone: Tone) -> io::Result<()>;
}

/// Drain a tick's worth of cues into a port, logging failures instead of
/// propagating them.
pub fn play_cues(port: &mut dyn AudioPort, cues: impl IntoIterator<Item = Tone>) {
    for tone in cues {
        if let Err(err) = port.play_tone(tone) {
            log::warn!("audio cue dropped ({:.0} Hz): {err}", tone.freq_hz);
        }
    }
}

/// Discards every tone. Default for headless hosts.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioPort for NullAudio {
    fn play_tone(&mut self, _tone: Tone) -> io::Result<()> {
        Ok(())
    }
}

/// Test double that records what would have been played.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Tone>,
}

impl AudioPort for RecordingAudio {
    fn play_tone(&mut self, tone: Tone) -> io::Result<()> {
        self.played.push(tone);
        Ok(())
    }
}

/// Logs tones at debug level. Used by the headless demo driver.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioPort for LogAudio {
    fn play_tone(&mut self, tone: Tone) -> io::Result<()> {
        log::debug!(
            "tone {:?} {:.0} Hz for {:.2}s",
            tone.waveform,
            tone.freq_hz,
            tone.duration_secs
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenAudio;

    impl AudioPort for BrokenAudio {
        fn play_tone(&mut self, _tone: Tone) -> io::Result<()> {
            Err(io::Error::other("device unavailable"))
        }
    }

    #[test]
    fn recording_audio_captures_tones() {
        let mut port = RecordingAudio::default();
        let tone = Tone::new(600.0, 0.2, Waveform::Sine);
        play_cues(&mut port, [tone]);
        assert_eq!(port.played, vec![tone]);
    }

    #[test]
    fn play_cues_swallows_port_failures() {
        let mut port = BrokenAudio;
        // Must not panic or propagate.
        play_cues(&mut port, [Tone::new(150.0, 0.1, Waveform::Square)]);
    }
}
