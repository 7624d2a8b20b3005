//! Fire-and-forget sound effects synthesized with fundsp and played through
//! rodio. Audio is optional: if no output device exists the game runs silent.

use fundsp::prelude::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 44100;

pub struct Audio {
    // Dropping the stream stops playback, so it lives as long as the game.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Audio {
    pub fn open() -> Option<Self> {
        OutputStream::try_default().ok().map(|(stream, handle)| Audio {
            _stream: stream,
            handle,
        })
    }

    /// Descending saw sweep with a fading gain ramp.
    pub fn play_death(&self) {
        self.play(render_patch(death_patch(), 0.5));
    }

    /// Rising triangle arpeggio for the fireworks moments.
    pub fn play_celebration(&self) {
        self.play(render_patch(celebration_patch(), 0.6));
    }

    fn play(&self, samples: Vec<f32>) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach();
    }
}

fn death_patch() -> impl AudioUnit {
    let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    (freq >> saw()) * gain
}

fn celebration_patch() -> impl AudioUnit {
    let freq = lfo(|t: f32| {
        let notes = [523.25, 659.25, 783.99, 1046.5];
        notes[Ord::min((t / 0.09) as usize, notes.len() - 1)]
    });
    let gain = lfo(|t: f32| lerp(0.12, 0.0, (t / 0.6).min(1.0)));
    (freq >> triangle()) * gain
}

/// Render `secs` of a mono patch into raw samples at the output rate.
fn render_patch(mut unit: impl AudioUnit, secs: f32) -> Vec<f32> {
    unit.set_sample_rate(f64::from(SAMPLE_RATE));
    let n = (secs * SAMPLE_RATE as f32) as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_patch_renders_audible_samples() {
        let samples = render_patch(death_patch(), 0.5);
        assert_eq!(samples.len(), 22050);
        assert!(samples.iter().all(|s| s.is_finite()));
        assert!(samples.iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn celebration_patch_fades_out() {
        let samples = render_patch(celebration_patch(), 0.6);
        assert_eq!(samples.len(), (0.6 * SAMPLE_RATE as f32) as usize);
        // The gain ramp ends at zero, so the tail must be near-silent.
        assert!(samples[samples.len() - 100..].iter().all(|s| s.abs() < 0.01));
    }
}
