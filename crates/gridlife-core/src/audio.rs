//! Tone feedback driven by birth/death counts.
//!
//! Each step's births-to-deaths ratio picks a frequency
//! `base ^ (births / deaths)`, clamped to an audible band and exponentially
//! smoothed against the previous tone. The smoothing memory is a plain
//! [`ToneState`] value owned by the caller and threaded through each call.
//! Playing the samples is the audio collaborator's job; this module only
//! produces numbers.

use crate::engine::StepOutcome;

/// Sample rate of generated tones
pub const SAMPLE_RATE: u32 = 22_050;

/// Length of one generated tone in seconds
pub const TONE_DURATION: f32 = 0.1;

/// Frequency mapping parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneModel {
    /// Base raised to the births/deaths ratio
    pub base_frequency: f32,
    pub min_frequency: f32,
    pub max_frequency: f32,
    /// Weight kept from the previous frequency
    pub smoothing: f32,
}

impl Default for ToneModel {
    fn default() -> Self {
        Self {
            base_frequency: 220.0,
            min_frequency: 100.0,
            max_frequency: 800.0,
            smoothing: 0.8,
        }
    }
}

/// Smoothing memory carried between steps
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToneState {
    pub last_frequency: Option<f32>,
}

impl ToneModel {
    /// Unsmoothed, clamped frequency for one step.
    ///
    /// A step with no deaths uses a ratio of 0, which maps to `base^0 = 1` Hz
    /// and clamps up to the minimum.
    pub fn raw_frequency(&self, outcome: &StepOutcome) -> f32 {
        let ratio = if outcome.deaths == 0 {
            0.0
        } else {
            outcome.births as f32 / outcome.deaths as f32
        };
        self.base_frequency
            .powf(ratio)
            .clamp(self.min_frequency, self.max_frequency)
    }

    /// Frequency to play after a step, and the state for the next call.
    ///
    /// Steps that change nothing play no tone and leave the state as is.
    pub fn next_frequency(&self, state: ToneState, outcome: &StepOutcome) -> (ToneState, Option<f32>) {
        if !outcome.changed() {
            return (state, None);
        }
        let raw = self.raw_frequency(outcome);
        let frequency = match state.last_frequency {
            Some(last) => self.smoothing * last + (1.0 - self.smoothing) * raw,
            None => raw,
        };
        (
            ToneState {
                last_frequency: Some(frequency),
            },
            Some(frequency),
        )
    }
}

/// Full-scale 16-bit stereo sine wave, `[left, right]` per frame
pub fn sine_wave(frequency: f32, duration: f32, sample_rate: u32) -> Vec<[i16; 2]> {
    let frames = (sample_rate as f32 * duration) as usize;
    (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let sample = ((2.0 * std::f32::consts::PI * frequency * t).sin() * i16::MAX as f32) as i16;
            [sample, sample]
        })
        .collect()
}
