//! FM patch: one sine carrier whose frequency is driven by three sine
//! modulators, with an optional reverb on the carrier output
//!
//! The ECS side writes modulator settings through a [`PatchControl`] each
//! frame; the audio thread pulls samples from an [`FmDecoder`] and picks up
//! new settings every [`REFRESH_INTERVAL`] samples. Modulators never reach
//! the output directly.

use std::f32::consts::TAU;
use std::sync::Arc;
use std::time::Duration;

use bevy::audio::{Decodable, Source};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use parking_lot::Mutex;

use crate::configuration::config::{ReverbConfig, SynthConfig};
use crate::mapping::audio::{ModulatorSetting, MODULATOR_COUNT};

/// Samples between two reads of the shared parameters
pub const REFRESH_INTERVAL: u32 = 256;

/// Comb delays in samples at 44.1 kHz (Freeverb tuning)
const COMB_TUNING: [usize; 4] = [1557, 1617, 1491, 1422];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchParams {
    pub carrier_freq: f32,
    pub carrier_amp: f32,
    pub modulators: [ModulatorSetting; MODULATOR_COUNT],
}

impl PatchParams {
    pub fn is_finite(&self) -> bool {
        self.carrier_freq.is_finite()
            && self.carrier_amp.is_finite()
            && self
                .modulators
                .iter()
                .all(|m| m.freq.is_finite() && m.depth.is_finite())
    }
}

/// Handle shared between the frame loop and the audio thread
#[derive(Debug, Clone)]
pub struct PatchControl(Arc<Mutex<PatchParams>>);

impl PatchControl {
    pub fn new(params: PatchParams) -> Self {
        Self(Arc::new(Mutex::new(params)))
    }

    pub fn set_modulators(&self, settings: [ModulatorSetting; MODULATOR_COUNT]) {
        self.0.lock().modulators = settings;
    }

    pub fn snapshot(&self) -> PatchParams {
        *self.0.lock()
    }
}

/// Decodable audio asset; each decoder it hands out plays the live patch
#[derive(Asset, TypePath, Debug, Clone)]
pub struct FmPatch {
    pub control: PatchControl,
    pub sample_rate: u32,
    pub reverb: Option<ReverbConfig>,
}

impl FmPatch {
    /// Carrier at its base frequency, modulators silent until the first frame
    pub fn from_config(cfg: &SynthConfig) -> Self {
        let params = PatchParams {
            carrier_freq: cfg.carrier_freq as f32,
            carrier_amp: cfg.carrier_amp as f32,
            modulators: [ModulatorSetting::default(); MODULATOR_COUNT],
        };

        Self {
            control: PatchControl::new(params),
            sample_rate: cfg.sample_rate,
            reverb: cfg.reverb.enabled.then(|| cfg.reverb.clone()),
        }
    }

    /// The patch never ends, so it is played straight through. Looping
    /// would put it behind a buffer that delays every parameter change.
    pub fn playback_settings() -> PlaybackSettings {
        PlaybackSettings::ONCE
    }
}

impl Decodable for FmPatch {
    type DecoderItem = <FmDecoder as Iterator>::Item;
    type Decoder = FmDecoder;

    fn decoder(&self) -> Self::Decoder {
        FmDecoder::new(
            self.control.clone(),
            self.sample_rate,
            self.reverb.as_ref().map(|r| Reverb::new(r, self.sample_rate)),
        )
    }
}

pub struct FmDecoder {
    control: PatchControl,
    params: PatchParams,
    sample_rate: u32,
    carrier_phase: f32,
    mod_phases: [f32; MODULATOR_COUNT],
    until_refresh: u32,
    reverb: Option<Reverb>,
}

impl FmDecoder {
    pub fn new(control: PatchControl, sample_rate: u32, reverb: Option<Reverb>) -> Self {
        let params = control.snapshot();
        Self {
            control,
            params,
            sample_rate,
            carrier_phase: 0.0,
            mod_phases: [0.0; MODULATOR_COUNT],
            until_refresh: REFRESH_INTERVAL,
            reverb,
        }
    }

    /// Non-finite settings are dropped and the last good ones kept
    fn refresh(&mut self) {
        let next = self.control.snapshot();
        if next.is_finite() {
            self.params = next;
        }
        self.until_refresh = REFRESH_INTERVAL;
    }
}

/// Advance a phase by `delta`, restarting from 0 if it ever stops being finite
fn advance_phase(phase: f32, delta: f32) -> f32 {
    let next = (phase + delta).rem_euclid(TAU);
    if next.is_finite() {
        next
    } else {
        0.0
    }
}

impl Iterator for FmDecoder {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.until_refresh == 0 {
            self.refresh();
        }
        self.until_refresh -= 1;

        let step = TAU / self.sample_rate as f32;

        // sum of modulator outputs, in Hz of carrier deviation
        let mut deviation = 0.0;
        for (phase, m) in self.mod_phases.iter_mut().zip(self.params.modulators) {
            deviation += phase.sin() * m.depth as f32;
            *phase = advance_phase(*phase, m.freq as f32 * step);
        }

        let dry = self.carrier_phase.sin() * self.params.carrier_amp;
        let freq = self.params.carrier_freq + deviation;
        self.carrier_phase = advance_phase(self.carrier_phase, freq * step);

        let out = match self.reverb.as_mut() {
            Some(reverb) => dry + reverb.process(dry),
            None => dry,
        };
        Some(out)
    }
}

impl Source for FmDecoder {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Feedback comb filter with a one-pole lowpass in the loop
struct Comb {
    buffer: Vec<f32>,
    index: usize,
    feedback: f32,
    damp: f32,
    store: f32,
}

impl Comb {
    fn process(&mut self, input: f32) -> f32 {
        let out = self.buffer[self.index];
        self.store = out * (1.0 - self.damp) + self.store * self.damp;
        // input scaled by (1 - feedback) keeps the loop at unity gain
        self.buffer[self.index] = input * (1.0 - self.feedback) + self.store * self.feedback;
        self.index = (self.index + 1) % self.buffer.len();
        out
    }
}

/// Parallel comb reverb. Feedback is set so the tail falls 60 dB over
/// `seconds`; `decay` damps the high end of the tail. The wet output never
/// exceeds `amp` times the loudest input.
pub struct Reverb {
    combs: Vec<Comb>,
    wet: f32,
}

impl Reverb {
    pub fn new(cfg: &ReverbConfig, sample_rate: u32) -> Self {
        let scale = sample_rate as f64 / 44_100.0;
        let combs = COMB_TUNING
            .iter()
            .map(|&tuning| {
                let len = ((tuning as f64 * scale).round() as usize).max(1);
                let delay = len as f64 / sample_rate as f64;
                Comb {
                    buffer: vec![0.0; len],
                    index: 0,
                    feedback: 0.001_f64.powf(delay / cfg.seconds) as f32,
                    damp: cfg.decay as f32,
                    store: 0.0,
                }
            })
            .collect();

        Self {
            combs,
            wet: cfg.amp as f32,
        }
    }

    /// Wet signal only
    pub fn process(&mut self, input: f32) -> f32 {
        let n = self.combs.len() as f32;
        let sum: f32 = self.combs.iter_mut().map(|c| c.process(input)).sum();
        sum / n * self.wet
    }
}
