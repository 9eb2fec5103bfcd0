//! Stereo algorithmic reverb.
//!
//! A Freeverb network: each channel runs 8 parallel damped comb filters into
//! 4 series allpass filters. The right channel's delay lines are offset by a
//! fixed stereo spread so the two tails decorrelate, and a width control
//! cross-feeds the two wet outputs.

use scrambler_core::{AllpassFilter, CombFilter, SmoothedParam};

/// Freeverb comb filter delay times (at 44.1kHz reference).
/// These are mutually prime to avoid resonances.
const COMB_TUNINGS_44K: [usize; NUM_COMBS] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Freeverb allpass filter delay times (at 44.1kHz reference).
const ALLPASS_TUNINGS_44K: [usize; NUM_ALLPASSES] = [556, 441, 341, 225];

const NUM_COMBS: usize = 8;
const NUM_ALLPASSES: usize = 4;

/// Extra delay on every right-channel line, in reference samples.
const STEREO_SPREAD: usize = 23;

/// Reference sample rate for tuning constants.
const REFERENCE_RATE: usize = 44100;

/// Input attenuation applied to the summed input before the combs.
const FIXED_GAIN: f32 = 0.015;

const ROOM_SCALE: f32 = 0.28;
const ROOM_OFFSET: f32 = 0.7;
const DAMP_SCALE: f32 = 0.4;
const WET_SCALE: f32 = 3.0;
const DRY_SCALE: f32 = 2.0;

/// Scale delay times from reference rate to target rate.
///
/// Truncates like the classic integer formulation and never returns less
/// than one sample. Absurd rates saturate instead of overflowing.
fn scale_to_rate(samples: usize, sample_rate: f32) -> usize {
    ((sample_rate as usize).saturating_mul(samples) / REFERENCE_RATE).max(1)
}

/// Clamp to `[0, 1]`, keeping `fallback` when `value` is NaN.
fn unit(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// The five controls the reverb is driven by, each in `[0.0, 1.0]`.
///
/// This is the per-block snapshot the plugin copies out of its shared
/// parameter model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbSettings {
    /// Tail length; maps onto comb feedback `0.7..=0.98`.
    pub room_size: f32,
    /// High-frequency absorption in the comb feedback path (0 = bright).
    pub damping: f32,
    /// Level of the reverberated signal.
    pub wet_level: f32,
    /// Level of the unprocessed input.
    pub dry_level: f32,
    /// Stereo width of the wet signal (0 = mono, 1 = full spread).
    pub width: f32,
}

impl Default for ReverbSettings {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
        }
    }
}

impl ReverbSettings {
    /// Returns a copy with every field clamped to `[0, 1]`.
    ///
    /// NaN fields fall back to the corresponding field of `fallback`.
    pub fn sanitized(self, fallback: &Self) -> Self {
        Self {
            room_size: unit(self.room_size, fallback.room_size),
            damping: unit(self.damping, fallback.damping),
            wet_level: unit(self.wet_level, fallback.wet_level),
            dry_level: unit(self.dry_level, fallback.dry_level),
            width: unit(self.width, fallback.width),
        }
    }

    /// Comb feedback derived from the room size.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.room_size * ROOM_SCALE + ROOM_OFFSET
    }

    /// Comb damping coefficient derived from the damping control.
    #[inline]
    pub fn comb_damping(&self) -> f32 {
        self.damping * DAMP_SCALE
    }

    /// Dry gain applied to the input.
    #[inline]
    pub fn dry_gain(&self) -> f32 {
        self.dry_level * DRY_SCALE
    }

    /// Direct and cross-fed wet gains, `(wet1, wet2)`.
    #[inline]
    pub fn wet_gains(&self) -> (f32, f32) {
        let wet = self.wet_level * WET_SCALE;
        (
            0.5 * wet * (1.0 + self.width),
            0.5 * wet * (1.0 - self.width),
        )
    }
}

/// One channel's comb bank and allpass chain.
#[derive(Debug, Clone)]
struct Tank {
    combs: [CombFilter; NUM_COMBS],
    allpasses: [AllpassFilter; NUM_ALLPASSES],
}

impl Tank {
    fn new(sample_rate: f32, spread: usize) -> Self {
        Self {
            combs: core::array::from_fn(|i| {
                CombFilter::new(scale_to_rate(COMB_TUNINGS_44K[i] + spread, sample_rate))
            }),
            allpasses: core::array::from_fn(|i| {
                let mut ap =
                    AllpassFilter::new(scale_to_rate(ALLPASS_TUNINGS_44K[i] + spread, sample_rate));
                ap.set_feedback(0.5);
                ap
            }),
        }
    }

    #[inline]
    fn process(&mut self, input: f32, damp: f32, feedback: f32) -> f32 {
        let mut out = 0.0f32;
        for comb in &mut self.combs {
            out += comb.process(input, damp, feedback);
        }
        for allpass in &mut self.allpasses {
            out = allpass.process(out);
        }
        out
    }

    fn clear(&mut self) {
        for comb in &mut self.combs {
            comb.clear();
        }
        for allpass in &mut self.allpasses {
            allpass.clear();
        }
    }
}

/// Stereo Freeverb reverb.
///
/// All delay lines are allocated in [`Reverb::new`]; processing never
/// allocates. Coefficients derived from [`ReverbSettings`] glide to their new
/// values over 10 ms, so settings may be replaced once per block without
/// clicks.
///
/// # Example
///
/// ```rust
/// use scrambler_dsp::{Reverb, ReverbSettings};
///
/// let mut reverb = Reverb::new(44100.0);
/// reverb.set_settings(ReverbSettings::default());
///
/// // Silence in, silence out.
/// let (l, r) = reverb.process_frame(0.0, 0.0);
/// assert_eq!((l, r), (0.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct Reverb {
    tanks: [Tank; 2],

    damping: SmoothedParam,
    feedback: SmoothedParam,
    dry_gain: SmoothedParam,
    wet_gain1: SmoothedParam,
    wet_gain2: SmoothedParam,

    settings: ReverbSettings,
    sample_rate: f32,
}

impl Reverb {
    /// Create a reverb at the given sample rate with default settings.
    ///
    /// Delay lengths are scaled from their 44.1 kHz tunings.
    pub fn new(sample_rate: f32) -> Self {
        let settings = ReverbSettings::default();
        let (wet1, wet2) = settings.wet_gains();

        Self {
            tanks: [Tank::new(sample_rate, 0), Tank::new(sample_rate, STEREO_SPREAD)],
            damping: SmoothedParam::standard(settings.comb_damping(), sample_rate),
            feedback: SmoothedParam::standard(settings.feedback(), sample_rate),
            dry_gain: SmoothedParam::standard(settings.dry_gain(), sample_rate),
            wet_gain1: SmoothedParam::standard(wet1, sample_rate),
            wet_gain2: SmoothedParam::standard(wet2, sample_rate),
            settings,
            sample_rate,
        }
    }

    /// Replace the settings. Derived coefficients ramp toward their new
    /// values over the following 10 ms.
    ///
    /// Out-of-range fields are clamped and NaN fields keep their previous
    /// value.
    pub fn set_settings(&mut self, settings: ReverbSettings) {
        let settings = settings.sanitized(&self.settings);
        if settings == self.settings {
            return;
        }
        self.settings = settings;

        let (wet1, wet2) = settings.wet_gains();
        self.damping.set_target(settings.comb_damping());
        self.feedback.set_target(settings.feedback());
        self.dry_gain.set_target(settings.dry_gain());
        self.wet_gain1.set_target(wet1);
        self.wet_gain2.set_target(wet2);
    }

    /// The settings most recently applied.
    pub fn settings(&self) -> ReverbSettings {
        self.settings
    }

    /// Sample rate the delay lines were sized for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Silence the tail and jump every coefficient to its target.
    pub fn reset(&mut self) {
        for tank in &mut self.tanks {
            tank.clear();
        }
        self.damping.snap_to_target();
        self.feedback.snap_to_target();
        self.dry_gain.snap_to_target();
        self.wet_gain1.snap_to_target();
        self.wet_gain2.snap_to_target();
    }

    /// Process one stereo frame.
    #[inline]
    pub fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let input = (left + right) * FIXED_GAIN;
        let damp = self.damping.advance();
        let feedback = self.feedback.advance();

        let [tank_l, tank_r] = &mut self.tanks;
        let out_l = tank_l.process(input, damp, feedback);
        let out_r = tank_r.process(input, damp, feedback);

        let dry = self.dry_gain.advance();
        let wet1 = self.wet_gain1.advance();
        let wet2 = self.wet_gain2.advance();

        (
            out_l * wet1 + out_r * wet2 + left * dry,
            out_r * wet1 + out_l * wet2 + right * dry,
        )
    }

    /// Process one mono sample through the left tank.
    ///
    /// Width has no effect in mono: only the direct wet gain is used.
    #[inline]
    pub fn process_mono_sample(&mut self, sample: f32) -> f32 {
        let input = sample * FIXED_GAIN;
        let damp = self.damping.advance();
        let feedback = self.feedback.advance();

        let out = self.tanks[0].process(input, damp, feedback);

        let dry = self.dry_gain.advance();
        let wet1 = self.wet_gain1.advance();
        self.wet_gain2.advance();

        out * wet1 + sample * dry
    }

    /// Process a stereo pair of buffers in place.
    ///
    /// Only the first `min(left.len(), right.len())` frames are touched.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_frame(*l, *r);
        }
    }

    /// Process a mono buffer in place.
    pub fn process_mono(&mut self, samples: &mut [f32]) {
        for s in samples.iter_mut() {
            *s = self.process_mono_sample(*s);
        }
    }
}
