//! Lowpass-feedback comb filter, the resonator of the Freeverb tank.

use crate::DelayLine;
use crate::flush_denormal;

/// Feedback comb with a one-pole lowpass inside the loop.
///
/// Each pass around the loop loses high frequencies, so the tail darkens as
/// it decays the way air and soft surfaces absorb treble in a real room.
///
/// The coefficients are arguments to [`process`](Self::process) instead of
/// fields: all sixteen combs of a stereo tank share one smoothed damping and
/// one smoothed feedback value per sample.
///
/// ```rust
/// use scrambler_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// // Nothing comes out until the impulse has travelled the whole line.
/// assert_eq!(comb.process(1.0, 0.2, 0.84), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    line: DelayLine,
    lowpass: f32,
}

impl CombFilter {
    /// Comb with a delay of `len` samples.
    pub fn new(len: usize) -> Self {
        Self {
            line: DelayLine::new(len),
            lowpass: 0.0,
        }
    }

    /// Run one sample.
    ///
    /// `damp` in `[0, 1)` is the lowpass pole (0 leaves the loop bright);
    /// `feedback` is the loop gain and must stay below 1 for the tail to die.
    /// Returns the sample leaving the delay line.
    #[inline]
    pub fn process(&mut self, input: f32, damp: f32, feedback: f32) -> f32 {
        let out = self.line.read();
        self.lowpass = flush_denormal(out + damp * (self.lowpass - out));
        self.line.write(input + feedback * self.lowpass);
        out
    }

    /// Silence the line and the lowpass memory.
    pub fn clear(&mut self) {
        self.line.clear();
        self.lowpass = 0.0;
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.line.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_response(comb: &mut CombFilter, damp: f32, feedback: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| comb.process(if i == 0 { 1.0 } else { 0.0 }, damp, feedback))
            .collect()
    }

    #[test]
    fn echoes_repeat_at_line_length() {
        let mut comb = CombFilter::new(8);
        let ir = impulse_response(&mut comb, 0.0, 0.5, 25);

        assert_eq!(ir[8], 1.0);
        assert_eq!(ir[16], 0.5);
        assert_eq!(ir[24], 0.25);
        let others: f32 = ir
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 8 != 0)
            .map(|(_, s)| s.abs())
            .sum();
        assert_eq!(others, 0.0);
    }

    #[test]
    fn damping_smears_and_darkens_echoes() {
        let mut bright = CombFilter::new(16);
        let mut dark = CombFilter::new(16);

        let bright_ir = impulse_response(&mut bright, 0.0, 0.8, 400);
        let dark_ir = impulse_response(&mut dark, 0.7, 0.8, 400);

        let bright_peak = bright_ir[32];
        let dark_peak = dark_ir[32];
        assert!(dark_peak < bright_peak, "{dark_peak} vs {bright_peak}");
        // The lowpass spreads energy into samples after the echo.
        assert!(dark_ir[33] > 0.0);
        assert_eq!(bright_ir[33], 0.0);
    }

    #[test]
    fn clear_silences() {
        let mut comb = CombFilter::new(10);
        for _ in 0..50 {
            comb.process(1.0, 0.3, 0.8);
        }

        comb.clear();

        assert!((0..30).all(|_| comb.process(0.0, 0.3, 0.8) == 0.0));
        assert_eq!(comb.capacity(), 10);
    }

    #[test]
    fn decayed_tail_never_goes_subnormal() {
        let mut comb = CombFilter::new(100);
        for _ in 0..1000 {
            comb.process(0.5, 0.3, 0.9);
        }

        for i in 0..100_000 {
            let out = comb.process(0.0, 0.3, 0.9);
            assert!(
                out == 0.0 || out.abs() > f32::MIN_POSITIVE,
                "subnormal at sample {i}: {out:e}"
            );
        }
    }
}
