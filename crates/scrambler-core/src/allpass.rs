//! Freeverb-style allpass diffuser.

use crate::DelayLine;
use crate::flush_denormal;

/// Freeverb diffuser used in series after the comb bank.
///
/// Despite the name this is not a true allpass: the direct path has gain -1
/// instead of `-feedback`, so for positive feedback the magnitude response
/// ripples between `fb / (1 - fb)` and `(2 + fb) / (1 + fb)` (1.0 to 1.67 at
/// the default 0.5). Chaining four of them turns the comb bank's discrete echoes
/// into a dense wash.
///
/// ```rust
/// use scrambler_core::AllpassFilter;
///
/// let mut diffuser = AllpassFilter::new(556);
/// // The direct path is inverted.
/// assert_eq!(diffuser.process(1.0), -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    line: DelayLine,
    feedback: f32,
}

impl AllpassFilter {
    /// Diffuser of `len` samples with feedback 0.5.
    pub fn new(len: usize) -> Self {
        Self {
            line: DelayLine::new(len),
            feedback: 0.5,
        }
    }

    /// Loop coefficient, limited to `[-0.99, 0.99]`.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Current loop coefficient.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Run one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let buffered = self.line.read();
        self.line
            .write(flush_denormal(input + self.feedback * buffered));
        buffered - input
    }

    /// Silence the line.
    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.line.len()
    }
}
