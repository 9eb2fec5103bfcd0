//! One-pole coefficient smoothing.
//!
//! The reverb picks up new settings once per block. Stepping a gain or a
//! feedback coefficient at a block edge clicks, so every coefficient the
//! tank uses glides toward its latest target instead.
//!
//! ```rust
//! use scrambler_core::SmoothedParam;
//!
//! let mut dry = SmoothedParam::standard(0.8, 48000.0);
//! dry.set_target(0.0);
//!
//! let first = dry.advance();
//! assert!(first < 0.8 && first > 0.0);
//!
//! // Five time constants later the ramp is all but finished.
//! for _ in 0..2400 {
//!     dry.advance();
//! }
//! assert!(dry.get() < 0.8 * 0.01);
//! ```

use libm::expf;

/// Value that approaches its target exponentially, one sample at a time.
///
/// `y[n] = y[n-1] + k * (target - y[n-1])` with
/// `k = 1 - exp(-1 / (tau * sample_rate))`.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    coeff: f32,
}

impl SmoothedParam {
    /// Time constant used by [`standard`](Self::standard), in milliseconds.
    pub const STANDARD_TIME_MS: f32 = 10.0;

    /// Smoother with time constant `time_ms`, starting settled at `initial`.
    ///
    /// A non-positive time or sample rate makes every change instant.
    pub fn new(initial: f32, sample_rate: f32, time_ms: f32) -> Self {
        let samples = time_ms * 0.001 * sample_rate;
        let coeff = if samples > 0.0 {
            1.0 - expf(-1.0 / samples)
        } else {
            1.0
        };
        Self {
            current: initial,
            target: initial,
            coeff,
        }
    }

    /// Smoother with the 10 ms time constant every reverb coefficient uses.
    pub fn standard(initial: f32, sample_rate: f32) -> Self {
        Self::new(initial, sample_rate, Self::STANDARD_TIME_MS)
    }

    /// Move the target; the value starts gliding on the next
    /// [`advance`](Self::advance).
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Step one sample toward the target and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Value at the last step.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump straight to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Within 1e-6 of the target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time_is_instant() {
        let mut p = SmoothedParam::new(1.0, 48000.0, 0.0);
        p.set_target(0.25);
        assert_eq!(p.advance(), 0.25);

        let mut p = SmoothedParam::new(1.0, 0.0, 10.0);
        p.set_target(0.25);
        assert_eq!(p.advance(), 0.25);
    }

    #[test]
    fn one_time_constant_covers_63_percent() {
        let mut p = SmoothedParam::standard(0.0, 48000.0);
        p.set_target(1.0);
        for _ in 0..480 {
            p.advance();
        }
        let expected = 1.0 - expf(-1.0);
        assert!((p.get() - expected).abs() < 1e-3, "got {}", p.get());
    }

    #[test]
    fn starts_settled_and_holds_value() {
        let mut p = SmoothedParam::standard(0.33, 44100.0);
        assert!(p.is_settled());
        for _ in 0..100 {
            assert_eq!(p.advance(), 0.33);
        }
    }

    #[test]
    fn snap_finishes_the_ramp() {
        let mut p = SmoothedParam::standard(0.2, 48000.0);
        p.set_target(0.8);
        p.advance();
        assert!(!p.is_settled());
        p.snap_to_target();
        assert!(p.is_settled());
        assert_eq!((p.get(), p.target()), (0.8, 0.8));
    }
}
