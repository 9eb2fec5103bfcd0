//! Fixed-length delay line.
//!
//! The reverb network only ever reads its delay lines at full length, so the
//! line is a plain circular buffer: [`DelayLine::read`] returns the sample
//! written `len` writes ago, and [`DelayLine::write`] overwrites it.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Circular-buffer delay line (heap-allocated once).
///
/// # Memory
///
/// The buffer is allocated during construction and never reallocates.
/// Reading, writing and clearing are allocation-free.
///
/// # Example
///
/// ```rust
/// use scrambler_core::DelayLine;
///
/// let mut delay = DelayLine::new(3);
/// for x in [1.0, 2.0, 3.0] {
///     delay.write(x);
/// }
/// // The oldest sample comes out first.
/// assert_eq!(delay.read(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    pos: usize,
}

impl DelayLine {
    /// Creates a new delay line of `len` samples, filled with silence.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "Delay size must be > 0");

        Self {
            buffer: vec![0.0; len],
            pos: 0,
        }
    }

    /// Returns the sample written `len()` writes ago.
    #[inline]
    pub fn read(&self) -> f32 {
        self.buffer[self.pos]
    }

    /// Writes a sample, replacing the oldest one, and advances.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.pos] = sample;
        self.pos += 1;
        if self.pos == self.buffer.len() {
            self.pos = 0;
        }
    }

    /// Combined read and write operation.
    #[inline]
    pub fn read_write(&mut self, sample: f32) -> f32 {
        let output = self.read();
        self.write(sample);
        output
    }

    /// Clears the delay line (sets all samples to 0).
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.pos = 0;
    }

    /// Delay length in samples.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always `false`: a delay line holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
