//! The reverb engine lifecycle.
//!
//! `ReverbProcessor` owns the DSP state and drives it from the host's block
//! callback. Each block it takes one snapshot of the shared parameters,
//! hands the snapshot to the reverb, and transforms the buffer in place.
//!
//! The audio path never allocates, locks, logs or panics. Anything it cannot
//! handle (no `prepare` yet, a buffer that does not match the prepared
//! layout) leaves the buffer untouched and reports [`ProcessStatus::Bypassed`].

use crate::error::PluginError;
use crate::params::ReverbParameters;
use scrambler_dsp::Reverb;

/// Configuration the host promises to honour until the next `prepare`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest number of frames any single block will contain.
    pub max_block_size: usize,
    /// Channel count, 1 or 2.
    pub num_channels: usize,
}

impl ProcessSpec {
    /// Stereo at the given rate and block size.
    pub fn stereo(sample_rate: f32, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels: 2,
        }
    }

    /// Mono at the given rate and block size.
    pub fn mono(sample_rate: f32, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels: 1,
        }
    }

    /// Highest sample rate `prepare` accepts, in Hz.
    pub const MAX_SAMPLE_RATE: f32 = 768_000.0;

    fn validate(&self) -> Result<(), PluginError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(PluginError::invalid_spec("sample rate must be positive and finite"));
        }
        if self.sample_rate > Self::MAX_SAMPLE_RATE {
            return Err(PluginError::invalid_spec("sample rate above 768 kHz"));
        }
        if self.max_block_size == 0 {
            return Err(PluginError::invalid_spec("max block size must be non-zero"));
        }
        if !(1..=2).contains(&self.num_channels) {
            return Err(PluginError::invalid_spec("only mono and stereo are supported"));
        }
        Ok(())
    }
}

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Constructed, never prepared.
    #[default]
    Uninitialized,
    /// DSP state allocated; ready to process.
    Prepared,
    /// DSP state dropped by `release`.
    Released,
}

/// Outcome of a process call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ProcessStatus {
    /// The buffer now holds reverberated audio.
    Processed,
    /// The buffer was left unmodified.
    Bypassed,
}

/// Real-time reverb engine.
///
/// Created with a handle to the shared parameters; allocates nothing until
/// [`prepare`](Self::prepare).
///
/// # Example
///
/// ```rust
/// use scrambler_plugin::{ProcessSpec, ProcessStatus, ReverbParameters, ReverbProcessor};
///
/// let params = ReverbParameters::new();
/// let mut engine = ReverbProcessor::new(params.clone());
/// engine.prepare(ProcessSpec::stereo(48000.0, 512)).unwrap();
///
/// let mut left = vec![0.0f32; 512];
/// let mut right = vec![0.0f32; 512];
/// assert_eq!(engine.process_stereo(&mut left, &mut right), ProcessStatus::Processed);
/// ```
#[derive(Debug)]
pub struct ReverbProcessor {
    params: ReverbParameters,
    reverb: Option<Reverb>,
    spec: Option<ProcessSpec>,
    state: EngineState,
}

impl ReverbProcessor {
    /// Create an unprepared engine reading from `params`.
    pub fn new(params: ReverbParameters) -> Self {
        Self {
            params,
            reverb: None,
            spec: None,
            state: EngineState::Uninitialized,
        }
    }

    /// Allocate DSP state for `spec`, discarding any previous state.
    ///
    /// On error nothing changes: a prepared engine stays prepared with its
    /// old spec.
    pub fn prepare(&mut self, spec: ProcessSpec) -> Result<(), PluginError> {
        spec.validate()?;

        let mut reverb = Reverb::new(spec.sample_rate);
        reverb.set_settings(self.params.snapshot());
        reverb.reset();

        self.reverb = Some(reverb);
        self.spec = Some(spec);
        self.state = EngineState::Prepared;

        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block_size = spec.max_block_size,
            channels = spec.num_channels,
            "reverb prepared"
        );
        Ok(())
    }

    /// Clear the reverb tail without reallocating.
    pub fn reset(&mut self) {
        if let Some(reverb) = &mut self.reverb {
            reverb.set_settings(self.params.snapshot());
            reverb.reset();
        }
    }

    /// Drop DSP state. Idempotent, and safe without a prior `prepare`.
    pub fn release(&mut self) {
        if self.reverb.take().is_some() {
            tracing::debug!("reverb released");
        }
        self.spec = None;
        if self.state == EngineState::Prepared {
            self.state = EngineState::Released;
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Spec of the last successful `prepare`, while prepared.
    pub fn spec(&self) -> Option<ProcessSpec> {
        self.spec
    }

    /// The shared parameters this engine reads.
    pub fn params(&self) -> &ReverbParameters {
        &self.params
    }

    /// Snapshot the parameters and return the reverb, if a block of
    /// `channels` x `frames` fits the prepared spec.
    #[inline]
    fn begin_block(&mut self, channels: usize, frames: usize) -> Option<&mut Reverb> {
        let spec = self.spec?;
        if channels != spec.num_channels || frames > spec.max_block_size {
            return None;
        }
        let settings = self.params.snapshot();
        let reverb = self.reverb.as_mut()?;
        reverb.set_settings(settings);
        Some(reverb)
    }

    /// Process separate per-channel buffers in place.
    ///
    /// All channel buffers must have the same length.
    pub fn process_planar(&mut self, channels: &mut [&mut [f32]]) -> ProcessStatus {
        let frames = channels.first().map_or(0, |c| c.len());
        if channels.iter().any(|c| c.len() != frames) {
            return ProcessStatus::Bypassed;
        }
        let Some(reverb) = self.begin_block(channels.len(), frames) else {
            return ProcessStatus::Bypassed;
        };

        match channels {
            [mono] => no_denormals::no_denormals(|| reverb.process_mono(mono)),
            [left, right] => no_denormals::no_denormals(|| reverb.process_stereo(left, right)),
            _ => return ProcessStatus::Bypassed,
        }
        ProcessStatus::Processed
    }

    /// Process an interleaved buffer in place.
    ///
    /// The buffer length must be a whole number of `channels`-sample frames.
    pub fn process_interleaved(&mut self, buffer: &mut [f32], channels: usize) -> ProcessStatus {
        if channels == 0 || buffer.len() % channels != 0 {
            return ProcessStatus::Bypassed;
        }
        let Some(reverb) = self.begin_block(channels, buffer.len() / channels) else {
            return ProcessStatus::Bypassed;
        };

        no_denormals::no_denormals(|| {
            if channels == 1 {
                reverb.process_mono(buffer);
            } else {
                for frame in buffer.chunks_exact_mut(2) {
                    (frame[0], frame[1]) = reverb.process_frame(frame[0], frame[1]);
                }
            }
        });
        ProcessStatus::Processed
    }

    /// Process a stereo pair in place. Both buffers must be the same length.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) -> ProcessStatus {
        if left.len() != right.len() {
            return ProcessStatus::Bypassed;
        }
        let Some(reverb) = self.begin_block(2, left.len()) else {
            return ProcessStatus::Bypassed;
        };
        no_denormals::no_denormals(|| reverb.process_stereo(left, right));
        ProcessStatus::Processed
    }

    /// Process a mono buffer in place.
    pub fn process_mono(&mut self, samples: &mut [f32]) -> ProcessStatus {
        let Some(reverb) = self.begin_block(1, samples.len()) else {
            return ProcessStatus::Bypassed;
        };
        no_denormals::no_denormals(|| reverb.process_mono(samples));
        ProcessStatus::Processed
    }
}
