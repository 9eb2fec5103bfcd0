//! The shared parameter model.
//!
//! `ReverbParameters` is the one structure touched by every thread: the
//! control surface and host automation write it, the audio thread reads it
//! once per block. Values are stored as atomic `u32` (f32 bit-cast) for
//! lock-free access; each parameter is independent, there is no cross-field
//! transaction.

use crate::error::PluginError;
use crate::preset::Preset;
use crate::state::ParamState;
use scrambler_core::{ParamDescriptor, ParamId};
use scrambler_dsp::ReverbSettings;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// The five reverb controls, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReverbParam {
    /// Tail length.
    RoomSize,
    /// High-frequency absorption.
    Damping,
    /// Reverberated signal level.
    WetLevel,
    /// Unprocessed signal level.
    DryLevel,
    /// Stereo width of the wet signal.
    Width,
}

/// Parameter descriptors, indexed by [`ReverbParam::index`].
static DESCRIPTORS: [ParamDescriptor; ReverbParam::COUNT] = [
    ParamDescriptor::unit_interval("Room Size", "Room", 0.5).with_id(ParamId(100), "roomSize"),
    ParamDescriptor::unit_interval("Damping", "Damp", 0.5).with_id(ParamId(101), "damping"),
    ParamDescriptor::unit_interval("Wet Level", "Wet", 0.33).with_id(ParamId(102), "wetLevel"),
    ParamDescriptor::unit_interval("Dry Level", "Dry", 0.4).with_id(ParamId(103), "dryLevel"),
    ParamDescriptor::unit_interval("Width", "Width", 1.0).with_id(ParamId(104), "width"),
];

impl ReverbParam {
    /// Number of parameters.
    pub const COUNT: usize = 5;

    /// All parameters in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::RoomSize,
        Self::Damping,
        Self::WetLevel,
        Self::DryLevel,
        Self::Width,
    ];

    /// Position in declaration order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Metadata for this parameter.
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// Stable string id, used as the key in persisted state.
    pub fn id(self) -> &'static str {
        self.descriptor().string_id
    }

    /// Look up a parameter by its string id (e.g. `"wetLevel"`).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Look up a parameter by its stable numeric id.
    pub fn from_param_id(id: ParamId) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.descriptor().id == id)
    }
}

/// Lock-free parameter store shared between threads.
///
/// Cloning is cheap and every clone refers to the same values. Writes are
/// clamped to `[0, 1]` and NaN writes are discarded, so every read observes
/// an in-range value. Last write wins.
///
/// # Example
///
/// ```rust
/// use scrambler_plugin::{Preset, ReverbParam, ReverbParameters};
///
/// let params = ReverbParameters::new();
/// let ui = params.clone();
///
/// ui.set(ReverbParam::WetLevel, 1.5);
/// assert_eq!(params.get(ReverbParam::WetLevel), 1.0);
///
/// ui.apply_preset(Preset::Cathedral);
/// assert_eq!(params.snapshot().room_size, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ReverbParameters {
    values: Arc<[AtomicU32; ReverbParam::COUNT]>,
}

impl ReverbParameters {
    /// Create a parameter set holding every default.
    pub fn new() -> Self {
        Self {
            values: Arc::new(core::array::from_fn(|i| {
                AtomicU32::new(DESCRIPTORS[i].default.to_bits())
            })),
        }
    }

    /// Read the current value of a parameter (lock-free).
    #[inline]
    pub fn get(&self, param: ReverbParam) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Acquire))
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds;
    /// NaN is ignored.
    #[inline]
    pub fn set(&self, param: ReverbParam, value: f32) {
        if value.is_nan() {
            return;
        }
        let clamped = param.descriptor().clamp(value);
        self.values[param.index()].store(clamped.to_bits(), Ordering::Release);
    }

    /// Read a parameter by string id.
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        ReverbParam::from_id(name).map(|p| self.get(p))
    }

    /// Write a parameter by string id.
    pub fn set_by_name(&self, name: &str, value: f32) -> Result<(), PluginError> {
        let param = ReverbParam::from_id(name).ok_or_else(|| PluginError::unknown_parameter(name))?;
        self.set(param, value);
        Ok(())
    }

    /// Write all five values of a preset. Each store is visible on its own.
    pub fn apply_preset(&self, preset: Preset) {
        self.apply_settings(&preset.settings());
    }

    /// Write all five values from a settings struct.
    pub fn apply_settings(&self, settings: &ReverbSettings) {
        self.set(ReverbParam::RoomSize, settings.room_size);
        self.set(ReverbParam::Damping, settings.damping);
        self.set(ReverbParam::WetLevel, settings.wet_level);
        self.set(ReverbParam::DryLevel, settings.dry_level);
        self.set(ReverbParam::Width, settings.width);
    }

    /// Restore every parameter to its descriptor default.
    pub fn reset_to_defaults(&self) {
        for param in ReverbParam::ALL {
            self.set(param, param.descriptor().default);
        }
    }

    /// Point-in-time copy of all five values. Five plain atomic loads;
    /// safe to call from the audio thread.
    #[inline]
    pub fn snapshot(&self) -> ReverbSettings {
        ReverbSettings {
            room_size: self.get(ReverbParam::RoomSize),
            damping: self.get(ReverbParam::Damping),
            wet_level: self.get(ReverbParam::WetLevel),
            dry_level: self.get(ReverbParam::DryLevel),
            width: self.get(ReverbParam::Width),
        }
    }

    /// Ordered mapping of string id to current value.
    pub fn serialize(&self) -> ParamState {
        ReverbParam::ALL
            .into_iter()
            .map(|p| (p.id(), self.get(p)))
            .collect()
    }

    /// Apply a persisted mapping. Unknown keys are ignored, missing keys
    /// keep their current value and out-of-range values are clamped.
    pub fn deserialize(&self, state: &ParamState) {
        for (name, value) in state.iter() {
            if let Some(param) = ReverbParam::from_id(name) {
                self.set(param, value);
            } else {
                tracing::debug!(key = name, "ignoring unknown parameter in state");
            }
        }
    }

    /// Encode the current values as the persisted state blob.
    pub fn save_state(&self) -> Vec<u8> {
        self.serialize().to_bytes()
    }

    /// Restore from a persisted state blob. Never fails: a blob that cannot
    /// be decoded as a JSON object, or an object carrying none of our
    /// parameter ids, resets everything to defaults.
    pub fn load_state(&self, bytes: &[u8]) {
        match ParamState::from_bytes(bytes) {
            Ok(state) if state.iter().any(|(key, _)| ReverbParam::from_id(key).is_some()) => {
                self.deserialize(&state);
            }
            Ok(state) => {
                tracing::warn!(
                    keys = state.len(),
                    "state blob has no known parameters, restoring defaults"
                );
                self.reset_to_defaults();
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    len = bytes.len(),
                    "unreadable state blob, restoring defaults"
                );
                self.reset_to_defaults();
            }
        }
    }

    /// All parameter descriptors, in declaration order.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        &DESCRIPTORS
    }

    /// Descriptor for one parameter.
    pub fn descriptor(&self, param: ReverbParam) -> &'static ParamDescriptor {
        param.descriptor()
    }
}

impl Default for ReverbParameters {
    fn default() -> Self {
        Self::new()
    }
}
