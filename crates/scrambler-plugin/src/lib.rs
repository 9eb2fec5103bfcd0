//! The scrambler reverb plugin.
//!
//! This crate is everything a host adapter needs to run the reverb: a
//! lock-free parameter model, the real-time engine, presets, persisted state
//! and a toolkit-independent editor.
//!
//! # Architecture
//!
//! | Piece | Thread | Role |
//! |-------|--------|------|
//! | [`ReverbParameters`] | any | Five atomic f32 values shared by everyone |
//! | [`ReverbProcessor`] | audio | Snapshots parameters per block, renders in place |
//! | [`editor::ControlSurface`] | UI | Knob layout, preset menu, text entry |
//! | [`ScramblerPlugin`] | main | Per-instance factory, metadata, state blob |
//!
//! Control flow is one-way: the editor and host automation write parameters,
//! the engine reads them. Nothing on the audio path calls back out.
//!
//! ```rust
//! use scrambler_plugin::{ProcessSpec, ReverbParam, ScramblerPlugin};
//!
//! let mut plugin = ScramblerPlugin::new();
//! plugin.processor_mut().prepare(ProcessSpec::stereo(48000.0, 256))?;
//!
//! plugin.params().set(ReverbParam::RoomSize, 0.9);
//!
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! let _ = plugin.processor_mut().process_stereo(&mut left, &mut right);
//!
//! let _blob = plugin.save_state();
//! # Ok::<(), scrambler_plugin::PluginError>(())
//! ```

pub mod editor;
pub mod error;
pub mod params;
pub mod preset;
pub mod processor;
pub mod state;

pub use editor::{ControlSurface, KnobGeometry, KnobPainter};
pub use error::PluginError;
pub use params::{ReverbParam, ReverbParameters};
pub use preset::Preset;
pub use processor::{EngineState, ProcessSpec, ProcessStatus, ReverbProcessor};
pub use scrambler_dsp::ReverbSettings;
pub use state::ParamState;

/// Static description of the plugin for hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginInfo {
    /// Product name.
    pub name: &'static str,
    /// Vendor name.
    pub vendor: &'static str,
    /// Reverse-DNS identifier.
    pub id: &'static str,
    /// Plugin version.
    pub version: &'static str,
    /// Input channels on the main bus.
    pub input_channels: usize,
    /// Output channels on the main bus.
    pub output_channels: usize,
    /// Whether the plugin consumes MIDI.
    pub accepts_midi: bool,
    /// Whether the plugin emits MIDI.
    pub produces_midi: bool,
    /// Tail length reported to the host, in seconds.
    pub tail_seconds: f64,
}

/// Metadata reported to hosts.
pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "Scrambler",
    vendor: "KKL",
    id: "com.kkl.scrambler",
    version: env!("CARGO_PKG_VERSION"),
    input_channels: 2,
    output_channels: 2,
    accepts_midi: false,
    produces_midi: false,
    tail_seconds: 0.0,
};

/// One plugin instance.
///
/// Each call to [`ScramblerPlugin::new`] creates an independent parameter set
/// and an unprepared engine reading from it. Hosts that run the engine on a
/// separate thread split the instance with [`into_parts`](Self::into_parts).
#[derive(Debug)]
pub struct ScramblerPlugin {
    params: ReverbParameters,
    processor: ReverbProcessor,
}

impl ScramblerPlugin {
    /// Create an instance with default parameters.
    pub fn new() -> Self {
        let params = ReverbParameters::new();
        let processor = ReverbProcessor::new(params.clone());
        tracing::debug!(name = PLUGIN_INFO.name, "plugin instance created");
        Self { params, processor }
    }

    /// Static plugin metadata.
    pub fn info(&self) -> &'static PluginInfo {
        &PLUGIN_INFO
    }

    /// Shared parameter handle.
    pub fn params(&self) -> &ReverbParameters {
        &self.params
    }

    /// The engine, for lifecycle and process calls.
    pub fn processor_mut(&mut self) -> &mut ReverbProcessor {
        &mut self.processor
    }

    /// Create an editor bound to this instance's parameters.
    pub fn create_editor(&self) -> ControlSurface {
        ControlSurface::new(self.params.clone())
    }

    /// Encode the current parameters as a state blob.
    pub fn save_state(&self) -> Vec<u8> {
        self.params.save_state()
    }

    /// Restore parameters from a state blob. Never fails; unreadable blobs
    /// restore defaults.
    pub fn load_state(&self, bytes: &[u8]) {
        self.params.load_state(bytes);
    }

    /// Split into the shared parameters and the engine.
    pub fn into_parts(self) -> (ReverbParameters, ReverbProcessor) {
        (self.params, self.processor)
    }
}

impl Default for ScramblerPlugin {
    fn default() -> Self {
        Self::new()
    }
}
