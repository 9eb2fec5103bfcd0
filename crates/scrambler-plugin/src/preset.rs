//! Factory presets.
//!
//! Four fixed parameter bundles, addressable by display name, snake_case id
//! or the 1-based position in the preset menu.

use crate::error::PluginError;
use scrambler_dsp::ReverbSettings;
use std::fmt;
use std::str::FromStr;

/// A factory preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// Neutral starting point.
    #[default]
    Default,
    /// Short, close reflections.
    SmallRoom,
    /// Long, darker tail.
    LargeHall,
    /// Maximum size and width.
    Cathedral,
}

impl Preset {
    /// All presets in menu order.
    pub const ALL: [Self; 4] = [
        Self::Default,
        Self::SmallRoom,
        Self::LargeHall,
        Self::Cathedral,
    ];

    /// Display name as shown in the preset menu.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::SmallRoom => "Small Room",
            Self::LargeHall => "Large Hall",
            Self::Cathedral => "Cathedral",
        }
    }

    /// Identifier for command lines and config files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::SmallRoom => "small_room",
            Self::LargeHall => "large_hall",
            Self::Cathedral => "cathedral",
        }
    }

    /// 1-based position in the preset menu.
    pub fn menu_id(self) -> u32 {
        match self {
            Self::Default => 1,
            Self::SmallRoom => 2,
            Self::LargeHall => 3,
            Self::Cathedral => 4,
        }
    }

    /// Preset at a 1-based menu position.
    pub fn from_menu_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.menu_id() == id)
    }

    /// Find a preset by display name or id, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self, PluginError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name) || p.id().eq_ignore_ascii_case(name))
            .ok_or_else(|| PluginError::unknown_preset(name))
    }

    /// The five values this preset applies.
    pub fn settings(self) -> ReverbSettings {
        let (room_size, damping, wet_level, dry_level, width) = match self {
            Self::Default => (0.5, 0.5, 0.33, 0.4, 0.5),
            Self::SmallRoom => (0.4, 0.5, 0.33, 0.4, 0.5),
            Self::LargeHall => (0.8, 0.3, 0.6, 0.3, 0.7),
            Self::Cathedral => (1.0, 0.2, 0.8, 0.2, 1.0),
        };
        ReverbSettings {
            room_size,
            damping,
            wet_level,
            dry_level,
            width,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
