//! Parameter metadata.
//!
//! Hosts, the control surface and the CLI all enumerate parameters through
//! [`ParamDescriptor`]: range, default, how to show a value and how to read
//! one back from text.
//!
//! ```rust
//! use scrambler_core::{ParamDescriptor, ParamId};
//!
//! let damping = ParamDescriptor::unit_interval("Damping", "Damp", 0.5)
//!     .with_id(ParamId(101), "damping");
//!
//! assert_eq!(damping.clamp(1.7), 1.0);
//! assert_eq!(damping.format_value(0.25).to_string(), "0.25");
//! assert_eq!(damping.parse_value(" 0.75 "), Some(0.75));
//! ```

use core::fmt;

/// Numeric parameter id reported to hosts for automation.
///
/// Never renumber a released parameter: automation lanes are keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Static description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name, e.g. "Room Size".
    pub name: &'static str,
    /// Abbreviation for narrow labels, e.g. "Room".
    pub short_name: &'static str,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Initial value and reset target.
    pub default: f32,
    /// Suggested increment for steppers and encoders.
    pub step: f32,
    /// Host automation id.
    pub id: ParamId,
    /// Key under which the value is persisted, e.g. `"roomSize"`.
    pub string_id: &'static str,
    /// Whether hosts may record automation for it.
    pub automatable: bool,
}

impl ParamDescriptor {
    /// Automatable `[0, 1]` parameter with a 0.01 step and no ids yet.
    pub const fn unit_interval(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            automatable: true,
        }
    }

    /// Attach the numeric and string ids.
    pub const fn with_id(self, id: ParamId, string_id: &'static str) -> Self {
        Self {
            id,
            string_id,
            ..self
        }
    }

    /// Limit `value` to `[min, max]`.
    ///
    /// NaN comes back unchanged; anything that stores values has to reject
    /// it itself.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Map a plain value into `[0, 1]`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.clamp(value) - self.min) / span
        }
    }

    /// Map a `[0, 1]` position back into the plain range.
    #[inline]
    pub fn denormalize(&self, position: f32) -> f32 {
        self.min + position.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Two-decimal text for a value box.
    pub fn format_value(&self, value: f32) -> ParamDisplay {
        ParamDisplay(value)
    }

    /// Read a value typed by the user. Surrounding whitespace is ignored and
    /// the result is clamped; `None` unless the text is a finite number.
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let value: f32 = text.trim().parse().ok()?;
        value.is_finite().then(|| self.clamp(value))
    }
}

/// Returned by [`ParamDescriptor::format_value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDisplay(f32);

impl fmt::Display for ParamDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    extern crate alloc;
    #[cfg(not(feature = "std"))]
    use alloc::string::ToString;

    fn room() -> ParamDescriptor {
        ParamDescriptor::unit_interval("Room Size", "Room", 0.5).with_id(ParamId(100), "roomSize")
    }

    #[test]
    fn unit_interval_with_ids() {
        let desc = room();
        assert_eq!((desc.min, desc.max, desc.default, desc.step), (0.0, 1.0, 0.5, 0.01));
        assert_eq!(desc.id, ParamId(100));
        assert_eq!(desc.string_id, "roomSize");
        assert_eq!(desc.short_name, "Room");
        assert!(desc.automatable);
    }

    #[test]
    fn clamp_limits_range_and_keeps_nan() {
        let desc = room();
        assert_eq!(desc.clamp(-3.0), 0.0);
        assert_eq!(desc.clamp(0.42), 0.42);
        assert_eq!(desc.clamp(f32::INFINITY), 1.0);
        assert!(desc.clamp(f32::NAN).is_nan());
    }

    #[test]
    fn normalized_positions() {
        let desc = room();
        assert_eq!(desc.normalize(0.25), 0.25);
        assert_eq!(desc.normalize(2.0), 1.0);
        assert_eq!(desc.denormalize(0.75), 0.75);
        assert_eq!(desc.denormalize(-1.0), 0.0);
    }

    #[test]
    fn text_round_trip() {
        let desc = room();
        assert_eq!(desc.format_value(0.333).to_string(), "0.33");
        assert_eq!(desc.format_value(1.0).to_string(), "1.00");
        assert_eq!(desc.parse_value("0.8"), Some(0.8));
        assert_eq!(desc.parse_value("12"), Some(1.0));
        assert_eq!(desc.parse_value("loud"), None);
        assert_eq!(desc.parse_value("NaN"), None);
        assert_eq!(desc.parse_value("-inf"), None);
    }
}
