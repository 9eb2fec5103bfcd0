//! Small numeric helpers shared by the DSP and the tools built on it.

/// Flush values in the subnormal neighbourhood to zero.
///
/// Feedback loops that decay toward silence eventually produce IEEE 754
/// subnormals, which are dramatically slower on most CPUs. Anything below
/// `1e-20` (far below audibility) is snapped to `0.0`.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert a linear amplitude to decibels.
///
/// Silence (and anything non-positive) maps to -120 dB rather than
/// negative infinity, which keeps meter output printable.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * libm::log10f(linear)
    }
}
