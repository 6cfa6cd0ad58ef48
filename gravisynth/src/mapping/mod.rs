//! Mappings from physical state to colour and sound parameters

pub mod audio;
pub mod color;

/// Linear remap of `value` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`.
///
/// Not clamped: values outside the input range extrapolate. Reversed output
/// bounds give a descending map.
pub fn map_range(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    (value - in_lo) / (in_hi - in_lo) * (out_hi - out_lo) + out_lo
}
