//! The quantum intensity domain and its fixed-point arithmetic.
//!
//! A *quantum* is the fixed-width integer unit storing one channel's
//! intensity. This crate instantiates an 8-bit depth: the domain is
//! `0..=QUANTUM_MAX`, with [`QUANTUM_MAX`] meaning full intensity (or full
//! coverage, for the alpha channel).
//!
//! The helpers here are the primitives every blend kernel is built from,
//! chosen to be **exact at the endpoints** so the kernels inherit their
//! invariants (no-op at zero opacity, full strength at full opacity, no
//! wraparound):
//!
//! - [`quantum_mul`] - rounding fixed-point product `a * b / Q`
//! - [`quantum_blend`] - rounded linear interpolation between two quanta
//! - [`upscale`] / [`downscale`] - device channel <-> quantum conversion

/// The integer unit used to store one channel's intensity.
pub type Quantum = u8;

/// Largest representable quantum (full intensity).
pub const QUANTUM_MAX: Quantum = 255;

/// Opacity of a fully opaque pixel.
pub const OPACITY_OPAQUE: Quantum = QUANTUM_MAX;

/// Opacity of a fully transparent pixel.
pub const OPACITY_TRANSPARENT: Quantum = 0;

/// Converts an 8-bit device channel value into the quantum domain.
///
/// Identity at the current 8-bit depth; written as the general scaling so
/// that a deeper quantum only changes the constants. Round-trips losslessly
/// through [`downscale`] when both depths match.
#[inline]
pub const fn upscale(value: u8) -> Quantum {
    (value as u32 * QUANTUM_MAX as u32 / 255) as Quantum
}

/// Converts a quantum back into an 8-bit device channel value.
///
/// Inverse of [`upscale`].
#[inline]
pub const fn downscale(value: Quantum) -> u8 {
    (value as u32 * 255 / QUANTUM_MAX as u32) as u8
}

/// Rounding fixed-point product of two quanta, `a * b / QUANTUM_MAX`.
///
/// Exact at the endpoints: `quantum_mul(a, QUANTUM_MAX) == a` and
/// `quantum_mul(a, 0) == 0` for every `a`.
///
/// # Example
///
/// ```
/// use easel_core::quantum_mul;
///
/// assert_eq!(quantum_mul(128, 128), 64);
/// assert_eq!(quantum_mul(37, 255), 37);
/// assert_eq!(quantum_mul(37, 0), 0);
/// ```
#[inline]
pub const fn quantum_mul(a: Quantum, b: Quantum) -> Quantum {
    let t = a as u32 * b as u32 + 0x80;
    (((t >> 8) + t) >> 8) as Quantum
}

/// Rounded linear interpolation from `d` to `r` by `t / QUANTUM_MAX`.
///
/// `t = 0` returns `d` exactly and `t = QUANTUM_MAX` returns `r` exactly,
/// so a kernel mixed through this helper is an exact no-op at zero opacity
/// and exact full-strength at full opacity.
#[inline]
pub const fn quantum_blend(d: Quantum, r: Quantum, t: Quantum) -> Quantum {
    let q = QUANTUM_MAX as u32;
    ((d as u32 * (q - t as u32) + r as u32 * t as u32 + q / 2) / q) as Quantum
}
