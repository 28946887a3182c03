//! The compositing operator family and its dispatch.
//!
//! Every kernel shares one signature ([`BlendFn`]): pixel size, destination
//! buffer and row stride, source buffer and row stride, row and column
//! counts, and a single opacity modifier in the quantum domain. Kernels
//! mutate the destination in place, visit every cell of the overlap region
//! exactly once, never allocate and keep no state across calls.
//!
//! Two fixed-point primitives from `easel-core` carry the numeric
//! invariants:
//!
//! - coverage-style operators scale the source alpha with
//!   [`quantum_mul`]`(src_alpha, opacity)`
//! - value-style operators compute their full-strength result and mix it in
//!   with [`quantum_blend`]`(dst, result, opacity)`
//!
//! Both are exact at the endpoints, so `opacity = 0` leaves the destination
//! byte-for-byte unchanged and `opacity = QUANTUM_MAX` applies the full
//! operator semantics, for every operator. Channel sums and differences
//! saturate; nothing wraps.

use easel_core::{
    OPACITY_OPAQUE, OPACITY_TRANSPARENT, PIXEL_ALPHA, PIXEL_BLUE, PIXEL_GREEN, PIXEL_RED,
    QUANTUM_MAX, Quantum, quantum_blend, quantum_mul,
};
use tracing::{debug, trace};

/// Color channel offsets, in the order the kernels visit them.
const COLOR_CHANNELS: [usize; 3] = [PIXEL_RED, PIXEL_GREEN, PIXEL_BLUE];

/// A compositing operator: a named rule for combining a source and a
/// destination pixel's channels.
///
/// The set is closed. Operators without a kernel ([`Undef`](Self::Undef),
/// [`No`](Self::No) and the declared-but-disabled family at the end)
/// compose as no-ops, so higher layers may request any operator for any
/// color model without an error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositeOp {
    /// Source over destination; source coverage scaled by opacity.
    #[default]
    Over,
    /// Destination coverage masked by source coverage.
    In,
    /// Destination coverage masked by inverse source coverage.
    Out,
    /// Source drawn only inside the destination's existing footprint.
    Atop,
    /// Coverage symmetric difference: regions covered by exactly one of
    /// source and destination survive.
    Xor,
    /// Clamped additive sum of the color channels.
    Plus,
    /// Clamped subtractive difference of the color channels.
    Minus,
    /// Clamped additive sum of the color channels.
    Add,
    /// Clamped subtractive difference of the color channels.
    Subtract,
    /// Absolute per-channel difference.
    Diff,
    /// Per-channel product, normalized by the quantum range.
    Mult,
    /// Destination shaded by source luminance.
    Bumpmap,
    /// Unconditional overwrite of every channel.
    Copy,
    /// Overwrite of the red channel only.
    CopyRed,
    /// Overwrite of the green channel only.
    CopyGreen,
    /// Overwrite of the blue channel only.
    CopyBlue,
    /// Overwrite of the alpha channel only.
    CopyOpacity,
    /// Zero every channel (full transparency).
    Clear,
    /// Reduce destination coverage by source coverage; color preserved.
    Erase,
    /// Explicitly undefined; composes as a no-op.
    Undef,
    /// Explicit no-op.
    No,
    /// Declared without a kernel; composes as a no-op.
    Dissolve,
    /// Declared without a kernel; composes as a no-op.
    Displace,
    /// Declared without a kernel; composes as a no-op.
    Modulate,
    /// Declared without a kernel; composes as a no-op.
    Threshold,
    /// Declared without a kernel; composes as a no-op.
    Darken,
    /// Declared without a kernel; composes as a no-op.
    Lighten,
    /// Declared without a kernel; composes as a no-op.
    Hue,
    /// Declared without a kernel; composes as a no-op.
    Saturate,
    /// Declared without a kernel; composes as a no-op.
    Colorize,
    /// Declared without a kernel; composes as a no-op.
    Luminize,
    /// Declared without a kernel; composes as a no-op.
    Screen,
    /// Declared without a kernel; composes as a no-op.
    Overlay,
}

/// One blend algorithm.
///
/// Arguments, in order: pixel size in bytes, destination buffer,
/// destination row stride in bytes, source buffer, source row stride in
/// bytes, row count, column count, opacity.
pub type BlendFn = fn(usize, &mut [u8], usize, &[u8], usize, usize, usize, Quantum);

impl CompositeOp {
    /// The kernel implementing this operator, or `None` for the operators
    /// that deliberately compose as no-ops.
    ///
    /// The match is exhaustive: a new operator tag will not compile until
    /// it is given an explicit dispatch decision here.
    pub fn kernel(self) -> Option<BlendFn> {
        match self {
            Self::Over => Some(composite_over),
            Self::In => Some(composite_in),
            Self::Out => Some(composite_out),
            Self::Atop => Some(composite_atop),
            Self::Xor => Some(composite_xor),
            Self::Plus | Self::Add => Some(composite_add),
            Self::Minus | Self::Subtract => Some(composite_subtract),
            Self::Diff => Some(composite_diff),
            Self::Mult => Some(composite_mult),
            Self::Bumpmap => Some(composite_bumpmap),
            Self::Copy => Some(composite_copy),
            Self::CopyRed => Some(composite_copy_red),
            Self::CopyGreen => Some(composite_copy_green),
            Self::CopyBlue => Some(composite_copy_blue),
            Self::CopyOpacity => Some(composite_copy_opacity),
            Self::Clear => Some(composite_clear),
            Self::Erase => Some(composite_erase),
            Self::Undef | Self::No => None,
            Self::Dissolve
            | Self::Displace
            | Self::Modulate
            | Self::Threshold
            | Self::Darken
            | Self::Lighten
            | Self::Hue
            | Self::Saturate
            | Self::Colorize
            | Self::Luminize
            | Self::Screen
            | Self::Overlay => None,
        }
    }
}

/// Blends `src` into `dst` over the rectangular overlap region under `op`.
///
/// Mutates `dst` in place; `src` is read-only. Operators without a kernel
/// leave the destination untouched — deliberate silent success, not an
/// error, since higher layers may request operators that are not
/// meaningful for a given color model.
///
/// `rows` and `cols` describe an overlap region already computed by the
/// caller; no clipping happens here. Both buffers must cover that region at
/// the given strides and pixel size — violating this is caller contract,
/// asserted in debug builds only.
#[allow(clippy::too_many_arguments)]
pub fn blend(
    op: CompositeOp,
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    opacity: Quantum,
    rows: usize,
    cols: usize,
) {
    trace!(?op, rows, cols, opacity, "blend");
    let Some(kernel) = op.kernel() else {
        debug!(?op, "operator has no kernel; destination left unchanged");
        return;
    };
    kernel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
    );
}

/// Row-major walk over the overlap region, pairing destination and source
/// pixels. Every kernel funnels through here; only the per-pixel closure
/// differs.
#[allow(clippy::too_many_arguments)]
#[inline]
fn for_each_pixel(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    mut op: impl FnMut(&mut [u8], &[u8]),
) {
    debug_assert!(pixel_size > 0, "pixel size must be positive");
    let row_len = cols * pixel_size;
    if rows == 0 || row_len == 0 {
        return;
    }
    debug_assert!(dst_row_stride >= row_len, "dst stride shorter than a row");
    debug_assert!(src_row_stride >= row_len, "src stride shorter than a row");
    debug_assert!(dst.len() >= (rows - 1) * dst_row_stride + row_len);
    debug_assert!(src.len() >= (rows - 1) * src_row_stride + row_len);

    for row in 0..rows {
        let d = row * dst_row_stride;
        let s = row * src_row_stride;
        let drow = &mut dst[d..d + row_len];
        let srow = &src[s..s + row_len];
        for (dp, sp) in drow
            .chunks_exact_mut(pixel_size)
            .zip(srow.chunks_exact(pixel_size))
        {
            op(dp, sp);
        }
    }
}

/// Applies a per-channel arithmetic rule to the color channels, then mixes
/// the result into the destination by `opacity`. Alpha is preserved.
#[allow(clippy::too_many_arguments)]
#[inline]
fn composite_channels(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
    rule: impl Fn(Quantum, Quantum) -> Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            for ch in COLOR_CHANNELS {
                dp[ch] = quantum_blend(dp[ch], rule(dp[ch], sp[ch]), opacity);
            }
        },
    );
}

/// Overwrites a single channel, faded by `opacity`.
#[allow(clippy::too_many_arguments)]
#[inline]
fn copy_one_channel(
    channel: usize,
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| dp[channel] = quantum_blend(dp[channel], sp[channel], opacity),
    );
}

/// Standard alpha composite of source over destination, with the source
/// coverage scaled by `opacity`.
fn composite_over(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            let sa = quantum_mul(sp[PIXEL_ALPHA], opacity);
            if sa == OPACITY_TRANSPARENT {
                return;
            }
            if sa == OPACITY_OPAQUE {
                dp.copy_from_slice(sp);
                return;
            }
            let sa = sa as u32;
            let dw = quantum_mul(dp[PIXEL_ALPHA], QUANTUM_MAX - sa as Quantum) as u32;
            let out_a = sa + dw;
            dp[PIXEL_ALPHA] = out_a as Quantum;
            for ch in COLOR_CHANNELS {
                dp[ch] = ((sp[ch] as u32 * sa + dp[ch] as u32 * dw + out_a / 2) / out_a) as Quantum;
            }
        },
    );
}

/// Masks the destination's coverage by the source's. Color channels are
/// untouched. The mask fades toward identity as `opacity` drops, so zero
/// opacity leaves the destination unchanged.
fn composite_in(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            let mask = quantum_blend(QUANTUM_MAX, sp[PIXEL_ALPHA], opacity);
            dp[PIXEL_ALPHA] = quantum_mul(dp[PIXEL_ALPHA], mask);
        },
    );
}

/// Masks the destination's coverage by the inverse of the source's. Color
/// channels are untouched.
fn composite_out(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            let sa = quantum_mul(sp[PIXEL_ALPHA], opacity);
            dp[PIXEL_ALPHA] = quantum_mul(dp[PIXEL_ALPHA], QUANTUM_MAX - sa);
        },
    );
}

/// Draws the source only where the destination already has coverage; the
/// destination's own coverage is preserved.
fn composite_atop(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            if dp[PIXEL_ALPHA] == OPACITY_TRANSPARENT {
                return;
            }
            let sa = quantum_mul(sp[PIXEL_ALPHA], opacity) as u32;
            let q = QUANTUM_MAX as u32;
            for ch in COLOR_CHANNELS {
                dp[ch] =
                    ((sp[ch] as u32 * sa + dp[ch] as u32 * (q - sa) + q / 2) / q) as Quantum;
            }
        },
    );
}

/// Keeps the regions covered by exactly one of source and destination.
fn composite_xor(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            let sa = quantum_mul(sp[PIXEL_ALPHA], opacity);
            let da = dp[PIXEL_ALPHA];
            let sw = quantum_mul(sa, QUANTUM_MAX - da) as u32;
            let dw = quantum_mul(da, QUANTUM_MAX - sa) as u32;
            let out_a = (sw + dw).min(QUANTUM_MAX as u32);
            dp[PIXEL_ALPHA] = out_a as Quantum;
            if out_a == 0 {
                return;
            }
            for ch in COLOR_CHANNELS {
                dp[ch] = ((sp[ch] as u32 * sw + dp[ch] as u32 * dw + out_a / 2) / out_a) as Quantum;
            }
        },
    );
}

/// Clamped additive sum of the color channels.
fn composite_add(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    composite_channels(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
        |d, s| d.saturating_add(s),
    );
}

/// Clamped subtractive difference of the color channels.
fn composite_subtract(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    composite_channels(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
        |d, s| d.saturating_sub(s),
    );
}

/// Absolute per-channel difference.
fn composite_diff(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    composite_channels(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
        |d, s| d.abs_diff(s),
    );
}

/// Per-channel product, normalized by the quantum range.
fn composite_mult(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    composite_channels(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
        quantum_mul,
    );
}

/// Integer Rec.601 luma of a packed pixel's color channels.
#[inline]
fn luminance(px: &[u8]) -> Quantum {
    // Coefficients sum to 256, so the shift renormalizes exactly.
    let y = 77 * px[PIXEL_RED] as u32 + 150 * px[PIXEL_GREEN] as u32 + 29 * px[PIXEL_BLUE] as u32;
    ((y + 128) >> 8) as Quantum
}

/// Shades the destination by the source's luminance. Every color channel is
/// scaled by the same factor, so the destination's own color composition is
/// preserved; alpha is untouched.
fn composite_bumpmap(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            let luma = luminance(sp);
            for ch in COLOR_CHANNELS {
                dp[ch] = quantum_blend(dp[ch], quantum_mul(dp[ch], luma), opacity);
            }
        },
    );
}

/// Unconditional overwrite of every channel, faded by `opacity`.
fn composite_copy(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            for (d, s) in dp.iter_mut().zip(sp) {
                *d = quantum_blend(*d, *s, opacity);
            }
        },
    );
}

/// Overwrite of the red channel only.
fn composite_copy_red(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    copy_one_channel(
        PIXEL_RED,
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
    );
}

/// Overwrite of the green channel only.
fn composite_copy_green(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    copy_one_channel(
        PIXEL_GREEN,
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
    );
}

/// Overwrite of the blue channel only.
fn composite_copy_blue(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    copy_one_channel(
        PIXEL_BLUE,
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
    );
}

/// Overwrite of the alpha channel only.
fn composite_copy_opacity(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    copy_one_channel(
        PIXEL_ALPHA,
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        opacity,
    );
}

/// Clears every channel to zero (full transparency), faded by `opacity`.
/// The source is ignored.
fn composite_clear(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, _sp| {
            for d in dp.iter_mut() {
                *d = quantum_blend(*d, 0, opacity);
            }
        },
    );
}

/// Reduces the destination's coverage proportionally to the source's
/// coverage. Color channels are preserved, so erased strokes can be
/// re-opacified without losing color.
fn composite_erase(
    pixel_size: usize,
    dst: &mut [u8],
    dst_row_stride: usize,
    src: &[u8],
    src_row_stride: usize,
    rows: usize,
    cols: usize,
    opacity: Quantum,
) {
    for_each_pixel(
        pixel_size,
        dst,
        dst_row_stride,
        src,
        src_row_stride,
        rows,
        cols,
        |dp, sp| {
            let sa = quantum_mul(sp[PIXEL_ALPHA], opacity);
            dp[PIXEL_ALPHA] = quantum_mul(dp[PIXEL_ALPHA], QUANTUM_MAX - sa);
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const PX: usize = 4;

    fn buf(px: &[[u8; 4]]) -> Vec<u8> {
        px.concat()
    }

    fn px(buf: &[u8], i: usize) -> [u8; 4] {
        buf[i * PX..i * PX + PX].try_into().unwrap()
    }

    fn run(op: CompositeOp, dst: &mut [u8], src: &[u8], opacity: Quantum) {
        let cols = src.len() / PX;
        blend(op, PX, dst, src.len(), src, src.len(), opacity, 1, cols);
    }

    #[test]
    fn test_over_identity_at_zero_opacity() {
        let src = buf(&[[9, 8, 7, 200], [255, 255, 255, 255]]);
        let mut dst = buf(&[[1, 2, 3, 4], [5, 6, 7, 8]]);
        let before = dst.clone();
        run(CompositeOp::Over, &mut dst, &src, 0);
        assert_eq!(dst, before);
    }

    #[test]
    fn test_over_opaque_source_overwrites() {
        let src = buf(&[[9, 8, 7, 255]]);
        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::Over, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [9, 8, 7, 255]);
    }

    #[test]
    fn test_over_transparent_source_is_no_op() {
        let src = buf(&[[9, 8, 7, 0]]);
        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::Over, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [1, 2, 3, 4]);
    }

    #[test]
    fn test_over_merges_layers() {
        // Opaque red destination row, half-covered blue source row.
        let src = buf(&[[255, 0, 0, 128]; 4]);
        let mut dst = buf(&[[0, 0, 255, 255]; 4]);
        run(CompositeOp::Over, &mut dst, &src, OPACITY_OPAQUE);
        for i in 0..4 {
            let [b, g, r, a] = px(&dst, i);
            assert_eq!(a, 255, "coverage must stay full");
            assert_eq!(g, 0);
            assert!((126..=129).contains(&r), "red {r} not near the midpoint");
            assert!((126..=129).contains(&b), "blue {b} not near the midpoint");
        }
    }

    #[test]
    fn test_in_masks_destination_coverage() {
        let src = buf(&[[0, 0, 0, 128]]);
        let mut dst = buf(&[[10, 20, 30, 200]]);
        run(CompositeOp::In, &mut dst, &src, OPACITY_OPAQUE);
        let [b, g, r, a] = px(&dst, 0);
        assert_eq!([b, g, r], [10, 20, 30], "color must be untouched");
        assert_eq!(a, quantum_mul(200, 128));
    }

    #[test]
    fn test_in_is_no_op_at_zero_opacity() {
        let src = buf(&[[0, 0, 0, 255]]);
        let mut dst = buf(&[[10, 20, 30, 200]]);
        run(CompositeOp::In, &mut dst, &src, 0);
        assert_eq!(px(&dst, 0), [10, 20, 30, 200]);
    }

    #[test]
    fn test_out_masks_inverse_coverage() {
        let src = buf(&[[0, 0, 0, 128]]);
        let mut dst = buf(&[[10, 20, 30, 200]]);
        run(CompositeOp::Out, &mut dst, &src, OPACITY_OPAQUE);
        let [b, g, r, a] = px(&dst, 0);
        assert_eq!([b, g, r], [10, 20, 30]);
        assert_eq!(a, quantum_mul(200, 255 - 128));
    }

    #[test]
    fn test_erase_reduces_coverage_and_keeps_color() {
        let src = buf(&[[0, 0, 0, 255]]);
        let mut dst = buf(&[[10, 20, 30, 200]]);
        run(CompositeOp::Erase, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [10, 20, 30, 0]);

        // Half-strength erase halves the coverage.
        let mut dst = buf(&[[10, 20, 30, 200]]);
        run(CompositeOp::Erase, &mut dst, &src, 128);
        let [.., a] = px(&dst, 0);
        assert_eq!(a, quantum_mul(200, 255 - 128));
    }

    #[test]
    fn test_atop_keeps_destination_coverage() {
        let src = buf(&[[255, 0, 0, 255]]);
        let mut dst = buf(&[[0, 0, 255, 200]]);
        run(CompositeOp::Atop, &mut dst, &src, OPACITY_OPAQUE);
        let [b, g, r, a] = px(&dst, 0);
        assert_eq!(a, 200, "destination footprint must be preserved");
        assert_eq!([b, g, r], [255, 0, 0], "fully covered source replaces color");
    }

    #[test]
    fn test_atop_skips_uncovered_destination() {
        let src = buf(&[[255, 255, 255, 255]]);
        let mut dst = buf(&[[1, 2, 3, 0]]);
        run(CompositeOp::Atop, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [1, 2, 3, 0]);
    }

    #[test]
    fn test_xor_cancels_where_both_cover() {
        let src = buf(&[[255, 0, 0, 255]]);
        let mut dst = buf(&[[0, 0, 255, 255]]);
        run(CompositeOp::Xor, &mut dst, &src, OPACITY_OPAQUE);
        let [.., a] = px(&dst, 0);
        assert_eq!(a, 0, "two fully covered pixels cancel");
    }

    #[test]
    fn test_xor_keeps_single_coverage() {
        // Transparent source leaves the covered destination alone.
        let src = buf(&[[9, 9, 9, 0]]);
        let mut dst = buf(&[[10, 20, 30, 255]]);
        run(CompositeOp::Xor, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [10, 20, 30, 255]);

        // Covered source over an empty destination takes over.
        let src = buf(&[[10, 20, 30, 255]]);
        let mut dst = buf(&[[0, 0, 0, 0]]);
        run(CompositeOp::Xor, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [10, 20, 30, 255]);
    }

    #[test]
    fn test_add_clamps_at_quantum_max() {
        let src = buf(&[[100, 200, 250, 77]]);
        let mut dst = buf(&[[200, 100, 10, 42]]);
        run(CompositeOp::Add, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [255, 255, 255, 42]);
    }

    #[test]
    fn test_plus_shares_add_semantics() {
        let src = buf(&[[100, 1, 2, 77]]);
        let mut dst_add = buf(&[[200, 3, 4, 42]]);
        let mut dst_plus = dst_add.clone();
        run(CompositeOp::Add, &mut dst_add, &src, 200);
        run(CompositeOp::Plus, &mut dst_plus, &src, 200);
        assert_eq!(dst_add, dst_plus);
    }

    #[test]
    fn test_subtract_clamps_at_zero() {
        let src = buf(&[[100, 50, 5, 77]]);
        let mut dst = buf(&[[50, 100, 4, 42]]);
        run(CompositeOp::Subtract, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [0, 50, 0, 42]);
    }

    #[test]
    fn test_diff_takes_absolute_difference() {
        let src = buf(&[[100, 50, 200, 77]]);
        let mut dst = buf(&[[50, 100, 200, 42]]);
        run(CompositeOp::Diff, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [50, 50, 0, 42]);
    }

    #[test]
    fn test_mult_normalizes_by_quantum_range() {
        let src = buf(&[[128, 255, 0, 77]]);
        let mut dst = buf(&[[128, 200, 200, 42]]);
        run(CompositeOp::Mult, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [64, 200, 0, 42]);
    }

    #[test]
    fn test_bumpmap_white_source_is_identity() {
        let src = buf(&[[255, 255, 255, 99]]);
        let mut dst = buf(&[[10, 20, 30, 200]]);
        run(CompositeOp::Bumpmap, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [10, 20, 30, 200]);
    }

    #[test]
    fn test_bumpmap_black_source_darkens_to_zero() {
        let src = buf(&[[0, 0, 0, 99]]);
        let mut dst = buf(&[[10, 20, 30, 200]]);
        run(CompositeOp::Bumpmap, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [0, 0, 0, 200]);
    }

    #[test]
    fn test_copy_is_idempotent_at_full_opacity() {
        let mut dst = buf(&[[1, 2, 3, 4], [250, 128, 0, 255]]);
        let src = dst.clone();
        run(CompositeOp::Copy, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_copy_overwrites_all_channels() {
        let src = buf(&[[9, 8, 7, 6]]);
        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::Copy, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [9, 8, 7, 6]);

        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::Copy, &mut dst, &src, 0);
        assert_eq!(px(&dst, 0), [1, 2, 3, 4]);
    }

    #[test]
    fn test_copy_single_channels() {
        let src = buf(&[[9, 8, 7, 6]]);

        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::CopyRed, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [1, 2, 7, 4]);

        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::CopyGreen, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [1, 8, 3, 4]);

        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::CopyBlue, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [9, 2, 3, 4]);

        let mut dst = buf(&[[1, 2, 3, 4]]);
        run(CompositeOp::CopyOpacity, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(px(&dst, 0), [1, 2, 3, 6]);
    }

    #[test]
    fn test_clear_absorbs_everything() {
        let src = buf(&[[9, 8, 7, 6], [0, 0, 0, 0]]);
        let mut dst = buf(&[[255, 255, 255, 255], [1, 2, 3, 4]]);
        run(CompositeOp::Clear, &mut dst, &src, OPACITY_OPAQUE);
        assert_eq!(dst, vec![0u8; 8]);

        let mut dst = buf(&[[255, 255, 255, 255]]);
        run(CompositeOp::Clear, &mut dst, &src[..4], 0);
        assert_eq!(px(&dst, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_operators_without_kernels_are_no_ops() {
        let src = buf(&[[9, 8, 7, 255]]);
        for op in [
            CompositeOp::Undef,
            CompositeOp::No,
            CompositeOp::Dissolve,
            CompositeOp::Displace,
            CompositeOp::Modulate,
            CompositeOp::Threshold,
            CompositeOp::Darken,
            CompositeOp::Lighten,
            CompositeOp::Hue,
            CompositeOp::Saturate,
            CompositeOp::Colorize,
            CompositeOp::Luminize,
            CompositeOp::Screen,
            CompositeOp::Overlay,
        ] {
            assert!(op.kernel().is_none());
            let mut dst = buf(&[[1, 2, 3, 4]]);
            run(op, &mut dst, &src, OPACITY_OPAQUE);
            assert_eq!(px(&dst, 0), [1, 2, 3, 4], "{op:?} must not touch dst");
        }
    }

    #[test]
    fn test_strided_subrectangle_leaves_surroundings() {
        // Destination is 3 columns wide; blend only a 2x2 region into it.
        let mut dst = buf(&[
            [1, 1, 1, 1],
            [2, 2, 2, 2],
            [3, 3, 3, 3],
            [4, 4, 4, 4],
            [5, 5, 5, 5],
            [12, 12, 12, 12],
        ]);
        let src = buf(&[[9, 9, 9, 9], [8, 8, 8, 8], [7, 7, 7, 7], [6, 6, 6, 6]]);
        blend(
            CompositeOp::Copy,
            PX,
            &mut dst,
            3 * PX,
            &src,
            2 * PX,
            OPACITY_OPAQUE,
            2,
            2,
        );
        assert_eq!(px(&dst, 0), [9, 9, 9, 9]);
        assert_eq!(px(&dst, 1), [8, 8, 8, 8]);
        assert_eq!(px(&dst, 2), [3, 3, 3, 3], "column outside region untouched");
        assert_eq!(px(&dst, 3), [7, 7, 7, 7]);
        assert_eq!(px(&dst, 4), [6, 6, 6, 6]);
        assert_eq!(
            px(&dst, 5),
            [12, 12, 12, 12],
            "column outside region untouched"
        );
    }

    #[test]
    fn test_zero_geometry_is_safe() {
        let src = buf(&[[9, 8, 7, 6]]);
        let mut dst = buf(&[[1, 2, 3, 4]]);
        blend(CompositeOp::Over, PX, &mut dst, PX, &src, PX, 255, 0, 1);
        blend(CompositeOp::Over, PX, &mut dst, PX, &src, PX, 255, 1, 0);
        assert_eq!(px(&dst, 0), [1, 2, 3, 4]);
    }
}
