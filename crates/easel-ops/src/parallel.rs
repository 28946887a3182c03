//! Row-parallel blend dispatch using Rayon.
//!
//! Every kernel is stateless and visits rows independently: within one call
//! the destination rows are disjoint byte ranges and the source is
//! read-only. That makes row bands safe to hand to a thread pool, provided
//! no two workers write the same destination row — which is exactly how
//! [`blend`] partitions the work.

use easel_core::Quantum;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::composite::CompositeOp;

/// Dispatches `op` like [`crate::composite::blend`], splitting the overlap
/// region across rows with Rayon.
///
/// Output is byte-for-byte identical to the serial dispatch; only the
/// execution order differs. Small jobs (a single row) fall back to the
/// serial path.
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
    trace!(?op, rows, cols, opacity, "blend (parallel)");
    let Some(kernel) = op.kernel() else {
        debug!(?op, "operator has no kernel; destination left unchanged");
        return;
    };

    let row_len = cols * pixel_size;
    if rows == 0 || row_len == 0 {
        return;
    }
    if rows == 1 {
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
        return;
    }

    debug_assert!(dst_row_stride >= row_len, "dst stride shorter than a row");
    debug_assert!(src_row_stride >= row_len, "src stride shorter than a row");
    debug_assert!(dst.len() >= (rows - 1) * dst_row_stride + row_len);
    debug_assert!(src.len() >= (rows - 1) * src_row_stride + row_len);

    dst.par_chunks_mut(dst_row_stride)
        .take(rows)
        .enumerate()
        .for_each(|(row, drow)| {
            let s = row * src_row_stride;
            kernel(
                pixel_size,
                &mut drow[..row_len],
                row_len,
                &src[s..s + row_len],
                row_len,
                1,
                cols,
                opacity,
            );
        });
}
