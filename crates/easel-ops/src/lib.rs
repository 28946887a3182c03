//! # easel-ops
//!
//! Compositing operators and blend kernels for the easel raster engine.
//!
//! This crate owns the operator -> kernel dispatch and the blend-algorithm
//! family: per-operator kernels that combine a source buffer into a
//! destination buffer in place, row by row, column by column, under a
//! single opacity modifier.
//!
//! # Example
//!
//! ```rust
//! use easel_core::{OPACITY_OPAQUE, RGBA8};
//! use easel_ops::{CompositeOp, blend};
//!
//! // One opaque red destination pixel, one half-covered blue source pixel.
//! let mut dst = vec![0u8, 0, 255, 255];
//! let src = vec![255u8, 0, 0, 128];
//!
//! blend(
//!     CompositeOp::Over,
//!     RGBA8.pixel_size(),
//!     &mut dst,
//!     4,
//!     &src,
//!     4,
//!     OPACITY_OPAQUE,
//!     1,
//!     1,
//! );
//! assert_eq!(dst[3], 255); // still fully opaque
//! ```
//!
//! # Concurrency
//!
//! Every kernel is stateless and visits rows independently, so the
//! [`parallel`] module (behind the default-on `parallel` feature) can
//! partition the destination into disjoint row bands and run the same
//! kernels across a thread pool with byte-identical results.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod composite;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use composite::{BlendFn, CompositeOp, blend};
