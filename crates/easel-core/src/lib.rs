//! # easel-core
//!
//! Core types for the easel raster engine: the 8-bit RGBA color model and
//! everything a caller needs to move pixel data across its boundaries.
//!
//! This crate provides:
//!
//! - [`ColorModel`] - data-driven descriptor of one packed pixel format
//!   (channel layout plus codec functions), selected by a [`ColorModelId`]
//!   tag
//! - [`ChannelInfo`] - per-channel metadata: display name, byte offset,
//!   semantic role
//! - [`DeviceColor`] - the device-independent RGB value exchanged with
//!   color pickers and swatches
//! - [`DisplayImage`] - a packed, native-endian ARGB image ready for a
//!   display surface
//! - [`Profile`] / [`RenderingIntent`] - the color-management boundary
//!   (opaque handles, delegated transforms)
//! - the quantum domain ([`Quantum`], [`quantum_mul`], [`quantum_blend`])
//!   shared with the blend kernels in `easel-ops`
//!
//! ## Design Philosophy
//!
//! A color model is a **value, not a class hierarchy**. [`RGBA8`] is a
//! static descriptor holding the channel table and codec function pointers;
//! new formats are added as data and selected by tag:
//!
//! ```
//! use easel_core::{ColorModelId, DeviceColor};
//!
//! let model = ColorModelId::Rgba8.model();
//! let mut pixel = [0u8; 4];
//! model.encode_with_opacity(&DeviceColor::new(200, 10, 5), 255, None, &mut pixel);
//! ```
//!
//! Everything on the per-pixel hot path is a pure function over
//! caller-supplied memory: no allocation, no locking, no error returns.
//! The few fallible APIs (by-name lookup, image construction) live off the
//! hot path and return [`Result`].
//!
//! ## Crate Structure
//!
//! ```text
//! easel-core (this crate)
//!    ^
//!    |
//!    +-- easel-ops (compositing operators and blend kernels)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod cms;
pub mod color;
pub mod colorspace;
pub mod error;
pub mod image;
pub mod quantum;

// Re-exports for convenience
pub use channel::{
    ChannelInfo, ChannelRole, PIXEL_ALPHA, PIXEL_BLUE, PIXEL_GREEN, PIXEL_RED, RGBA8_PIXEL_SIZE,
};
pub use cms::{Profile, RenderingIntent};
pub use color::DeviceColor;
pub use colorspace::{ColorModel, ColorModelId, RGBA8};
pub use error::{Error, Result};
pub use image::DisplayImage;
pub use quantum::{
    OPACITY_OPAQUE, OPACITY_TRANSPARENT, QUANTUM_MAX, Quantum, downscale, quantum_blend,
    quantum_mul, upscale,
};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use easel_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::{
        ChannelInfo, ChannelRole, PIXEL_ALPHA, PIXEL_BLUE, PIXEL_GREEN, PIXEL_RED,
        RGBA8_PIXEL_SIZE,
    };
    pub use crate::cms::{Profile, RenderingIntent};
    pub use crate::color::DeviceColor;
    pub use crate::colorspace::{ColorModel, ColorModelId, RGBA8};
    pub use crate::error::{Error, Result};
    pub use crate::image::DisplayImage;
    pub use crate::quantum::{
        OPACITY_OPAQUE, OPACITY_TRANSPARENT, QUANTUM_MAX, Quantum, downscale, quantum_blend,
        quantum_mul, upscale,
    };
}
