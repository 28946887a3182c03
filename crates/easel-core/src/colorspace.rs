//! Data-driven color model descriptors and the RGBA-8 instantiation.
//!
//! A color model is a [`ColorModel`] value: an immutable descriptor holding
//! the channel table, the pixel width, and the codec entry points as
//! function pointers. Callers select behavior through the [`ColorModelId`]
//! tag (or a by-name lookup); new formats are added as data, not as new
//! branches of an inheritance tree.
//!
//! The one model instantiated here is [`RGBA8`]: 8-bit channels, packed
//! blue-green-red-alpha in memory.
//!
//! # Example
//!
//! ```
//! use easel_core::{DeviceColor, RGBA8};
//!
//! let mut pixel = [0u8; 4];
//! RGBA8.encode_with_opacity(&DeviceColor::new(200, 10, 5), 255, None, &mut pixel);
//! assert_eq!(pixel, [5, 10, 200, 255]);
//!
//! let (color, opacity) = RGBA8.decode_with_opacity(&pixel, None);
//! assert_eq!(color, DeviceColor::new(200, 10, 5));
//! assert_eq!(opacity, 255);
//! ```

use std::fmt;

use tracing::trace;

use crate::channel::{
    ChannelInfo, ChannelRole, PIXEL_ALPHA, PIXEL_BLUE, PIXEL_GREEN, PIXEL_RED, RGBA8_CHANNELS,
    RGBA8_PIXEL_SIZE,
};
use crate::cms::{Profile, RenderingIntent};
use crate::color::DeviceColor;
use crate::error::{Error, Result};
use crate::image::DisplayImage;
use crate::quantum::{Quantum, downscale, upscale};

/// Tag selecting a registered color model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModelId {
    /// 8-bit RGBA, blue-green-red-alpha byte order.
    Rgba8,
}

impl ColorModelId {
    /// The descriptor this tag selects.
    ///
    /// The match is exhaustive: a tag cannot exist without a descriptor.
    #[inline]
    pub fn model(self) -> &'static ColorModel {
        match self {
            Self::Rgba8 => &RGBA8,
        }
    }
}

type EncodeFn = fn(&DeviceColor, &mut [u8]);
type EncodeWithOpacityFn = fn(&DeviceColor, Quantum, &mut [u8]);
type DecodeFn = fn(&[u8]) -> DeviceColor;
type DecodeWithOpacityFn = fn(&[u8]) -> (DeviceColor, Quantum);
type MaterializeFn = fn(
    &ColorModel,
    &[u8],
    u32,
    u32,
    Option<&dyn Profile>,
    Option<&dyn Profile>,
    RenderingIntent,
) -> DisplayImage;

/// Immutable descriptor of one packed pixel format.
///
/// Construction-time data only: the channel table, the pixel width, and the
/// codec/materializer entry points. Descriptors are process-wide statics —
/// they describe a format, not an instance — so every accessor is a pure
/// query and nothing here can fail.
pub struct ColorModel {
    id: ColorModelId,
    name: &'static str,
    display_name: &'static str,
    channels: &'static [ChannelInfo],
    pixel_size: usize,
    encode: EncodeFn,
    encode_with_opacity: EncodeWithOpacityFn,
    decode: DecodeFn,
    decode_with_opacity: DecodeWithOpacityFn,
    materialize: MaterializeFn,
}

impl ColorModel {
    /// The tag identifying this model.
    #[inline]
    pub const fn id(&self) -> ColorModelId {
        self.id
    }

    /// Short identifier, e.g. `"RGBA"`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable name, e.g. `"RGB/Alpha"`.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// The ordered channel descriptor sequence.
    #[inline]
    pub const fn channels(&self) -> &'static [ChannelInfo] {
        self.channels
    }

    /// Total channel count.
    #[inline]
    pub const fn n_channels(&self) -> usize {
        self.channels.len()
    }

    /// Count of color-role channels only.
    #[inline]
    pub fn n_color_channels(&self) -> usize {
        self.channels
            .iter()
            .filter(|c| c.role() == ChannelRole::Color)
            .count()
    }

    /// Whether the model carries an alpha channel.
    #[inline]
    pub fn alpha(&self) -> bool {
        self.channels.iter().any(|c| c.role() == ChannelRole::Alpha)
    }

    /// Byte width of one packed pixel.
    #[inline]
    pub const fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Looks a registered model up by its short identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColorModel`] for an unrecognized id.
    pub fn for_name(name: &str) -> Result<&'static ColorModel> {
        MODELS
            .iter()
            .copied()
            .find(|m| m.name == name)
            .ok_or_else(|| Error::unknown_color_model(name))
    }

    /// Writes `color`'s channels into `pixel` at this model's offsets.
    ///
    /// The alpha byte is left exactly as the caller initialized it. The
    /// profile is accepted for interface uniformity with multi-profile
    /// models and unused by the 8-bit sRGB instantiation.
    #[inline]
    pub fn encode(&self, color: &DeviceColor, _profile: Option<&dyn Profile>, pixel: &mut [u8]) {
        debug_assert!(pixel.len() >= self.pixel_size, "pixel shorter than format");
        (self.encode)(color, pixel);
    }

    /// As [`encode`](Self::encode), additionally writing `opacity` into the
    /// alpha channel.
    #[inline]
    pub fn encode_with_opacity(
        &self,
        color: &DeviceColor,
        opacity: Quantum,
        _profile: Option<&dyn Profile>,
        pixel: &mut [u8],
    ) {
        debug_assert!(pixel.len() >= self.pixel_size, "pixel shorter than format");
        (self.encode_with_opacity)(color, opacity, pixel);
    }

    /// Reads the color channels of `pixel` back into a device color,
    /// ignoring alpha.
    #[inline]
    pub fn decode(&self, pixel: &[u8], _profile: Option<&dyn Profile>) -> DeviceColor {
        debug_assert!(pixel.len() >= self.pixel_size, "pixel shorter than format");
        (self.decode)(pixel)
    }

    /// As [`decode`](Self::decode), additionally reading the alpha channel
    /// into a separate opacity value.
    #[inline]
    pub fn decode_with_opacity(
        &self,
        pixel: &[u8],
        _profile: Option<&dyn Profile>,
    ) -> (DeviceColor, Quantum) {
        debug_assert!(pixel.len() >= self.pixel_size, "pixel shorter than format");
        (self.decode_with_opacity)(pixel)
    }

    /// Produces a display-ready [`DisplayImage`] from a raster buffer in
    /// this model's native layout.
    ///
    /// When both profiles are present, the pixel array is first run through
    /// the source profile's delegated transform under `intent`; if either
    /// profile is absent the pixels pass through untouched. The returned
    /// image owns its storage and never aliases `data`.
    ///
    /// `data` must hold at least `width * height` pixels of this model's
    /// pixel size; that is caller contract, asserted in debug builds only.
    pub fn materialize(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        src_profile: Option<&dyn Profile>,
        dst_profile: Option<&dyn Profile>,
        intent: RenderingIntent,
    ) -> DisplayImage {
        (self.materialize)(self, data, width, height, src_profile, dst_profile, intent)
    }
}

impl fmt::Debug for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorModel")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("pixel_size", &self.pixel_size)
            .finish_non_exhaustive()
    }
}

/// All registered color models.
static MODELS: [&ColorModel; 1] = [&RGBA8];

/// The 8-bit RGBA color model.
///
/// Channels are declared red, green, blue, alpha and stored
/// blue-green-red-alpha in memory (little-endian channel packing).
pub static RGBA8: ColorModel = ColorModel {
    id: ColorModelId::Rgba8,
    name: "RGBA",
    display_name: "RGB/Alpha",
    channels: &RGBA8_CHANNELS,
    pixel_size: RGBA8_PIXEL_SIZE,
    encode: rgba8_encode,
    encode_with_opacity: rgba8_encode_with_opacity,
    decode: rgba8_decode,
    decode_with_opacity: rgba8_decode_with_opacity,
    materialize: rgba8_materialize,
};

fn rgba8_encode(color: &DeviceColor, pixel: &mut [u8]) {
    pixel[PIXEL_RED] = upscale(color.r);
    pixel[PIXEL_GREEN] = upscale(color.g);
    pixel[PIXEL_BLUE] = upscale(color.b);
}

fn rgba8_encode_with_opacity(color: &DeviceColor, opacity: Quantum, pixel: &mut [u8]) {
    pixel[PIXEL_RED] = upscale(color.r);
    pixel[PIXEL_GREEN] = upscale(color.g);
    pixel[PIXEL_BLUE] = upscale(color.b);
    pixel[PIXEL_ALPHA] = opacity;
}

fn rgba8_decode(pixel: &[u8]) -> DeviceColor {
    DeviceColor::new(
        downscale(pixel[PIXEL_RED]),
        downscale(pixel[PIXEL_GREEN]),
        downscale(pixel[PIXEL_BLUE]),
    )
}

fn rgba8_decode_with_opacity(pixel: &[u8]) -> (DeviceColor, Quantum) {
    (rgba8_decode(pixel), pixel[PIXEL_ALPHA])
}

fn rgba8_materialize(
    model: &ColorModel,
    data: &[u8],
    width: u32,
    height: u32,
    src_profile: Option<&dyn Profile>,
    dst_profile: Option<&dyn Profile>,
    intent: RenderingIntent,
) -> DisplayImage {
    let pixel_count = width as usize * height as usize;
    let byte_len = pixel_count * model.pixel_size;
    debug_assert!(data.len() >= byte_len, "buffer smaller than declared geometry");

    // The returned image must not alias caller memory, so work on a copy.
    let mut native = data[..byte_len].to_vec();

    if let (Some(src), Some(dst)) = (src_profile, dst_profile) {
        trace!(
            src = src.name(),
            dst = dst.name(),
            pixel_count,
            "materialize: delegating profile transform"
        );
        src.transform(&mut native, model, dst, intent);
    }

    // Pack each blue-green-red-alpha group as a little-endian load into a
    // native ARGB32 word: a plain copy on little-endian hosts, an explicit
    // byte swap on big-endian ones.
    let argb = native
        .chunks_exact(RGBA8_PIXEL_SIZE)
        .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
        .collect();

    DisplayImage::from_raw(argb, width, height)
}
