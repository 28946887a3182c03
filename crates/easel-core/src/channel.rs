//! Channel descriptors for packed pixel layouts.
//!
//! A color model owns an ordered sequence of [`ChannelInfo`] records, one
//! per channel. Declaration order defines the channel *index*; it does not
//! have to match byte order. The RGBA-8 model declares red, green, blue,
//! alpha but stores the color bytes reversed (blue-green-red-alpha), the
//! little-endian channel packing display surfaces expect.

/// Semantic role of one channel within a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    /// Carries color intensity.
    Color,
    /// Carries coverage/opacity.
    Alpha,
}

/// Immutable description of a single channel: display name, byte offset
/// within the packed pixel, and semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    name: &'static str,
    offset: usize,
    role: ChannelRole,
}

impl ChannelInfo {
    /// Creates a channel descriptor.
    #[inline]
    pub const fn new(name: &'static str, offset: usize, role: ChannelRole) -> Self {
        Self { name, offset, role }
    }

    /// Display name of the channel.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Byte offset of this channel within one packed pixel.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Semantic role of this channel.
    #[inline]
    pub const fn role(&self) -> ChannelRole {
        self.role
    }
}

/// Byte offset of the blue channel in an RGBA-8 pixel.
pub const PIXEL_BLUE: usize = 0;
/// Byte offset of the green channel in an RGBA-8 pixel.
pub const PIXEL_GREEN: usize = 1;
/// Byte offset of the red channel in an RGBA-8 pixel.
pub const PIXEL_RED: usize = 2;
/// Byte offset of the alpha channel in an RGBA-8 pixel.
pub const PIXEL_ALPHA: usize = 3;

/// Width in bytes of one RGBA-8 pixel.
pub const RGBA8_PIXEL_SIZE: usize = 4;

/// Channel descriptors of the RGBA-8 model, in declaration order.
pub static RGBA8_CHANNELS: [ChannelInfo; 4] = [
    ChannelInfo::new("red", PIXEL_RED, ChannelRole::Color),
    ChannelInfo::new("green", PIXEL_GREEN, ChannelRole::Color),
    ChannelInfo::new("blue", PIXEL_BLUE, ChannelRole::Color),
    ChannelInfo::new("alpha", PIXEL_ALPHA, ChannelRole::Alpha),
];
