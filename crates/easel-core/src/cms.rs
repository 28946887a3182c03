//! Color-management boundary: opaque profile handles and rendering intents.
//!
//! ICC mathematics is not this crate's business. A [`Profile`] is an opaque
//! handle owned by an external color engine; the materializer forwards
//! pixel arrays to it and otherwise never looks inside. A missing profile
//! on either side of a conversion means "skip the transform", never an
//! error.

use crate::colorspace::ColorModel;

/// Policy for resolving out-of-gamut colors in a profile conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderingIntent {
    /// Compress the gamut smoothly, preserving perceptual relationships.
    #[default]
    Perceptual,
    /// Map the white points, clip the rest.
    RelativeColorimetric,
    /// Favor vividness over accuracy.
    Saturation,
    /// Absolute colorimetry, no white-point adaptation.
    AbsoluteColorimetric,
}

/// Opaque handle to a color profile managed by an external engine.
///
/// Implementations wrap whatever their engine needs to describe a color
/// space (an ICC blob, a matrix, a LUT). The core treats the handle as
/// data: it forwards pixels through [`transform`](Profile::transform) and
/// never inspects the contents.
pub trait Profile: Send + Sync {
    /// Identifier used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Converts `pixels`, packed in `model`'s layout, in place from this
    /// profile's space into `dest`'s space under `intent`.
    ///
    /// The pixel count is `pixels.len() / model.pixel_size()`.
    fn transform(
        &self,
        pixels: &mut [u8],
        model: &ColorModel,
        dest: &dyn Profile,
        intent: RenderingIntent,
    );
}
