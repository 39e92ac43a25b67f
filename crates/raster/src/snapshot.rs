//! PNG output of a [`PixelSurface`].
//!
//! Feature-gated behind `png` (default on) so the pixel surface can be used
//! without pulling in the `image` crate.

use flowfield_core::color::Srgb;
use flowfield_core::error::EngineError;
use std::path::Path;

use crate::pixel::PixelSurface;

/// Writes the surface as an opaque PNG, composited over `background`.
///
/// Returns `EngineError::InvalidDimensions` if the surface does not fit
/// `u32` dimensions, or `EngineError::Io` on encode/write failure.
pub fn write_png(surface: &PixelSurface, background: Srgb, path: &Path) -> Result<(), EngineError> {
    let (width, height) = (surface.width(), surface.height());
    let invalid = || EngineError::InvalidDimensions { width, height };
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, surface.composite_over(background))
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))?;
    log::info!("wrote {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}
