#![deny(unsafe_code)]
//! CPU rendering for the flow-field renderer.
//!
//! [`PixelSurface`] implements the core `Surface` trait on an RGBA8 buffer so
//! an engine can be driven headlessly; [`snapshot::write_png`] saves a frame.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::PixelSurface;
