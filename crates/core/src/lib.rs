#![deny(unsafe_code)]
//! Core types and traits for the flow-field renderer.
//!
//! Provides the `Engine` trait that hosts drive, the `Surface` stroke-drawing
//! contract, the `FrameDriver` tick loop, the row-major `Grid`, color helpers
//! (`Srgb`, `Rgba8`, `add_alpha`), the `Xorshift64` PRNG, and parameter helpers.

pub mod color;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod params;
pub mod prng;
pub mod surface;

pub use color::{add_alpha, Rgba8, Srgb};
pub use driver::FrameDriver;
pub use engine::Engine;
pub use error::EngineError;
pub use grid::Grid;
pub use prng::Xorshift64;
pub use surface::{DrawCommand, LineCap, RecordingSurface, Surface};
