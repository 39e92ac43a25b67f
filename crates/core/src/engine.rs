//! The `Engine` trait that hosts drive once per frame.
//!
//! The trait is object-safe so the frame driver and the CLI/WASM hosts can
//! hold a `dyn Engine` without knowing the concrete animation.

use crate::error::EngineError;
use crate::surface::Surface;
use serde_json::Value;

/// A frame-based animation rendered onto a [`Surface`].
///
/// A host calls [`render`](Engine::render) and then [`advance`](Engine::advance)
/// once per tick. Resize and debug toggles arrive between ticks.
pub trait Engine {
    /// Draws the current frame and applies the per-frame state update.
    fn render(&mut self, surface: &mut dyn Surface);

    /// Advances time-dependent state after the frame has been rendered.
    fn advance(&mut self);

    /// Rebinds the engine to a new viewport size, reinitializing its state.
    ///
    /// Returns `EngineError::InvalidDimensions` if the viewport is unusable.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError>;

    /// Current viewport as `(width, height)` in pixels.
    fn viewport(&self) -> (usize, usize);

    /// Flips the debug overlay. Engines without one ignore it.
    fn toggle_debug(&mut self) {}

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing each parameter's type, default and range.
    fn param_schema(&self) -> Value;
}
