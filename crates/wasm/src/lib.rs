#![deny(unsafe_code)]
//! Browser host for the flow-field renderer.
//!
//! [`FlowFieldApp`] binds a [`ParticleSystem`] to an `HtmlCanvasElement`.
//! JavaScript owns the animation loop: it calls `frame()` from
//! `requestAnimationFrame` (or a timer at `frame_interval_ms()`), forwards
//! `resize` on window resizes, and forwards key presses to `handle_key`.

use flowfield_core::{Engine, FrameDriver, LineCap, Surface};
use flowfield_particles::ParticleSystem;
use log::{info, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Key that flips the grid overlay.
const DEBUG_KEY: &str = "d";

/// Initialize logging and panic hooks for the WASM target.
#[wasm_bindgen]
pub fn init_logging() {
    let _ = console_log::init_with_level(Level::Debug);
    console_error_panic_hook::set_once();
    info!("flowfield: logging initialized");
}

/// [`Surface`] over a browser 2-D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the `2d` context of `canvas` and selects round line caps.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_line_cap(LineCap::Round.as_str());
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }
}

/// A particle system bound to one canvas.
#[wasm_bindgen]
pub struct FlowFieldApp {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    system: ParticleSystem,
    driver: FrameDriver,
}

#[wasm_bindgen]
impl FlowFieldApp {
    /// Creates a system sized to the canvas's current width and height.
    ///
    /// `params_json` is a JSON object of engine parameters; pass `"{}"`
    /// for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        seed: u64,
        params_json: &str,
    ) -> Result<FlowFieldApp, JsValue> {
        let params: serde_json::Value =
            serde_json::from_str(params_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let width = canvas.width() as usize;
        let height = canvas.height() as usize;
        let system = ParticleSystem::from_json(width, height, seed, &params)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = CanvasSurface::new(&canvas)?;
        info!("flowfield: bound to {width}x{height} canvas");
        Ok(FlowFieldApp {
            canvas,
            surface,
            system,
            driver: FrameDriver::default(),
        })
    }

    /// Resizes the canvas backing store and reinitializes the system.
    ///
    /// An unusable size is logged and leaves the previous state in place.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(e) = Engine::resize(&mut self.system, width as usize, height as usize) {
            warn!("flowfield: resize to {width}x{height} rejected: {e}");
            return;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Forwards a `KeyboardEvent.key` value. `d` toggles the grid overlay.
    pub fn handle_key(&mut self, key: &str) {
        if key == DEBUG_KEY {
            self.toggle_debug();
        }
    }

    /// Flips the grid overlay.
    pub fn toggle_debug(&mut self) {
        self.system.toggle_debug();
    }

    /// Clears, renders and advances one frame.
    pub fn frame(&mut self) {
        self.driver.tick(&mut self.system, &mut self.surface);
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.driver.frame()
    }

    /// Target delay between frames in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        self.driver.frame_interval().as_secs_f64() * 1000.0
    }

    /// Current parameter values as a JSON string.
    pub fn params(&self) -> String {
        self.system.params().to_string()
    }
}
