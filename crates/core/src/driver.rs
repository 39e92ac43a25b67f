//! Fixed-cadence frame driver.
//!
//! The driver owns no timer. A host (browser `setTimeout` loop, headless CLI)
//! waits [`FrameDriver::frame_interval`] between calls to
//! [`FrameDriver::tick`], which clears the surface and runs one frame.

use crate::engine::Engine;
use crate::surface::Surface;
use std::time::Duration;

/// Default target frame rate.
pub const DEFAULT_FPS: u32 = 60;

/// Runs engine frames in the order clear, render, advance.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    fps: u32,
    frame: u64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl FrameDriver {
    /// Creates a driver targeting `fps` frames per second (0 is treated as 1).
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            frame: 0,
        }
    }

    /// Target frame rate.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Delay a host waits between ticks: `1000 / fps` milliseconds.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    /// Number of ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Clears the viewport, renders one frame, then advances the engine.
    pub fn tick(&mut self, engine: &mut dyn Engine, surface: &mut dyn Surface) {
        let (width, height) = engine.viewport();
        surface.clear_rect(0.0, 0.0, width as f64, height as f64);
        engine.render(surface);
        engine.advance();
        self.frame += 1;
        log::trace!("frame {} done", self.frame);
    }

    /// Runs `frames` ticks back to back, with no pacing.
    pub fn run(&mut self, engine: &mut dyn Engine, surface: &mut dyn Surface, frames: usize) {
        for _ in 0..frames {
            self.tick(engine, surface);
        }
    }
}
