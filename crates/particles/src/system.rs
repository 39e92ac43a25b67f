//! The particle system: one flow field and a fixed particle population.
//!
//! Per frame the host calls [`ParticleSystem::render`] (debug grid, then
//! draw-then-update for each particle in order) followed by
//! [`ParticleSystem::regenerate_field`]. A resize rebuilds everything.

use flowfield_core::error::EngineError;
use flowfield_core::params::{param_bool, param_f64, param_usize};
use flowfield_core::prng::Xorshift64;
use flowfield_core::surface::{LineCap, Surface};
use flowfield_core::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::field::{FlowField, INITIAL_PHASE};
use crate::particle::{Particle, StepContext};

/// Default number of particles.
const DEFAULT_PARTICLE_COUNT: usize = 500;
/// Largest accepted population.
pub const MAX_PARTICLE_COUNT: usize = 100_000;
/// Default flow-field cell size in pixels.
const DEFAULT_CELL_SIZE: usize = 5;
/// Default shape constant of the angle function.
const DEFAULT_CURVE: f64 = 2.1;
/// Default spatial frequency of the angle function.
const DEFAULT_ZOOM: f64 = 0.01;
/// Line width of the debug grid overlay.
const GRID_LINE_WIDTH: f64 = 0.3;
/// Stroke style of the debug grid overlay.
const GRID_COLOR: &str = "#FFFFFFFF";

/// Tunable settings of a [`ParticleSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowParams {
    /// Size of the particle population.
    pub particle_count: usize,
    /// Pixels per flow-field cell.
    pub cell_size: usize,
    /// Shape constant scaling the vertical term.
    pub curve: f64,
    /// Spatial frequency of both terms.
    pub zoom: f64,
    /// Whether the debug grid starts visible.
    pub debug_grid: bool,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            cell_size: DEFAULT_CELL_SIZE,
            curve: DEFAULT_CURVE,
            zoom: DEFAULT_ZOOM,
            debug_grid: false,
        }
    }
}

impl FlowParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            particle_count: param_usize(params, "particle_count", DEFAULT_PARTICLE_COUNT),
            cell_size: param_usize(params, "cell_size", DEFAULT_CELL_SIZE),
            curve: param_f64(params, "curve", DEFAULT_CURVE),
            zoom: param_f64(params, "zoom", DEFAULT_ZOOM),
            debug_grid: param_bool(params, "debug_grid", false),
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.particle_count == 0 {
            return Err(EngineError::InvalidParam {
                name: "particle_count".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(EngineError::InvalidParam {
                name: "particle_count".into(),
                reason: format!("must be at most {MAX_PARTICLE_COUNT}"),
            });
        }
        Ok(())
    }
}

/// Owns the flow field and the particle population for one viewport.
pub struct ParticleSystem {
    width: usize,
    height: usize,
    params: FlowParams,
    field: FlowField,
    particles: Vec<Particle>,
    debug_grid: bool,
    rng: Xorshift64,
}

impl ParticleSystem {
    /// Creates a system bound to a `width x height` viewport.
    ///
    /// Builds the initial (sine-leading) field and spawns
    /// `params.particle_count` particles from a PRNG seeded with `seed`.
    ///
    /// Returns `EngineError::InvalidDimensions` if the viewport holds no
    /// whole cell, or `EngineError::InvalidParam` for a zero cell size or
    /// particle count.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: FlowParams,
    ) -> Result<Self, EngineError> {
        params.validate()?;
        let field = FlowField::new(
            width,
            height,
            params.cell_size,
            params.curve,
            params.zoom,
            INITIAL_PHASE,
        )?;
        let mut system = Self {
            width,
            height,
            params,
            field,
            particles: Vec::with_capacity(params.particle_count),
            debug_grid: params.debug_grid,
            rng: Xorshift64::new(seed),
        };
        system.spawn_particles();
        log::debug!(
            "particle system ready: {}x{} viewport, {}x{} grid, {} particles",
            width,
            height,
            system.field.cols(),
            system.field.rows(),
            system.particles.len()
        );
        Ok(system)
    }

    /// Creates a system from a JSON params object.
    ///
    /// Reads `particle_count`, `cell_size`, `curve`, `zoom` and `debug_grid`,
    /// falling back to defaults for missing keys.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(width, height, seed, FlowParams::from_json(json_params))
    }

    /// Rebuilds the field for the current viewport (sine-leading variant,
    /// current phase) and replaces every particle with a fresh spawn.
    pub fn init(&mut self) -> Result<(), EngineError> {
        self.field.resize(self.width, self.height)?;
        self.spawn_particles();
        Ok(())
    }

    /// Binds the system to a new viewport and fully reinitializes it.
    ///
    /// On error the system keeps its previous viewport and state.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        self.field.resize(width, height)?;
        self.width = width;
        self.height = height;
        self.spawn_particles();
        log::debug!(
            "resized to {}x{}: {}x{} grid",
            width,
            height,
            self.field.cols(),
            self.field.rows()
        );
        Ok(())
    }

    /// Selects round caps, draws the debug grid if enabled, then draws and
    /// updates every particle in population order.
    ///
    /// The cap is reapplied every frame; a canvas resize resets it.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        surface.set_line_cap(LineCap::Round);
        if self.debug_grid {
            self.draw_grid(surface);
        }
        let ctx = StepContext {
            field: &self.field,
            width: self.width,
            height: self.height,
        };
        for particle in &mut self.particles {
            particle.draw(surface);
            particle.update(&ctx, &mut self.rng);
        }
    }

    /// Regenerates the field (cosine-leading variant) and advances its phase.
    pub fn regenerate_field(&mut self) {
        self.field.regenerate();
    }

    /// Flips debug grid visibility.
    pub fn toggle_debug_grid(&mut self) {
        self.debug_grid = !self.debug_grid;
        log::debug!("debug grid {}", if self.debug_grid { "on" } else { "off" });
    }

    pub fn set_debug_grid(&mut self, visible: bool) {
        self.debug_grid = visible;
    }

    pub fn debug_grid(&self) -> bool {
        self.debug_grid
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    /// Particles in draw/update order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn flow_params(&self) -> &FlowParams {
        &self.params
    }

    fn spawn_particles(&mut self) {
        let (width, height) = (self.width, self.height);
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles.extend(
            (0..self.params.particle_count).map(|_| Particle::spawn(rng, width, height)),
        );
    }

    fn draw_grid(&self, surface: &mut dyn Surface) {
        let cell = self.field.cell_size() as f64;
        let (width, height) = (self.width as f64, self.height as f64);
        surface.save();
        surface.set_line_width(GRID_LINE_WIDTH);
        surface.set_stroke_style(GRID_COLOR);
        for c in 0..self.field.cols() {
            let x = cell * c as f64;
            surface.begin_path();
            surface.move_to(x, 0.0);
            surface.line_to(x, height);
            surface.stroke();
        }
        for r in 0..self.field.rows() {
            let y = cell * r as f64;
            surface.begin_path();
            surface.move_to(0.0, y);
            surface.line_to(width, y);
            surface.stroke();
        }
        surface.restore();
    }
}

impl Engine for ParticleSystem {
    fn render(&mut self, surface: &mut dyn Surface) {
        ParticleSystem::render(self, surface);
    }

    fn advance(&mut self) {
        self.regenerate_field();
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        ParticleSystem::resize(self, width, height)
    }

    fn viewport(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn toggle_debug(&mut self) {
        self.toggle_debug_grid();
    }

    fn params(&self) -> Value {
        json!({
            "particle_count": self.params.particle_count,
            "cell_size": self.params.cell_size,
            "curve": self.params.curve,
            "zoom": self.params.zoom,
            "debug_grid": self.debug_grid,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 1,
                "max": MAX_PARTICLE_COUNT,
                "description": "Number of particles; fixed for the life of the system"
            },
            "cell_size": {
                "type": "integer",
                "default": DEFAULT_CELL_SIZE,
                "min": 1,
                "description": "Pixels per flow-field cell"
            },
            "curve": {
                "type": "number",
                "default": DEFAULT_CURVE,
                "description": "Shape constant scaling the vertical term of the angle function"
            },
            "zoom": {
                "type": "number",
                "default": DEFAULT_ZOOM,
                "description": "Spatial frequency of the angle function"
            },
            "debug_grid": {
                "type": "boolean",
                "default": false,
                "description": "Draw the flow-field cell boundaries"
            }
        })
    }
}
