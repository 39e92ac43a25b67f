//! A single trail-drawing particle and its life cycle.
//!
//! Each update a particle either moves along the flow field and extends its
//! trail (`Alive`), retracts the tail of an expired trail (`Shrinking`), or
//! respawns at a random position once only one point is left (`Reset`).

use std::collections::VecDeque;

use flowfield_core::color::add_alpha;
use flowfield_core::error::EngineError;
use flowfield_core::prng::Xorshift64;
use flowfield_core::surface::Surface;
use glam::DVec2;

use crate::field::FlowField;

/// Base hues a particle's stroke color is drawn from.
pub const PALETTE: [&str; 4] = ["#FFB84C", "#F266AB", "#A459D1", "#2CD3E1"];

/// Per-particle speed range, `[min, max)`.
pub const SPEED_RANGE: (f64, f64) = (1.0, 9.0);
/// Per-particle trail cap range, `[min, max)`.
pub const TRAIL_LENGTH_RANGE: (f64, f64) = (10.0, 50.0);
/// Number of distinct line widths; widths are `1..=LINE_WIDTHS`.
pub const LINE_WIDTHS: usize = 3;

/// Read-only view of the system state a particle needs to update.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub field: &'a FlowField,
    pub width: usize,
    pub height: usize,
}

/// What a single [`Particle::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStage {
    /// Moved one step and appended to the trail.
    Alive,
    /// Timer expired; dropped the oldest trail point without moving.
    Shrinking,
    /// Respawned at a new random position.
    Reset,
}

/// Traits fixed at spawn time and kept across resets.
#[derive(Debug, Clone, PartialEq)]
pub struct Traits {
    /// Distance travelled per update.
    pub speed: f64,
    /// Trail cap; the trail never holds more points than this.
    pub max_trail_length: f64,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Stroke color as `#RRGGBBAA`.
    pub color: String,
}

impl Traits {
    /// Draws a random set of traits.
    pub fn random(rng: &mut Xorshift64) -> Self {
        let speed = rng.next_range(SPEED_RANGE.0, SPEED_RANGE.1);
        let max_trail_length = rng.next_range(TRAIL_LENGTH_RANGE.0, TRAIL_LENGTH_RANGE.1);
        let line_width = (rng.next_usize(LINE_WIDTHS) + 1) as f64;
        let opacity = rng.next_f64();
        let hue = rng.pick(&PALETTE).copied().unwrap_or(PALETTE[0]);
        Self {
            speed,
            max_trail_length,
            line_width,
            color: add_alpha(hue, opacity),
        }
    }
}

/// A point moving through the flow field, leaving a bounded trail.
#[derive(Debug, Clone)]
pub struct Particle {
    position: DVec2,
    trail: VecDeque<DVec2>,
    life_timer: f64,
    traits: Traits,
}

impl Particle {
    /// Spawns a particle with random traits at a random whole-pixel position
    /// inside the `width x height` viewport.
    pub fn spawn(rng: &mut Xorshift64, width: usize, height: usize) -> Self {
        let position = random_position(rng, width, height);
        let traits = Traits::random(rng);
        Self::from_parts(position, traits)
    }

    /// Creates a particle at `position` with the given traits. The trail
    /// starts as the single spawn point and the timer at twice the cap.
    ///
    /// Returns `EngineError::InvalidParam` unless `max_trail_length` is
    /// finite and at least 1, since a one-point trail must fit under the cap.
    pub fn with_traits(position: DVec2, traits: Traits) -> Result<Self, EngineError> {
        let cap = traits.max_trail_length;
        if !cap.is_finite() || cap < 1.0 {
            return Err(EngineError::InvalidParam {
                name: "max_trail_length".into(),
                reason: format!("must be finite and at least 1, got {cap}"),
            });
        }
        Ok(Self::from_parts(position, traits))
    }

    fn from_parts(position: DVec2, traits: Traits) -> Self {
        let mut trail = VecDeque::with_capacity(TRAIL_LENGTH_RANGE.1 as usize + 1);
        trail.push_back(position);
        Self {
            position,
            trail,
            life_timer: traits.max_trail_length * 2.0,
            traits,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Past positions, oldest first.
    pub fn trail(&self) -> &VecDeque<DVec2> {
        &self.trail
    }

    /// Remaining updates before the trail starts retracting.
    pub fn life_timer(&self) -> f64 {
        self.life_timer
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    /// Strokes the trail as one polyline. Does not change the particle.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let Some(first) = self.trail.front() else {
            return;
        };
        surface.begin_path();
        surface.set_line_width(self.traits.line_width);
        surface.move_to(first.x, first.y);
        for point in &self.trail {
            surface.line_to(point.x, point.y);
        }
        surface.set_stroke_style(&self.traits.color);
        surface.stroke();
    }

    /// Advances the particle by one step of its life cycle.
    pub fn update(&mut self, ctx: &StepContext<'_>, rng: &mut Xorshift64) -> LifeStage {
        self.life_timer -= 1.0;
        if self.life_timer >= 1.0 {
            let heading = ctx.field.angle_at(self.position.x, self.position.y);
            self.position += DVec2::from_angle(heading) * self.traits.speed;
            self.trail.push_back(self.position);
            if self.trail.len() as f64 > self.traits.max_trail_length {
                self.trail.pop_front();
            }
            LifeStage::Alive
        } else if self.trail.len() > 1 {
            self.trail.pop_front();
            LifeStage::Shrinking
        } else {
            self.reset(rng, ctx.width, ctx.height);
            LifeStage::Reset
        }
    }

    /// Moves to a new random position with a fresh one-point trail and a
    /// full timer. Traits are kept.
    pub fn reset(&mut self, rng: &mut Xorshift64, width: usize, height: usize) {
        self.position = random_position(rng, width, height);
        self.trail.clear();
        self.trail.push_back(self.position);
        self.life_timer = self.traits.max_trail_length * 2.0;
        log::trace!("particle reset at ({}, {})", self.position.x, self.position.y);
    }
}

fn random_position(rng: &mut Xorshift64, width: usize, height: usize) -> DVec2 {
    DVec2::new(rng.next_coord(width), rng.next_coord(height))
}
