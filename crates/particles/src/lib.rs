#![deny(unsafe_code)]
//! Flow-field particle engine.
//!
//! A [`FlowField`] of headings, regenerated every frame from a periodic
//! function of grid position and an advancing phase, steers a fixed
//! population of [`Particle`]s. Each particle leaves a bounded trail that is
//! stroked as a polyline, retracts when its timer runs out, and respawns.
//! [`ParticleSystem`] owns both and implements the core `Engine` trait.

pub mod field;
pub mod particle;
pub mod system;

pub use field::{FlowField, LeadingTerm};
pub use particle::{LifeStage, Particle, StepContext, Traits};
pub use system::{FlowParams, ParticleSystem, MAX_PARTICLE_COUNT};
