//! Core Lorenz attractor simulation library.
//!
//! Main components:
//! - [`attractor`] — per-trajectory state and stepping strategies.
//! - [`solver`] — adaptive Runge–Kutta integration for precomputed trajectories.
//! - [`projection`] — world-space to screen-space coordinate mapping.
//! - [`driver`] — the per-frame simulation loop and renderer seam.
//! - [`config`] — construction-time configuration and validation.
//! - [`types`] — shared small types (colors, pixel rectangles).

pub mod attractor;
pub mod config;
pub mod driver;
pub mod projection;
pub mod solver;
pub mod types;
