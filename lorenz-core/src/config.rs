use crate::types::Rgb;
use glam::DVec3;
use thiserror::Error;

/// The three fixed coefficients of the Lorenz equations.
///
/// Classical chaos occurs at the defaults σ = 10, ρ = 28, β = 8/3.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

/// World-space window used for projection.
///
/// Drawing projects the (x, z) plane, so `x_*` and `z_*` are the ranges
/// that matter for the default view; `y_*` is kept for alternative
/// projections of the same trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: -35.0,
            x_max: 35.0,
            y_min: -30.0,
            y_max: 30.0,
            z_min: 0.0,
            z_max: 50.0,
        }
    }
}

impl Bounds {
    pub fn x_range(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    pub fn z_range(&self) -> (f64, f64) {
        (self.z_min, self.z_max)
    }
}

/// Per-trajectory configuration, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct AttractorConfig {
    pub params: LorenzParams,
    /// Integration time step. Must be positive.
    pub dt: f64,
    pub bounds: Bounds,
    /// Unperturbed initial state shared by both stepping strategies.
    pub initial: DVec3,
    /// Upper bound of the uniform random offset added to `initial.x`.
    pub perturbation: f64,
    pub color: Rgb,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            params: LorenzParams::default(),
            dt: 0.01,
            bounds: Bounds::default(),
            initial: DVec3::new(0.1, 0.0, 10.0),
            perturbation: 0.001,
            color: [51, 153, 255],
        }
    }
}

impl AttractorConfig {
    /// Validates the configuration.
    ///
    /// Non-positive `dt` and zero-extent projection bounds are rejected
    /// here so they can never reach the stepping or projection math as a
    /// division by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt > 0.0) {
            return Err(ConfigError::NonPositiveDt(self.dt));
        }
        if self.bounds.x_max == self.bounds.x_min {
            return Err(ConfigError::DegenerateBounds("x"));
        }
        if self.bounds.y_max == self.bounds.y_min {
            return Err(ConfigError::DegenerateBounds("y"));
        }
        if self.bounds.z_max == self.bounds.z_min {
            return Err(ConfigError::DegenerateBounds("z"));
        }
        Ok(())
    }
}

/// Which stepping strategy the simulation uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepMode {
    /// Fixed-step explicit Euler, integrated live each frame.
    Euler,
    /// One-time adaptive high-accuracy solve, replayed frame by frame.
    Precomputed,
}

/// Whole-simulation configuration: one trajectory per color.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub attractor: AttractorConfig,
    pub colors: Vec<Rgb>,
    pub mode: StepMode,
    /// Time horizon of the precomputed solve, `t ∈ [0, horizon)`.
    pub horizon: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            attractor: AttractorConfig::default(),
            colors: vec![[51, 153, 255], [204, 204, 255], [0, 0, 255]],
            mode: StepMode::Precomputed,
            horizon: 80.0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.attractor.validate()?;
        if self.colors.is_empty() {
            return Err(ConfigError::NoAttractors);
        }
        if self.mode == StepMode::Precomputed && !(self.horizon > 0.0) {
            return Err(ConfigError::NonPositiveHorizon(self.horizon));
        }
        Ok(())
    }
}

/// Construction-time configuration errors.
///
/// These are the only fallible paths in the core; everything past
/// construction is deterministic and infallible.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("time step must be positive, got {0}")]
    NonPositiveDt(f64),
    #[error("projection bounds have zero extent on the {0} axis")]
    DegenerateBounds(&'static str),
    #[error("precompute horizon must be positive, got {0}")]
    NonPositiveHorizon(f64),
    #[error("simulation needs at least one attractor color")]
    NoAttractors,
}
