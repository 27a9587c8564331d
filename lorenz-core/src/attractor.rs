use crate::config::{AttractorConfig, Bounds, ConfigError, LorenzParams};
use crate::projection;
use crate::solver;
use crate::types::Rgb;
use glam::{DVec3, IVec2};
use rand::Rng;

/// The Lorenz vector field: `dx/dt = σ(y−x)`, `dy/dt = x(ρ−z)−y`,
/// `dz/dt = xy−βz`.
pub fn derivatives(state: DVec3, params: &LorenzParams) -> DVec3 {
    DVec3::new(
        params.sigma * (state.y - state.x),
        state.x * (params.rho - state.z) - state.y,
        state.x * state.y - params.beta * state.z,
    )
}

/// Stepping strategy, chosen at construction.
///
/// Each variant carries only the state its strategy needs; `advance`
/// dispatches on it.
#[derive(Debug)]
pub enum Stepper {
    /// Fixed-step explicit Euler, integrated live.
    ExplicitEuler,
    /// Replay of a precomputed high-accuracy solution.
    Precomputed { states: Vec<DVec3>, cursor: usize },
}

/// One simulated Lorenz trajectory.
///
/// Holds the current and previous position so the driver can draw the
/// incremental segment between them, plus the fixed parameters, projection
/// bounds, and color configured at construction.
#[derive(Debug)]
pub struct AttractorState {
    pub params: LorenzParams,
    pub dt: f64,
    pub bounds: Bounds,
    pub color: Rgb,
    /// Current position, mutated every step.
    pub pos: DVec3,
    /// Position immediately before the most recent step.
    pub prev: DVec3,
    pub stepper: Stepper,
}

impl AttractorState {
    /// Creates an explicit-Euler trajectory from a validated configuration.
    ///
    /// The initial x coordinate is offset by a uniform draw in
    /// `[0, cfg.perturbation)` so that multiple instances started from the
    /// same configuration diverge visibly (the chaotic effect is the point).
    pub fn new(cfg: &AttractorConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let initial = Self::perturbed_initial(cfg, rng);
        Ok(Self {
            params: cfg.params,
            dt: cfg.dt,
            bounds: cfg.bounds,
            color: cfg.color,
            pos: initial,
            prev: initial,
            stepper: Stepper::ExplicitEuler,
        })
    }

    /// Creates a precomputed trajectory from a validated configuration.
    ///
    /// The same perturbed initial state feeds a one-time adaptive solve
    /// over `t ∈ [0, horizon)` at resolution `cfg.dt`; `advance` then
    /// replays the stored samples.
    pub fn new_precomputed(
        cfg: &AttractorConfig,
        horizon: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        if !(horizon > 0.0) {
            return Err(ConfigError::NonPositiveHorizon(horizon));
        }
        let initial = Self::perturbed_initial(cfg, rng);
        let params = cfg.params;
        let states = solver::solve(|y, _| derivatives(y, &params), initial, horizon, cfg.dt);
        Ok(Self {
            params,
            dt: cfg.dt,
            bounds: cfg.bounds,
            color: cfg.color,
            pos: initial,
            prev: initial,
            stepper: Stepper::Precomputed { states, cursor: 0 },
        })
    }

    fn perturbed_initial(cfg: &AttractorConfig, rng: &mut impl Rng) -> DVec3 {
        let mut initial = cfg.initial;
        if cfg.perturbation > 0.0 {
            initial.x += rng.random_range(0.0..cfg.perturbation);
        }
        initial
    }

    /// Advances the trajectory by one frame.
    ///
    /// Snapshots `pos` into `prev`, then either takes one explicit Euler
    /// step (reading all three old coordinates simultaneously) or copies
    /// the next precomputed sample. Once a precomputed trajectory runs out
    /// of samples, further calls are no-ops and the state stays frozen at
    /// the final sample.
    pub fn advance(&mut self) {
        match &mut self.stepper {
            Stepper::ExplicitEuler => {
                self.prev = self.pos;
                self.pos += self.dt * derivatives(self.pos, &self.params);
            }
            Stepper::Precomputed { states, cursor } => {
                if *cursor < states.len() {
                    self.prev = self.pos;
                    self.pos = states[*cursor];
                    *cursor += 1;
                }
            }
        }
    }

    /// Projects the current (x, z) position onto a surface of the given size.
    pub fn screen_pos(&self, width: u32, height: u32) -> IVec2 {
        projection::to_screen(
            self.pos.x,
            self.pos.z,
            self.bounds.x_range(),
            self.bounds.z_range(),
            width,
            height,
        )
    }

    /// Projects the previous (x, z) position onto a surface of the given size.
    pub fn prev_screen_pos(&self, width: u32, height: u32) -> IVec2 {
        projection::to_screen(
            self.prev.x,
            self.prev.z,
            self.bounds.x_range(),
            self.bounds.z_range(),
            width,
            height,
        )
    }
}
