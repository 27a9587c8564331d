//! Per-frame simulation loop.
//!
//! The typical frame looks like:
//! 1. The outer layer translates raw window/key input into [`Event`]s and
//!    feeds them to [`Simulation::handle_event`].
//! 2. [`Simulation::frame`] advances every trajectory, projects the new
//!    segment, and hands it to the [`Renderer`] together with its dirty
//!    rectangle.
//! 3. If a restart was requested, the outer layer constructs a fresh
//!    [`Simulation`] from [`Simulation::config`] and replaces the old one.

use crate::attractor::AttractorState;
use crate::config::{ConfigError, SimConfig, StepMode};
use crate::types::{PixelRect, Rgb};
use glam::IVec2;
use rand::Rng;

/// Rendering/windowing collaborator seam.
///
/// The core never talks to a window directly; it draws single-pixel-wide
/// line segments through this trait and forwards the reported bounding
/// rectangle back as the region to refresh. Updating only that rectangle
/// instead of the whole surface is what lets thousands of accumulated
/// segments stay cheap.
pub trait Renderer {
    /// Size of the drawing surface in pixels.
    fn surface_size(&self) -> (u32, u32);

    /// Draws a one-pixel-wide segment and returns its bounding rectangle.
    fn draw_line(&mut self, color: Rgb, from: IVec2, to: IVec2) -> PixelRect;

    /// Refreshes the given region of the surface on screen.
    fn update_region(&mut self, rect: PixelRect);
}

/// Input events the driver reacts to, already translated from raw
/// window/keyboard events by the outer layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    PauseToggle,
    Restart,
}

/// Driver lifecycle state.
///
/// `Running` and `Paused` toggle on [`Event::PauseToggle`]; any state
/// moves to `Terminating` on [`Event::Quit`] and stays there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    Terminating,
}

/// Drives a small collection of independently perturbed trajectories
/// through the step → project → draw loop.
#[derive(Debug)]
pub struct Simulation {
    pub attractors: Vec<AttractorState>,
    pub status: Status,
    /// Frames seen so far. Bookkeeping only, gates nothing.
    pub frame_count: u64,
    cfg: SimConfig,
    restart_requested: bool,
}

impl Simulation {
    /// Builds one trajectory per configured color.
    ///
    /// Every instance draws its own initial perturbation from `rng`, so
    /// the trajectories start near-identical and fan out over time. In
    /// precomputed mode each construction also pays the one-time solve.
    pub fn new(cfg: SimConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let mut attractors = Vec::with_capacity(cfg.colors.len());
        for &color in &cfg.colors {
            let mut attractor_cfg = cfg.attractor;
            attractor_cfg.color = color;
            let attractor = match cfg.mode {
                StepMode::Euler => AttractorState::new(&attractor_cfg, rng)?,
                StepMode::Precomputed => {
                    AttractorState::new_precomputed(&attractor_cfg, cfg.horizon, rng)?
                }
            };
            attractors.push(attractor);
        }

        Ok(Self {
            attractors,
            status: Status::Running,
            frame_count: 0,
            cfg,
            restart_requested: false,
        })
    }

    /// Applies one input event to the driver state machine.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Quit => self.status = Status::Terminating,
            Event::PauseToggle => {
                self.status = match self.status {
                    Status::Running => Status::Paused,
                    Status::Paused => Status::Running,
                    Status::Terminating => Status::Terminating,
                };
            }
            Event::Restart => {
                if self.status != Status::Terminating {
                    self.restart_requested = true;
                }
            }
        }
    }

    /// Runs one frame: advance, project, draw, refresh.
    ///
    /// While paused or terminating, no trajectory is touched and nothing
    /// is drawn; the frame counter still advances.
    pub fn frame(&mut self, renderer: &mut impl Renderer) {
        if self.status == Status::Running {
            let (width, height) = renderer.surface_size();
            for a in &mut self.attractors {
                a.advance();
                let from = a.prev_screen_pos(width, height);
                let to = a.screen_pos(width, height);
                let dirty = renderer.draw_line(a.color, from, to);
                renderer.update_region(dirty);
            }
        }
        self.frame_count += 1;
    }

    /// Whether the loop should keep running.
    pub fn is_running(&self) -> bool {
        self.status != Status::Terminating
    }

    /// Takes the pending restart request, clearing it.
    ///
    /// The driver never rebuilds itself in place; the outer loop checks
    /// this after each frame and, when set, replaces the simulation with a
    /// freshly constructed one from [`Simulation::config`].
    pub fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Configuration to construct a replacement simulation from.
    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }
}
