//! Interactive Lorenz attractor viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! ([`Simulation`], the accumulated segment canvas, colors) and implements
//! [`eframe::App`] to render the animated trajectories and handle keyboard
//! control (pause, restart, quit).

use eframe::App;
use glam::IVec2;
use lorenz_core::{
    config::{ConfigError, SimConfig},
    driver::{Event, Renderer, Simulation, Status},
    types::{PixelRect, Rgb},
};
use rand::Rng;

/// Fixed logical drawing surface, scaled to fit the window when painted.
const SURFACE_WIDTH: u32 = 960;
const SURFACE_HEIGHT: u32 = 540;

/// Retained drawing surface for the incremental trajectory.
///
/// The core draws one segment per trajectory per frame through the
/// [`Renderer`] trait and reports the dirty rectangle it would refresh on
/// a blitting backend. egui repaints retained shapes every frame, so the
/// canvas simply accumulates the segments and keeps the most recent dirty
/// rectangle for the status bar.
#[derive(Debug, Default)]
pub struct SegmentCanvas {
    segments: Vec<(Rgb, IVec2, IVec2)>,
    last_dirty: Option<PixelRect>,
}

impl SegmentCanvas {
    fn clear(&mut self) {
        self.segments.clear();
        self.last_dirty = None;
    }
}

impl Renderer for SegmentCanvas {
    fn surface_size(&self) -> (u32, u32) {
        (SURFACE_WIDTH, SURFACE_HEIGHT)
    }

    fn draw_line(&mut self, color: Rgb, from: IVec2, to: IVec2) -> PixelRect {
        self.segments.push((color, from, to));
        PixelRect::from_segment(from, to)
    }

    fn update_region(&mut self, rect: PixelRect) {
        self.last_dirty = Some(match self.last_dirty {
            Some(prev) => prev.union(rect),
            None => rect,
        });
    }
}

/// Translates a pressed key into a driver event.
///
/// Key bindings: `P`/`Space` toggle pause, `R` restarts with fresh
/// perturbations and colors, `Q`/`Escape` quit.
fn translate_key(key: egui::Key) -> Option<Event> {
    match key {
        egui::Key::P | egui::Key::Space => Some(Event::PauseToggle),
        egui::Key::R => Some(Event::Restart),
        egui::Key::Q | egui::Key::Escape => Some(Event::Quit),
        _ => None,
    }
}

/// Draws a random color per trajectory.
fn random_colors(count: usize, rng: &mut impl Rng) -> Vec<Rgb> {
    (0..count)
        .map(|_| {
            [
                rng.random_range(0..=255),
                rng.random_range(0..=255),
                rng.random_range(0..=255),
            ]
        })
        .collect()
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Simulation`] and its [`SegmentCanvas`].
/// - Keyboard handling mapped onto driver [`Event`]s.
/// - eframe/egui callbacks for drawing the accumulated trajectories.
///
/// The typical per-frame update is:
/// 1. Translate key presses into driver events.
/// 2. Replace the simulation if a restart was requested, or close the
///    window if it is terminating.
/// 3. Call [`Simulation::frame`] against the canvas and paint it.
pub struct Viewer {
    sim: Simulation,
    canvas: SegmentCanvas,
    rng: rand::rngs::ThreadRng,
}

impl Viewer {
    /// Creates a viewer running the default three-trajectory simulation
    /// with randomized colors.
    pub fn new() -> Result<Self, ConfigError> {
        let mut rng = rand::rng();
        let mut cfg = SimConfig::default();
        cfg.colors = random_colors(cfg.colors.len(), &mut rng);
        let sim = Simulation::new(cfg, &mut rng)?;
        Ok(Self {
            sim,
            canvas: SegmentCanvas::default(),
            rng,
        })
    }

    /// Replaces the simulation with a freshly constructed one.
    ///
    /// New perturbations, new colors, a re-solved trajectory in
    /// precomputed mode, and a blank canvas. The old simulation is
    /// dropped; it never rebuilds itself in place.
    fn restart(&mut self) {
        let mut cfg = self.sim.config().clone();
        cfg.colors = random_colors(cfg.colors.len(), &mut self.rng);
        match Simulation::new(cfg, &mut self.rng) {
            Ok(sim) => {
                log::info!("simulation restarted");
                self.sim = sim;
                self.canvas.clear();
            }
            Err(err) => log::error!("restart failed: {err}"),
        }
    }

    /// Feeds pending key presses to the driver state machine.
    fn handle_input(&mut self, ctx: &egui::Context) {
        let events: Vec<Event> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => translate_key(*key),
                    _ => None,
                })
                .collect()
        });
        for event in events {
            self.sim.handle_event(event);
        }
    }

    /// Maps a canvas pixel position into the given screen rectangle,
    /// scaling uniformly to fit and centering the surface.
    fn canvas_to_screen(p: IVec2, rect: egui::Rect) -> egui::Pos2 {
        let scale = (rect.width() / SURFACE_WIDTH as f32)
            .min(rect.height() / SURFACE_HEIGHT as f32);
        let origin = rect.center()
            - egui::vec2(
                SURFACE_WIDTH as f32 * scale / 2.0,
                SURFACE_HEIGHT as f32 * scale / 2.0,
            );
        egui::pos2(
            origin.x + p.x as f32 * scale,
            origin.y + p.y as f32 * scale,
        )
    }

    /// Builds the top panel UI (pause/run and restart controls).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let paused = self.sim.status == Status::Paused;
                if ui.button(if paused { "▶ Run" } else { "⏸ Pause" }).clicked() {
                    self.sim.handle_event(Event::PauseToggle);
                }

                if ui.button("↺ Restart").clicked() {
                    self.sim.handle_event(Event::Restart);
                }

                ui.separator();
                ui.label("keys: P/Space pause · R restart · Q/Esc quit");
            });
        });
    }

    /// Builds the bottom status bar (frame counter, segment count, dirty rect).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("frame = {}", self.sim.frame_count));
                ui.label(format!("segments = {}", self.canvas.segments.len()));
                if let Some(rect) = self.canvas.last_dirty {
                    ui.label(format!(
                        "dirty = {}x{} px",
                        rect.width().max(1),
                        rect.height().max(1)
                    ));
                }
                ui.separator();
                ui.label(format!("status = {:?}", self.sim.status));
            });
        });
    }

    /// Builds the central panel where the accumulated trajectories are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::BLACK);

            // Advance the simulation before painting so the newest
            // segment shows up in the same frame.
            self.sim.frame(&mut self.canvas);

            for &(color, from, to) in &self.canvas.segments {
                let a = Self::canvas_to_screen(from, rect);
                let b = Self::canvas_to_screen(to, rect);
                let stroke =
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(color[0], color[1], color[2]));
                painter.line_segment([a, b], stroke);
            }

            if self.sim.status == Status::Running {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that runs one animation frame.
    ///
    /// This method:
    /// - Translates keyboard input into driver events.
    /// - Handles restart and quit transitions.
    /// - Renders the control panels and the trajectory canvas.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        if self.sim.take_restart_request() {
            self.restart();
        }

        if !self.sim.is_running() {
            log::info!("terminating after {} frames", self.sim.frame_count);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(960.0, 540.0))
    }

    #[test]
    fn key_bindings_translate_to_driver_events() {
        assert_eq!(translate_key(egui::Key::P), Some(Event::PauseToggle));
        assert_eq!(translate_key(egui::Key::Space), Some(Event::PauseToggle));
        assert_eq!(translate_key(egui::Key::R), Some(Event::Restart));
        assert_eq!(translate_key(egui::Key::Q), Some(Event::Quit));
        assert_eq!(translate_key(egui::Key::Escape), Some(Event::Quit));
        assert_eq!(translate_key(egui::Key::A), None);
    }

    #[test]
    fn random_colors_produces_requested_count() {
        let mut rng = rand::rng();
        let colors = random_colors(3, &mut rng);
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn canvas_records_segments_and_merges_dirty_rects() {
        let mut canvas = SegmentCanvas::default();

        let r1 = canvas.draw_line([255, 0, 0], IVec2::new(0, 0), IVec2::new(4, 2));
        canvas.update_region(r1);
        let r2 = canvas.draw_line([0, 255, 0], IVec2::new(10, 10), IVec2::new(6, 12));
        canvas.update_region(r2);

        assert_eq!(canvas.segments.len(), 2);
        assert_eq!(canvas.last_dirty, Some(r1.union(r2)));

        canvas.clear();
        assert!(canvas.segments.is_empty());
        assert_eq!(canvas.last_dirty, None);
    }

    #[test]
    fn canvas_to_screen_fills_a_matching_rect_exactly() {
        let rect = test_rect();

        let top_left = Viewer::canvas_to_screen(IVec2::new(0, 0), rect);
        assert_eq!(top_left, egui::Pos2::new(0.0, 0.0));

        let bottom_right = Viewer::canvas_to_screen(
            IVec2::new(SURFACE_WIDTH as i32, SURFACE_HEIGHT as i32),
            rect,
        );
        assert_eq!(bottom_right, egui::Pos2::new(960.0, 540.0));
    }

    #[test]
    fn canvas_to_screen_letterboxes_wider_windows() {
        // Window twice as wide as the surface aspect: scale from height,
        // center horizontally.
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 540.0));

        let center = Viewer::canvas_to_screen(
            IVec2::new(SURFACE_WIDTH as i32 / 2, SURFACE_HEIGHT as i32 / 2),
            rect,
        );
        assert_eq!(center, egui::Pos2::new(960.0, 270.0));

        let left_edge = Viewer::canvas_to_screen(IVec2::new(0, 0), rect);
        assert_eq!(left_edge.x, 480.0);
    }

    #[test]
    fn restart_replaces_simulation_and_clears_canvas() {
        let mut viewer = Viewer::new().unwrap();

        // Run a few frames so the canvas has content.
        for _ in 0..3 {
            viewer.sim.frame(&mut viewer.canvas);
        }
        assert!(!viewer.canvas.segments.is_empty());
        let frames_before = viewer.sim.frame_count;
        assert!(frames_before > 0);

        viewer.sim.handle_event(Event::Restart);
        assert!(viewer.sim.take_restart_request());
        viewer.restart();

        assert_eq!(viewer.sim.frame_count, 0);
        assert!(viewer.canvas.segments.is_empty());
        assert_eq!(viewer.sim.status, Status::Running);
    }

    #[test]
    fn quit_event_terminates_the_simulation() {
        let mut viewer = Viewer::new().unwrap();
        viewer.sim.handle_event(Event::Quit);
        assert!(!viewer.sim.is_running());
    }
}
