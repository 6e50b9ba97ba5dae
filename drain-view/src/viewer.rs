//! Interactive rain-drain viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the current drain layout,
//! its solved outflows and a scatter of raindrops, and implements
//! [`eframe::App`] to draw them and edit the generation parameters.

use drain_core::{
    config::Config,
    drain::{Drain, DrainSet},
    generator::generate_random_drains,
    phases::{compute_flow_report, resolve_targets},
    raindrops::RaindropSet,
    validation::validate,
};
use eframe::App;
use glam::Vec2;
use log::{error, info};
use rand::{Rng, rng};

/// Main application state for the viewer.
///
/// ### Fields
/// - `drains` - Current layout, solved: amounts and landing heights set.
/// - `raindrops` - Display scatter, already culled against `drains`.
/// - `cfg` - Water density, generator and raindrop settings.
/// - `rng` - Source of fresh raindrop seeds.
///
/// - `zoom` - Pixels per wall unit.
/// - `pan` - Screen-space pan offset in pixels.
/// - `focus` - World position drawn at the center of the view.
///
/// - `lost` - Water drained past the right edge in the last solve.
/// - `status` - Message from the last failed action, if any.
pub struct Viewer {
    drains: Vec<Drain>,
    raindrops: RaindropSet,
    cfg: Config,

    rng: rand::rngs::ThreadRng,

    zoom: f32,
    pan: egui::Vec2,
    focus: Vec2,

    lost: f64,
    status: Option<String>,
}

impl Viewer {
    /// Creates a viewer showing the solved demo layout.
    pub fn new() -> Self {
        let mut viewer = Self {
            drains: Vec::new(),
            raindrops: RaindropSet::default(),
            cfg: Config::default(),
            rng: rng(),
            zoom: 6.0,
            pan: egui::vec2(0.0, 0.0),
            focus: Vec2::ZERO,
            lost: 0.0,
            status: None,
        };
        viewer.load_layout(DrainSet::demo());
        viewer
    }

    /// Validates and solves `set`, replacing the current layout.
    ///
    /// An invalid layout leaves the current one untouched and is reported
    /// through `status`.
    fn load_layout(&mut self, set: DrainSet) {
        let water = self.cfg.water_amount_per_unit_of_length;
        if let Err(e) = validate(&set.drains, water) {
            error!("rejected layout: {e}");
            self.status = Some(e.to_string());
            return;
        }

        let report = compute_flow_report(&set.drains, water);
        self.drains = resolve_targets(&report.drains);
        self.lost = report.lost;
        self.status = None;

        let amounts: Vec<f64> = self.drains.iter().map(|d| d.drain_amount).collect();
        info!("drain amounts: {amounts:?}");

        self.focus = Self::layout_center(&self.drains);
        self.resample_rain();
    }

    /// Re-solves the current layout, e.g. after the density changed.
    fn resolve(&mut self) {
        let set = DrainSet::from_drains(self.drains.clone());
        self.load_layout(set);
    }

    /// Generates a random layout from the generator settings.
    fn generate(&mut self) {
        match generate_random_drains(&self.cfg.generator) {
            Ok(set) => self.load_layout(set),
            Err(e) => {
                error!("generation failed: {e}");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Redraws the raindrop scatter over the current layout and culls it.
    fn resample_rain(&mut self) {
        let mut raindrops = RaindropSet::for_wall(
            &self.drains,
            self.cfg.raindrop_count,
            self.cfg.raindrop_seed,
        );
        raindrops.cull(&self.drains);
        self.raindrops = raindrops;
    }

    fn layout_center(drains: &[Drain]) -> Vec2 {
        let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) = (
            drains.iter().map(|d| d.left_x).min(),
            drains.iter().map(|d| d.right_x).max(),
            drains.iter().map(|d| d.height).min(),
            drains.iter().map(|d| d.height).max(),
        ) else {
            return Vec2::ZERO;
        };
        Vec2::new(
            min_x as f32 + max_x as f32,
            min_y as f32 + max_y as f32,
        ) * 0.5
    }

    /// Converts a world-space position to screen-space.
    ///
    /// `focus` lands on the center of `rect`; the y-axis is flipped so that
    /// heights grow upwards.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        let d = p - self.focus;
        egui::pos2(
            center.x + d.x * self.zoom + self.pan.x,
            center.y - d.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        self.focus + Vec2::new(x, y)
    }

    fn labeled_drag<T: egui::emath::Numeric>(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut T,
        range: std::ops::RangeInclusive<T>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// A checkbox toggling between a fixed seed and a fresh random one.
    fn seed_editor(ui: &mut egui::Ui, label: &str, seed: &mut Option<u64>) {
        ui.horizontal(|ui| {
            let mut fixed = seed.is_some();
            if ui.checkbox(&mut fixed, label).changed() {
                *seed = if fixed { Some(0) } else { None };
            }
            if let Some(value) = seed {
                ui.add(egui::DragValue::new(value).speed(1.0));
            }
        });
    }

    /// Builds the top panel (layout actions, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🎲 Generate").clicked() {
                    self.generate();
                }

                if ui.button("Demo").clicked() {
                    self.load_layout(DrainSet::demo());
                }

                if ui.button("Solve").clicked() {
                    self.resolve();
                }

                if ui.button("Re-sample rain").clicked() {
                    self.cfg.raindrop_seed = Some(self.rng.random());
                    self.resample_rain();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.5..=40.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("lost past right edge = {:.3}", self.lost));
                ui.label(format!("raindrops = {}", self.raindrops.points.len()));
                ui.label(format!("drains = {}", self.drains.len()));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, status);
                }
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Rain");
                Self::labeled_drag(
                    ui,
                    "water / length:",
                    &mut self.cfg.water_amount_per_unit_of_length,
                    0.01..=100.0,
                    0.05,
                );

                ui.separator();
                ui.label("Generator");
                let generator = &mut self.cfg.generator;
                Self::labeled_drag(ui, "count:", &mut generator.count, 1..=500, 1.0);
                Self::labeled_drag(
                    ui,
                    "max per height:",
                    &mut generator.max_drains_per_height,
                    2..=20,
                    1.0,
                );
                Self::labeled_drag(
                    ui,
                    "wall left x:",
                    &mut generator.wall_left_x,
                    -1000..=1000,
                    1.0,
                );
                Self::labeled_drag(
                    ui,
                    "wall right x:",
                    &mut generator.wall_right_x,
                    -1000..=1000,
                    1.0,
                );
                Self::labeled_drag(
                    ui,
                    "min height:",
                    &mut generator.wall_min_height,
                    -1000..=1000,
                    1.0,
                );
                Self::labeled_drag(
                    ui,
                    "max height:",
                    &mut generator.wall_max_height,
                    -1000..=1000,
                    1.0,
                );
                Self::seed_editor(ui, "seed", &mut generator.seed);

                ui.separator();
                ui.label("Raindrops");
                Self::labeled_drag(
                    ui,
                    "count:",
                    &mut self.cfg.raindrop_count,
                    0..=100_000,
                    100.0,
                );
                Self::seed_editor(ui, "seed", &mut self.cfg.raindrop_seed);

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
            });
    }

    /// Builds the central panel where the wall is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.5, 40.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            painter.rect_filled(rect, 0.0, egui::Color32::WHITE);

            let rain = egui::Stroke::new(0.5, egui::Color32::from_rgba_unmultiplied(0, 0, 255, 77));
            for &p in &self.raindrops.points {
                let a = self.world_to_screen(p, rect);
                painter.line_segment([a, a + egui::vec2(0.0, 3.0)], rain);
            }

            let stream = egui::Stroke::new(1.0, egui::Color32::BLUE);
            let drain = egui::Stroke::new(2.0, egui::Color32::BLACK);
            for d in &self.drains {
                let left = self.world_to_screen(Vec2::new(d.left_x as f32, d.height as f32), rect);
                let right =
                    self.world_to_screen(Vec2::new(d.right_x as f32, d.height as f32), rect);
                painter.line_segment([left, right], drain);

                if d.drain_amount > 0.0 {
                    let landing =
                        self.world_to_screen(Vec2::new(d.right_x as f32, d.to_height as f32), rect);
                    painter.extend(egui::Shape::dashed_line(&[right, landing], stream, 4.0, 3.0));
                }

                painter.text(
                    right + egui::vec2(3.0, 2.0),
                    egui::Align2::LEFT_TOP,
                    format!("{:.3}", d.drain_amount),
                    egui::FontId::proportional(11.0),
                    egui::Color32::DARK_GRAY,
                );
            }
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drain_core::config::GeneratorConfig;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut viewer = Viewer::new();
        viewer.zoom = 2.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let eps = 1e-3;
        for p in [Vec2::new(0.0, 0.0), Vec2::new(10.0, -5.0), Vec2::new(47.5, 91.25)] {
            let screen = viewer.world_to_screen(p, rect);
            let back = viewer.screen_to_world(screen, rect);

            assert!(
                (back.x - p.x).abs() < eps && (back.y - p.y).abs() < eps,
                "roundtrip mismatch: p={:?}, back={:?}",
                p,
                back
            );
        }
    }

    #[test]
    fn layout_center_handles_extreme_coordinates() {
        let max = i32::MAX;
        let drains = [Drain::new(max, max - 1, max), Drain::new(max - 2, max - 4, max - 3)];

        let center = Viewer::layout_center(&drains);

        assert!((center.x - max as f32).abs() < 1e3);
        assert!((center.y - max as f32).abs() < 1e3);
    }

    #[test]
    fn new_shows_the_solved_demo() {
        let viewer = Viewer::new();

        assert_eq!(viewer.drains.len(), 22);
        assert!(viewer.status.is_none());
        assert_eq!(viewer.drains[21].drain_amount, 57.0);
        assert_eq!(viewer.drains[0].to_height, 5);
        assert_eq!(viewer.lost, 26.0);

        // Every remaining raindrop is out of the drains' shelter.
        for p in &viewer.raindrops.points {
            assert!(!viewer.drains.iter().any(|d| {
                p.x >= d.left_x as f32 && p.x <= d.right_x as f32 && p.y <= d.height as f32
            }));
        }
    }

    #[test]
    fn generate_replaces_the_layout() {
        let mut viewer = Viewer::new();
        viewer.cfg.generator = GeneratorConfig {
            count: 8,
            seed: Some(4),
            ..GeneratorConfig::default()
        };

        viewer.generate();

        assert_eq!(viewer.drains.len(), 8);
        assert!(viewer.status.is_none());
    }

    #[test]
    fn failed_generation_keeps_layout_and_reports() {
        let mut viewer = Viewer::new();
        viewer.cfg.generator.max_drains_per_height = 1;

        viewer.generate();

        assert_eq!(viewer.drains.len(), 22);
        assert!(viewer.status.as_deref().unwrap().contains("max_drains_per_height"));
    }

    #[test]
    fn overlapping_layout_is_rejected() {
        let mut viewer = Viewer::new();
        let set = DrainSet::from_drains(vec![Drain::new(50, 20, 40), Drain::new(50, 30, 50)]);

        viewer.load_layout(set);

        assert_eq!(viewer.drains.len(), 22);
        assert_eq!(
            viewer.status.as_deref(),
            Some("the drain at location 1 overlaps the drain at location 0")
        );
    }

    #[test]
    fn resolve_applies_a_new_density() {
        let mut viewer = Viewer::new();
        viewer.cfg.water_amount_per_unit_of_length = 2.0;

        viewer.resolve();

        assert_eq!(viewer.drains[21].drain_amount, 114.0);
        assert_eq!(viewer.lost, 52.0);
    }
}
