// ui.rs - Draws the sparse grid and the controls

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Stroke, Vec2};
use life_engine::PATTERNS;

use crate::app::GameOfLife;
use crate::stats::stat_lines;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.apply_random_pattern();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);

                ui.separator();
                ui.checkbox(&mut self.parallel, "Row tasks");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let columns = (available.x / self.cell_size).floor().max(0.0) as u32;
            let rows = (available.y / self.cell_size).floor().max(0.0) as u32;
            self.resize(columns, rows);

            if self.is_running && self.last_update.elapsed() >= self.update_interval {
                self.update_generation();
                self.last_update = Instant::now();
            }
            self.refresh_stats();

            let (response, painter) = ui.allocate_painter(available, egui::Sense::click());
            let origin = response.rect.min;
            painter.rect_filled(response.rect, 0.0, self.dead_color);

            // Only live cells are stored, so only live cells are drawn
            let cell = Vec2::splat(self.cell_size - 1.0);
            for (row, col, _) in self.sim().grid().iter() {
                let x = origin.x + col as f32 * self.cell_size;
                let y = origin.y + row as f32 * self.cell_size;
                let rect = Rect::from_min_size(egui::pos2(x, y), cell);
                if response.rect.contains_rect(rect) {
                    painter.rect_filled(rect, 1.0, self.live_color);
                }
            }

            // Statistics occupy the reserved rows at the bottom
            let stats_top = origin.y + rows.saturating_sub(self.stats_rows) as f32 * self.cell_size;
            painter.line_segment(
                [egui::pos2(origin.x, stats_top), egui::pos2(response.rect.max.x, stats_top)],
                Stroke::new(0.5, Color32::from_gray(90)),
            );
            let sim = self.sim();
            let lines = stat_lines(sim.generation(), sim.grid().population(), sim.grid().row_count(), self.memory_reading);
            let line_height = (self.cell_size * 0.9).max(8.0);
            for (i, line) in lines.iter().enumerate().take(self.stats_rows as usize) {
                painter.text(
                    egui::pos2(origin.x + 4.0, stats_top + 2.0 + i as f32 * line_height),
                    Align2::LEFT_TOP,
                    line,
                    FontId::monospace(line_height * 0.9),
                    Color32::LIGHT_GRAY,
                );
            }

            // Toggle cells only while paused
            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let col = ((pos.x - origin.x) / self.cell_size).floor() as i64;
                    let row = ((pos.y - origin.y) / self.cell_size).floor() as i64;
                    self.toggle_cell(row, col);
                }
            }
        });

        // Keep the timer ticking while running
        if self.is_running {
            ctx.request_repaint_after(self.update_interval);
        }
    }
}
