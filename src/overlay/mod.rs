//! The screen overlay: ruler ticks, crosshair guides, optional grid
//!
//! A frameless transparent window sized to the monitor, always on top. All
//! marks are painted at the effective opacity derived from the settings; the
//! options dialog floats above at full opacity.

pub mod options;

use std::process::Child;

use anyhow::{Context, Result, anyhow};
use eframe::NativeOptions;
use eframe::egui;
use tracing::{error, info};

use crate::constants;
use crate::ruler;
use crate::settings::{LineColor, OverlaySettings};
use crate::splash;
use crate::store::ConfigStore;

/// Session-only crosshair positions, centered once the screen size is known
struct Guides {
    x: f32,
    y: f32,
}

struct OverlayApp {
    settings: OverlaySettings,
    store: ConfigStore,
    options: options::OptionsState,
    guides: Option<Guides>,
    splash: Option<Child>,
    sized_to_screen: bool,
}

impl OverlayApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let store = ConfigStore::at_default_location()?;
        info!(path = %store.path().display(), "Using config store");

        Ok(Self {
            settings: OverlaySettings::default(),
            store,
            options: options::OptionsState::new(),
            guides: None,
            splash: None,
            sized_to_screen: false,
        })
    }

    fn start_splash(&mut self) {
        if self.splash.is_some() {
            return;
        }
        match splash::spawn_splash() {
            Ok(child) => {
                info!(pid = child.id(), "Started splash process");
                self.splash = Some(child);
            }
            Err(err) => {
                error!(error = ?err, "Failed to start splash process");
            }
        }
    }

    fn stop_splash(&mut self) -> Result<()> {
        if let Some(mut child) = self.splash.take() {
            info!(pid = child.id(), "Stopping splash process");
            let _ = child.kill();
            child.wait().context("Failed to wait for splash exit")?;
        }
        Ok(())
    }

    /// Grow the window to cover the monitor once its size is reported.
    fn size_to_monitor(&mut self, ctx: &egui::Context) {
        if self.sized_to_screen {
            return;
        }
        if let Some(size) = ctx.input(|i| i.viewport().monitor_size) {
            if size.x > 0.0 && size.y > 0.0 {
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::Pos2::ZERO));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
                self.sized_to_screen = true;
                info!(width = size.x, height = size.y, "Sized overlay to monitor");
            }
        }
    }

    fn paint_ruler(&self, ui: &egui::Ui, rect: egui::Rect) {
        let stroke = egui::Stroke::new(
            constants::ruler::TICK_STROKE_WIDTH,
            constants::ui::TICK_COLOR,
        );
        let painter = ui.painter();

        for tick in ruler::edge_ticks(rect.width()) {
            let x = rect.left() + tick.offset;
            painter.line_segment(
                [
                    egui::pos2(x, rect.top()),
                    egui::pos2(x, rect.top() + tick.length),
                ],
                stroke,
            );
        }

        for tick in ruler::edge_ticks(rect.height()) {
            let y = rect.top() + tick.offset;
            painter.line_segment(
                [
                    egui::pos2(rect.left(), y),
                    egui::pos2(rect.left() + tick.length, y),
                ],
                stroke,
            );
        }
    }

    fn paint_grid(&self, ui: &egui::Ui, rect: egui::Rect) {
        let stroke = egui::Stroke::new(
            constants::ruler::GRID_STROKE_WIDTH,
            color32_from(self.settings.line_color),
        );
        let painter = ui.painter();

        for offset in ruler::grid_offsets(rect.width(), self.settings.grid_size) {
            painter.vline(rect.left() + offset, rect.y_range(), stroke);
        }
        for offset in ruler::grid_offsets(rect.height(), self.settings.grid_size) {
            painter.hline(rect.x_range(), rect.top() + offset, stroke);
        }
    }

    /// Hit-test, drag, and paint the two crosshair guide lines.
    fn drag_guides(&mut self, ui: &egui::Ui, rect: egui::Rect) {
        let guides = self.guides.get_or_insert_with(|| Guides {
            x: rect.center().x,
            y: rect.center().y,
        });
        let grab = constants::ruler::GUIDE_GRAB_DISTANCE;

        let vertical_rect = egui::Rect::from_min_max(
            egui::pos2(guides.x - grab, rect.top()),
            egui::pos2(guides.x + grab, rect.bottom()),
        );
        let vertical = ui
            .interact(
                vertical_rect,
                ui.id().with("guide_vertical"),
                egui::Sense::drag(),
            )
            .on_hover_cursor(egui::CursorIcon::ResizeHorizontal);
        if vertical.dragged() {
            guides.x = (guides.x + vertical.drag_delta().x).clamp(rect.left(), rect.right());
        }

        let horizontal_rect = egui::Rect::from_min_max(
            egui::pos2(rect.left(), guides.y - grab),
            egui::pos2(rect.right(), guides.y + grab),
        );
        let horizontal = ui
            .interact(
                horizontal_rect,
                ui.id().with("guide_horizontal"),
                egui::Sense::drag(),
            )
            .on_hover_cursor(egui::CursorIcon::ResizeVertical);
        if horizontal.dragged() {
            guides.y = (guides.y + horizontal.drag_delta().y).clamp(rect.top(), rect.bottom());
        }

        let stroke = egui::Stroke::new(
            constants::ruler::GUIDE_STROKE_WIDTH,
            color32_from(self.settings.line_color),
        );
        let painter = ui.painter();
        painter.vline(guides.x, rect.y_range(), stroke);
        painter.hline(rect.x_range(), guides.y, stroke);
    }

    fn control_strip(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;
        egui::Area::new(egui::Id::new("control_strip"))
            .anchor(
                egui::Align2::RIGHT_BOTTOM,
                egui::vec2(
                    -constants::ui::STRIP_MARGIN,
                    -constants::ui::STRIP_MARGIN,
                ),
            )
            .show(ctx, |ui| {
                ui.set_opacity(self.settings.effective_opacity());
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("Options").clicked() {
                            self.options.toggle();
                        }

                        let mut color = color32_from(self.settings.line_color);
                        if ui.color_edit_button_srgba(&mut color).changed() {
                            changed |= self.settings.set_line_color(line_color_from(color));
                        }

                        if ui.button("Exit").clicked() {
                            info!("Exit requested from overlay");
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
        changed
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.size_to_monitor(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.set_opacity(self.settings.effective_opacity());
                let rect = ui.max_rect();

                let background =
                    ui.interact(rect, ui.id().with("overlay_bg"), egui::Sense::drag());
                if background.drag_started() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                self.paint_ruler(ui, rect);
                if self.settings.grid_enabled {
                    self.paint_grid(ui, rect);
                }
                self.drag_guides(ui, rect);
            });

        let mut changed = self.control_strip(ctx);
        changed |= options::ui(ctx, &mut self.settings, &self.store, &mut self.options);

        if changed {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.stop_splash() {
            error!(error = ?err, "Failed to stop splash during shutdown");
        }
        info!("Overlay exiting");
    }
}

/// Run the overlay window until the user exits.
pub fn run_overlay() -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(constants::window::OVERLAY_FALLBACK_SIZE)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_title(constants::window::OVERLAY_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        constants::window::OVERLAY_TITLE,
        options,
        Box::new(|cc| {
            let mut app = OverlayApp::new(cc)?;
            app.start_splash();
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!("Failed to launch overlay: {err}"))
}

/// Stored color as an egui color for painting and the quick picker
fn color32_from(color: LineColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Picker color back to the stored form
fn line_color_from(color: egui::Color32) -> LineColor {
    LineColor::rgba(color.r(), color.g(), color.b(), color.a())
}
