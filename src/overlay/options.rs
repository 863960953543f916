use eframe::egui;
use tracing::{error, info};

use crate::constants::ui::{ITEM_SPACING, SECTION_SPACING, STATUS_ERROR, STATUS_SUCCESS};
use crate::settings::{LineColor, OverlaySettings};
use crate::store::ConfigStore;

/// Feedback line shown under the dialog buttons
struct StatusMessage {
    text: String,
    color: egui::Color32,
}

/// State the options dialog keeps across frames
pub struct OptionsState {
    open: bool,
    status_message: Option<StatusMessage>,
}

impl OptionsState {
    pub fn new() -> Self {
        Self {
            open: false,
            status_message: None,
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.status_message = None;
    }

    fn report(&mut self, text: String, color: egui::Color32) {
        self.status_message = Some(StatusMessage { text, color });
    }
}

impl Default for OptionsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw the options dialog. Returns true if any setting changed this frame.
pub fn ui(
    ctx: &egui::Context,
    settings: &mut OverlaySettings,
    store: &ConfigStore,
    state: &mut OptionsState,
) -> bool {
    if !state.open {
        return false;
    }

    let mut changed = false;
    let mut open = state.open;

    egui::Window::new("Options")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.group(|ui| {
                ui.label(egui::RichText::new("Overlay").strong());
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    ui.label("Opacity:");
                    let mut percent = settings.opacity_percent;
                    if ui
                        .add(egui::Slider::new(&mut percent, 0..=100).suffix("%"))
                        .changed()
                    {
                        changed |= settings.set_opacity(percent);
                    }
                });
            });

            ui.add_space(SECTION_SPACING);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Grid").strong());
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    ui.label("Grid:");
                    let mut enabled = settings.grid_enabled;
                    if ui.checkbox(&mut enabled, "Enabled").changed() {
                        changed |= settings.set_grid_enabled(enabled);
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Grid Size:");
                    let mut size = settings.grid_size;
                    if ui
                        .add(egui::DragValue::new(&mut size).range(10..=200).suffix(" px"))
                        .changed()
                    {
                        changed |= settings.set_grid_size(size);
                    }
                });
            });

            ui.add_space(SECTION_SPACING);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Guides").strong());
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    ui.label("Line Color:");
                    let mut color = color32_from(settings.line_color);
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        changed |= settings.set_line_color(line_color_from(color));
                    }
                });
            });

            ui.add_space(SECTION_SPACING);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    match store.save(settings) {
                        Ok(()) => {
                            info!("Settings saved");
                            state.report("Settings saved".to_string(), STATUS_SUCCESS);
                        }
                        Err(err) => {
                            error!(error = %err, "Failed to save settings");
                            state.report(format!("Save failed: {err}"), STATUS_ERROR);
                        }
                    }
                }

                if ui.button("Load").clicked() {
                    match store.load() {
                        Ok(loaded) => {
                            changed |= settings.replace(loaded);
                            info!("Settings loaded");
                            state.report("Settings loaded".to_string(), STATUS_SUCCESS);
                        }
                        Err(err) => {
                            error!(error = %err, "Failed to load settings");
                            state.report(format!("Load failed: {err}"), STATUS_ERROR);
                        }
                    }
                }

                if ui.button("Reset").clicked() {
                    match store.reset() {
                        Ok(defaults) => {
                            changed |= settings.replace(defaults);
                            info!("Settings reset to defaults");
                            state.report("Settings reset to defaults".to_string(), STATUS_SUCCESS);
                        }
                        Err(err) => {
                            error!(error = %err, "Failed to reset settings");
                            state.report(format!("Reset failed: {err}"), STATUS_ERROR);
                        }
                    }
                }
            });

            if let Some(message) = &state.status_message {
                ui.add_space(ITEM_SPACING);
                ui.colored_label(message.color, message.text.as_str());
            }
        });

    state.open = open;
    changed
}

/// Stored color as an egui color for the picker
fn color32_from(color: LineColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Picker color back to the stored form
fn line_color_from(color: egui::Color32) -> LineColor {
    LineColor::rgba(color.r(), color.g(), color.b(), color.a())
}
