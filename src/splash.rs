//! Decorative splash window running as an independent child process
//!
//! The overlay relaunches its own executable with `--splash`; the child puts
//! a small frameless window in the middle of the screen and loops the bundled
//! GIF until the overlay kills it at shutdown. No data flows between the two
//! processes.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use anyhow::{Context, Result, anyhow, bail};
use eframe::NativeOptions;
use tracing::info;

use crate::constants::{paths, window};

/// Launch the splash as a separate process of this same executable.
pub fn spawn_splash() -> Result<Child> {
    let exe_path = std::env::current_exe().context("Failed to resolve executable path")?;
    Command::new(exe_path)
        .arg("--splash")
        .spawn()
        .context("Failed to spawn splash process")
}

/// Splash animation location for a given executable path.
fn gif_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(paths::ASSETS_DIR).join(paths::SPLASH_GIF))
}

/// Child-process entry point: show the animation until killed.
pub fn run_splash() -> Result<()> {
    let exe_path = std::env::current_exe().context("Failed to resolve executable path")?;
    let gif_path = gif_path_from_exe_path(&exe_path)?;
    if !gif_path.exists() {
        bail!("splash animation not found at {}", gif_path.display());
    }
    info!(path = %gif_path.display(), "Showing splash");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window::SPLASH_SIZE)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_title(window::SPLASH_TITLE),
        centered: true,
        ..Default::default()
    };

    let uri = format!("file://{}", gif_path.display());
    eframe::run_native(
        window::SPLASH_TITLE,
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(SplashApp { uri }))
        }),
    )
    .map_err(|err| anyhow!("Failed to launch splash window: {err}"))
}

struct SplashApp {
    uri: String,
}

impl eframe::App for SplashApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(self.uri.clone()).shrink_to_fit());
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif_path_is_assets_dir_next_to_executable() {
        let path = gif_path_from_exe_path(Path::new("/opt/griddy/griddy")).unwrap();
        assert_eq!(path, Path::new("/opt/griddy/assets/griddy.gif"));
    }
}
