mod viewer_panel;
mod zoom_slider;

use crate::config::ViewerConfig;
use crate::filters::{Channel, Filter};
use crate::loader;
use crate::slider::RangeSlider;
use crate::surface::SnapshotFormat;
use crate::viewport::{Size, Viewport};
use egui::TextureHandle;
use std::path::PathBuf;
use std::time::Instant;

const WORKSPACE: Size = Size {
    width: 800.0,
    height: 600.0,
};

const STATUS_TIMEOUT_SECS: u64 = 4;

pub struct ViewerApp {
    pub(crate) viewport: Viewport,
    pub(crate) slider: RangeSlider,
    pub(crate) texture: Option<TextureHandle>,
    pub(crate) uploaded_serial: u64,
    pub(crate) status_message: Option<(String, Instant)>,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);

        let config = ViewerConfig::load();
        let mut app = Self {
            viewport: Viewport::new(config, WORKSPACE)
                .expect("default workspace and configuration are valid"),
            slider: RangeSlider::new(false),
            texture: None,
            uploaded_serial: 0,
            status_message: None,
        };

        // Check command line arguments
        if let Some(arg) = std::env::args().nth(1) {
            let path = PathBuf::from(arg);
            if path.is_file() && loader::is_supported_image(&path) {
                app.viewport.load(path);
            } else {
                log::warn!("not a supported image: {}", path.display());
            }
        }

        app
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                if loader::is_supported_image(&path) {
                    self.viewport.load(path);
                    return;
                }
                self.set_status(format!("unsupported file: {}", path.display()));
            }
        }
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let ready = self.viewport.is_ready();
                ui.add_enabled_ui(ready, |ui| {
                    if ui.button("Grayscale").clicked() {
                        self.run_filter(Filter::Grayscale);
                    }
                    if ui.button("Brighten").clicked() {
                        self.run_filter(Filter::Brightness { delta: 12 });
                    }
                    if ui.button("Darken").clicked() {
                        self.run_filter(Filter::Brightness { delta: -12 });
                    }
                    if ui.button("Warmer").clicked() {
                        self.run_filter(Filter::ChannelOffset {
                            channel: Channel::Red,
                            delta: 16,
                        });
                    }
                    if ui.button("Reset filters").clicked() {
                        if let Err(e) = self.viewport.reset_filters() {
                            self.set_status(e.to_string());
                        }
                    }
                    ui.separator();
                    if ui.button("Export JPEG").clicked() {
                        self.export_snapshot();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some((msg, at)) = &self.status_message {
                        if at.elapsed().as_secs() < STATUS_TIMEOUT_SECS {
                            ui.label(egui::RichText::new(msg).weak());
                        }
                    }
                    if self.viewport.is_ready() {
                        ui.label(format!("{:.0}%", self.viewport.percent_of_original()));
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn run_filter(&mut self, filter: Filter) {
        if let Err(e) = self.viewport.apply_filter(filter) {
            self.set_status(e.to_string());
        }
    }

    fn export_snapshot(&mut self) {
        match self.viewport.export_image(SnapshotFormat::Jpeg, 85) {
            Ok(bytes) => {
                let path = std::env::temp_dir().join("panview-export.jpg");
                match std::fs::write(&path, bytes) {
                    Ok(()) => self.set_status(format!("Exported to {}", path.display())),
                    Err(e) => self.set_status(format!("Export failed: {e}")),
                }
            }
            Err(e) => self.set_status(format!("Export failed: {e}")),
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.viewport.poll() {
            ctx.request_repaint();
        }
        match self.viewport.tick_animation(Instant::now()) {
            Ok(true) => ctx.request_repaint(),
            Ok(false) => {}
            Err(e) => log::warn!("animation tick failed: {e}"),
        }

        self.handle_dropped_files(ctx);
        self.render_toolbar(ctx);
        if self.viewport.config().has_slider {
            self.render_slider_panel(ctx);
        }
        self.render_viewer_panel(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.viewport.config().save() {
            log::warn!("failed to save config: {e}");
        }
        self.viewport.teardown();
    }
}

fn configure_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.window_shadow = egui::epaint::Shadow::NONE;
    style.visuals.popup_shadow = egui::epaint::Shadow::NONE;
    ctx.set_style(style);
}
