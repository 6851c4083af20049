use super::ViewerApp;
use crate::viewport::ViewState;
use egui::{Color32, CornerRadius, Rect, Sense, Stroke, StrokeKind, TextureOptions};

impl ViewerApp {
    pub(crate) fn render_viewer_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::from_rgb(18, 18, 20)))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let response = ui.allocate_response(available, Sense::click_and_drag());
                let ws = self.viewport.workspace();
                let ws_rect = Rect::from_center_size(
                    response.rect.center(),
                    egui::Vec2::new(ws.width, ws.height),
                );

                self.handle_viewer_input(&response, ui);
                self.sync_texture(ctx);

                ui.painter().rect_stroke(
                    ws_rect,
                    CornerRadius::same(2),
                    Stroke::new(1.0, Color32::from_gray(60)),
                    StrokeKind::Outside,
                );

                match self.viewport.state() {
                    ViewState::Ready => {
                        if let Some(tex) = &self.texture {
                            ui.painter().image(
                                tex.id(),
                                ws_rect,
                                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                                Color32::WHITE,
                            );
                        }
                    }
                    ViewState::Loading => {
                        let time = ui.input(|i| i.time);
                        let spinner = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
                        let idx = ((time * 10.0) as usize) % spinner.len();
                        ui.painter().text(
                            ws_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("{} Loading image...", spinner[idx]),
                            egui::FontId::proportional(16.0),
                            Color32::from_rgb(200, 200, 200),
                        );
                        ui.ctx().request_repaint();
                    }
                    ViewState::Unloaded => {
                        if let Some(error) = self.viewport.load_error() {
                            ui.painter().text(
                                ws_rect.center(),
                                egui::Align2::CENTER_CENTER,
                                format!("Error: {error}"),
                                egui::FontId::proportional(16.0),
                                Color32::from_rgb(255, 100, 100),
                            );
                        } else {
                            ui.painter().text(
                                ws_rect.center(),
                                egui::Align2::CENTER_CENTER,
                                "Drop an image here\nor pass a path on the command line",
                                egui::FontId::proportional(18.0),
                                Color32::from_rgb(150, 150, 150),
                            );
                        }
                    }
                }
            });
    }

    fn handle_viewer_input(&mut self, response: &egui::Response, ui: &egui::Ui) {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.viewport.pointer_down(pos.x, pos.y);
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.viewport.pointer_move(pos.x, pos.y);
            }
        }
        if response.drag_stopped() {
            let pos = response
                .interact_pointer_pos()
                .or_else(|| ui.input(|i| i.pointer.latest_pos()));
            match pos {
                Some(pos) => self.viewport.pointer_up(pos.x, pos.y),
                None => self.viewport.pointer_cancel(),
            }
        }

        // Double-click bounces between the scale extremes with an eased
        // transition toward the centered position.
        if response.double_clicked() {
            self.toggle_animated_zoom();
        }
    }

    fn toggle_animated_zoom(&mut self) {
        if !self.viewport.is_ready() {
            return;
        }
        let config = self.viewport.config();
        let midpoint = (config.min_scale + config.max_scale) * 0.5;
        let target = if self.viewport.scale() < midpoint {
            config.max_scale
        } else {
            config.min_scale
        };
        let easing = config.easing;
        let display = self.viewport.display_size();
        let tx = display.width * (1.0 - target) * 0.5;
        let ty = display.height * (1.0 - target) * 0.5;
        if let Err(e) = self.viewport.animate_to(target, tx, ty, easing) {
            self.set_status(e.to_string());
        }
    }

    /// Re-upload the surface pixels whenever the viewport painted a new
    /// frame.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        if self.viewport.state() != ViewState::Ready {
            return;
        }
        if self.texture.is_some() && self.uploaded_serial == self.viewport.frame_serial() {
            return;
        }
        let surface = self.viewport.surface();
        let (w, h) = (surface.width(), surface.height());
        let pixels = surface.read_pixels(0, 0, w, h);
        let img = egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels);
        match &mut self.texture {
            Some(tex) => tex.set(img, TextureOptions::LINEAR),
            None => self.texture = Some(ctx.load_texture("workspace", img, TextureOptions::LINEAR)),
        }
        self.uploaded_serial = self.viewport.frame_serial();
    }
}
