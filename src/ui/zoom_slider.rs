use super::ViewerApp;
use egui::{Color32, CornerRadius, Rect, Sense, Vec2};

const TRACK_SIZE: Vec2 = Vec2::new(240.0, 14.0);

impl ViewerApp {
    pub(crate) fn render_slider_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("zoom_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Zoom");

                let (rect, response) = ui.allocate_exact_size(TRACK_SIZE, Sense::click_and_drag());

                // Keep the fill in step with zoom changes that didn't come
                // from the slider (animations, double-click).
                if !self.slider.is_sliding() {
                    self.slider.set_value(self.viewport.zoom_percent(), false);
                }
                if let Err(e) = self.slider.set_track(rect.left(), rect.width()) {
                    log::warn!("slider probe failed: {e}");
                    return;
                }

                let mut fired = false;
                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.slider.pointer_down(pos.x, pos.y);
                        self.slider.pointer_up();
                        fired = true;
                    }
                } else {
                    if response.drag_started() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            self.slider.pointer_down(pos.x, pos.y);
                            fired = true;
                        }
                    } else if response.dragged() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            self.slider.pointer_move(pos.x, pos.y);
                            fired = true;
                        }
                    }
                    if response.drag_stopped() {
                        self.slider.pointer_up();
                    }
                }

                if fired {
                    if let Err(e) = self.viewport.set_zoom_percent(self.slider.value()) {
                        self.set_status(e.to_string());
                    }
                }

                self.paint_track(ui, rect);
                ui.label(format!("{:.0}%", self.slider.value()));
            });
            ui.add_space(6.0);
        });
    }

    fn paint_track(&self, ui: &egui::Ui, rect: Rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, CornerRadius::same(7), Color32::from_gray(50));

        // The raw fill may overshoot 100 for a frame while a drag runs
        // past the end of the track.
        let fill_w = rect.width() * self.slider.fill_percent() / 100.0;
        if fill_w > 0.0 {
            let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill_w, rect.height()));
            painter.rect_filled(fill_rect, CornerRadius::same(7), Color32::from_rgb(70, 130, 255));
        }

        let knob_x = rect.left() + (rect.width() * self.slider.value() / 100.0);
        painter.circle_filled(
            egui::pos2(knob_x, rect.center().y),
            rect.height() * 0.5 + 2.0,
            Color32::from_gray(230),
        );
    }
}
