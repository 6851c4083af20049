use super::{ViewState, Viewport};
use egui::Vec2;

/// Live drag gesture: the last pointer position, in the same
/// window-global frame every pointer event uses.
pub(crate) struct DragState {
    last: Vec2,
}

impl Viewport {
    /// Enter the dragging sub-state. Ignored unless the viewer is ready.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.state != ViewState::Ready {
            return;
        }
        self.drag = Some(DragState {
            last: Vec2::new(x, y),
        });
    }

    /// Pan by the pointer delta while a drag is active.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let dx = x - drag.last.x;
        let dy = y - drag.last.y;
        drag.last = Vec2::new(x, y);
        if let Err(e) = self.pan_by(dx, dy) {
            log::warn!("pan failed: {e}");
        }
    }

    /// Apply the terminal pointer delta and leave the dragging sub-state.
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        if self.drag.is_some() {
            self.pointer_move(x, y);
            self.drag = None;
        }
    }

    /// End the drag without a terminal position (the pointer left the
    /// window before release).
    pub fn pointer_cancel(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
