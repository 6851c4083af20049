use super::{Axis, Size, Viewport};
use crate::errors::Result;

impl Viewport {
    /// Recompute the fitted display size: shrink to the workspace only if
    /// the image exceeds it on either axis, preserving the aspect ratio,
    /// and never upscale. This is the unscaled reference size `scale`
    /// applies to.
    pub(crate) fn resize_to_fit(&mut self) {
        let Some(original) = self.original else {
            return;
        };

        let wider = original.width > self.workspace.width;
        let taller = original.height > self.workspace.height;

        self.display = if !wider && !taller {
            original
        } else {
            let ratio = original.width / original.height;
            let mut width = if wider {
                self.workspace.width
            } else {
                original.width
            };
            let mut height = if taller {
                self.workspace.height
            } else {
                original.height
            };
            if width > height {
                height = width / ratio;
            } else {
                width = height * ratio;
            }
            Size::new(width, height)
        };

        self.percent_of_original = self.workspace.width * self.scale / original.width * 100.0;
    }

    /// Change the zoom scale, keeping the point at the workspace center
    /// stationary unless an explicit target offset overrides the
    /// recentring. No-ops when the scale is unchanged and no target is
    /// supplied.
    pub fn zoom_to(
        &mut self,
        new_scale: f32,
        target_x: Option<f32>,
        target_y: Option<f32>,
    ) -> Result<()> {
        self.ensure_ready("zoom_to")?;

        let new_scale = new_scale.clamp(self.config.min_scale, self.config.max_scale);
        if new_scale == self.scale && target_x.is_none() && target_y.is_none() {
            return Ok(());
        }

        self.prev_scale = self.scale;
        self.scale = new_scale;
        self.resize_to_fit();
        self.recenter_axis(Axis::X);
        self.recenter_axis(Axis::Y);
        if let Some(x) = target_x {
            self.offset.x = x;
        }
        if let Some(y) = target_y {
            self.offset.y = y;
        }
        self.surface.clear();
        self.clamp(None, None);
        self.draw()
    }

    /// Zoom-about-point rule: scale the offset's distance from the
    /// workspace center by the ratio of the new and previous scale, so
    /// whatever was at the center stays there.
    fn recenter_axis(&mut self, axis: Axis) {
        let center = self.workspace.axis(axis) * 0.5;
        let relative =
            (self.offset_axis(axis) - center) / (self.workspace.axis(axis) * self.prev_scale / 2.0);
        let value = self.workspace.axis(axis) * self.scale * relative / 2.0 + center;
        self.set_offset_axis(axis, value);
    }

    /// Pan by a pointer delta. On each axis where the scaled image fits
    /// inside the workspace and `drag_small` is off, the image snaps back
    /// to its centered position instead of moving.
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> Result<()> {
        self.ensure_ready("pan_by")?;
        self.resize_to_fit();
        self.offset.x += dx;
        self.offset.y += dy;
        if !self.config.drag_small {
            for axis in [Axis::X, Axis::Y] {
                if self.display.axis(axis) * self.scale < self.workspace.axis(axis) {
                    let centered = self.centered_axis(axis);
                    self.set_offset_axis(axis, centered);
                }
            }
        }
        self.clamp(None, None);
        self.draw()
    }

    /// Saturate the offset into its valid band on both axes.
    pub fn clamp(&mut self, x: Option<f32>, y: Option<f32>) {
        self.offset.x = self.clamp_axis(Axis::X, x);
        self.offset.y = self.clamp_axis(Axis::Y, y);
    }

    /// Valid offset band for one axis: `[0, ws - img]` when the scaled
    /// image fits inside the workspace (it may float anywhere fully
    /// inside), `[ws - img, 0]` when it overflows (either edge may align
    /// with the workspace edge but blank space is never revealed).
    pub fn clamp_axis(&self, axis: Axis, value: Option<f32>) -> f32 {
        self.clamp_axis_at(axis, value.unwrap_or_else(|| self.offset_axis(axis)), self.scale)
    }

    pub(crate) fn clamp_axis_at(&self, axis: Axis, value: f32, scale: f32) -> f32 {
        let img = self.display.axis(axis) * scale;
        let ws = self.workspace.axis(axis);
        let (min, max) = if img < ws { (0.0, ws - img) } else { (ws - img, 0.0) };
        value.clamp(min, max)
    }

    /// Centered offset for the current scale, saturated into the valid
    /// band. Used for the initial placement and the drag-small snap-back.
    pub(crate) fn centered_axis(&self, axis: Axis) -> f32 {
        let centered = self.display.axis(axis) * (1.0 - self.scale) * 0.5;
        self.clamp_axis_at(axis, centered, self.scale)
    }

    /// Slider-to-zoom binding: map a 0–100 percentage onto the configured
    /// scale range, zoom, and notify the scale subscribers.
    pub fn set_zoom_percent(&mut self, percent: f32) -> Result<()> {
        self.ensure_ready("set_zoom_percent")?;
        let percent = percent.clamp(0.0, 100.0);
        let range = self.config.max_scale - self.config.min_scale;
        self.zoom_to(self.config.min_scale + range * percent / 100.0, None, None)?;
        self.notify_scale(percent);
        Ok(())
    }

    /// Inverse of the slider binding: the current scale as a percentage
    /// of the configured range.
    pub fn zoom_percent(&self) -> f32 {
        let range = self.config.max_scale - self.config.min_scale;
        if range <= 0.0 {
            return 0.0;
        }
        ((self.scale - self.config.min_scale) / range * 100.0).clamp(0.0, 100.0)
    }

    pub(crate) fn offset_axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.offset.x,
            Axis::Y => self.offset.y,
        }
    }

    pub(crate) fn set_offset_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.offset.x = value,
            Axis::Y => self.offset.y = value,
        }
    }
}
