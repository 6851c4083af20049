use crate::errors::{Result, ViewerError};

/// A one-dimensional slider mapping a pointer drag along a track onto a
/// 0–100 percentage.
///
/// The slider knows nothing about what its value drives; interested
/// parties register change subscribers. Pointer coordinates are expected
/// in the same window-global frame as the track geometry handed to
/// `set_track`.
pub struct RangeSlider {
    vertical: bool,
    /// Coordinate of the empty end of the track: the left edge for a
    /// horizontal slider, the bottom edge for a vertical one (fill grows
    /// bottom-up, so top = 100%).
    track_start: f32,
    extent: f32,
    /// Committed value, always within [0, 100].
    percent: f32,
    /// Raw fill used for rendering; may briefly overshoot 100 while a drag
    /// runs past the end of the track.
    fill: f32,
    sliding: bool,
    subscribers: Vec<Box<dyn FnMut(f32)>>,
}

impl RangeSlider {
    pub fn new(vertical: bool) -> Self {
        Self {
            vertical,
            track_start: 0.0,
            extent: 0.0,
            percent: 0.0,
            fill: 0.0,
            sliding: false,
            subscribers: Vec::new(),
        }
    }

    /// Size probe: record the track geometry. `origin` is the track's
    /// top-left coordinate along the slider axis, `extent` its length in
    /// pixels. Call whenever layout may have changed.
    pub fn set_track(&mut self, origin: f32, extent: f32) -> Result<()> {
        if extent <= 0.0 || !extent.is_finite() {
            return Err(ViewerError::InvalidConfig {
                message: format!("slider track extent must be positive, got {extent}"),
            });
        }
        self.track_start = if self.vertical { origin + extent } else { origin };
        self.extent = extent;
        Ok(())
    }

    pub fn subscribe(&mut self, f: impl FnMut(f32) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn notify(&mut self, value: f32) {
        let mut subs = std::mem::take(&mut self.subscribers);
        for f in subs.iter_mut() {
            f(value);
        }
        subs.append(&mut self.subscribers);
        self.subscribers = subs;
    }

    pub fn value(&self) -> f32 {
        self.percent
    }

    /// Percentage the fill bar should render at. Unlike `value`, this may
    /// exceed 100 during a drag.
    pub fn fill_percent(&self) -> f32 {
        self.fill
    }

    pub fn is_sliding(&self) -> bool {
        self.sliding
    }

    /// Plain mutator: clamps into [0, 100], updates the fill, and fires
    /// the change subscribers unless suppressed.
    pub fn set_value(&mut self, value: f32, fire: bool) {
        self.percent = value.clamp(0.0, 100.0);
        self.fill = self.percent;
        if fire {
            let v = self.percent;
            self.notify(v);
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.sliding = true;
        self.set_from_pointer(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.sliding {
            self.set_from_pointer(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        self.sliding = false;
    }

    fn set_from_pointer(&mut self, x: f32, y: f32) {
        let coord = if self.vertical { y } else { x };
        let raw = self.offset_to_percent(coord);
        self.fill = raw;
        self.percent = raw.clamp(0.0, 100.0);
        let v = self.percent;
        self.notify(v);
    }

    fn offset_to_percent(&self, coord: f32) -> f32 {
        if self.extent <= 0.0 {
            return 0.0;
        }
        let raw = (coord - self.track_start) / (self.extent / 100.0);
        if self.vertical {
            // Pointer above the bottom edge is negative; flip the sign so
            // the top of the track reads 100.
            if raw <= 0.0 {
                raw.abs()
            } else {
                0.0
            }
        } else if raw >= 0.0 {
            raw
        } else {
            0.0
        }
    }
}
