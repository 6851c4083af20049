use super::{Axis, Viewport};
use crate::easing::Easing;
use crate::errors::Result;
use std::time::{Duration, Instant};

/// Minimum wall-clock time between animation steps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// Travel time per pixel of offset distance.
const TIME_PER_PIXEL_MS: f32 = 4.0;
/// Travel time per unit of scale distance. One scale unit moves the whole
/// image, so it gets a much larger budget than a single pixel.
const TIME_PER_SCALE_UNIT_MS: f32 = 1600.0;

/// One eased transition toward a target scale/offset.
///
/// The sequence number ties ticks to the animation that scheduled them:
/// starting a new animation or tearing the viewport down replaces/clears
/// the slot, so a superseded sequence can never advance state again.
pub(crate) struct Animation {
    seq: u64,
    start_x: f32,
    start_y: f32,
    start_scale: f32,
    dist_x: f32,
    dist_y: f32,
    dist_scale: f32,
    step: u32,
    total_steps: u32,
    easing: Easing,
    last_tick: Instant,
}

impl Viewport {
    /// Begin an eased transition to the given scale and offset. Targets
    /// are clamped against the destination scale, and the duration is
    /// proportional to the largest of the three distances so that x, y,
    /// and scale all finish together. Any in-flight animation is
    /// superseded.
    pub fn animate_to(
        &mut self,
        target_scale: f32,
        target_x: f32,
        target_y: f32,
        easing: Easing,
    ) -> Result<()> {
        self.ensure_ready("animate_to")?;

        let target_scale = target_scale.clamp(self.config.min_scale, self.config.max_scale);
        let target_x = self.clamp_axis_at(Axis::X, target_x, target_scale);
        let target_y = self.clamp_axis_at(Axis::Y, target_y, target_scale);

        let dist_x = target_x - self.offset.x;
        let dist_y = target_y - self.offset.y;
        let dist_scale = target_scale - self.scale;

        let time_ms = (dist_x.abs() * TIME_PER_PIXEL_MS)
            .max(dist_y.abs() * TIME_PER_PIXEL_MS)
            .max(dist_scale.abs() * TIME_PER_SCALE_UNIT_MS);
        let total_steps = (time_ms / FRAME_INTERVAL.as_millis() as f32).ceil() as u32;

        self.animation_seq += 1;
        if total_steps == 0 {
            self.animation = None;
            return self.zoom_to(target_scale, Some(target_x), Some(target_y));
        }

        log::debug!(
            "animation #{}: {} steps toward scale {target_scale}, offset ({target_x}, {target_y})",
            self.animation_seq,
            total_steps
        );
        self.animation = Some(Animation {
            seq: self.animation_seq,
            start_x: self.offset.x,
            start_y: self.offset.y,
            start_scale: self.scale,
            dist_x,
            dist_y,
            dist_scale,
            step: 0,
            total_steps,
            easing,
            last_tick: Instant::now(),
        });
        Ok(())
    }

    /// Advance the in-flight animation, if one exists and at least one
    /// frame interval has elapsed since the previous step. Returns true
    /// while a sequence is still running, so the caller knows to schedule
    /// another tick; each call either performs one step or declines.
    pub fn tick_animation(&mut self, now: Instant) -> Result<bool> {
        let Some(anim) = self.animation.as_mut() else {
            return Ok(false);
        };
        if now.duration_since(anim.last_tick) < FRAME_INTERVAL {
            return Ok(true);
        }

        anim.step += 1;
        anim.last_tick = now;
        let t = anim.step as f32;
        let d = anim.total_steps as f32;
        let x = anim.easing.apply(t, anim.start_x, anim.dist_x, d);
        let y = anim.easing.apply(t, anim.start_y, anim.dist_y, d);
        let scale = anim.easing.apply(t, anim.start_scale, anim.dist_scale, d);
        let seq = anim.seq;
        let finished = anim.step >= anim.total_steps;

        self.zoom_to(scale, Some(x), Some(y))?;

        // zoom_to may run observers; only clear the slot if this sequence
        // is still the live one.
        if finished && self.animation.as_ref().map(|a| a.seq) == Some(seq) {
            self.animation = None;
        }
        Ok(!finished)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}
