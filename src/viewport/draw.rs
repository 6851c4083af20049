use super::Viewport;
use crate::errors::Result;
use crate::filters::Filter;
use crate::surface::SnapshotFormat;

impl Viewport {
    /// Paint the source image at the current offset and scale, then
    /// replay the filter history against the fresh pixels. The base image
    /// is never permanently overwritten by a filtered copy; every frame
    /// derives the filter result from the unfiltered source again.
    pub(crate) fn draw(&mut self) -> Result<()> {
        self.ensure_ready("draw")?;
        self.surface.clear();
        if let Some(source) = self.source.take() {
            self.surface.paint_image(
                &source,
                self.offset.x,
                self.offset.y,
                self.display.width * self.scale,
                self.display.height * self.scale,
            );
            self.source = Some(source);
        }
        self.replay_filter_history();
        self.frame_serial += 1;
        Ok(())
    }

    fn replay_filter_history(&mut self) {
        for i in 0..self.history.len() {
            let filter = self.history.entries()[i];
            self.run_filter(&filter);
        }
    }

    fn run_filter(&mut self, filter: &Filter) {
        let (w, h) = (self.surface.width(), self.surface.height());
        let mut pixels = self.surface.read_pixels(0, 0, w, h);
        filter.apply(&mut pixels);
        self.surface.write_pixels(&pixels, 0, 0, w, h);
    }

    /// Apply a filter to the current frame and record it in the history
    /// so it survives the next erase-and-repaint cycle.
    pub fn apply_filter(&mut self, filter: Filter) -> Result<()> {
        self.ensure_ready("apply_filter")?;
        log::debug!("applying filter {:?}", filter);
        self.run_filter(&filter);
        self.history.push(filter);
        self.frame_serial += 1;
        Ok(())
    }

    /// Apply a filter to the current frame without recording it. The next
    /// erase-and-repaint cycle discards its effect, which makes this
    /// suitable for previews.
    pub fn apply_filter_transient(&mut self, filter: Filter) -> Result<()> {
        self.ensure_ready("apply_filter")?;
        self.run_filter(&filter);
        self.frame_serial += 1;
        Ok(())
    }

    /// String-keyed variant of [`apply_filter`](Self::apply_filter);
    /// unknown names fail before any pixel is touched.
    pub fn apply_filter_by_name(&mut self, name: &str, args: &[f32]) -> Result<()> {
        let filter = Filter::parse(name, args)?;
        self.apply_filter(filter)
    }

    /// Drop the filter history and repaint the pristine frame.
    pub fn reset_filters(&mut self) -> Result<()> {
        self.ensure_ready("reset_filters")?;
        self.history.clear();
        self.draw()
    }

    /// Encoded snapshot of the current surface contents.
    pub fn export_image(&self, format: SnapshotFormat, quality: u8) -> Result<Vec<u8>> {
        self.ensure_ready("export_image")?;
        self.surface.encode_snapshot(format, quality)
    }
}
