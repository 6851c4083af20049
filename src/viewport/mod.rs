mod animation;
mod draw;
mod input;
mod zoom;

use crate::config::ViewerConfig;
use crate::errors::{Result, ViewerError};
use crate::filters::FilterHistory;
use crate::loader::{self, LoaderMessage};
use crate::surface::{PixmapSurface, RenderSurface};
use egui::Vec2;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

pub use animation::FRAME_INTERVAL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unloaded,
    Loading,
    Ready,
}

/// The viewport transform engine.
///
/// Owns the scale/offset/workspace/original-size state, the rendering
/// surface it paints into, the filter history replayed on every redraw,
/// and the in-flight animation, if any. All mutation happens on the UI
/// thread; the only background work is image decoding, which reports back
/// through a channel drained by [`Viewport::poll`].
pub struct Viewport {
    pub(crate) config: ViewerConfig,
    pub(crate) workspace: Size,
    pub(crate) surface: Box<dyn RenderSurface>,
    pub(crate) source: Option<RgbaImage>,
    pub(crate) original: Option<Size>,
    pub(crate) display: Size,
    pub(crate) scale: f32,
    pub(crate) prev_scale: f32,
    pub(crate) offset: Vec2,
    pub(crate) percent_of_original: f32,
    pub(crate) state: ViewState,
    pub(crate) load_error: Option<String>,
    pub(crate) drag: Option<input::DragState>,
    pub(crate) animation: Option<animation::Animation>,
    pub(crate) animation_seq: u64,
    pub(crate) frame_serial: u64,
    pub(crate) history: FilterHistory,
    loader_tx: Sender<LoaderMessage>,
    loader_rx: Receiver<LoaderMessage>,
    on_ready: Vec<Box<dyn FnMut()>>,
    on_scale: Vec<Box<dyn FnMut(f32)>>,
    on_load_error: Vec<Box<dyn FnMut(&ViewerError)>>,
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("workspace", &self.workspace)
            .field("display", &self.display)
            .field("scale", &self.scale)
            .field("offset", &self.offset)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Viewport {
    /// Create a viewport with a CPU pixmap surface sized to `workspace`.
    pub fn new(config: ViewerConfig, workspace: Size) -> Result<Self> {
        let surface = PixmapSurface::new(workspace.width as u32, workspace.height as u32);
        Self::with_surface(config, workspace, Box::new(surface))
    }

    /// Create a viewport painting into a caller-supplied surface.
    pub fn with_surface(
        config: ViewerConfig,
        workspace: Size,
        surface: Box<dyn RenderSurface>,
    ) -> Result<Self> {
        config.validate()?;
        if workspace.width <= 0.0 || workspace.height <= 0.0 {
            return Err(ViewerError::InvalidConfig {
                message: format!(
                    "workspace must have a positive extent, got {}x{}",
                    workspace.width, workspace.height
                ),
            });
        }
        let (loader_tx, loader_rx) = channel();
        Ok(Self {
            scale: config.min_scale,
            prev_scale: config.min_scale,
            config,
            workspace,
            surface,
            source: None,
            original: None,
            display: Size::default(),
            offset: Vec2::ZERO,
            percent_of_original: 0.0,
            state: ViewState::Unloaded,
            load_error: None,
            drag: None,
            animation: None,
            animation_seq: 0,
            frame_serial: 0,
            history: FilterHistory::default(),
            loader_tx,
            loader_rx,
            on_ready: Vec::new(),
            on_scale: Vec::new(),
            on_load_error: Vec::new(),
        })
    }

    /// Start decoding `path` in the background. The viewport transitions
    /// to `Loading`; `poll` finishes the transition once the decode lands.
    pub fn load(&mut self, path: PathBuf) {
        log::info!("loading {}", path.display());
        self.load_error = None;
        self.state = ViewState::Loading;
        loader::spawn_load(path, self.loader_tx.clone());
    }

    /// Drain loader messages on the UI thread. Returns true if anything
    /// changed and the caller should repaint.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.loader_rx.try_recv() {
            changed = true;
            match msg {
                LoaderMessage::Loaded(path, image) => {
                    log::info!(
                        "loaded {} ({}x{})",
                        path.display(),
                        image.width(),
                        image.height()
                    );
                    if let Err(e) = self.set_source(image) {
                        log::error!("failed to present {}: {e}", path.display());
                    }
                }
                LoaderMessage::Failed(path, message) => {
                    self.state = ViewState::Unloaded;
                    let err = ViewerError::LoadFailure { path, message };
                    log::error!("{err}");
                    self.load_error = Some(err.to_string());
                    self.notify_load_error(&err);
                }
            }
        }
        changed
    }

    /// Attach an already-decoded source image and become ready: compute
    /// the fitted display size, center the initial offset, paint the first
    /// frame, and notify the ready subscribers.
    pub fn set_source(&mut self, image: RgbaImage) -> Result<()> {
        self.original = Some(Size::new(image.width() as f32, image.height() as f32));
        self.source = Some(image);
        self.scale = self.config.min_scale;
        self.prev_scale = self.scale;
        self.history.clear();
        self.animation = None;
        self.load_error = None;
        self.state = ViewState::Ready;
        self.resize_to_fit();
        self.offset = if self.scale < 1.0 {
            Vec2::new(
                self.display.width * (1.0 - self.scale) * 0.5,
                self.display.height * (1.0 - self.scale) * 0.5,
            )
        } else {
            Vec2::ZERO
        };
        self.draw()?;
        self.notify_ready();
        Ok(())
    }

    /// Release subscriptions and invalidate any in-flight animation.
    pub fn teardown(&mut self) {
        self.animation = None;
        self.animation_seq += 1;
        self.on_ready.clear();
        self.on_scale.clear();
        self.on_load_error.clear();
        self.drag = None;
    }

    pub fn on_ready(&mut self, f: impl FnMut() + 'static) {
        self.on_ready.push(Box::new(f));
    }

    pub fn on_scale(&mut self, f: impl FnMut(f32) + 'static) {
        self.on_scale.push(Box::new(f));
    }

    pub fn on_load_error(&mut self, f: impl FnMut(&ViewerError) + 'static) {
        self.on_load_error.push(Box::new(f));
    }

    fn notify_ready(&mut self) {
        let mut subs = std::mem::take(&mut self.on_ready);
        for f in subs.iter_mut() {
            f();
        }
        subs.append(&mut self.on_ready);
        self.on_ready = subs;
    }

    pub(crate) fn notify_scale(&mut self, percent: f32) {
        let mut subs = std::mem::take(&mut self.on_scale);
        for f in subs.iter_mut() {
            f(percent);
        }
        subs.append(&mut self.on_scale);
        self.on_scale = subs;
    }

    fn notify_load_error(&mut self, err: &ViewerError) {
        let mut subs = std::mem::take(&mut self.on_load_error);
        for f in subs.iter_mut() {
            f(err);
        }
        subs.append(&mut self.on_load_error);
        self.on_load_error = subs;
    }

    pub(crate) fn ensure_ready(&self, operation: &'static str) -> Result<()> {
        if self.state == ViewState::Ready {
            Ok(())
        } else {
            Err(ViewerError::NotReady { operation })
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ViewState::Ready
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn workspace(&self) -> Size {
        self.workspace
    }

    pub fn display_size(&self) -> Size {
        self.display
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// How large the image is shown relative to its source pixels.
    pub fn percent_of_original(&self) -> f32 {
        self.percent_of_original
    }

    pub fn filter_history(&self) -> &FilterHistory {
        &self.history
    }

    /// Incremented on every draw; lets the UI detect when the surface
    /// pixels changed and need re-uploading.
    pub fn frame_serial(&self) -> u64 {
        self.frame_serial
    }

    pub fn surface(&self) -> &dyn RenderSurface {
        self.surface.as_ref()
    }
}
