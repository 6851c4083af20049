use crate::easing::Easing;
use crate::errors::{Result, ViewerError};
use serde::{Deserialize, Serialize};

/// Viewer configuration. Every recognized option is enumerated here and
/// defaulted; the struct is validated once at construction and treated as
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Lower bound of the zoom scale; also the initial scale.
    pub min_scale: f32,
    /// Upper bound of the zoom scale.
    pub max_scale: f32,
    /// Whether panning stays enabled when the scaled image is smaller than
    /// the workspace. When false the image is re-centered instead.
    pub drag_small: bool,
    /// Whether the viewer shows the zoom slider.
    pub has_slider: bool,
    /// Curve used by animated transitions.
    pub easing: Easing,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.7,
            max_scale: 1.5,
            drag_small: false,
            has_slider: true,
            easing: Easing::OutCubic,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(ViewerError::InvalidConfig {
                message: format!("min_scale must be positive, got {}", self.min_scale),
            });
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(ViewerError::InvalidConfig {
                message: format!(
                    "max_scale must be >= min_scale ({} < {})",
                    self.max_scale, self.min_scale
                ),
            });
        }
        Ok(())
    }

    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "panview", "panview")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("ignoring config at {config_path:?}: {e}"),
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ViewerConfig =
            serde_json::from_str(&content).map_err(|e| ViewerError::InvalidConfig {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| ViewerError::InvalidConfig {
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
