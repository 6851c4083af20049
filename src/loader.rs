use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Result of a background decode, delivered to the UI thread through the
/// viewport's channel and drained by `Viewport::poll`.
pub enum LoaderMessage {
    Loaded(PathBuf, RgbaImage),
    Failed(PathBuf, String),
}

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode `path` off the UI thread and report back on `tx`. A dropped
/// receiver just means the viewport was torn down mid-load.
pub fn spawn_load(path: PathBuf, tx: Sender<LoaderMessage>) {
    std::thread::spawn(move || {
        log::debug!("decoding {path:?}");
        match image::open(&path) {
            Ok(img) => {
                let _ = tx.send(LoaderMessage::Loaded(path, img.to_rgba8()));
            }
            Err(e) => {
                let _ = tx.send(LoaderMessage::Failed(path, e.to_string()));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check() {
        assert!(is_supported_image(Path::new("photo.JPG")));
        assert!(is_supported_image(Path::new("a/b/c.webp")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    #[test]
    fn load_failure_is_reported() {
        let (tx, rx) = std::sync::mpsc::channel();
        spawn_load(PathBuf::from("/nonexistent/image.png"), tx);
        match rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap() {
            LoaderMessage::Failed(path, _) => {
                assert_eq!(path, PathBuf::from("/nonexistent/image.png"));
            }
            LoaderMessage::Loaded(..) => panic!("expected a failure"),
        }
    }
}
