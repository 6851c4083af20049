mod config;
mod easing;
mod errors;
mod filters;
mod loader;
mod logging;
mod slider;
mod surface;
#[cfg(test)]
mod tests;
mod ui;
mod viewport;

use ui::ViewerApp;

fn main() -> eframe::Result<()> {
    logging::init(std::env::var_os("PANVIEW_DEBUG").is_some());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([860.0, 700.0])
            .with_icon(load_icon())
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "panview",
        native_options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc)))),
    )
}

fn load_icon() -> egui::IconData {
    // Simple programmatic icon: a magnifier-style ring on a dark disc
    let size = 64usize;
    let mut rgba = vec![0u8; size * size * 4];
    let center = size as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < center - 2.0 {
                let ring = (dist - center * 0.55).abs() < 3.0;
                if ring {
                    rgba[idx] = 235;
                    rgba[idx + 1] = 235;
                    rgba[idx + 2] = 245;
                } else {
                    let t = dist / center;
                    rgba[idx] = (30.0 + 40.0 * t) as u8;
                    rgba[idx + 1] = (60.0 + 70.0 * t) as u8;
                    rgba[idx + 2] = (120.0 + 100.0 * t) as u8;
                }
                rgba[idx + 3] = 255;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}
