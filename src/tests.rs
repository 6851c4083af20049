use crate::config::ViewerConfig;
use crate::easing::Easing;
use crate::filters::Filter;
use crate::surface::SnapshotFormat;
use crate::viewport::{Axis, Size, ViewState, Viewport, FRAME_INTERVAL};
use image::{Rgba, RgbaImage};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn solid_image(width: u32, height: u32, gray: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([gray, gray, gray, 255]))
}

fn ready_viewport(
    image_w: u32,
    image_h: u32,
    workspace: Size,
    config: ViewerConfig,
) -> Viewport {
    let mut viewport = Viewport::new(config, workspace).unwrap();
    viewport.set_source(solid_image(image_w, image_h, 100)).unwrap();
    viewport
}

fn default_workspace() -> Size {
    Size::new(800.0, 600.0)
}

#[test]
fn end_to_end_initial_fit_and_centering() {
    let viewport = ready_viewport(2000, 1000, default_workspace(), ViewerConfig::default());

    assert_eq!(viewport.state(), ViewState::Ready);
    assert!((viewport.scale() - 0.7).abs() < 1e-6);

    // 2000x1000 shrinks to 800x400 (width capped, 2:1 ratio preserved)
    let display = viewport.display_size();
    assert!((display.width - 800.0).abs() < 1e-4);
    assert!((display.height - 400.0).abs() < 1e-4);

    // Centered initial offset for the scaled-down image
    let offset = viewport.offset();
    assert!((offset.x - (800.0 - 800.0 * 0.7) / 2.0).abs() < 1e-4);
    assert!((offset.y - (400.0 - 400.0 * 0.7) / 2.0).abs() < 1e-4);
}

#[test]
fn resize_to_fit_never_upscales_small_images() {
    let viewport = ready_viewport(300, 200, default_workspace(), ViewerConfig::default());
    let display = viewport.display_size();
    assert_eq!(display, Size::new(300.0, 200.0));
}

#[test]
fn resize_to_fit_caps_width_for_wide_images() {
    let viewport = ready_viewport(1600, 400, default_workspace(), ViewerConfig::default());
    let display = viewport.display_size();
    assert!((display.width - 800.0).abs() < 1e-4);
    // Height follows the original 4:1 aspect ratio
    assert!((display.height - 200.0).abs() < 1e-4);
}

#[test]
fn clamp_saturates_into_the_valid_band_on_both_axes() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);

    // At scale 1.2 the scaled image is 960x480: x overflows (band
    // [-160, 0]), y fits (band [0, 120]).
    viewport.zoom_to(1.2, Some(500.0), Some(-500.0)).unwrap();
    assert_eq!(viewport.offset().x, 0.0);
    assert_eq!(viewport.offset().y, 0.0);

    viewport.zoom_to(1.2, Some(-1000.0), Some(1000.0)).unwrap();
    assert!((viewport.offset().x - -160.0).abs() < 1e-3);
    assert!((viewport.offset().y - 120.0).abs() < 1e-3);

    // In-band values pass through untouched
    viewport.zoom_to(1.2, Some(-80.0), Some(60.0)).unwrap();
    assert!((viewport.offset().x - -80.0).abs() < 1e-3);
    assert!((viewport.offset().y - 60.0).abs() < 1e-3);
}

#[test]
fn pan_clamps_at_the_workspace_edges_when_overflowing() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);
    viewport.zoom_to(1.5, None, None).unwrap();

    // Scaled image is 1200x600: x band [-400, 0], y band exactly [0, 0]
    viewport.pan_by(-10000.0, 37.0).unwrap();
    assert!((viewport.offset().x - -400.0).abs() < 1e-3);
    assert_eq!(viewport.offset().y, 0.0);

    viewport.pan_by(20000.0, -5.0).unwrap();
    assert_eq!(viewport.offset().x, 0.0);
    assert_eq!(viewport.offset().y, 0.0);
}

#[test]
fn pan_recenters_fitting_axes_when_drag_small_is_off() {
    // drag_small defaults to off
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), ViewerConfig::default());
    let before = viewport.offset();
    viewport.pan_by(30.0, 40.0).unwrap();
    // Both axes fit at scale 0.7, so the image snaps back to center
    assert!((viewport.offset().x - before.x).abs() < 1e-4);
    assert!((viewport.offset().y - before.y).abs() < 1e-4);
}

#[test]
fn pan_moves_freely_within_the_band_when_drag_small_is_on() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);
    let before = viewport.offset();
    viewport.pan_by(10.0, -20.0).unwrap();
    assert!((viewport.offset().x - (before.x + 10.0)).abs() < 1e-4);
    assert!((viewport.offset().y - (before.y - 20.0)).abs() < 1e-4);
}

#[test]
fn zoom_about_center_keeps_the_anchored_point_stationary() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);
    viewport.zoom_to(1.2, Some(-50.0), Some(60.0)).unwrap();

    // Display-space coordinate currently sitting at the workspace center
    let center_x = 400.0;
    let center_y = 300.0;
    let anchor_x = (center_x - viewport.offset().x) / viewport.scale();
    let anchor_y = (center_y - viewport.offset().y) / viewport.scale();

    viewport.zoom_to(1.4, None, None).unwrap();

    let after_x = (center_x - viewport.offset().x) / viewport.scale();
    let after_y = (center_y - viewport.offset().y) / viewport.scale();
    assert!((anchor_x - after_x).abs() < 1e-2);
    assert!((anchor_y - after_y).abs() < 1e-2);
}

#[test]
fn zoom_to_same_scale_without_target_is_a_no_op() {
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), ViewerConfig::default());
    let serial = viewport.frame_serial();
    viewport.zoom_to(viewport.scale(), None, None).unwrap();
    assert_eq!(viewport.frame_serial(), serial);

    // An explicit target forces work even at the same scale
    viewport.zoom_to(viewport.scale(), Some(0.0), None).unwrap();
    assert_eq!(viewport.frame_serial(), serial + 1);
}

#[test]
fn zoom_scale_is_saturated_into_the_configured_range() {
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), ViewerConfig::default());
    viewport.zoom_to(99.0, None, None).unwrap();
    assert!((viewport.scale() - 1.5).abs() < 1e-6);
    viewport.zoom_to(0.01, None, None).unwrap();
    assert!((viewport.scale() - 0.7).abs() < 1e-6);
}

#[test]
fn operations_before_load_fail_with_not_ready() {
    let mut viewport = Viewport::new(ViewerConfig::default(), default_workspace()).unwrap();

    assert_eq!(
        viewport.zoom_to(1.0, None, None).unwrap_err().error_code(),
        "NOT_READY"
    );
    assert_eq!(
        viewport.pan_by(1.0, 1.0).unwrap_err().error_code(),
        "NOT_READY"
    );
    assert_eq!(
        viewport
            .apply_filter(Filter::Grayscale)
            .unwrap_err()
            .error_code(),
        "NOT_READY"
    );
    assert_eq!(
        viewport
            .animate_to(1.0, 0.0, 0.0, Easing::Linear)
            .unwrap_err()
            .error_code(),
        "NOT_READY"
    );
    assert_eq!(
        viewport.set_zoom_percent(50.0).unwrap_err().error_code(),
        "NOT_READY"
    );
    assert_eq!(
        viewport
            .export_image(SnapshotFormat::Jpeg, 80)
            .unwrap_err()
            .error_code(),
        "NOT_READY"
    );
}

#[test]
fn filter_history_is_replayed_exactly_once_per_redraw() {
    let mut viewport = ready_viewport(64, 64, Size::new(100.0, 80.0), ViewerConfig {
        min_scale: 1.0,
        max_scale: 1.5,
        ..Default::default()
    });

    viewport.apply_filter(Filter::Brightness { delta: 40 }).unwrap();
    let after_apply = viewport.surface().read_pixels(0, 0, 100, 80);

    // Any redraw erases and repaints, then replays the history. If the
    // history double-applied, the brightness would stack to +80.
    viewport.pan_by(0.0, 0.0).unwrap();
    let after_redraw = viewport.surface().read_pixels(0, 0, 100, 80);

    assert_eq!(after_apply, after_redraw);
    assert_eq!(viewport.filter_history().len(), 1);
}

#[test]
fn filters_stack_in_application_order() {
    let mut viewport = ready_viewport(64, 64, Size::new(100.0, 80.0), ViewerConfig {
        min_scale: 1.0,
        max_scale: 1.5,
        ..Default::default()
    });

    viewport.apply_filter(Filter::Brightness { delta: 30 }).unwrap();
    viewport.apply_filter(Filter::Grayscale).unwrap();
    assert_eq!(viewport.filter_history().len(), 2);

    // The source is gray 100; +30 then grayscale keeps 130 on all channels
    let pixels = viewport.surface().read_pixels(0, 0, 64, 64);
    assert_eq!(&pixels[..4], &[130, 130, 130, 255]);

    viewport.reset_filters().unwrap();
    assert!(viewport.filter_history().is_empty());
    let pixels = viewport.surface().read_pixels(0, 0, 64, 64);
    assert_eq!(&pixels[..4], &[100, 100, 100, 255]);
}

#[test]
fn transient_filters_do_not_survive_a_redraw() {
    let mut viewport = ready_viewport(64, 64, Size::new(100.0, 80.0), ViewerConfig {
        min_scale: 1.0,
        max_scale: 1.5,
        ..Default::default()
    });

    viewport
        .apply_filter_transient(Filter::Brightness { delta: 40 })
        .unwrap();
    assert!(viewport.filter_history().is_empty());
    let previewed = viewport.surface().read_pixels(0, 0, 64, 64);
    assert_eq!(&previewed[..4], &[140, 140, 140, 255]);

    viewport.pan_by(0.0, 0.0).unwrap();
    let redrawn = viewport.surface().read_pixels(0, 0, 64, 64);
    assert_eq!(&redrawn[..4], &[100, 100, 100, 255]);
}

#[test]
fn unknown_filter_fails_without_touching_pixels() {
    let mut viewport = ready_viewport(64, 64, Size::new(100.0, 80.0), ViewerConfig {
        min_scale: 1.0,
        max_scale: 1.5,
        ..Default::default()
    });
    let before = viewport.surface().read_pixels(0, 0, 100, 80);

    let err = viewport.apply_filter_by_name("sepia", &[]).unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_FILTER");
    assert_eq!(viewport.surface().read_pixels(0, 0, 100, 80), before);
    assert!(viewport.filter_history().is_empty());
}

#[test]
fn slider_percent_maps_linearly_onto_the_scale_range() {
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), ViewerConfig::default());

    let seen = Rc::new(Cell::new(-1.0f32));
    let sink = seen.clone();
    viewport.on_scale(move |p| sink.set(p));

    viewport.set_zoom_percent(100.0).unwrap();
    assert!((viewport.scale() - 1.5).abs() < 1e-6);
    assert_eq!(seen.get(), 100.0);

    viewport.set_zoom_percent(50.0).unwrap();
    assert!((viewport.scale() - 1.1).abs() < 1e-6);
    assert_eq!(seen.get(), 50.0);

    assert!((viewport.zoom_percent() - 50.0).abs() < 1e-4);
}

#[test]
fn animation_lands_exactly_on_its_clamped_target() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);

    // At the destination scale 1.5 the image is 1200x600: x clamps into
    // [-400, 0], y into [0, 0].
    viewport
        .animate_to(1.5, -100.0, -50.0, Easing::Linear)
        .unwrap();
    assert!(viewport.is_animating());

    let mut now = Instant::now();
    for _ in 0..10_000 {
        now += FRAME_INTERVAL + Duration::from_millis(1);
        if !viewport.tick_animation(now).unwrap() {
            break;
        }
    }

    assert!(!viewport.is_animating());
    assert!((viewport.scale() - 1.5).abs() < 1e-4);
    assert!((viewport.offset().x - -100.0).abs() < 1e-3);
    assert!(viewport.offset().y.abs() < 1e-3);
}

#[test]
fn ticks_decline_until_a_frame_interval_has_elapsed() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);
    viewport
        .animate_to(1.5, 0.0, 0.0, Easing::Linear)
        .unwrap();

    let serial = viewport.frame_serial();
    // Immediately after scheduling, less than one interval has elapsed
    assert!(viewport.tick_animation(Instant::now()).unwrap());
    assert_eq!(viewport.frame_serial(), serial);
}

#[test]
fn a_new_animation_supersedes_the_one_in_flight() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);

    viewport
        .animate_to(1.5, -300.0, 0.0, Easing::OutCubic)
        .unwrap();
    let mut now = Instant::now();
    now += FRAME_INTERVAL + Duration::from_millis(1);
    viewport.tick_animation(now).unwrap();

    // Supersede mid-flight; the new sequence starts from live state
    viewport.animate_to(0.7, 120.0, 60.0, Easing::Linear).unwrap();
    for _ in 0..10_000 {
        now += FRAME_INTERVAL + Duration::from_millis(1);
        if !viewport.tick_animation(now).unwrap() {
            break;
        }
    }

    assert!((viewport.scale() - 0.7).abs() < 1e-4);
    assert!((viewport.offset().x - 120.0).abs() < 1e-3);
    assert!((viewport.offset().y - 60.0).abs() < 1e-3);
}

#[test]
fn zero_distance_animation_completes_immediately() {
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), ViewerConfig::default());
    let scale = viewport.scale();
    let offset = viewport.offset();
    viewport
        .animate_to(scale, offset.x, offset.y, Easing::OutCubic)
        .unwrap();
    assert!(!viewport.is_animating());
    assert!((viewport.scale() - scale).abs() < 1e-6);
}

#[test]
fn teardown_invalidates_the_in_flight_animation() {
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), ViewerConfig::default());
    viewport
        .animate_to(1.5, 0.0, 0.0, Easing::Linear)
        .unwrap();
    viewport.teardown();
    assert!(!viewport.is_animating());
    let now = Instant::now() + FRAME_INTERVAL * 2;
    assert!(!viewport.tick_animation(now).unwrap());
}

#[test]
fn drag_state_machine_applies_the_terminal_delta_on_release() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);
    viewport.zoom_to(1.5, None, None).unwrap();
    let start_x = viewport.offset().x;

    viewport.pointer_down(500.0, 300.0);
    assert!(viewport.is_dragging());
    viewport.pointer_move(490.0, 300.0);
    viewport.pointer_up(480.0, 300.0);
    assert!(!viewport.is_dragging());

    // Two moves of -10 each, clamped into the x band [-400, 0]
    assert!((viewport.offset().x - (start_x - 20.0).max(-400.0)).abs() < 1e-3);
}

#[test]
fn pointer_events_are_ignored_before_ready() {
    let mut viewport = Viewport::new(ViewerConfig::default(), default_workspace()).unwrap();
    viewport.pointer_down(10.0, 10.0);
    assert!(!viewport.is_dragging());
}

#[test]
fn ready_subscribers_fire_when_the_source_lands() {
    let mut viewport = Viewport::new(ViewerConfig::default(), default_workspace()).unwrap();
    let fired = Rc::new(Cell::new(false));
    let sink = fired.clone();
    viewport.on_ready(move || sink.set(true));
    viewport.set_source(solid_image(100, 100, 40)).unwrap();
    assert!(fired.get());
}

#[test]
fn load_failure_reports_and_allows_retry() {
    let mut viewport = Viewport::new(ViewerConfig::default(), default_workspace()).unwrap();
    let failures = Rc::new(Cell::new(0u32));
    let sink = failures.clone();
    viewport.on_load_error(move |_| sink.set(sink.get() + 1));

    viewport.load(PathBuf::from("/nonexistent/image.png"));
    assert_eq!(viewport.state(), ViewState::Loading);

    for _ in 0..500 {
        if viewport.poll() {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(viewport.state(), ViewState::Unloaded);
    assert_eq!(failures.get(), 1);
    assert!(viewport.load_error().is_some());

    // The instance stays usable: a retry via a direct source works
    viewport.set_source(solid_image(100, 100, 40)).unwrap();
    assert_eq!(viewport.state(), ViewState::Ready);
    assert!(viewport.load_error().is_none());
}

#[test]
fn load_decodes_a_real_file_and_becomes_ready() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("source.png");
    solid_image(320, 240, 80).save(&path).unwrap();

    let mut viewport = Viewport::new(ViewerConfig::default(), default_workspace()).unwrap();
    viewport.load(path);
    assert_eq!(viewport.state(), ViewState::Loading);

    for _ in 0..500 {
        if viewport.poll() {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(viewport.state(), ViewState::Ready);
    assert_eq!(viewport.display_size(), Size::new(320.0, 240.0));
}

#[test]
fn export_produces_an_encoded_jpeg() {
    let viewport = ready_viewport(200, 100, default_workspace(), ViewerConfig::default());
    let bytes = viewport.export_image(SnapshotFormat::Jpeg, 80).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn clamp_axis_reports_band_limits_per_axis() {
    let config = ViewerConfig {
        drag_small: true,
        ..Default::default()
    };
    let mut viewport = ready_viewport(2000, 1000, default_workspace(), config);
    viewport.zoom_to(1.2, None, None).unwrap();

    // x overflows: [ws - img, 0]
    assert_eq!(viewport.clamp_axis(Axis::X, Some(123.0)), 0.0);
    assert!((viewport.clamp_axis(Axis::X, Some(-9999.0)) - -160.0).abs() < 1e-3);
    // y fits: [0, ws - img]
    assert_eq!(viewport.clamp_axis(Axis::Y, Some(-5.0)), 0.0);
    assert!((viewport.clamp_axis(Axis::Y, Some(9999.0)) - 120.0).abs() < 1e-3);
}

#[test]
fn invalid_workspace_is_rejected_at_construction() {
    let err = Viewport::new(ViewerConfig::default(), Size::new(0.0, 600.0)).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");
}
