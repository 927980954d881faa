use echo_core::{PlateWidth, Scene, SceneParameter, Task};
use echo_synth::{EchoSynthesizer, SynthConfig};
use echo_visualizer::{DisplayList, DrawOp, RasterSurface, RenderSettings, Rgba, Surface, TraceRenderer};

// ── Helpers ──────────────────────────────────────────────────────

const W: f32 = 300.0;
const H: f32 = 200.0;

fn render_to_list(trace: &[f32], scene: &Scene, measured: f32) -> DisplayList {
    let mut list = DisplayList::new(W, H);
    TraceRenderer::default().render(&mut list, trace, scene, measured);
    list
}

/// Vertical lines drawn in the cursor colour.
fn cursor_columns(list: &DisplayList) -> Vec<f32> {
    let cursor = RenderSettings::default().cursor_color;
    list.lines()
        .filter(|(_, _, _, c)| *c == cursor)
        .map(|(from, _, _, _)| from.x)
        .collect()
}

/// 5mm plate, panned so the window is [20, 170) at scale 1.
fn plate_scene() -> Scene {
    let mut scene = Scene::default();
    scene.apply(SceneParameter::StartPosition(20.0));
    scene.apply(SceneParameter::PlateWidth(Some(PlateWidth::Mm5)));
    scene
}

// ── 1. Frame structure ──────────────────────────────────────────

#[test]
fn frame_starts_with_black_clear() {
    let list = render_to_list(&[0.0; 200], &plate_scene(), 40.0);
    assert_eq!(list.ops()[0], DrawOp::Clear(Rgba::BLACK));
}

#[test]
fn one_polyline_per_frame_with_every_sample() {
    let trace = vec![0.1; 200];
    let list = render_to_list(&trace, &plate_scene(), 40.0);
    let polys: Vec<_> = list.polylines().collect();
    assert_eq!(polys.len(), 1);
    assert_eq!(polys[0].0.len(), 200);
}

#[test]
fn empty_trace_draws_no_beam() {
    let list = render_to_list(&[], &plate_scene(), 40.0);
    assert_eq!(list.polylines().count(), 0);
    // Grid is still drawn.
    assert!(list.lines().count() > 0);
}

#[test]
fn brightness_sets_beam_alpha() {
    let mut scene = plate_scene();
    scene.apply(SceneParameter::Brightness(10));
    let list = render_to_list(&[0.0; 10], &scene, -1.0);
    let (_, _, color) = list.polylines().next().unwrap();
    assert!((color.a - 1.0).abs() < 1e-6);

    scene.apply(SceneParameter::Brightness(1));
    let list = render_to_list(&[0.0; 10], &scene, -1.0);
    let (_, _, color) = list.polylines().next().unwrap();
    assert!((color.a - 0.19).abs() < 1e-6);
}

// ── 2. Cursor ───────────────────────────────────────────────────

#[test]
fn cursor_drawn_at_computed_column() {
    // Window [20, 170), measured 95 → halfway across.
    let list = render_to_list(&[0.0; 200], &plate_scene(), 95.0);
    let cols = cursor_columns(&list);
    assert_eq!(cols.len(), 1);
    assert!((cols[0] - W / 2.0).abs() < 1e-3);
}

#[test]
fn cursor_omitted_outside_window() {
    let scene = plate_scene();
    for measured in [-5.0, 0.0, 10.0, 19.0, 171.0, 200.0] {
        let list = render_to_list(&[0.0; 200], &scene, measured);
        assert!(cursor_columns(&list).is_empty(), "cursor shown for {measured}");
    }
}

#[test]
fn cursor_tracks_scale_and_start() {
    let mut scene = plate_scene();
    scene.apply(SceneParameter::Scale(3)); // 50mm window
    scene.apply(SceneParameter::StartPosition(30.0));
    let list = render_to_list(&[0.0; 200], &scene, 40.0);
    let cols = cursor_columns(&list);
    assert_eq!(cols.len(), 1);
    assert!((cols[0] - 0.2 * W).abs() < 1e-3);
}

// ── 3. Grids ────────────────────────────────────────────────────

#[test]
fn grid_differs_by_task() {
    let mut counts = Vec::new();
    for task in Task::ALL {
        let mut scene = plate_scene();
        scene.task = task;
        scene.apply(SceneParameter::StartPosition(task.baseline_start()));
        let list = render_to_list(&[], &scene, -1.0);
        let fills = list.ops().iter().filter(|op| matches!(op, DrawOp::FillRect { .. })).count();
        counts.push((fills, list.lines().count()));
    }
    // Only the ruler shades cells.
    assert!(counts[0].0 > 0);
    assert_eq!(counts[1], (0, 22));
    assert_eq!(counts[2], (0, 32));
}

#[test]
fn dim_grid_is_still_visible() {
    let mut scene = plate_scene();
    scene.task = Task::Object;
    scene.apply(SceneParameter::Brightness(1));
    let list = render_to_list(&[], &scene, -1.0);
    let (_, _, _, color) = list.lines().next().unwrap();
    let expected = RenderSettings::default().grid_color.a * (0.2 + 0.08);
    assert!((color.a - expected).abs() < 1e-6);
}

// ── 4. Raster output ────────────────────────────────────────────

#[test]
fn raster_frame_has_black_screen_and_lit_beam() {
    let scene = {
        let mut s = plate_scene();
        s.apply(SceneParameter::Brightness(10));
        s.task = Task::Object;
        s
    };
    let trace = EchoSynthesizer::with_seed(SynthConfig::default().noiseless(), 1).synthesize(&scene);
    let mut raster = RasterSurface::new(W as u32, H as u32);
    TraceRenderer::default().render(&mut raster, &trace, &scene, -1.0);

    // A pixel between grid lines and away from the beam stays black.
    assert_eq!(raster.pixel(5, 5), Some([0, 0, 0, 255]));

    // Baseline row at 0.8 * height carries the beam colour where the trace is flat.
    let beam = RenderSettings::default().trace_color.to_u8();
    assert_eq!(raster.pixel(5, (0.8 * H) as u32), Some([beam[0], beam[1], beam[2], 255]));
}

#[test]
fn raster_degenerate_surface_does_not_panic() {
    let mut raster = RasterSurface::new(0, 0);
    TraceRenderer::default().render(&mut raster, &[0.5; 200], &plate_scene(), 40.0);
    assert_eq!(raster.size().x, 0.0);
}

#[test]
fn raster_export_writes_png() {
    let mut raster = RasterSurface::new(64, 32);
    TraceRenderer::default().render(&mut raster, &[0.2; 200], &plate_scene(), 40.0);
    let path = std::env::temp_dir().join(format!("echo-frame-{}.png", std::process::id()));
    raster.save_png(&path).unwrap();
    let meta = std::fs::metadata(&path).unwrap();
    assert!(meta.len() > 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn raster_export_to_missing_dir_fails() {
    let raster = RasterSurface::new(4, 4);
    let path = std::env::temp_dir().join("echo-missing-dir-xyz").join("frame.png");
    assert!(raster.save_png(&path).is_err());
}
