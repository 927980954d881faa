use criterion::{black_box, criterion_group, criterion_main, Criterion};
use echo_core::{PlateWidth, Scene, SceneParameter, Task};
use echo_synth::{EchoSynthesizer, SynthConfig};
use echo_visualizer::{DisplayList, RasterSurface, TraceRenderer};

fn plate_scene() -> Scene {
    let mut scene = Scene::default();
    scene.apply(SceneParameter::PlateWidth(Some(PlateWidth::Mm10)));
    scene
}

fn bench_render_raster_640x400(c: &mut Criterion) {
    let scene = plate_scene();
    let trace = EchoSynthesizer::with_seed(SynthConfig::default(), 1).synthesize(&scene);
    let renderer = TraceRenderer::default();
    let mut surface = RasterSurface::new(640, 400);
    c.bench_function("render_raster_640x400", |b| {
        b.iter(|| renderer.render(&mut surface, black_box(&trace), &scene, 45.0));
    });
}

fn bench_render_display_list(c: &mut Criterion) {
    let renderer = TraceRenderer::default();
    for task in Task::ALL {
        let mut scene = plate_scene();
        scene.task = task;
        let trace = EchoSynthesizer::with_seed(SynthConfig::default(), 1).synthesize(&scene);
        c.bench_function(&format!("render_list_task{}", task.number()), |b| {
            b.iter(|| {
                let mut list = DisplayList::new(640.0, 400.0);
                renderer.render(&mut list, black_box(&trace), &scene, 45.0);
                black_box(list)
            });
        });
    }
}

criterion_group!(benches, bench_render_raster_640x400, bench_render_display_list);
criterion_main!(benches);
