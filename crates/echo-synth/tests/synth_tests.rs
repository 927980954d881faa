use echo_core::{Material, PlateWidth, Scene, SceneParameter, Shape, Task};
use echo_synth::synthesizer::local_maxima;
use echo_synth::{envelope, sample_positions, EchoSynthesizer, PlateShaping, SynthConfig};

// ── Helpers ──────────────────────────────────────────────────────

const N: usize = 200;

fn plate_scene(width: PlateWidth, distance: f32, scale: u8) -> Scene {
    let mut scene = Scene::default();
    scene.apply(SceneParameter::PlateWidth(Some(width)));
    scene.apply(SceneParameter::PlateDistance(distance));
    scene.apply(SceneParameter::Scale(scale));
    scene
}

/// Positions (mm) of the two strongest peaks, nearest first.
fn two_dominant_peaks(scene: &Scene, config: &SynthConfig) -> Option<(f32, f32)> {
    let env = envelope(scene, config, N);
    let xs = sample_positions(scene, N);
    let peaks = local_maxima(&env);
    if peaks.len() < 2 {
        return None;
    }
    let mut pair = [xs[peaks[0]], xs[peaks[1]]];
    pair.sort_by(|a, b| a.partial_cmp(b).unwrap());
    Some((pair[0], pair[1]))
}

fn step_mm(scene: &Scene) -> f32 {
    scene.window_mm() / N as f32
}

// ── 1. Plate echoes ─────────────────────────────────────────────

#[test]
fn plate_peaks_sit_on_both_surfaces() {
    let config = SynthConfig::default();
    for (width, distance) in [(PlateWidth::Mm10, 35.0), (PlateWidth::Mm5, 31.3), (PlateWidth::Mm10, 38.9)] {
        let scene = plate_scene(width, distance, 1);
        let (front, back) = two_dominant_peaks(&scene, &config).expect("two peaks");
        let tol = step_mm(&scene);
        assert!((front - distance).abs() <= tol, "front {front} vs {distance}");
        assert!((back - (distance + width.mm())).abs() <= tol, "back {back} vs {}", distance + width.mm());
    }
}

#[test]
fn zoomed_in_three_mm_plate_resolves() {
    let config = SynthConfig::default();
    let mut scene = plate_scene(PlateWidth::Mm3, 34.0, 5);
    scene.apply(SceneParameter::StartPosition(25.0));
    let (front, back) = two_dominant_peaks(&scene, &config).expect("two peaks");
    let tol = step_mm(&scene);
    assert!((front - 34.0).abs() <= tol);
    assert!((back - 37.0).abs() <= tol);
}

#[test]
fn thin_plate_merges_by_default() {
    let config = SynthConfig::default();
    let mut scene = plate_scene(PlateWidth::Mm2, 35.0, 5);
    scene.apply(SceneParameter::StartPosition(25.0));
    let env = envelope(&scene, &config, N);
    let significant: Vec<usize> = local_maxima(&env)
        .into_iter()
        .filter(|&i| env[i] > 0.1)
        .collect();
    assert_eq!(significant.len(), 1, "2mm plate should read as one lobe");
}

#[test]
fn sharpen_policy_resolves_thin_plate() {
    let config = SynthConfig { plate_shaping: PlateShaping::SharpenThin, ..SynthConfig::default() };
    let mut scene = plate_scene(PlateWidth::Mm2, 35.0, 5);
    scene.apply(SceneParameter::StartPosition(25.0));
    let (front, back) = two_dominant_peaks(&scene, &config).expect("two peaks");
    let tol = step_mm(&scene);
    assert!((front - 35.0).abs() <= tol);
    assert!((back - 37.0).abs() <= tol);
}

// ── 2. Cylinder wall ────────────────────────────────────────────

#[test]
fn cylinder_trace_peaks_on_both_walls_with_loss() {
    let config = SynthConfig::default();
    let mut scene = Scene::default();
    scene.task = Task::Cylinder;
    scene.apply(SceneParameter::Intensity(10));
    scene.apply(SceneParameter::Material(Material::Steel));
    scene.apply(SceneParameter::Thickness(20.0));
    scene.apply(SceneParameter::Scale(3));
    scene.apply(SceneParameter::StartPosition(20.0));

    let mut synth = EchoSynthesizer::with_seed(config.clone(), 21);
    let trace = synth.synthesize(&scene);
    let xs = sample_positions(&scene, N);
    let tol = step_mm(&scene);

    let peaks = local_maxima(&trace);
    let (front, back) = (peaks[0], peaks[1]);
    assert!((xs[front] - 25.0).abs() <= tol, "front wall at {}", xs[front]);
    assert!((xs[back] - 45.0).abs() <= tol, "back wall at {}", xs[back]);
    assert!((trace[front] - 0.9 * Material::Steel.reflectivity()).abs() < 1e-3);
    assert!((trace[back] / trace[front] - config.transmission_loss).abs() < 1e-3);

    // Baseline-only noise: untouched within the clearance of either wall.
    let env = envelope(&scene, &config, N);
    let clearance = config.baseline_clearance * config.cylinder_bump.width;
    for i in 0..N {
        let near = (xs[i] - 25.0).abs() <= clearance || (xs[i] - 45.0).abs() <= clearance;
        if near {
            assert_eq!(trace[i], env[i], "noise at {} mm", xs[i]);
        } else {
            assert!((trace[i] - env[i]).abs() <= config.noise_amplitude + 1e-6);
        }
    }
    assert!(trace.iter().zip(env.iter()).any(|(a, b)| a != b));
}

// ── 3. Output contract ──────────────────────────────────────────

#[test]
fn output_length_and_range() {
    let mut synth = EchoSynthesizer::with_seed(SynthConfig::default(), 9);
    for task in Task::ALL {
        for intensity in [1u8, 5, 10] {
            let mut scene = plate_scene(PlateWidth::Mm5, 33.0, 1);
            scene.task = task;
            scene.apply(SceneParameter::Intensity(intensity));
            scene.apply(SceneParameter::StartPosition(0.0));
            let trace = synth.synthesize(&scene);
            assert_eq!(trace.len(), N);
            for v in &trace {
                assert!(v.is_finite());
                assert!(*v >= -0.1 && *v <= 1.0, "{task} sample {v} out of range");
            }
        }
    }
}

#[test]
fn noise_makes_calls_differ_but_envelope_is_stable() {
    let mut scene = Scene::default();
    scene.task = Task::Object;
    scene.apply(SceneParameter::Shape(Shape::Circle));
    let config = SynthConfig::default();
    let mut synth = EchoSynthesizer::with_seed(config.clone(), 3);
    let a = synth.synthesize(&scene);
    let b = synth.synthesize(&scene);
    assert_ne!(a, b);

    let env = envelope(&scene, &config, N);
    for (x, e) in a.iter().zip(env.iter()) {
        assert!((x - e).abs() <= config.noise_amplitude + 1e-6);
    }
}

#[test]
fn intensity_scales_echoes() {
    let config = SynthConfig::default();
    let mut low = plate_scene(PlateWidth::Mm10, 35.0, 1);
    low.apply(SceneParameter::Intensity(2));
    let mut high = low.clone();
    high.apply(SceneParameter::Intensity(8));
    let peak = |s: &Scene| envelope(s, &config, N).into_iter().fold(0.0f32, f32::max);
    assert!((peak(&high) / peak(&low) - 4.0).abs() < 0.01);
}

#[test]
fn echoes_outside_window_leave_flat_trace() {
    let config = SynthConfig::default();
    let mut scene = plate_scene(PlateWidth::Mm5, 35.0, 10);
    scene.apply(SceneParameter::StartPosition(100.0));
    let env = envelope(&scene, &config, N);
    assert!(env.iter().all(|v| *v < 1e-6));
}

#[test]
fn custom_sample_count() {
    let config = SynthConfig { sample_count: 64, ..SynthConfig::default() };
    let mut synth = EchoSynthesizer::with_seed(config, 5);
    let scene = Scene::default();
    assert_eq!(synth.synthesize(&scene).len(), 64);
    let mut buf = vec![1.0; 10];
    synth.synthesize_into(&scene, 32, &mut buf);
    assert_eq!(buf, vec![0.0; 32]);
}
