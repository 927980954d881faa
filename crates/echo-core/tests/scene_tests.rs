use echo_core::geometry::span;
use echo_core::{reflector_offsets, Scene, SceneParameter, Shape, Task};

// ── Geometry ─────────────────────────────────────────────────────

#[test]
fn square_offsets_are_sign_paired() {
    let mut offsets = reflector_offsets(Shape::Square, 0.0);
    offsets.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((offsets[0] + 10.0).abs() < 1e-4);
    assert!((offsets[1] + 10.0).abs() < 1e-4);
    assert!((offsets[2] - 10.0).abs() < 1e-4);
    assert!((offsets[3] - 10.0).abs() < 1e-4);
}

#[test]
fn unrotated_square_span_matches_measurement() {
    let offsets = reflector_offsets(Shape::Square, 0.0);
    let mut scene = Scene::default();
    scene.task = Task::Object;
    scene.apply(SceneParameter::Shape(Shape::Square));
    scene.apply(SceneParameter::Rotation(0.0));
    let expected = scene.expected_measurement().unwrap();
    assert!((span(&offsets) - 20.0).abs() < 1e-4);
    assert!((expected - span(&offsets)).abs() < 1e-4);
}

#[test]
fn reflector_counts() {
    assert_eq!(reflector_offsets(Shape::Circle, 10.0).len(), 8);
    assert_eq!(reflector_offsets(Shape::Square, 10.0).len(), 4);
    assert_eq!(reflector_offsets(Shape::Triangle, 10.0).len(), 3);
    assert_eq!(reflector_offsets(Shape::Rectangle, 10.0).len(), 4);
}

#[test]
fn offsets_stay_within_circumradius() {
    for shape in Shape::ALL {
        for step in 0..36 {
            let rot = step as f32 * 10.0;
            for o in reflector_offsets(shape, rot) {
                assert!(o.abs() <= 10.0 * std::f32::consts::SQRT_2 + 1e-3, "{shape} at {rot}: {o}");
            }
        }
    }
}

// ── Scene ────────────────────────────────────────────────────────

#[test]
fn inactive_task_parameters_are_retained() {
    let mut scene = Scene::default();
    scene.apply(SceneParameter::Thickness(12.0));
    scene.task = Task::Plate;
    scene.task = Task::Cylinder;
    assert!((scene.cylinder.thickness - 12.0).abs() < 1e-4);
}

#[test]
fn scene_serializes_to_json() {
    let scene = Scene::default();
    let json = serde_json::to_string(&scene).unwrap();
    let back: Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(scene, back);
}
