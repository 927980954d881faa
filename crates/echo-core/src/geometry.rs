use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::error::EchoError;

/// Radius of the circle, and circumradius of the triangle, in mm.
pub const OBJECT_RADIUS_MM: f32 = 10.0;
/// Edge length of the square and width of the rectangle, in mm.
pub const OBJECT_SIZE_MM: f32 = 20.0;
/// Rectangle height as a fraction of its width.
pub const RECTANGLE_ASPECT: f32 = 0.6;

const CIRCLE_REFLECTORS: usize = 8;

/// The hidden test object placed in front of the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Rectangle,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Rectangle];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Rectangle => "rectangle",
        }
    }

    /// Signed reflector positions along the measurement axis (mm), relative
    /// to the object center, after rotating the object by `rotation_deg`.
    ///
    /// The order is stable for a given shape: circle ring points counter-
    /// clockwise from the rotation angle, polygon corners in winding order.
    pub fn reflector_offsets(&self, rotation_deg: f32) -> Vec<f32> {
        let theta = rotation_deg.to_radians();
        match self {
            Shape::Circle => (0..CIRCLE_REFLECTORS)
                .map(|k| {
                    let angle = theta + TAU * k as f32 / CIRCLE_REFLECTORS as f32;
                    angle.cos() * OBJECT_RADIUS_MM
                })
                .collect(),
            Shape::Triangle => (0..3)
                .map(|k| (theta + TAU * k as f32 / 3.0).cos() * OBJECT_RADIUS_MM)
                .collect(),
            Shape::Square | Shape::Rectangle => {
                let (hx, hy) = self.half_extents();
                let (sin, cos) = theta.sin_cos();
                corner_signs()
                    .iter()
                    .map(|&(sx, sy)| cos * sx * hx - sin * sy * hy)
                    .collect()
            }
        }
    }

    /// Extent of the reflector set along the measurement axis, i.e. the
    /// distance between the nearest and farthest echo.
    pub fn expected_separation(&self, rotation_deg: f32) -> f32 {
        span(&self.reflector_offsets(rotation_deg))
    }

    /// Rotated outline vertices (mm, object-centered) for schematic drawing.
    /// The measurement axis is +x.
    pub fn outline(&self, rotation_deg: f32) -> Vec<Vec2> {
        let rot = Vec2::from_angle(rotation_deg.to_radians());
        let base: Vec<Vec2> = match self {
            Shape::Circle => (0..CIRCLE_REFLECTORS)
                .map(|k| Vec2::from_angle(TAU * k as f32 / CIRCLE_REFLECTORS as f32) * OBJECT_RADIUS_MM)
                .collect(),
            Shape::Triangle => (0..3)
                .map(|k| Vec2::from_angle(TAU * k as f32 / 3.0) * OBJECT_RADIUS_MM)
                .collect(),
            Shape::Square | Shape::Rectangle => {
                let (hx, hy) = self.half_extents();
                corner_signs().iter().map(|&(sx, sy)| Vec2::new(sx * hx, sy * hy)).collect()
            }
        };
        base.into_iter().map(|v| rot.rotate(v)).collect()
    }

    fn half_extents(&self) -> (f32, f32) {
        let half = OBJECT_SIZE_MM / 2.0;
        match self {
            Shape::Rectangle => (half, half * RECTANGLE_ASPECT),
            _ => (half, half),
        }
    }
}

// Winding order: (+,+) (+,-) (-,-) (-,+)
fn corner_signs() -> [(f32, f32); 4] {
    [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)]
}

/// Free-function form of [`Shape::reflector_offsets`].
pub fn reflector_offsets(shape: Shape, rotation_deg: f32) -> Vec<f32> {
    shape.reflector_offsets(rotation_deg)
}

/// max - min of a set of offsets; 0 for an empty set.
pub fn span(offsets: &[f32]) -> f32 {
    if offsets.is_empty() {
        return 0.0;
    }
    let min = offsets.iter().cloned().fold(f32::MAX, f32::min);
    let max = offsets.iter().cloned().fold(f32::MIN, f32::max);
    max - min
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = EchoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Ok(Shape::Circle),
            "square" => Ok(Shape::Square),
            "triangle" => Ok(Shape::Triangle),
            "rectangle" => Ok(Shape::Rectangle),
            _ => Err(EchoError::invalid_value("shape", s)),
        }
    }
}
