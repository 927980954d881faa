//! Scene model: the task currently on the bench plus the instrument's
//! display knobs. Every setter clamps into range, so the synthesizer never
//! sees a value the UI could not have produced.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EchoError, EchoResult};
use crate::geometry::Shape;

/// Width of the visible window at scale 1, in mm.
pub const BASE_WINDOW_MM: f32 = 150.0;

pub const KNOB_MIN: u8 = 1;
pub const KNOB_MAX: u8 = 10;

pub const PLATE_DISTANCE_MIN: f32 = 30.0;
pub const PLATE_DISTANCE_MAX: f32 = 40.0;
pub const OBJECT_DISTANCE_MIN: f32 = 20.0;
pub const OBJECT_DISTANCE_MAX: f32 = 120.0;
pub const THICKNESS_MIN: f32 = 1.0;
pub const THICKNESS_MAX: f32 = 60.0;

pub const MEASURED_MIN: f32 = 0.0;
pub const MEASURED_MAX: f32 = 200.0;

/// Which exercise the instrument is set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Plate thickness from two surface echoes.
    Plate,
    /// Hidden object shape and rotation.
    Object,
    /// Cylinder wall thickness and material.
    Cylinder,
}

impl Task {
    pub const ALL: [Task; 3] = [Task::Plate, Task::Object, Task::Cylinder];

    /// Pan position the display snaps back to when this task is selected.
    ///
    /// Every task opens at the probe face. Auto measurements are a thickness
    /// or a span, so they land inside the opening window.
    pub fn baseline_start(&self) -> f32 {
        0.0
    }

    pub fn number(&self) -> u8 {
        match self {
            Task::Plate => 1,
            Task::Object => 2,
            Task::Cylinder => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Task::Plate),
            2 => Some(Task::Object),
            3 => Some(Task::Cylinder),
            _ => None,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {}", self.number())
    }
}

/// The selectable reference plates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateWidth {
    Mm2,
    Mm3,
    Mm5,
    Mm10,
}

impl PlateWidth {
    pub const ALL: [PlateWidth; 4] = [PlateWidth::Mm2, PlateWidth::Mm3, PlateWidth::Mm5, PlateWidth::Mm10];

    pub fn mm(&self) -> f32 {
        match self {
            PlateWidth::Mm2 => 2.0,
            PlateWidth::Mm3 => 3.0,
            PlateWidth::Mm5 => 5.0,
            PlateWidth::Mm10 => 10.0,
        }
    }

    pub fn from_mm(mm: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|w| (w.mm() - mm).abs() < 0.01)
    }
}

/// Cylinder material. Determines how much of the pulse is reflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Aluminum,
    Polymer,
    Steel,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Aluminum, Material::Polymer, Material::Steel];

    pub fn reflectivity(&self) -> f32 {
        match self {
            Material::Aluminum => 0.9,
            Material::Steel => 0.85,
            Material::Polymer => 0.4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Material::Aluminum => "aluminum",
            Material::Polymer => "polymer",
            Material::Steel => "steel",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = EchoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aluminum" | "aluminium" => Ok(Material::Aluminum),
            "polymer" => Ok(Material::Polymer),
            "steel" => Ok(Material::Steel),
            _ => Err(EchoError::invalid_value("material", s)),
        }
    }
}

/// Task 1 bench: a plate of known width at a hidden distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateParams {
    pub width: Option<PlateWidth>,
    pub distance: f32,
}

/// Task 2 bench: a hidden shape at a given distance and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectParams {
    pub shape: Shape,
    pub rotation_deg: f32,
    pub distance: f32,
}

/// Task 3 bench: a cylinder wall of hidden material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderParams {
    pub material: Material,
    pub thickness: f32,
}

/// One typed parameter write coming from the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneParameter {
    Intensity(u8),
    Brightness(u8),
    Scale(u8),
    StartPosition(f32),
    PlateWidth(Option<PlateWidth>),
    PlateDistance(f32),
    Shape(Shape),
    Rotation(f32),
    ObjectDistance(f32),
    Material(Material),
    Thickness(f32),
}

impl SceneParameter {
    /// Parse a `name`/`value` pair as sent by a string-keyed UI layer.
    ///
    /// Names are camelCase (`startPosition`); snake_case is accepted too.
    pub fn parse(name: &str, value: &str) -> EchoResult<Self> {
        let number = || -> EchoResult<f32> {
            value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| EchoError::invalid_value(name, value))
        };
        let knob = || -> EchoResult<u8> {
            let v = number()?.round();
            Ok(v.clamp(0.0, u8::MAX as f32) as u8)
        };

        let param = match name {
            "intensity" => SceneParameter::Intensity(knob()?),
            "brightness" => SceneParameter::Brightness(knob()?),
            "scale" => SceneParameter::Scale(knob()?),
            "startPosition" | "start_position" => SceneParameter::StartPosition(number()?),
            "plateWidth" | "plate_width" => {
                if value.trim().eq_ignore_ascii_case("none") {
                    SceneParameter::PlateWidth(None)
                } else {
                    let width = PlateWidth::from_mm(number()?)
                        .ok_or_else(|| EchoError::invalid_value(name, value))?;
                    SceneParameter::PlateWidth(Some(width))
                }
            }
            "plateDistance" | "plate_distance" => SceneParameter::PlateDistance(number()?),
            "shape" => SceneParameter::Shape(value.parse()?),
            "rotation" | "rotationDeg" | "rotation_deg" => SceneParameter::Rotation(number()?),
            "objectDistance" | "object_distance" => SceneParameter::ObjectDistance(number()?),
            "material" => SceneParameter::Material(value.parse()?),
            "thickness" => SceneParameter::Thickness(number()?),
            _ => return Err(EchoError::UnknownParameter(name.to_string())),
        };
        Ok(param)
    }
}

/// Snapshot of everything the synthesizer and renderer read for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub task: Task,
    pub intensity: u8,
    pub brightness: u8,
    pub scale: u8,
    pub start_position: f32,
    pub plate: PlateParams,
    pub object: ObjectParams,
    pub cylinder: CylinderParams,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            task: Task::Plate,
            intensity: 7,
            brightness: 7,
            scale: 1,
            start_position: Task::Plate.baseline_start(),
            plate: PlateParams { width: None, distance: 35.0 },
            object: ObjectParams { shape: Shape::Square, rotation_deg: 0.0, distance: 60.0 },
            cylinder: CylinderParams { material: Material::Steel, thickness: 10.0 },
        }
    }
}

impl Scene {
    /// A fresh session scene. The hidden answers (plate distance, object
    /// shape, cylinder material) are drawn at random.
    pub fn randomized<R: Rng>(rng: &mut R) -> Self {
        let mut scene = Self::default();
        scene.plate.distance = rng.gen_range(PLATE_DISTANCE_MIN..=PLATE_DISTANCE_MAX);
        scene.object.shape = Shape::ALL[rng.gen_range(0..Shape::ALL.len())];
        scene.cylinder.material = Material::ALL[rng.gen_range(0..Material::ALL.len())];
        scene
    }

    /// Width of the visible position window in mm.
    pub fn window_mm(&self) -> f32 {
        BASE_WINDOW_MM / self.scale.max(KNOB_MIN) as f32
    }

    /// Visible `[start, end)` range in mm.
    pub fn window(&self) -> (f32, f32) {
        (self.start_position, self.start_position + self.window_mm())
    }

    /// Write one parameter, clamped into range. Non-finite values are
    /// dropped and the previous value kept.
    pub fn apply(&mut self, param: SceneParameter) {
        if let SceneParameter::StartPosition(v)
        | SceneParameter::PlateDistance(v)
        | SceneParameter::Rotation(v)
        | SceneParameter::ObjectDistance(v)
        | SceneParameter::Thickness(v) = param
        {
            if !v.is_finite() {
                log::warn!("ignoring non-finite {param:?}");
                return;
            }
        }
        match param {
            SceneParameter::Intensity(v) => self.intensity = clamp_knob(v),
            SceneParameter::Brightness(v) => self.brightness = clamp_knob(v),
            SceneParameter::Scale(v) => self.scale = clamp_knob(v),
            SceneParameter::StartPosition(v) => self.start_position = v.max(0.0),
            SceneParameter::PlateWidth(w) => self.plate.width = w,
            SceneParameter::PlateDistance(v) => {
                self.plate.distance = v.clamp(PLATE_DISTANCE_MIN, PLATE_DISTANCE_MAX)
            }
            SceneParameter::Shape(s) => self.object.shape = s,
            SceneParameter::Rotation(v) => self.object.rotation_deg = wrap_degrees(v),
            SceneParameter::ObjectDistance(v) => {
                self.object.distance = v.clamp(OBJECT_DISTANCE_MIN, OBJECT_DISTANCE_MAX)
            }
            SceneParameter::Material(m) => self.cylinder.material = m,
            SceneParameter::Thickness(v) => self.cylinder.thickness = v.clamp(THICKNESS_MIN, THICKNESS_MAX),
        }
    }

    /// The value a correct measurement should read for the active task, or
    /// `None` when there is nothing to measure (Task 1 without a plate).
    pub fn expected_measurement(&self) -> Option<f32> {
        match self.task {
            Task::Plate => self.plate.width.map(|w| w.mm()),
            Task::Object => Some(self.object.shape.expected_separation(self.object.rotation_deg)),
            Task::Cylinder => Some(self.cylinder.thickness),
        }
    }
}

fn clamp_knob(v: u8) -> u8 {
    v.clamp(KNOB_MIN, KNOB_MAX)
}

fn wrap_degrees(v: f32) -> f32 {
    let wrapped = v.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Cursor position set by the learner, in whole millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasuredDistance(f32);

impl MeasuredDistance {
    pub fn new(value: f32) -> Self {
        let mut m = Self::default();
        m.set(value);
        m
    }

    pub fn get(&self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        if value.is_finite() {
            self.0 = value.round().clamp(MEASURED_MIN, MEASURED_MAX);
        } else {
            log::warn!("ignoring non-finite measured distance {value}");
        }
    }

    pub fn adjust(&mut self, delta: f32) {
        self.set(self.0 + delta);
    }

    pub fn reset(&mut self) {
        self.0 = 0.0;
    }
}
