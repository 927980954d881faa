use echo_core::EchoResult;
use serde::{Deserialize, Serialize};

/// Number of samples in one trace.
pub const DEFAULT_SAMPLE_COUNT: usize = 200;

/// Width and sharpness of one echo bump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BumpShape {
    /// Half-width scale in mm.
    pub width: f32,
    /// Generalized-Gaussian exponent. 2 is a plain Gaussian, higher is flatter-topped and steeper-sided.
    pub power: f32,
}

impl BumpShape {
    pub const fn new(width: f32, power: f32) -> Self {
        Self { width, power }
    }
}

/// How the plate echoes are shaped as a function of plate width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateShaping {
    /// Thin plates get wider bumps, so the 2mm plate reads as one lobe.
    MergeThin,
    /// Thin plates get narrower, sharper bumps, so every plate resolves.
    SharpenThin,
}

impl PlateShaping {
    pub fn bump(&self, plate_width: f32) -> BumpShape {
        let w = plate_width.max(0.5);
        match self {
            PlateShaping::MergeThin => BumpShape::new(1.0 + 1.2 / w, 2.0),
            PlateShaping::SharpenThin => BumpShape::new(0.4 + 0.1 * w, 2.0 + 4.0 / w),
        }
    }
}

/// Where baseline noise is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoisePolicy {
    Off,
    /// Only samples well clear of every echo, so peaks stay clean for measuring.
    BaselineOnly,
    Everywhere,
}

/// Tuning for the echo synthesizer.
///
/// Every field has a default, so a JSON override only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub sample_count: usize,
    pub plate_shaping: PlateShaping,

    pub plate_amplitude: f32,
    pub object_amplitude: f32,
    pub cylinder_amplitude: f32,

    pub object_bump: BumpShape,
    pub cylinder_bump: BumpShape,
    /// Position of the cylinder's outer wall, in mm.
    pub cylinder_front_mm: f32,
    /// Amplitude kept by the back-wall echo after crossing the wall twice.
    pub transmission_loss: f32,

    /// Noise is uniform in `[-noise_amplitude, noise_amplitude]`.
    pub noise_amplitude: f32,
    /// Minimum distance from an echo, in bump widths, for baseline noise.
    pub baseline_clearance: f32,
    pub plate_noise: NoisePolicy,
    pub object_noise: NoisePolicy,
    pub cylinder_noise: NoisePolicy,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            plate_shaping: PlateShaping::MergeThin,
            plate_amplitude: 0.9,
            object_amplitude: 0.6,
            cylinder_amplitude: 0.9,
            object_bump: BumpShape::new(0.8, 2.0),
            cylinder_bump: BumpShape::new(1.0, 2.0),
            cylinder_front_mm: 25.0,
            transmission_loss: 0.7,
            noise_amplitude: 0.025,
            baseline_clearance: 3.0,
            plate_noise: NoisePolicy::BaselineOnly,
            object_noise: NoisePolicy::Everywhere,
            cylinder_noise: NoisePolicy::BaselineOnly,
        }
    }
}

impl SynthConfig {
    /// Load a config from JSON, filling unspecified fields from defaults.
    pub fn from_json(json: &str) -> EchoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The same config without any noise. Used to inspect the envelope.
    pub fn noiseless(&self) -> Self {
        Self {
            noise_amplitude: 0.0,
            plate_noise: NoisePolicy::Off,
            object_noise: NoisePolicy::Off,
            cylinder_noise: NoisePolicy::Off,
            ..self.clone()
        }
    }
}
