use echo_core::{Scene, Task};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BumpShape, NoisePolicy, SynthConfig};

/// One reflector's contribution to the trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Echo {
    /// Absolute position along the probe axis, in mm.
    pub center: f32,
    pub amplitude: f32,
    pub shape: BumpShape,
}

impl Echo {
    pub fn at(&self, x: f32) -> f32 {
        self.amplitude * bump(x, self.center, self.shape.width, self.shape.power)
    }
}

/// Generalized Gaussian `exp(-(|x - center| / width)^power)`.
///
/// Peaks at 1.0 on `center`. A non-positive width degenerates to a spike
/// that is only non-zero exactly at the center.
pub fn bump(x: f32, center: f32, width: f32, power: f32) -> f32 {
    let d = (x - center).abs();
    if width <= 0.0 {
        return if d == 0.0 { 1.0 } else { 0.0 };
    }
    (-(d / width).powf(power)).exp()
}

/// Absolute reflector positions for the active task, in mm.
///
/// Empty for Task 1 with no plate selected.
pub fn reflector_positions(scene: &Scene, config: &SynthConfig) -> Vec<f32> {
    match scene.task {
        Task::Plate => match scene.plate.width {
            Some(w) => vec![scene.plate.distance, scene.plate.distance + w.mm()],
            None => Vec::new(),
        },
        Task::Object => scene
            .object
            .shape
            .reflector_offsets(scene.object.rotation_deg)
            .into_iter()
            .map(|offset| scene.object.distance + offset)
            .collect(),
        Task::Cylinder => vec![
            config.cylinder_front_mm,
            config.cylinder_front_mm + scene.cylinder.thickness,
        ],
    }
}

/// The echoes the active task produces, with amplitude already scaled by
/// the intensity knob.
pub fn echoes(scene: &Scene, config: &SynthConfig) -> Vec<Echo> {
    let gain = scene.intensity as f32 / 10.0;
    let positions = reflector_positions(scene, config);

    match scene.task {
        Task::Plate => {
            let Some(width) = scene.plate.width else {
                return Vec::new();
            };
            let shape = config.plate_shaping.bump(width.mm());
            let amplitude = gain * config.plate_amplitude;
            positions.into_iter().map(|center| Echo { center, amplitude, shape }).collect()
        }
        Task::Object => {
            let amplitude = gain * config.object_amplitude;
            positions
                .into_iter()
                .map(|center| Echo { center, amplitude, shape: config.object_bump })
                .collect()
        }
        Task::Cylinder => {
            let front = gain * config.cylinder_amplitude * scene.cylinder.material.reflectivity();
            positions
                .into_iter()
                .enumerate()
                .map(|(i, center)| Echo {
                    center,
                    amplitude: if i == 0 { front } else { front * config.transmission_loss },
                    shape: config.cylinder_bump,
                })
                .collect()
        }
    }
}

/// Absolute position of each sample: `start + (i / n) * window`.
pub fn sample_positions(scene: &Scene, sample_count: usize) -> Vec<f32> {
    let start = scene.start_position;
    let window = scene.window_mm();
    (0..sample_count)
        .map(|i| start + (i as f32 / sample_count as f32) * window)
        .collect()
}

/// The deterministic, noise-free trace. Clamped to at most 1.0.
pub fn envelope(scene: &Scene, config: &SynthConfig, sample_count: usize) -> Vec<f32> {
    let echoes = echoes(scene, config);
    sample_positions(scene, sample_count)
        .into_iter()
        .map(|x| echoes.iter().map(|e| e.at(x)).sum::<f32>().min(1.0))
        .collect()
}

fn noise_policy(scene: &Scene, config: &SynthConfig) -> NoisePolicy {
    match scene.task {
        Task::Plate => config.plate_noise,
        Task::Object => config.object_noise,
        Task::Cylinder => config.cylinder_noise,
    }
}

/// Echo trace generator.
///
/// Owns the noise source, so repeated calls with the same scene give the
/// same envelope with fresh noise on top.
pub struct EchoSynthesizer {
    config: SynthConfig,
    rng: StdRng,
}

impl EchoSynthesizer {
    pub fn new(config: SynthConfig) -> Self {
        Self { config, rng: StdRng::from_entropy() }
    }

    /// A synthesizer with reproducible noise.
    pub fn with_seed(config: SynthConfig, seed: u64) -> Self {
        Self { config, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SynthConfig) {
        self.config = config;
    }

    /// Synthesize one trace of `config.sample_count` samples.
    pub fn synthesize(&mut self, scene: &Scene) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.config.sample_count);
        self.synthesize_into(scene, self.config.sample_count, &mut out);
        out
    }

    /// Synthesize `sample_count` samples into `out`, replacing its contents.
    ///
    /// Reuses the buffer's allocation; the per-frame path calls this.
    pub fn synthesize_into(&mut self, scene: &Scene, sample_count: usize, out: &mut Vec<f32>) {
        out.clear();
        let echoes = echoes(scene, &self.config);

        // No plate on the bench: flat line, not even noise.
        if echoes.is_empty() && scene.task == Task::Plate {
            out.resize(sample_count, 0.0);
            return;
        }

        let policy = noise_policy(scene, &self.config);
        let amp = self.config.noise_amplitude;
        let clearance = self.config.baseline_clearance;

        for x in sample_positions(scene, sample_count) {
            let mut v = echoes.iter().map(|e| e.at(x)).sum::<f32>().min(1.0);

            let noisy = match policy {
                NoisePolicy::Off => false,
                NoisePolicy::Everywhere => true,
                NoisePolicy::BaselineOnly => echoes
                    .iter()
                    .all(|e| (x - e.center).abs() > clearance * e.shape.width),
            };
            if noisy && amp > 0.0 {
                v += self.rng.gen_range(-amp..=amp);
            }

            out.push(v.min(1.0));
        }
    }
}

/// Indices of local maxima, strongest first.
///
/// A flat top counts once, at its first sample.
pub fn local_maxima(trace: &[f32]) -> Vec<usize> {
    let mut peaks: Vec<usize> = (1..trace.len().saturating_sub(1))
        .filter(|&i| trace[i] > trace[i - 1] && trace[i] >= trace[i + 1])
        .collect();
    peaks.sort_by(|&a, &b| trace[b].partial_cmp(&trace[a]).unwrap_or(std::cmp::Ordering::Equal));
    peaks
}
