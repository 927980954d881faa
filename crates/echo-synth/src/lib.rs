pub mod config;
pub mod repeat;
pub mod scheduler;
pub mod schematic;
pub mod synthesizer;

pub use config::{BumpShape, NoisePolicy, PlateShaping, SynthConfig};
pub use repeat::ContinuousAdjust;
pub use scheduler::{FrameAction, FrameScheduler, PowerState};
pub use schematic::{MarkerKind, PulseMarker, SchematicAnimation};
pub use synthesizer::{envelope, sample_positions, EchoSynthesizer};
