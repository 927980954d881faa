pub mod error;
pub mod geometry;
pub mod knob;
pub mod scene;

pub use error::{EchoError, EchoResult};
pub use geometry::{reflector_offsets, Shape};
pub use knob::{Knob, RotaryInput};
pub use scene::{
    CylinderParams, Material, MeasuredDistance, ObjectParams, PlateParams, PlateWidth, Scene,
    SceneParameter, Task,
};
