use echo_core::EchoResult;
use serde::{Deserialize, Serialize};

use crate::surface::Rgba;

/// Visual parameters for the trace renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Screen colour under everything.
    pub background: Rgba,
    /// Beam colour. Alpha is replaced by the brightness-derived opacity.
    pub trace_color: Rgba,
    /// Beam stroke width in pixels.
    pub trace_width: f32,
    pub grid_color: Rgba,
    pub grid_width: f32,
    /// Every major ruler line is drawn this wide.
    pub major_grid_width: f32,
    /// Fill of the shaded ruler cells, before grid opacity.
    pub checker_color: Rgba,
    pub cursor_color: Rgba,
    pub cursor_width: f32,
    /// Trace baseline as a fraction of surface height from the top. Range: 0.0..1.0
    pub baseline_ratio: f32,
    /// Full-scale echo height as a fraction of surface height. Range: 0.0..1.0
    pub amplitude_ratio: f32,
    /// Amplitude shrink per scale step above 1.
    pub scale_correction: f32,
    /// Vertical cells in the task 1 ruler.
    pub ruler_rows: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgba::BLACK,
            trace_color: Rgba::rgb(0.25, 1.0, 0.35),
            trace_width: 2.0,
            grid_color: Rgba::rgb(0.55, 0.6, 0.55),
            grid_width: 1.0,
            major_grid_width: 2.0,
            checker_color: Rgba::rgba(0.3, 0.35, 0.3, 0.35),
            cursor_color: Rgba::rgb(1.0, 0.85, 0.2),
            cursor_width: 1.5,
            baseline_ratio: 0.8,
            amplitude_ratio: 0.7,
            scale_correction: 0.01,
            ruler_rows: 10,
        }
    }
}

impl RenderSettings {
    pub fn from_json(json: &str) -> EchoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_keeps_defaults() {
        let s = RenderSettings::from_json(r#"{ "trace_width": 3.0 }"#).unwrap();
        assert_eq!(s.trace_width, 3.0);
        assert_eq!(s.baseline_ratio, 0.8);
        assert_eq!(s.cursor_color, RenderSettings::default().cursor_color);
    }
}
