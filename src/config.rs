use crate::error::{ScrollworkError, ScrollworkResult};

/// Which viewport observations the host environment can deliver.
///
/// When intersection observation is unavailable the engine constructs
/// content blocks already visible instead of leaving them stuck hidden;
/// when scroll observation is unavailable the backdrop simply never moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ViewportCapabilities {
    pub scroll: bool,
    pub intersection: bool,
}

impl Default for ViewportCapabilities {
    fn default() -> Self {
        Self {
            scroll: true,
            intersection: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backdrop offset per scroll px.
    pub parallax_factor: f64,
    /// Intersection ratio at which a block reveals.
    pub reveal_threshold: f64,
    /// Duration of a block's enter animation, seconds.
    pub reveal_duration_secs: f64,
    /// How far below its resting place a hidden block sits, px.
    pub reveal_rise_px: f64,
    /// Vertical travel of view enter/exit animations, px.
    pub route_shift_px: f64,
    pub capabilities: ViewportCapabilities,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallax_factor: 0.3,
            reveal_threshold: 0.3,
            reveal_duration_secs: 0.6,
            reveal_rise_px: 40.0,
            route_shift_px: 30.0,
            capabilities: ViewportCapabilities::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> ScrollworkResult<()> {
        if !self.parallax_factor.is_finite() || self.parallax_factor < 0.0 {
            return Err(ScrollworkError::validation(
                "parallax_factor must be finite and >= 0",
            ));
        }
        if !self.reveal_threshold.is_finite()
            || self.reveal_threshold <= 0.0
            || self.reveal_threshold > 1.0
        {
            return Err(ScrollworkError::validation(
                "reveal_threshold must be in (0, 1]",
            ));
        }
        if !self.reveal_duration_secs.is_finite() || self.reveal_duration_secs <= 0.0 {
            return Err(ScrollworkError::validation(
                "reveal_duration_secs must be finite and > 0",
            ));
        }
        if !self.reveal_rise_px.is_finite() {
            return Err(ScrollworkError::validation("reveal_rise_px must be finite"));
        }
        if !self.route_shift_px.is_finite() {
            return Err(ScrollworkError::validation("route_shift_px must be finite"));
        }
        Ok(())
    }
}
