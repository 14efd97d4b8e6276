use std::path::Path;

use crate::{
    config::EngineConfig,
    core::TimePoint,
    engine::{Engine, FrameSnapshot, UiEvent},
    error::{ScrollworkError, ScrollworkResult},
    parallax::CssBackdrop,
    registry::ViewRegistry,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimedEvent {
    /// Seconds on the engine clock at which the event is delivered.
    pub at: f64,
    pub event: UiEvent,
}

/// A recorded session against the built-in site: where it starts and every
/// viewport/navigation event with its timestamp. Replay is deterministic,
/// so the same script always produces the same snapshots.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Script {
    pub start_path: String,
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl Script {
    pub fn from_path(path: &Path) -> ScrollworkResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ScrollworkError::script(format!("read '{}': {e}", path.display())))?;
        let script: Script = serde_json::from_str(&raw)
            .map_err(|e| ScrollworkError::script(format!("parse '{}': {e}", path.display())))?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.start_path.trim().is_empty() {
            return Err(ScrollworkError::script("start_path must be non-empty"));
        }
        self.config.validate()?;
        let mut prev = 0.0f64;
        for (i, timed) in self.events.iter().enumerate() {
            if !timed.at.is_finite() || timed.at < 0.0 {
                return Err(ScrollworkError::script(format!(
                    "event {i} has an invalid timestamp"
                )));
            }
            if timed.at < prev {
                return Err(ScrollworkError::script(format!(
                    "event {i} is out of order (timestamps must be non-decreasing)"
                )));
            }
            prev = timed.at;
        }
        Ok(())
    }

    /// Replay the whole script, returning a snapshot taken after each
    /// event is processed.
    pub fn replay(&self) -> ScrollworkResult<Vec<FrameSnapshot>> {
        self.validate()?;
        let mut engine = self.engine()?;
        let mut frames = Vec::with_capacity(self.events.len());
        for timed in &self.events {
            let now = TimePoint::new(timed.at)?;
            engine.handle(now, timed.event.clone())?;
            frames.push(engine.snapshot(now));
        }
        Ok(frames)
    }

    /// Replay events up to and including `at`, then sample one snapshot
    /// at `at`.
    pub fn replay_until(&self, at: TimePoint) -> ScrollworkResult<FrameSnapshot> {
        self.validate()?;
        let mut engine = self.engine()?;
        for timed in self.events.iter().filter(|e| e.at <= at.seconds()) {
            engine.handle(TimePoint::new(timed.at)?, timed.event.clone())?;
        }
        engine.handle(at, UiEvent::Tick)?;
        Ok(engine.snapshot(at))
    }

    fn engine(&self) -> ScrollworkResult<Engine<CssBackdrop>> {
        Engine::new(
            self.config,
            ViewRegistry::site(),
            CssBackdrop::default(),
            self.start_path.clone(),
        )
    }
}
