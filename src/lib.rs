#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod ease;
pub mod engine;
pub mod error;
pub mod parallax;
pub mod registry;
pub mod reveal;
pub mod route;
pub mod script;
pub mod tween;

pub use config::{EngineConfig, ViewportCapabilities};
pub use core::{BlockId, Pose, RouteKey, TimePoint};
pub use ease::Ease;
pub use engine::{Engine, FrameSnapshot, UiEvent};
pub use error::{ScrollworkError, ScrollworkResult};
pub use parallax::{BackdropSurface, CssBackdrop, ParallaxTracker, derive_offset};
pub use registry::{ViewRegistry, ViewSpec};
pub use reveal::{RevealController, RevealState};
pub use route::{RouteTransitionCoordinator, ViewPhase};
pub use script::{Script, TimedEvent};
pub use tween::{Lerp, Tween};
