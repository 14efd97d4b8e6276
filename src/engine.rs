use std::collections::BTreeMap;

use crate::{
    config::EngineConfig,
    core::{BlockId, Pose, RouteKey, TimePoint},
    error::ScrollworkResult,
    parallax::{BackdropSurface, ParallaxTracker, ScrollSubscription},
    registry::{ViewRegistry, ViewSpec},
    reveal::{RevealController, RevealState},
    route::{RouteTransitionCoordinator, ViewPhase},
};

/// A viewport or navigation event, delivered in order with the time at
/// which it occurred.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum UiEvent {
    Scroll { y: f64 },
    Intersection { block: BlockId, ratio: f64 },
    Navigate { path: String },
    /// Pure passage of time, e.g. to let an exit animation finish.
    Tick,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct ViewSnapshot {
    pub key: RouteKey,
    pub phase: ViewPhase,
    pub pose: Pose,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub state: RevealState,
    pub pose: Pose,
}

/// Everything a renderer would need for one frame, sampled at `at`.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameSnapshot {
    pub at: TimePoint,
    pub backdrop_offset: f64,
    pub views: Vec<ViewSnapshot>,
    pub blocks: Vec<BlockSnapshot>,
}

/// Run-to-completion orchestrator. Owns the one backdrop surface, the
/// route coordinator, and the reveal controllers of the currently mounted
/// view; consumes events strictly in delivery order on a single thread.
pub struct Engine<S: BackdropSurface> {
    cfg: EngineConfig,
    registry: ViewRegistry,
    backdrop: S,
    parallax: Option<(ParallaxTracker, ScrollSubscription)>,
    coordinator: RouteTransitionCoordinator,
    reveals: BTreeMap<BlockId, RevealController>,
}

impl<S: BackdropSurface> Engine<S> {
    pub fn new(
        cfg: EngineConfig,
        registry: ViewRegistry,
        backdrop: S,
        start_path: impl Into<String>,
    ) -> ScrollworkResult<Self> {
        cfg.validate()?;

        let parallax = if cfg.capabilities.scroll {
            Some(ParallaxTracker::bind(cfg.parallax_factor)?)
        } else {
            None
        };

        let mut coordinator = RouteTransitionCoordinator::new(cfg.route_shift_px)?;
        let spec = coordinator.navigate(
            TimePoint::zero(),
            RouteKey::new(start_path.into()),
            &registry,
        )?;

        let mut engine = Self {
            cfg,
            registry,
            backdrop,
            parallax,
            coordinator,
            reveals: BTreeMap::new(),
        };
        engine.mount_blocks(&spec)?;
        Ok(engine)
    }

    /// Replace the reveal controllers with fresh ones for `spec`. The old
    /// view's controllers are dropped here, which releases their
    /// observation: later intersection events for those blocks fall
    /// through without effect.
    fn mount_blocks(&mut self, spec: &ViewSpec) -> ScrollworkResult<()> {
        self.reveals.clear();
        for block in &spec.blocks {
            let ctrl = if block.reveal && self.cfg.capabilities.intersection {
                RevealController::new(
                    self.cfg.reveal_threshold,
                    self.cfg.reveal_rise_px,
                    self.cfg.reveal_duration_secs,
                )?
            } else {
                RevealController::visible_from_start()
            };
            self.reveals.insert(block.id.clone(), ctrl);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn handle(&mut self, now: TimePoint, event: UiEvent) -> ScrollworkResult<()> {
        // Every event advances the clock for in-flight exits first.
        self.coordinator.tick(now);

        match event {
            UiEvent::Scroll { y } => {
                if let Some((tracker, _sub)) = &mut self.parallax {
                    if let Some(offset) = tracker.on_scroll(y) {
                        self.backdrop.apply_offset(offset);
                    }
                }
            }
            UiEvent::Intersection { block, ratio } => {
                // A miss here means the block unmounted; the event is stale.
                if let Some(ctrl) = self.reveals.get_mut(&block) {
                    if ctrl.observe(now, ratio) {
                        tracing::debug!(%block, "block revealed");
                    }
                }
            }
            UiEvent::Navigate { path } => {
                let before = self.coordinator.epoch();
                let spec = self
                    .coordinator
                    .navigate(now, RouteKey::new(path), &self.registry)?;
                if self.coordinator.epoch() != before {
                    self.mount_blocks(&spec)?;
                }
            }
            UiEvent::Tick => {}
        }

        Ok(())
    }

    pub fn snapshot(&self, now: TimePoint) -> FrameSnapshot {
        let mut views = Vec::with_capacity(2);
        if let Some(slot) = self.coordinator.exiting() {
            views.push(ViewSnapshot {
                key: slot.key().clone(),
                phase: slot.phase(),
                pose: slot.pose(now),
            });
        }
        if let Some(slot) = self.coordinator.current() {
            views.push(ViewSnapshot {
                key: slot.key().clone(),
                phase: slot.phase(),
                pose: slot.pose(now),
            });
        }

        let blocks = self
            .reveals
            .iter()
            .map(|(id, ctrl)| BlockSnapshot {
                id: id.clone(),
                state: ctrl.state(),
                pose: ctrl.pose(now),
            })
            .collect();

        FrameSnapshot {
            at: now,
            backdrop_offset: self
                .parallax
                .as_ref()
                .map_or(0.0, |(tracker, _)| tracker.offset()),
            views,
            blocks,
        }
    }

    /// Tear down the scroll subscription. Scroll events delivered after
    /// this point leave the backdrop untouched.
    pub fn detach_parallax(&mut self) {
        self.parallax = None;
    }

    pub fn backdrop(&self) -> &S {
        &self.backdrop
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn current_route(&self) -> Option<&RouteKey> {
        self.coordinator.current().map(|slot| slot.key())
    }

    pub fn is_transitioning(&self, now: TimePoint) -> bool {
        self.coordinator.is_transitioning(now)
    }
}
