use crate::{
    core::{Pose, RouteKey, TimePoint},
    ease::Ease,
    error::{ScrollworkError, ScrollworkResult},
    registry::{ViewRegistry, ViewSpec},
    tween::Tween,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ViewPhase {
    /// Pre-mount pose; left for `Animate` in the same event that mounts it.
    Initial,
    /// Entering or settled.
    Animate,
    /// Playing the departure animation; removed when it elapses.
    Exit,
    /// Terminal; the subtree is discarded.
    Removed,
}

/// One mounted view instance. Every activation of a route constructs a new
/// slot, so the enter animation replays even for a previously visited path.
#[derive(Clone, Debug)]
pub struct ViewSlot {
    key: RouteKey,
    epoch: u64,
    phase: ViewPhase,
    motion: Tween<Pose>,
    duration_secs: f64,
    shift_px: f64,
}

impl ViewSlot {
    fn mount(
        spec: &ViewSpec,
        now: TimePoint,
        epoch: u64,
        shift_px: f64,
    ) -> ScrollworkResult<Self> {
        Ok(Self {
            key: spec.key.clone(),
            epoch,
            phase: ViewPhase::Initial,
            motion: Tween::new(
                Pose::lowered(shift_px),
                Pose::settled(),
                now,
                spec.enter_duration_secs,
                Ease::InOutQuad,
            )?,
            duration_secs: spec.enter_duration_secs,
            shift_px,
        })
    }

    fn begin_animate(&mut self) {
        self.phase = ViewPhase::Animate;
    }

    /// Retarget the motion from wherever it currently is toward the exit
    /// pose. Preempting an unfinished enter therefore never snaps.
    fn begin_exit(&mut self, now: TimePoint) -> ScrollworkResult<()> {
        let from = self.motion.sample(now);
        self.motion = Tween::new(
            from,
            Pose::lifted(self.shift_px),
            now,
            self.duration_secs,
            Ease::InOutQuad,
        )?;
        self.phase = ViewPhase::Exit;
        Ok(())
    }

    fn exit_done(&self, now: TimePoint) -> bool {
        self.phase == ViewPhase::Exit && self.motion.is_done(now)
    }

    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn pose(&self, now: TimePoint) -> Pose {
        self.motion.sample(now)
    }
}

/// Sequences enter/exit animations across navigations.
///
/// At any instant exactly one slot is authoritative (`current`); at most
/// one more is playing its exit. A navigation that arrives while an exit
/// is still in flight discards that exit immediately — latest wins, no
/// queueing of stale transitions — and the epoch stamped on each slot
/// keeps anything that outlived its slot from acting on the new state.
#[derive(Debug)]
pub struct RouteTransitionCoordinator {
    current: Option<ViewSlot>,
    exiting: Option<ViewSlot>,
    epoch: u64,
    shift_px: f64,
}

impl RouteTransitionCoordinator {
    pub fn new(shift_px: f64) -> ScrollworkResult<Self> {
        if !shift_px.is_finite() {
            return Err(ScrollworkError::validation("shift_px must be finite"));
        }
        Ok(Self {
            current: None,
            exiting: None,
            epoch: 0,
            shift_px,
        })
    }

    /// Activate `key`. Resolution happens before any state changes, so a
    /// routing miss leaves the coordinator untouched. Navigating to the
    /// already-current key is not a RouteKey change and does nothing.
    #[tracing::instrument(skip(self, registry, key), fields(key = %key))]
    pub fn navigate(
        &mut self,
        now: TimePoint,
        key: RouteKey,
        registry: &ViewRegistry,
    ) -> ScrollworkResult<ViewSpec> {
        let spec = registry.resolve(&key)?;

        if let Some(current) = &self.current {
            if *current.key() == key {
                return Ok(spec);
            }
        }

        self.epoch += 1;

        if let Some(stale) = self.exiting.take() {
            tracing::debug!(key = %stale.key(), epoch = stale.epoch(), "in-flight exit preempted");
        }
        if let Some(mut outgoing) = self.current.take() {
            outgoing.begin_exit(now)?;
            tracing::debug!(key = %outgoing.key(), "view exiting");
            self.exiting = Some(outgoing);
        }

        let mut slot = ViewSlot::mount(&spec, now, self.epoch, self.shift_px)?;
        slot.begin_animate();
        tracing::debug!(epoch = self.epoch, "view mounted");
        self.current = Some(slot);

        Ok(spec)
    }

    /// Advance time: discard the exiting slot once its animation elapsed.
    pub fn tick(&mut self, now: TimePoint) {
        if let Some(slot) = &mut self.exiting {
            if slot.exit_done(now) {
                slot.phase = ViewPhase::Removed;
                tracing::debug!(key = %slot.key(), "view removed");
                self.exiting = None;
            }
        }
    }

    pub fn current(&self) -> Option<&ViewSlot> {
        self.current.as_ref()
    }

    pub fn exiting(&self) -> Option<&ViewSlot> {
        self.exiting.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_transitioning(&self, now: TimePoint) -> bool {
        self.exiting.is_some()
            || self
                .current
                .as_ref()
                .is_some_and(|slot| !slot.motion.is_done(now))
    }
}
