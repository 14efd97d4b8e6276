use crate::{
    core::{Pose, TimePoint},
    ease::Ease,
    error::{ScrollworkError, ScrollworkResult},
    tween::Tween,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RevealState {
    Hidden,
    Visible,
}

/// One-shot visibility latch for a content block.
///
/// The first intersection ratio at or above the threshold flips the block
/// `Hidden → Visible` and starts the enter animation. The flip is
/// irreversible for the lifetime of the controller; leaving and re-entering
/// the viewport replays nothing. A freshly mounted view gets fresh
/// controllers, which is what makes the animation play again per visit.
#[derive(Clone, Debug)]
pub struct RevealController {
    state: RevealState,
    threshold: f64,
    rise_px: f64,
    duration_secs: f64,
    enter: Option<Tween<Pose>>,
}

impl RevealController {
    pub fn new(threshold: f64, rise_px: f64, duration_secs: f64) -> ScrollworkResult<Self> {
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ScrollworkError::validation(
                "reveal threshold must be in (0, 1]",
            ));
        }
        if !rise_px.is_finite() {
            return Err(ScrollworkError::validation("reveal rise_px must be finite"));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ScrollworkError::validation(
                "reveal duration_secs must be finite and > 0",
            ));
        }
        Ok(Self {
            state: RevealState::Hidden,
            threshold,
            rise_px,
            duration_secs,
            enter: None,
        })
    }

    /// A controller that was never hidden: used for non-reveal blocks and
    /// for the degraded mode where intersection observation is unavailable.
    pub fn visible_from_start() -> Self {
        Self {
            state: RevealState::Visible,
            threshold: 1.0,
            rise_px: 0.0,
            duration_secs: 1.0,
            enter: None,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Handle one intersection event. Returns `true` only on the single
    /// event that flips the latch.
    pub fn observe(&mut self, now: TimePoint, ratio: f64) -> bool {
        if self.state == RevealState::Visible {
            return false;
        }
        if !ratio.is_finite() || ratio < self.threshold {
            return false;
        }
        self.state = RevealState::Visible;
        // Threshold and duration were validated at construction.
        self.enter = Tween::new(
            Pose::lowered(self.rise_px),
            Pose::settled(),
            now,
            self.duration_secs,
            Ease::OutCubic,
        )
        .ok();
        true
    }

    pub fn pose(&self, now: TimePoint) -> Pose {
        match (self.state, &self.enter) {
            (RevealState::Hidden, _) => Pose::lowered(self.rise_px),
            (RevealState::Visible, Some(tween)) => tween.sample(now),
            (RevealState::Visible, None) => Pose::settled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: f64) -> TimePoint {
        TimePoint(secs)
    }

    fn controller() -> RevealController {
        RevealController::new(0.3, 40.0, 0.6).unwrap()
    }

    #[test]
    fn starts_hidden_and_lowered() {
        let c = controller();
        assert_eq!(c.state(), RevealState::Hidden);
        assert_eq!(c.pose(t(0.0)), Pose::lowered(40.0));
    }

    #[test]
    fn sub_threshold_ratios_do_not_reveal() {
        let mut c = controller();
        assert!(!c.observe(t(0.0), 0.0));
        assert!(!c.observe(t(0.1), 0.29));
        assert_eq!(c.state(), RevealState::Hidden);
    }

    #[test]
    fn flips_exactly_once() {
        let mut c = controller();
        assert!(c.observe(t(1.0), 0.3));
        // Re-entering the viewport, or any later event, has no effect.
        assert!(!c.observe(t(2.0), 1.0));
        assert!(!c.observe(t(3.0), 0.0));
        assert!(!c.observe(t(4.0), 0.9));
        assert_eq!(c.state(), RevealState::Visible);
    }

    #[test]
    fn enter_animation_runs_from_flip_time() {
        let mut c = controller();
        c.observe(t(1.0), 0.5);
        assert_eq!(c.pose(t(1.0)), Pose::lowered(40.0));
        let settled = c.pose(t(1.6));
        assert_eq!(settled, Pose::settled());
        let mid = c.pose(t(1.3));
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(mid.translate_y > 0.0 && mid.translate_y < 40.0);
    }

    #[test]
    fn never_observed_stays_hidden() {
        let c = controller();
        assert_eq!(c.pose(t(100.0)), Pose::lowered(40.0));
    }

    #[test]
    fn visible_from_start_is_settled() {
        let c = RevealController::visible_from_start();
        assert_eq!(c.state(), RevealState::Visible);
        assert_eq!(c.pose(t(0.0)), Pose::settled());
    }

    #[test]
    fn nan_ratio_is_ignored() {
        let mut c = controller();
        assert!(!c.observe(t(0.0), f64::NAN));
        assert_eq!(c.state(), RevealState::Hidden);
    }
}
