use crate::{
    core::{Pose, TimePoint},
    ease::Ease,
    error::{ScrollworkError, ScrollworkResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Pose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            translate_y: <f64 as Lerp>::lerp(&a.translate_y, &b.translate_y, t),
        }
    }
}

/// A single eased interpolation scheduled on the engine clock.
///
/// A tween is data, not a timer: it never fires a callback. Callers sample
/// it at the current time, which is what makes an in-flight animation
/// trivially cancellable (drop the tween, nothing else happens).
#[derive(Clone, Debug)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: TimePoint,
    duration_secs: f64,
    ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(
        from: T,
        to: T,
        start: TimePoint,
        duration_secs: f64,
        ease: Ease,
    ) -> ScrollworkResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ScrollworkError::animation(
                "tween duration_secs must be finite and > 0",
            ));
        }
        Ok(Self {
            from,
            to,
            start,
            duration_secs,
            ease,
        })
    }

    /// Raw progress in [0, 1]; 0 before `start`, 1 after the duration.
    pub fn progress(&self, now: TimePoint) -> f64 {
        (now.since(self.start) / self.duration_secs).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: TimePoint) -> T {
        let te = self.ease.apply(self.progress(now));
        T::lerp(&self.from, &self.to, te)
    }

    pub fn is_done(&self, now: TimePoint) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn end(&self) -> &T {
        &self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: f64) -> TimePoint {
        TimePoint(secs)
    }

    #[test]
    fn rejects_non_positive_duration() {
        assert!(Tween::new(0.0, 1.0, t(0.0), 0.0, Ease::Linear).is_err());
        assert!(Tween::new(0.0, 1.0, t(0.0), -1.0, Ease::Linear).is_err());
        assert!(Tween::new(0.0, 1.0, t(0.0), f64::NAN, Ease::Linear).is_err());
    }

    #[test]
    fn samples_linearly_over_time() {
        let tw = Tween::new(0.0, 10.0, t(1.0), 2.0, Ease::Linear).unwrap();
        assert_eq!(tw.sample(t(0.0)), 0.0); // before start
        assert_eq!(tw.sample(t(1.0)), 0.0);
        assert_eq!(tw.sample(t(2.0)), 5.0);
        assert_eq!(tw.sample(t(3.0)), 10.0);
        assert_eq!(tw.sample(t(99.0)), 10.0); // holds the end value
    }

    #[test]
    fn done_exactly_at_duration() {
        let tw = Tween::new(0.0, 1.0, t(0.0), 0.5, Ease::OutCubic).unwrap();
        assert!(!tw.is_done(t(0.49)));
        assert!(tw.is_done(t(0.5)));
    }

    #[test]
    fn pose_lerp_interpolates_both_fields() {
        let a = Pose::lowered(40.0);
        let b = Pose::settled();
        let mid = Pose::lerp(&a, &b, 0.5);
        assert_eq!(mid.opacity, 0.5);
        assert_eq!(mid.translate_y, 20.0);
    }
}
