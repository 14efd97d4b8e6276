use crate::error::{ScrollworkError, ScrollworkResult};

/// A point on the engine clock, in seconds.
///
/// The library never reads a wall clock; every event carries the time at
/// which it was delivered, which keeps evaluation deterministic.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct TimePoint(pub f64);

impl TimePoint {
    pub fn new(secs: f64) -> ScrollworkResult<Self> {
        if !secs.is_finite() {
            return Err(ScrollworkError::validation("TimePoint must be finite"));
        }
        if secs < 0.0 {
            return Err(ScrollworkError::validation("TimePoint must be >= 0"));
        }
        Ok(Self(secs))
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: TimePoint) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

/// The visual pose of a view or content block: what the renderer would
/// write into `opacity` and `transform: translateY(..)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    pub opacity: f64,
    pub translate_y: f64, // px, positive is downward
}

impl Pose {
    pub fn settled() -> Self {
        Self {
            opacity: 1.0,
            translate_y: 0.0,
        }
    }

    /// Fully transparent, pushed down by `rise_px` (the pre-enter pose).
    pub fn lowered(rise_px: f64) -> Self {
        Self {
            opacity: 0.0,
            translate_y: rise_px,
        }
    }

    /// Fully transparent, lifted up by `shift_px` (the post-exit pose).
    pub fn lifted(shift_px: f64) -> Self {
        Self {
            opacity: 0.0,
            translate_y: -shift_px,
        }
    }
}

/// Identifies one observable content block within a view, e.g. `projects/1`.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The path identifying which view is active, e.g. `/projects`.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RouteKey(pub String);

impl RouteKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_point_rejects_negative_and_non_finite() {
        assert!(TimePoint::new(-0.1).is_err());
        assert!(TimePoint::new(f64::NAN).is_err());
        assert!(TimePoint::new(f64::INFINITY).is_err());
        assert!(TimePoint::new(0.0).is_ok());
    }

    #[test]
    fn since_saturates_at_zero() {
        let a = TimePoint(1.0);
        let b = TimePoint(3.0);
        assert_eq!(b.since(a), 2.0);
        assert_eq!(a.since(b), 0.0);
    }

    #[test]
    fn pose_constructors() {
        assert_eq!(Pose::lowered(40.0).translate_y, 40.0);
        assert_eq!(Pose::lifted(30.0).translate_y, -30.0);
        assert_eq!(Pose::settled().opacity, 1.0);
    }
}
