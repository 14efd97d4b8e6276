use std::{cell::Cell, rc::Rc};

use crate::error::{ScrollworkError, ScrollworkResult};

/// Derive the backdrop offset for a scroll position. Pure; the apply step
/// goes through [`BackdropSurface`] so this stays testable without any
/// rendering target.
pub fn derive_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y.max(0.0) * factor
}

/// The single surface the parallax offset is written to. Exactly one
/// implementor is bound per engine; each write fully overwrites the prior
/// transform, so last-write-wins is safe.
pub trait BackdropSurface {
    fn apply_offset(&mut self, offset_px: f64);
}

/// A backdrop that renders its transform as a CSS-style string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CssBackdrop {
    pub transform: String,
    pub writes: usize,
}

impl BackdropSurface for CssBackdrop {
    fn apply_offset(&mut self, offset_px: f64) {
        self.transform = format!("translateY({offset_px}px)");
        self.writes += 1;
    }
}

/// RAII guard for a scroll subscription. Dropping it releases the
/// subscription; events delivered afterwards have no observable effect.
#[derive(Debug)]
pub struct ScrollSubscription {
    active: Rc<Cell<bool>>,
}

impl ScrollSubscription {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// Derives a parallax offset from every scroll event and remembers the
/// last value written. Owns nothing but the derivation; the engine routes
/// the returned offset to its one [`BackdropSurface`].
#[derive(Debug)]
pub struct ParallaxTracker {
    factor: f64,
    offset: f64,
    active: Rc<Cell<bool>>,
}

impl ParallaxTracker {
    /// Acquire the scroll subscription. The returned guard must stay alive
    /// for scroll events to have effect; dropping it is the release.
    pub fn bind(factor: f64) -> ScrollworkResult<(Self, ScrollSubscription)> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(ScrollworkError::validation(
                "parallax factor must be finite and >= 0",
            ));
        }
        let active = Rc::new(Cell::new(true));
        let tracker = Self {
            factor,
            offset: 0.0,
            active: Rc::clone(&active),
        };
        Ok((tracker, ScrollSubscription { active }))
    }

    /// Handle one scroll event. Returns the offset to apply, or `None`
    /// once the subscription has been released.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<f64> {
        if !self.active.get() {
            return None;
        }
        self.offset = derive_offset(scroll_y, self.factor);
        Some(self.offset)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_factor_times_scroll() {
        assert_eq!(derive_offset(100.0, 0.3), 30.0);
        assert_eq!(derive_offset(200.0, 0.3), 60.0);
        assert_eq!(derive_offset(0.0, 0.3), 0.0);
    }

    #[test]
    fn negative_scroll_clamps_to_zero() {
        assert_eq!(derive_offset(-50.0, 0.3), 0.0);
    }

    #[test]
    fn last_write_wins() {
        let (mut tracker, _sub) = ParallaxTracker::bind(0.3).unwrap();
        tracker.on_scroll(100.0);
        tracker.on_scroll(40.0);
        assert_eq!(tracker.offset(), 12.0);
    }

    #[test]
    fn released_subscription_stops_delivery() {
        let (mut tracker, sub) = ParallaxTracker::bind(0.3).unwrap();
        assert_eq!(tracker.on_scroll(100.0), Some(30.0));
        drop(sub);
        assert_eq!(tracker.on_scroll(500.0), None);
        // The last applied value is untouched.
        assert_eq!(tracker.offset(), 30.0);
    }

    #[test]
    fn rejects_bad_factor() {
        assert!(ParallaxTracker::bind(-1.0).is_err());
        assert!(ParallaxTracker::bind(f64::NAN).is_err());
    }

    #[test]
    fn css_backdrop_formats_transform() {
        let mut bg = CssBackdrop::default();
        bg.apply_offset(30.0);
        assert_eq!(bg.transform, "translateY(30px)");
        assert_eq!(bg.writes, 1);
    }
}
