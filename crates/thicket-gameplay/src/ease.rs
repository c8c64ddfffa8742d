//! Speed easing for motion start/stop.
//!
//! An [`Ease`] produces the scalar multiplier applied to an entity's
//! speed each frame. Acceleration ramps in (and the ramp itself
//! steepens each call), deceleration ramps out, and a full stop snaps
//! the state back to its starting values.

use serde::{Deserialize, Serialize};

/// Default starting multiplier.
pub const EASE_START: f32 = 0.8;
/// Default per-call effect increment at the start of a ramp.
pub const EASE_SLIDE_START: f32 = 0.02;
/// Amount the increment itself grows per accelerate call.
pub const EASE_SLIDE_INCREMENT: f32 = 0.002;

/// Easing state for a single mobile entity.
///
/// Callers must [`Ease::reset`] when transitioning between an
/// accelerating segment and a decelerating one. Calling
/// [`Ease::accelerate`] directly after a deceleration phase without an
/// intervening reset is a precondition violation: the slide value still
/// belongs to the previous ramp and the multiplier jumps
/// discontinuously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ease {
    start: f32,
    effect: f32,
    slide: f32,
    slide_start: f32,
    slide_increment: f32,
}

impl Default for Ease {
    fn default() -> Self {
        Self::new()
    }
}

impl Ease {
    /// Creates an ease with the default curve parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(EASE_START, EASE_SLIDE_START, EASE_SLIDE_INCREMENT)
    }

    /// Creates an ease with custom curve parameters.
    #[must_use]
    pub fn with_params(start: f32, slide_start: f32, slide_increment: f32) -> Self {
        Self {
            start,
            effect: start,
            slide: slide_start,
            slide_start,
            slide_increment,
        }
    }

    /// Current speed multiplier.
    #[must_use]
    pub fn effect(&self) -> f32 {
        self.effect
    }

    /// The resting multiplier that `effect` returns to on reset.
    #[must_use]
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Current per-call increment.
    #[must_use]
    pub fn slide(&self) -> f32 {
        self.slide
    }

    /// Advances the ramp-in: raises `effect` by the current slide, then
    /// steepens the slide. `effect` is capped at 1.0.
    pub fn accelerate(&mut self) {
        self.effect = (self.effect + self.slide).min(1.0);
        self.slide += self.slide_increment;
        debug_assert!(self.effect.is_finite(), "ease effect diverged");
    }

    /// Advances the ramp-out: lowers `effect` by the current slide,
    /// bounded below by the starting multiplier.
    pub fn decelerate(&mut self) {
        self.effect = (self.effect - self.slide).max(self.start);
        debug_assert!(self.effect.is_finite(), "ease effect diverged");
    }

    /// Snaps back to the resting state. Must be called on every full
    /// stop and between accelerating/decelerating segments.
    pub fn reset(&mut self) {
        self.effect = self.start;
        self.slide = self.slide_start;
    }

    /// Entity has no input direction and the ramp has fully wound down.
    #[must_use]
    pub fn stopped(&self, moving: bool) -> bool {
        !moving && self.effect <= self.start
    }

    /// Entity has no input direction but is still carrying speed.
    #[must_use]
    pub fn coming_to_stop(&self, moving: bool) -> bool {
        !moving && self.effect > self.start
    }

    /// Entity has an input direction and has not reached full speed.
    #[must_use]
    pub fn accelerating(&self, moving: bool) -> bool {
        moving && self.effect < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accelerate_strictly_increases_until_cap() {
        let mut ease = Ease::new();
        let mut previous = ease.effect();
        let mut calls = 0;
        while ease.effect() < 1.0 {
            ease.accelerate();
            assert!(ease.effect() > previous || ease.effect() == 1.0);
            assert!(ease.effect() <= 1.0);
            previous = ease.effect();
            calls += 1;
            assert!(calls < 100, "ease never reached full speed");
        }
    }

    #[test]
    fn test_acceleration_steepens() {
        let mut ease = Ease::new();
        ease.accelerate();
        let first_step = ease.effect() - EASE_START;
        let before = ease.effect();
        ease.accelerate();
        let second_step = ease.effect() - before;
        assert!(second_step > first_step);
    }

    #[test]
    fn test_decelerate_bounded_by_start() {
        let mut ease = Ease::new();
        for _ in 0..5 {
            ease.accelerate();
        }
        ease.reset();
        for _ in 0..50 {
            ease.decelerate();
        }
        assert!(ease.effect() >= ease.start());
    }

    #[test]
    fn test_reset_restores_start_values() {
        let mut ease = Ease::new();
        for _ in 0..12 {
            ease.accelerate();
        }
        ease.reset();
        assert_eq!(ease.effect(), EASE_START);
        assert_eq!(ease.slide(), EASE_SLIDE_START);
    }

    #[test]
    fn test_predicates() {
        let mut ease = Ease::new();
        assert!(ease.stopped(false));
        assert!(!ease.coming_to_stop(false));
        assert!(ease.accelerating(true));

        ease.accelerate();
        assert!(ease.coming_to_stop(false));
        assert!(!ease.stopped(false));

        while ease.effect() < 1.0 {
            ease.accelerate();
        }
        assert!(!ease.accelerating(true));
    }

    proptest! {
        #[test]
        fn prop_effect_stays_bounded(ops in proptest::collection::vec(0u8..3, 0..200)) {
            let mut ease = Ease::new();
            for op in ops {
                match op {
                    0 => ease.accelerate(),
                    1 => ease.decelerate(),
                    _ => ease.reset(),
                }
                prop_assert!(ease.effect() >= ease.start());
                prop_assert!(ease.effect() <= 1.0);
                prop_assert!(ease.effect().is_finite());
            }
        }

        #[test]
        fn prop_reset_symmetry(ops in proptest::collection::vec(0u8..2, 0..200)) {
            let mut ease = Ease::new();
            for op in ops {
                if op == 0 {
                    ease.accelerate();
                } else {
                    ease.decelerate();
                }
            }
            ease.reset();
            prop_assert_eq!(ease.effect(), EASE_START);
            prop_assert_eq!(ease.slide(), EASE_SLIDE_START);
        }
    }
}
