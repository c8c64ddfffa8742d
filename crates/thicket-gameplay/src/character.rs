//! Hit points and attack power for damageable entities.

use serde::{Deserialize, Serialize};

/// Combat vitals: hit points, attack power, and a one-shot death latch.
///
/// Invariant: `0 <= hp <= max_hp` at all times. Reaching zero flips the
/// latch exactly once; damage dealt after that is a no-op. The entity
/// is never removed here — despawning is the scene's decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    hp: i32,
    max_hp: i32,
    ap: i32,
    down: bool,
}

impl Vitals {
    /// Creates vitals at full health.
    #[must_use]
    pub fn new(max_hp: i32, ap: i32) -> Self {
        debug_assert!(max_hp > 0, "max_hp must be positive");
        Self {
            hp: max_hp,
            max_hp,
            ap,
            down: false,
        }
    }

    /// Creates vitals with a starting value below the maximum.
    #[must_use]
    pub fn with_hp(hp: i32, max_hp: i32, ap: i32) -> Self {
        debug_assert!(max_hp > 0, "max_hp must be positive");
        Self {
            hp: hp.clamp(1, max_hp),
            max_hp,
            ap,
            down: false,
        }
    }

    /// Current hit points.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Attack power.
    #[must_use]
    pub const fn ap(&self) -> i32 {
        self.ap
    }

    /// Whether the death latch has fired.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        self.down
    }

    /// Current health as a fraction of maximum.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }

    /// Applies damage, clamped at zero. Returns `true` exactly once,
    /// on the hit that brings hit points to zero.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.down {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        debug_assert!(self.hp >= 0 && self.hp <= self.max_hp);
        if self.hp == 0 {
            self.down = true;
            return true;
        }
        false
    }

    /// Restores a single hit point, up to the maximum.
    pub fn heal(&mut self) {
        if self.hp < self.max_hp {
            self.hp += 1;
        }
    }

    /// Returns to full health and clears the death latch.
    pub fn restore(&mut self) {
        self.hp = self.max_hp;
        self.down = false;
    }
}
