//! The companion NPC and its fear meter.
//!
//! The companion picks one of two top-level behaviors each frame:
//! calm (hysteria at zero) makes it follow the player; any hysteria
//! makes it wander on a randomized refocus timer. Fear is raised by
//! hostile shamblers and lowered when the player calms it, and the
//! companion's speed is recomputed from hysteria on every change so
//! a calm companion visibly slows down.

use serde::{Deserialize, Serialize};
use tracing::debug;

use thicket_common::{EntityId, Rect, Vec2};

use crate::collision::CollisionIndex;
use crate::config::BehaviorConfig;
use crate::events::{EventBus, GameEvent};
use crate::graphics::Appearance;
use crate::motion::Body;
use crate::rng::Dice;

/// Base sprite key for the companion.
pub const COMPANION_GFX: &str = "scamp";

/// Bounded fear counter.
///
/// Invariant: `0 <= hysteria <= max` after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FearMeter {
    hysteria: i32,
    max: i32,
}

impl FearMeter {
    /// Creates a meter pegged at its ceiling.
    #[must_use]
    pub fn new(max: i32) -> Self {
        debug_assert!(max > 0, "fear ceiling must be positive");
        Self { hysteria: max, max }
    }

    /// Current hysteria.
    #[must_use]
    pub const fn hysteria(&self) -> i32 {
        self.hysteria
    }

    /// The ceiling.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Whether the meter has fully drained.
    #[must_use]
    pub const fn is_calm(&self) -> bool {
        self.hysteria <= 0
    }

    /// Adds fear, clamped to the ceiling.
    pub fn raise(&mut self, amount: i32) {
        self.hysteria = (self.hysteria + amount).clamp(0, self.max);
    }

    /// Removes fear, clamped at zero. A negative amount adds fear.
    pub fn lower(&mut self, amount: i32) {
        self.hysteria = (self.hysteria - amount).clamp(0, self.max);
    }

    /// Pegs the meter back at its ceiling.
    pub fn maximize(&mut self) {
        self.hysteria = self.max;
    }
}

/// The companion NPC.
#[derive(Debug)]
pub struct Companion {
    body: Body,
    fear: FearMeter,
    appearance: Appearance,
    start_position: Vec2,
    focus_index: u32,
    attention_threshold: u32,
    attention_range: (u32, u32),
    calm_roll: (i32, i32),
    speed_offset: i32,
    made_first_move: bool,
}

impl Companion {
    /// Creates the companion with the given hitbox.
    #[must_use]
    pub fn new(hitbox: Rect, config: &BehaviorConfig) -> Self {
        let fear = FearMeter::new(config.max_hysteria);
        let speed = (fear.hysteria() + config.companion_speed_offset) as f32;
        let body = Body::new(EntityId::new(), hitbox, speed);
        let start_position = body.position();
        Self {
            body,
            fear,
            appearance: Appearance::new(COMPANION_GFX),
            start_position,
            // Start partway into the attention window so the companion
            // does not idle at spawn.
            focus_index: 50,
            attention_threshold: 96,
            attention_range: config.attention_range,
            calm_roll: config.calm_roll,
            speed_offset: config.companion_speed_offset,
            made_first_move: false,
        }
    }

    /// Entity ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.body.id()
    }

    /// Physical body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Current hitbox.
    #[must_use]
    pub const fn hitbox(&self) -> &Rect {
        self.body.hitbox()
    }

    /// Current position (hitbox top-left).
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// The fear meter.
    #[must_use]
    pub const fn fear(&self) -> &FearMeter {
        &self.fear
    }

    /// Frames spent on the current wander heading.
    #[must_use]
    pub const fn focus_index(&self) -> u32 {
        self.focus_index
    }

    /// Frames until the next scheduled refocus.
    #[must_use]
    pub const fn attention_threshold(&self) -> u32 {
        self.attention_threshold
    }

    /// Current sprite selection.
    #[must_use]
    pub const fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Mutable sprite selection, for cache refreshes.
    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    /// Runs one frame of companion behavior.
    pub fn update(
        &mut self,
        dt: f32,
        player_position: Vec2,
        player_down: bool,
        index: &CollisionIndex,
        dice: &mut dyn Dice,
        events: &EventBus,
    ) {
        if player_down {
            self.body.force_move(self.start_position);
            self.fear.maximize();
            self.recouple_speed();
            return;
        }

        if !self.made_first_move {
            self.body.direction = Vec2::new(1.0, 1.0).normalized();
            self.body.forward = self.body.direction;
            self.body.walk(dt, index, None);
            self.made_first_move = true;
        } else if self.fear.is_calm() {
            self.body.walk_towards(player_position, dt, index);
        } else {
            // Hysterical: wander, re-aiming every attention window.
            if self.focus_index >= self.attention_threshold {
                self.refocus(dice);
            } else {
                self.focus_index += 1;
            }

            let before = self.body.position();
            if !self.body.direction.is_zero() {
                self.body.forward = self.body.direction;
            }
            self.body.walk(dt, index, None);

            if !self.body.direction.is_zero() && self.body.position() == before {
                // Wedged against an obstacle: re-aim now instead of
                // waiting out the attention window.
                debug!(companion = self.id().raw(), "companion is stuck");
                events.publish(GameEvent::CompanionStuck { entity: self.id() });
                self.refocus(dice);
            }
        }
    }

    /// Picks a new random heading and attention window.
    fn refocus(&mut self, dice: &mut dyn Dice) {
        debug!(companion = self.id().raw(), "companion refocusing");
        let mut direction = Vec2::new(dice.roll(-1, 1) as f32, dice.roll(-1, 1) as f32);
        if !direction.is_zero() {
            direction = direction.normalized();
        }
        self.body.direction = direction;

        let (lo, hi) = self.attention_range;
        self.attention_threshold = dice.roll(lo as i32, hi as i32) as u32;
        self.focus_index = 0;
    }

    /// The player soothes the companion: hysteria drops by a random
    /// amount (occasionally rises; being soothed is not a sure thing).
    pub fn calm(&mut self, dice: &mut dyn Dice, events: &EventBus) {
        let roll = dice.roll(self.calm_roll.0, self.calm_roll.1);
        self.fear.lower(roll);
        self.recouple_speed();
        events.publish(GameEvent::CompanionCalmed {
            hysteria: self.fear.hysteria(),
        });
    }

    /// A hostile shambler frightens the companion.
    pub fn get_scared(&mut self, amount: i32, events: &EventBus) {
        self.fear.raise(amount);
        self.recouple_speed();
        events.publish(GameEvent::CompanionScared {
            amount,
            hysteria: self.fear.hysteria(),
        });
    }

    /// Speed tracks hysteria: the companion slows down as it calms.
    fn recouple_speed(&mut self) {
        self.body.max_speed = (self.fear.hysteria() + self.speed_offset) as f32;
    }
}
