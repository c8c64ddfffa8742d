//! The shambler: scenery that hunts.
//!
//! A shambler looks like a harmless prop until the player wanders into
//! its vision rect. From then on it is a coin flip away from coming
//! alive and chasing, dealing contact damage to the player and
//! terrorizing the companion, until the player escapes its
//! (continuously re-centered) vision and it settles back down.

use serde::{Deserialize, Serialize};
use tracing::debug;

use thicket_common::{EntityId, Rect, Vec2};

use crate::animation::WalkAnimation;
use crate::character::Vitals;
use crate::collision::CollisionIndex;
use crate::companion::Companion;
use crate::config::BehaviorConfig;
use crate::events::{EventBus, GameEvent};
use crate::graphics::Appearance;
use crate::motion::Body;
use crate::player::Player;
use crate::rng::Dice;

/// Base sprite key for a dormant shambler.
pub const SHAMBLER_GFX: &str = "shambler";
/// Sprite key prefix while awake.
pub const SHAMBLER_MONSTER_GFX: &str = "shambler-monster";

/// Behavior state of a shambler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShamblerState {
    /// Standing still, indistinguishable from scenery
    Dormant,
    /// Awake and chasing the player
    Hostile,
}

/// A tree monster NPC.
#[derive(Debug)]
pub struct Shambler {
    body: Body,
    vitals: Vitals,
    state: ShamblerState,
    vision: Rect,
    player_near: bool,
    wake_odds: (u32, u32),
    vision_width_factor: f32,
    vision_height_factor: f32,
    contact_fear: i32,
    ambient_fear: i32,
    appearance: Appearance,
    walk_animation: WalkAnimation,
}

impl Shambler {
    /// Creates a dormant shambler with the given hitbox.
    #[must_use]
    pub fn new(hitbox: Rect, config: &BehaviorConfig) -> Self {
        let body = Body::new(EntityId::new(), hitbox, config.shambler_speed);
        let vision = inflate_vision(
            &hitbox,
            config.vision_width_factor,
            config.vision_height_factor,
        );
        Self {
            body,
            vitals: Vitals::new(config.shambler_hp, config.shambler_ap),
            state: ShamblerState::Dormant,
            vision,
            player_near: false,
            wake_odds: config.wake_odds,
            vision_width_factor: config.vision_width_factor,
            vision_height_factor: config.vision_height_factor,
            contact_fear: config.contact_fear,
            ambient_fear: config.ambient_fear,
            appearance: Appearance::new(SHAMBLER_GFX),
            walk_animation: WalkAnimation::new(SHAMBLER_MONSTER_GFX, 2, 10),
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

    /// Current behavior state.
    #[must_use]
    pub const fn state(&self) -> ShamblerState {
        self.state
    }

    /// Whether the shambler is awake and chasing.
    #[must_use]
    pub fn is_hostile(&self) -> bool {
        self.state == ShamblerState::Hostile
    }

    /// Trigger volume for state transitions. Not a physical hitbox.
    #[must_use]
    pub const fn vision(&self) -> &Rect {
        &self.vision
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

    /// Runs one frame of shambler behavior.
    ///
    /// While the player is down every shambler settles immediately,
    /// interrupting any chase in progress.
    pub fn update(
        &mut self,
        dt: f32,
        player: &mut Player,
        companion: &mut Companion,
        index: &CollisionIndex,
        dice: &mut dyn Dice,
        events: &EventBus,
        player_down: bool,
    ) {
        if player_down {
            if self.state == ShamblerState::Hostile {
                self.sleep(events);
            }
            return;
        }

        let player_was_near = self.player_near;
        self.player_near = self.vision.collides(player.hitbox());

        if player_was_near {
            // Player has been hanging around this shambler.
            if self.player_near && self.state == ShamblerState::Hostile {
                self.chase(dt, player, companion, index, events);
            } else if !self.player_near && self.state == ShamblerState::Hostile {
                self.sleep(events);
            }
        } else if self.player_near && self.state == ShamblerState::Dormant {
            // Player just walked into range: one wake trial per entry.
            debug!(shambler = self.id().raw(), "player approaches shambler");
            if dice.chance(self.wake_odds) {
                self.wake(events);
                self.chase(dt, player, companion, index, events);
            }
        }
    }

    fn wake(&mut self, events: &EventBus) {
        self.state = ShamblerState::Hostile;
        debug!(shambler = self.id().raw(), "shambler has come to life");
        self.appearance.set_gfx_id(self.walk_animation.current());
        events.publish(GameEvent::ShamblerWoke { entity: self.id() });
    }

    fn sleep(&mut self, events: &EventBus) {
        self.state = ShamblerState::Dormant;
        debug!(shambler = self.id().raw(), "shambler going back to sleep");
        self.body.direction = Vec2::ZERO;
        self.walk_animation.reset();
        self.appearance.set_gfx_id(SHAMBLER_GFX);
        events.publish(GameEvent::ShamblerSlept { entity: self.id() });
    }

    fn chase(
        &mut self,
        dt: f32,
        player: &mut Player,
        companion: &mut Companion,
        index: &CollisionIndex,
        events: &EventBus,
    ) {
        let collision = self.body.walk_towards(player.position(), dt, index);

        // Re-center vision on the new position so the chase keeps going
        // as the shambler moves.
        self.vision = inflate_vision(
            self.body.hitbox(),
            self.vision_width_factor,
            self.vision_height_factor,
        );

        if collision.involves(player.id()) {
            player.handle_attack(self.vitals.ap(), self.id(), events);
        }

        if collision.involves(companion.id()) {
            companion.get_scared(self.contact_fear, events);
        } else if self.vision.collides(companion.hitbox()) {
            // Merely being watched is frightening.
            companion.get_scared(self.ambient_fear, events);
        } else {
            let gfx = self.walk_animation.advance();
            self.appearance.set_gfx_id(gfx);
            self.appearance.flip_x = self.body.forward.x > 0.0;
        }
    }
}

fn inflate_vision(hitbox: &Rect, width_factor: f32, height_factor: f32) -> Rect {
    hitbox.inflate(hitbox.w * width_factor, hitbox.h * height_factor)
}
