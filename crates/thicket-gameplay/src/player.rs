//! The player character.

use tracing::debug;

use thicket_common::{EntityId, Rect, Vec2};

use crate::character::Vitals;
use crate::collision::{Collision, CollisionIndex};
use crate::config::BehaviorConfig;
use crate::controller::{Controller, InputEvent};
use crate::events::{EventBus, GameEvent};
use crate::graphics::Appearance;
use crate::motion::Body;

/// Base sprite key for the player.
pub const PLAYER_GFX: &str = "ranger";

/// The player-controlled character.
#[derive(Debug)]
pub struct Player {
    body: Body,
    vitals: Vitals,
    controller: Controller,
    appearance: Appearance,
    start_position: Vec2,
}

impl Player {
    /// Creates the player with the given hitbox.
    #[must_use]
    pub fn new(hitbox: Rect, config: &BehaviorConfig) -> Self {
        Self::with_controller(hitbox, config, Controller::default())
    }

    /// Creates the player with custom key bindings.
    #[must_use]
    pub fn with_controller(hitbox: Rect, config: &BehaviorConfig, controller: Controller) -> Self {
        let body = Body::new(EntityId::new(), hitbox, config.player_speed);
        let start_position = body.position();
        Self {
            body,
            vitals: Vitals::with_hp(config.player_hp, config.player_max_hp, config.player_ap),
            controller,
            appearance: Appearance::new(PLAYER_GFX),
            start_position,
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

    /// Combat vitals.
    #[must_use]
    pub const fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    /// Whether the player is currently down.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        self.vitals.is_down()
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

    /// Feeds a raw input event to the controller.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.controller.handle_event(event);
    }

    /// Consumes the activate edge, if pressed since last asked.
    pub fn take_activate(&mut self) -> bool {
        self.controller.take_activate()
    }

    /// Runs one frame: derive direction from input, pick the sprite,
    /// and walk.
    pub fn update(&mut self, dt: f32, index: &CollisionIndex) -> Collision {
        self.controller.update();
        self.body.direction = self.controller.direction;
        self.body.forward = self.controller.forward;

        let gfx = if self.vitals.fraction() < 0.25 {
            format!("{PLAYER_GFX}-damaged")
        } else {
            PLAYER_GFX.to_owned()
        };
        self.appearance.set_gfx_id(gfx);
        self.appearance.flip_x = self.body.forward.x > 0.0;

        self.body.walk(dt, index, None)
    }

    /// Applies an incoming hit. Publishes a damage event, and a death
    /// event exactly once when hit points reach zero. Hits landed while
    /// already down are no-ops.
    pub fn handle_attack(&mut self, amount: i32, source: EntityId, events: &EventBus) -> bool {
        if self.vitals.is_down() {
            return false;
        }
        let died = self.vitals.take_damage(amount);
        events.publish(GameEvent::Damaged {
            entity: self.id(),
            amount,
            source: Some(source),
        });
        if died {
            debug!(player = self.id().raw(), "player is down");
            events.publish(GameEvent::Died { entity: self.id() });
        }
        died
    }

    /// Restores a single hit point.
    pub fn heal(&mut self) {
        self.vitals.heal();
    }

    /// Full reset: back to the start position at full health.
    pub fn reset(&mut self) {
        self.vitals.restore();
        self.body.force_move(self.start_position);
    }

    /// Teleports the player, bypassing collision. Respawn/reset only.
    pub fn force_move(&mut self, position: Vec2) {
        self.body.force_move(position);
    }

    /// Interaction reach: the hitbox inflated by `scale` in both axes.
    #[must_use]
    pub fn reach(&self, scale: f32) -> Rect {
        let hitbox = self.body.hitbox();
        hitbox.inflate(hitbox.w * scale, hitbox.h * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::KeyCode;

    fn player() -> Player {
        Player::new(
            Rect::new(100.0, 100.0, 16.0, 16.0),
            &BehaviorConfig::default(),
        )
    }

    #[test]
    fn test_input_drives_movement() {
        let index = CollisionIndex::new();
        let mut player = player();

        player.handle_event(&InputEvent::KeyDown(KeyCode::ArrowRight));
        player.update(0.016, &index);
        assert!(player.position().x > 100.0);
        assert_eq!(player.position().y, 100.0);
    }

    #[test]
    fn test_facing_flips_sprite() {
        let index = CollisionIndex::new();
        let mut player = player();

        player.handle_event(&InputEvent::KeyDown(KeyCode::ArrowRight));
        player.update(0.016, &index);
        assert!(player.appearance().flip_x);

        player.handle_event(&InputEvent::KeyUp(KeyCode::ArrowRight));
        player.handle_event(&InputEvent::KeyDown(KeyCode::ArrowLeft));
        player.update(0.016, &index);
        assert!(!player.appearance().flip_x);
    }

    #[test]
    fn test_damaged_sprite_below_quarter_health() {
        let index = CollisionIndex::new();
        let events = EventBus::default();
        let mut player = player();
        let attacker = EntityId::new();

        player.handle_attack(8, attacker, &events);
        player.update(0.016, &index);
        assert_eq!(player.appearance().gfx_id(), "ranger-damaged");
    }

    #[test]
    fn test_death_event_published_once() {
        let events = EventBus::default();
        let mut player = player();
        let attacker = EntityId::new();

        assert!(player.handle_attack(10, attacker, &events));
        assert!(!player.handle_attack(10, attacker, &events));

        let died: Vec<_> = events
            .drain()
            .into_iter()
            .filter(|event| matches!(event, GameEvent::Died { .. }))
            .collect();
        assert_eq!(died.len(), 1);
    }

    #[test]
    fn test_reset_restores_position_and_health() {
        let index = CollisionIndex::new();
        let events = EventBus::default();
        let mut player = player();
        let attacker = EntityId::new();

        player.handle_event(&InputEvent::KeyDown(KeyCode::ArrowDown));
        for _ in 0..10 {
            player.update(0.016, &index);
        }
        player.handle_attack(10, attacker, &events);

        player.reset();
        assert_eq!(player.position(), Vec2::new(100.0, 100.0));
        assert_eq!(player.vitals().hp(), player.vitals().max_hp());
        assert!(!player.is_down());
    }

    #[test]
    fn test_reach_extends_hitbox() {
        let player = player();
        let reach = player.reach(3.0);
        assert!(reach.w > player.hitbox().w);
        assert_eq!(reach.center(), player.hitbox().center());
    }
}
