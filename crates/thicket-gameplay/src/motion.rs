//! Per-frame motion integration for mobile entities.
//!
//! A [`Body`] owns an entity's hitbox, movement direction, facing, and
//! easing state. Each frame, [`Body::walk`] turns direction, speed, and
//! the ease multiplier into a candidate position, then commits it one
//! axis at a time through the [`CollisionIndex`]: the axis moves to the
//! proposed coordinate unless the resolver found an obstacle, in which
//! case the resolver's flush-snapped coordinate is authoritative.

use serde::{Deserialize, Serialize};

use thicket_common::{EntityId, Rect, Vec2};

use crate::collision::{Axis, Collision, CollisionIndex};
use crate::ease::Ease;

/// A mobile entity's physical state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    id: EntityId,
    hitbox: Rect,
    /// Current movement direction; zero when stopped.
    pub direction: Vec2,
    /// Last nonzero direction, used for sprite facing. Never zero once
    /// movement has occurred; entities start out facing left.
    pub forward: Vec2,
    /// Top speed in pixels per second.
    pub max_speed: f32,
    ease: Ease,
}

impl Body {
    /// Creates a body at rest.
    #[must_use]
    pub fn new(id: EntityId, hitbox: Rect, max_speed: f32) -> Self {
        Self {
            id,
            hitbox,
            direction: Vec2::ZERO,
            forward: Vec2::LEFT,
            max_speed,
            ease: Ease::new(),
        }
    }

    /// The entity this body belongs to.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Current hitbox.
    #[must_use]
    pub const fn hitbox(&self) -> &Rect {
        &self.hitbox
    }

    /// Current position (hitbox top-left).
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.hitbox.topleft()
    }

    /// Easing state, read-only.
    #[must_use]
    pub const fn ease(&self) -> &Ease {
        &self.ease
    }

    /// Integrates one frame of motion and resolves collisions per axis.
    ///
    /// `dt` is the wall-clock seconds since the previous tick; it is an
    /// opaque multiplier and no fixed step is assumed. When `target` is
    /// given, the candidate position is clamped per axis so the body
    /// never overshoots it.
    pub fn walk(&mut self, dt: f32, index: &CollisionIndex, target: Option<Vec2>) -> Collision {
        let speed = self.max_speed * dt;
        let moving = !self.direction.is_zero();

        if self.ease.stopped(moving) {
            self.ease.reset();
            return Collision::default();
        }

        let (motion, candidate) = if self.ease.coming_to_stop(moving) {
            // Still carrying speed: drift along the facing direction
            // while the ease winds down.
            let step = self.forward * (speed * self.ease.effect());
            let candidate = self.position() + step;
            self.ease.decelerate();
            (self.forward, candidate)
        } else {
            let step = self.direction * (speed * self.ease.effect());
            let mut candidate = self.position() + step;
            if let Some(target) = target {
                if self.direction.x > 0.0 {
                    candidate.x = candidate.x.min(target.x);
                } else if self.direction.x < 0.0 {
                    candidate.x = candidate.x.max(target.x);
                }
                if self.direction.y > 0.0 {
                    candidate.y = candidate.y.min(target.y);
                } else if self.direction.y < 0.0 {
                    candidate.y = candidate.y.max(target.y);
                }
            }
            if self.ease.accelerating(moving) {
                self.ease.accelerate();
            }
            (self.direction, candidate)
        };

        // Commit whole pixels only.
        let rounded = Vec2::new(candidate.x.round(), candidate.y.round());
        let mut result = Collision::default();

        if rounded.x != self.hitbox.x {
            let tentative = Rect {
                x: rounded.x,
                ..self.hitbox
            };
            match index.resolve_axis(self.id, &tentative, motion, Axis::X) {
                Some(hit) => {
                    self.hitbox.x = hit.corrected;
                    self.ease.reset();
                    result.x = Some(hit.entity);
                }
                None => self.hitbox.x = rounded.x,
            }
        }

        if rounded.y != self.hitbox.y {
            let tentative = Rect {
                y: rounded.y,
                ..self.hitbox
            };
            match index.resolve_axis(self.id, &tentative, motion, Axis::Y) {
                Some(hit) => {
                    self.hitbox.y = hit.corrected;
                    self.ease.reset();
                    result.y = Some(hit.entity);
                }
                None => self.hitbox.y = rounded.y,
            }
        }

        result
    }

    /// Points the body at `target` (per-axis sign, normalized on the
    /// diagonal) and walks toward it, clamped so it cannot overshoot.
    pub fn walk_towards(&mut self, target: Vec2, dt: f32, index: &CollisionIndex) -> Collision {
        let delta = target - self.position();
        let mut direction = Vec2::new(axis_sign(delta.x), axis_sign(delta.y));
        if direction.x != 0.0 && direction.y != 0.0 {
            direction = direction.normalized();
        }
        self.direction = direction;
        if !direction.is_zero() {
            self.forward = direction;
        }
        self.walk(dt, index, Some(target))
    }

    /// Unconditionally teleports, bypassing collision. Used for
    /// respawn and reset, never for regular movement.
    pub fn force_move(&mut self, position: Vec2) {
        self.hitbox.x = position.x;
        self.hitbox.y = position.y;
    }
}

fn axis_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::EASE_START;

    fn body_at(x: f32, y: f32, speed: f32) -> Body {
        Body::new(EntityId::new(), Rect::new(x, y, 16.0, 16.0), speed)
    }

    #[test]
    fn test_stopped_body_does_not_move() {
        let index = CollisionIndex::new();
        let mut body = body_at(100.0, 100.0, 128.0);

        let collision = body.walk(0.016, &index, None);
        assert!(!collision.any());
        assert_eq!(body.position(), Vec2::new(100.0, 100.0));
        assert_eq!(body.ease().effect(), EASE_START);
    }

    #[test]
    fn test_walk_moves_and_accelerates() {
        let index = CollisionIndex::new();
        let mut body = body_at(100.0, 100.0, 128.0);
        body.direction = Vec2::RIGHT;
        body.forward = Vec2::RIGHT;

        let before_effect = body.ease().effect();
        body.walk(0.016, &index, None);
        assert!(body.position().x > 100.0);
        assert!(body.ease().effect() > before_effect);
    }

    #[test]
    fn test_walk_commits_whole_pixels() {
        let index = CollisionIndex::new();
        let mut body = body_at(100.0, 100.0, 128.0);
        body.direction = Vec2::RIGHT;
        body.forward = Vec2::RIGHT;

        body.walk(0.016, &index, None);
        assert_eq!(body.position().x.fract(), 0.0);
        assert_eq!(body.position().y.fract(), 0.0);
    }

    #[test]
    fn test_dt_scales_displacement() {
        let index = CollisionIndex::new();
        let mut slow = body_at(0.0, 0.0, 512.0);
        let mut fast = body_at(0.0, 0.0, 512.0);
        for body in [&mut slow, &mut fast] {
            body.direction = Vec2::RIGHT;
            body.forward = Vec2::RIGHT;
        }

        slow.walk(0.008, &index, None);
        fast.walk(0.032, &index, None);
        assert!(
            fast.position().x > slow.position().x,
            "larger dt must cover more ground"
        );
    }

    #[test]
    fn test_release_drifts_then_stops() {
        let index = CollisionIndex::new();
        let mut body = body_at(100.0, 100.0, 512.0);
        body.direction = Vec2::RIGHT;
        body.forward = Vec2::RIGHT;
        for _ in 0..20 {
            body.walk(0.016, &index, None);
        }

        // Release input: the body keeps drifting forward while the
        // ease winds down.
        body.direction = Vec2::ZERO;
        let x_at_release = body.position().x;
        body.walk(0.016, &index, None);
        assert!(body.position().x > x_at_release);

        // Eventually the ease reaches its floor and motion ceases.
        for _ in 0..200 {
            body.walk(0.016, &index, None);
        }
        let resting = body.position().x;
        body.walk(0.016, &index, None);
        assert_eq!(body.position().x, resting);
        assert_eq!(body.ease().effect(), EASE_START);
    }

    #[test]
    fn test_axis_independent_resolution() {
        // A wall only blocks the x displacement; y must still advance.
        let mut index = CollisionIndex::new();
        let wall = EntityId::new();
        index.insert(wall, Rect::new(120.0, 0.0, 10.0, 400.0));

        let mut body = body_at(100.0, 100.0, 2000.0);
        index.insert(body.id(), *body.hitbox());
        body.direction = Vec2::new(1.0, 1.0).normalized();
        body.forward = body.direction;

        let collision = body.walk(0.016, &index, None);
        assert_eq!(collision.x, Some(wall));
        assert_eq!(collision.y, None);
        assert_eq!(body.position().x, 120.0 - 16.0);
        assert!(body.position().y > 100.0, "y must update normally");
    }

    #[test]
    fn test_no_tunneling_lands_flush() {
        // Speed well above the obstacle's width in one tick.
        let mut index = CollisionIndex::new();
        let wall = EntityId::new();
        index.insert(wall, Rect::new(140.0, 0.0, 8.0, 400.0));

        let mut body = body_at(100.0, 100.0, 2500.0);
        body.direction = Vec2::RIGHT;
        body.forward = Vec2::RIGHT;

        let collision = body.walk(0.016, &index, None);
        assert_eq!(collision.x, Some(wall));
        assert_eq!(body.position().x, 140.0 - 16.0);
        assert!(!body.hitbox().collides(&Rect::new(140.0, 0.0, 8.0, 400.0)));
    }

    #[test]
    fn test_collision_resets_ease() {
        let mut index = CollisionIndex::new();
        let wall = EntityId::new();
        index.insert(wall, Rect::new(120.0, 0.0, 10.0, 400.0));

        let mut body = body_at(100.0, 100.0, 2000.0);
        body.direction = Vec2::RIGHT;
        body.forward = Vec2::RIGHT;
        body.walk(0.016, &index, None);
        assert_eq!(body.ease().effect(), EASE_START);
    }

    #[test]
    fn test_walk_towards_does_not_overshoot() {
        let index = CollisionIndex::new();
        let mut body = body_at(100.0, 100.0, 10_000.0);

        let target = Vec2::new(110.0, 100.0);
        body.walk_towards(target, 0.016, &index);
        assert_eq!(body.position(), target);
    }

    #[test]
    fn test_walk_towards_sets_direction_and_forward() {
        let index = CollisionIndex::new();
        let mut body = body_at(100.0, 100.0, 64.0);

        body.walk_towards(Vec2::new(50.0, 200.0), 0.016, &index);
        assert!(body.direction.x < 0.0);
        assert!(body.direction.y > 0.0);
        assert!((body.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(body.forward, body.direction);
    }

    #[test]
    fn test_walk_towards_at_target_is_still() {
        let index = CollisionIndex::new();
        let mut body = body_at(100.0, 100.0, 64.0);

        let collision = body.walk_towards(Vec2::new(100.0, 100.0), 0.016, &index);
        assert!(!collision.any());
        assert_eq!(body.position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_force_move_ignores_obstacles() {
        let mut index = CollisionIndex::new();
        let wall = EntityId::new();
        index.insert(wall, Rect::new(200.0, 200.0, 50.0, 50.0));

        let mut body = body_at(0.0, 0.0, 64.0);
        body.force_move(Vec2::new(210.0, 210.0));
        assert_eq!(body.position(), Vec2::new(210.0, 210.0));
    }
}
