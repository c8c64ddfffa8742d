//! Axis-separated rectangle collision detection and resolution.
//!
//! The [`CollisionIndex`] holds the hitbox of every collidable entity
//! in the scene. A moving entity proposes a tentative hitbox per axis;
//! [`CollisionIndex::resolve_axis`] tests the proposal against every
//! other entry and, on overlap, returns the obstacle together with the
//! coordinate that lands the mover's edge flush against it. Axes are
//! resolved independently so diagonal movement slides along walls
//! instead of halting.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use thicket_common::{EntityId, Rect, Vec2};

/// The axis a collision check runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

/// Per-axis collision outcome of one [`walk`](crate::motion::Body::walk).
///
/// At most one entity is reported per axis per frame; absence is
/// `None`, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// Entity struck on the horizontal axis, if any
    pub x: Option<EntityId>,
    /// Entity struck on the vertical axis, if any
    pub y: Option<EntityId>,
}

impl Collision {
    /// Whether either axis struck anything.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Whether the given entity was struck on either axis. The x axis
    /// is considered first.
    #[must_use]
    pub fn involves(&self, id: EntityId) -> bool {
        self.x == Some(id) || self.y == Some(id)
    }
}

/// Result of resolving one axis: what was hit and where the mover's
/// coordinate snaps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisHit {
    /// The obstacle that was struck
    pub entity: EntityId,
    /// Corrected coordinate for the mover on the checked axis
    pub corrected: f32,
}

/// Shared set of collidable hitboxes.
///
/// Entries are iterated in insertion order, so the first overlapping
/// obstacle wins deterministically. The index assumes no concurrent
/// mutation while an axis is being resolved; the single-threaded frame
/// loop satisfies this.
#[derive(Debug, Default)]
pub struct CollisionIndex {
    entries: AHashMap<EntityId, Rect>,
    order: Vec<EntityId>,
}

impl CollisionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity's hitbox. Re-inserting an existing entity
    /// updates its hitbox in place without changing its order.
    pub fn insert(&mut self, id: EntityId, hitbox: Rect) {
        if self.entries.insert(id, hitbox).is_none() {
            self.order.push(id);
        }
    }

    /// Removes an entity from the index.
    pub fn remove(&mut self, id: EntityId) {
        if self.entries.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
        }
    }

    /// Returns the stored hitbox for an entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<Rect> {
        self.entries.get(&id).copied()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over registered entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Rect)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|rect| (*id, *rect)))
    }

    /// Tests a mover's tentative hitbox on one axis against every other
    /// registered entity.
    ///
    /// `tentative` must already hold the speculative coordinate for the
    /// checked axis; `motion` is the displacement direction this frame.
    /// On overlap, the returned coordinate puts the mover's facing edge
    /// flush against the obstacle. Returns `None` when the path is
    /// clear or when there is no displacement on the axis.
    #[must_use]
    pub fn resolve_axis(
        &self,
        mover: EntityId,
        tentative: &Rect,
        motion: Vec2,
        axis: Axis,
    ) -> Option<AxisHit> {
        let sign = match axis {
            Axis::X => motion.x,
            Axis::Y => motion.y,
        };
        if sign == 0.0 {
            return None;
        }

        for (id, hitbox) in self.iter() {
            if id == mover {
                continue;
            }
            if !tentative.collides(&hitbox) {
                continue;
            }

            let corrected = match (axis, sign > 0.0) {
                (Axis::X, true) => hitbox.left() - tentative.w,
                (Axis::X, false) => hitbox.right(),
                (Axis::Y, true) => hitbox.top() - tentative.h,
                (Axis::Y, false) => hitbox.bottom(),
            };
            debug!(
                mover = mover.raw(),
                obstacle = id.raw(),
                ?axis,
                "collision detected"
            );
            return Some(AxisHit {
                entity: id,
                corrected,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> EntityId {
        EntityId::new()
    }

    #[test]
    fn test_mover_never_collides_with_itself() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let hitbox = Rect::new(0.0, 0.0, 10.0, 10.0);
        index.insert(mover, hitbox);

        // The stale self entry overlaps the tentative rect exactly.
        let hit = index.resolve_axis(mover, &hitbox, Vec2::RIGHT, Axis::X);
        assert!(hit.is_none());
    }

    #[test]
    fn test_coinciding_hitboxes_are_distinct_entities() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let other = id();
        let hitbox = Rect::new(0.0, 0.0, 10.0, 10.0);
        index.insert(mover, hitbox);
        index.insert(other, hitbox);

        let hit = index
            .resolve_axis(mover, &hitbox, Vec2::RIGHT, Axis::X)
            .expect("should strike the coinciding entity");
        assert_eq!(hit.entity, other);
    }

    #[test]
    fn test_snap_flush_moving_positive_x() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let wall = id();
        index.insert(wall, Rect::new(50.0, 0.0, 10.0, 100.0));

        // Mover 16 wide, tentative position overlaps the wall.
        let tentative = Rect::new(40.0, 10.0, 16.0, 16.0);
        let hit = index
            .resolve_axis(mover, &tentative, Vec2::RIGHT, Axis::X)
            .expect("overlap");
        assert_eq!(hit.entity, wall);
        assert_eq!(hit.corrected, 50.0 - 16.0);
    }

    #[test]
    fn test_snap_flush_moving_negative_x() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let wall = id();
        index.insert(wall, Rect::new(50.0, 0.0, 10.0, 100.0));

        let tentative = Rect::new(55.0, 10.0, 16.0, 16.0);
        let hit = index
            .resolve_axis(mover, &tentative, Vec2::LEFT, Axis::X)
            .expect("overlap");
        assert_eq!(hit.corrected, 60.0);
    }

    #[test]
    fn test_snap_flush_vertical() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let floor = id();
        index.insert(floor, Rect::new(0.0, 80.0, 100.0, 10.0));

        let tentative = Rect::new(10.0, 70.0, 16.0, 16.0);
        let hit = index
            .resolve_axis(mover, &tentative, Vec2::DOWN, Axis::Y)
            .expect("overlap");
        assert_eq!(hit.corrected, 80.0 - 16.0);

        let tentative_up = Rect::new(10.0, 85.0, 16.0, 16.0);
        let hit_up = index
            .resolve_axis(mover, &tentative_up, Vec2::UP, Axis::Y)
            .expect("overlap");
        assert_eq!(hit_up.corrected, 90.0);
    }

    #[test]
    fn test_no_motion_on_axis_resolves_nothing() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let wall = id();
        let overlap = Rect::new(0.0, 0.0, 10.0, 10.0);
        index.insert(wall, overlap);

        assert!(index
            .resolve_axis(mover, &overlap, Vec2::DOWN, Axis::X)
            .is_none());
    }

    #[test]
    fn test_first_inserted_obstacle_wins() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let first = id();
        let second = id();
        index.insert(first, Rect::new(0.0, 0.0, 20.0, 20.0));
        index.insert(second, Rect::new(5.0, 5.0, 20.0, 20.0));

        let tentative = Rect::new(2.0, 2.0, 10.0, 10.0);
        let hit = index
            .resolve_axis(mover, &tentative, Vec2::RIGHT, Axis::X)
            .expect("overlap");
        assert_eq!(hit.entity, first);
    }

    #[test]
    fn test_flush_edges_do_not_collide() {
        let mut index = CollisionIndex::new();
        let mover = id();
        let wall = id();
        index.insert(wall, Rect::new(50.0, 0.0, 10.0, 100.0));

        // Exactly touching: open intersection reports no hit.
        let tentative = Rect::new(34.0, 10.0, 16.0, 16.0);
        assert!(index
            .resolve_axis(mover, &tentative, Vec2::RIGHT, Axis::X)
            .is_none());
    }

    #[test]
    fn test_remove_clears_entity() {
        let mut index = CollisionIndex::new();
        let wall = id();
        index.insert(wall, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(index.len(), 1);
        index.remove(wall);
        assert!(index.is_empty());
        assert!(index.get(wall).is_none());
    }

    #[test]
    fn test_reinsert_updates_in_place() {
        let mut index = CollisionIndex::new();
        let a = id();
        let b = id();
        index.insert(a, Rect::new(0.0, 0.0, 10.0, 10.0));
        index.insert(b, Rect::new(20.0, 0.0, 10.0, 10.0));
        index.insert(a, Rect::new(1.0, 0.0, 10.0, 10.0));

        assert_eq!(index.len(), 2);
        let first = index.iter().next().expect("entries");
        assert_eq!(first.0, a);
        assert_eq!(first.1.x, 1.0);
    }
}
