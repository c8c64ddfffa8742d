//! Scene: the authoritative owner of the frame loop's shared state.
//!
//! The scene owns the collision index, the event bus, the dice, and
//! every entity, and passes them into each entity's update explicitly.
//! One call to [`Scene::update`] is one cooperative tick: player, then
//! companion, then each shambler, each resolving its collisions
//! synchronously against the index, which is re-synced after every
//! entity commits. The outer loop (display, clock, event pump) lives
//! outside this crate and only calls `handle_event` and `update`.

use thicket_common::{EntityId, Rect};

use crate::collision::CollisionIndex;
use crate::companion::Companion;
use crate::config::{BehaviorConfig, ConfigResult};
use crate::controller::InputEvent;
use crate::events::{EventBus, GameEvent};
use crate::graphics::GraphicsCache;
use crate::npc::Shambler;
use crate::player::Player;
use crate::rng::Dice;

/// A static collidable obstacle (scenery, walls).
#[derive(Debug, Clone, Copy)]
pub struct Prop {
    id: EntityId,
    hitbox: Rect,
}

impl Prop {
    /// Entity ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Hitbox.
    #[must_use]
    pub const fn hitbox(&self) -> &Rect {
        &self.hitbox
    }
}

/// The scene and everything in it.
pub struct Scene {
    config: BehaviorConfig,
    index: CollisionIndex,
    events: EventBus,
    dice: Box<dyn Dice>,
    player: Player,
    companion: Companion,
    shamblers: Vec<Shambler>,
    props: Vec<Prop>,
    player_down: bool,
}

impl Scene {
    /// Builds a scene with the player and companion at the given
    /// hitboxes. Fails fast on invalid configuration.
    pub fn new(
        config: BehaviorConfig,
        dice: Box<dyn Dice>,
        player_hitbox: Rect,
        companion_hitbox: Rect,
    ) -> ConfigResult<Self> {
        config.validate()?;

        let player = Player::new(player_hitbox, &config);
        let companion = Companion::new(companion_hitbox, &config);

        let mut index = CollisionIndex::new();
        index.insert(player.id(), *player.hitbox());
        index.insert(companion.id(), *companion.hitbox());

        Ok(Self {
            config,
            index,
            events: EventBus::default(),
            dice,
            player,
            companion,
            shamblers: Vec::new(),
            props: Vec::new(),
            player_down: false,
        })
    }

    /// Adds a static obstacle.
    pub fn add_prop(&mut self, hitbox: Rect) -> EntityId {
        let id = EntityId::new();
        self.index.insert(id, hitbox);
        self.props.push(Prop { id, hitbox });
        id
    }

    /// Adds a dormant shambler.
    pub fn add_shambler(&mut self, hitbox: Rect) -> EntityId {
        let shambler = Shambler::new(hitbox, &self.config);
        let id = shambler.id();
        self.index.insert(id, hitbox);
        self.shamblers.push(shambler);
        id
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The companion.
    #[must_use]
    pub const fn companion(&self) -> &Companion {
        &self.companion
    }

    /// All shamblers.
    #[must_use]
    pub fn shamblers(&self) -> &[Shambler] {
        &self.shamblers
    }

    /// All static props.
    #[must_use]
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// The shared collision index.
    #[must_use]
    pub const fn collision_index(&self) -> &CollisionIndex {
        &self.index
    }

    /// Whether the lose condition has fired.
    #[must_use]
    pub const fn is_player_down(&self) -> bool {
        self.player_down
    }

    /// Clears the lose condition so play can resume.
    pub fn revive(&mut self) {
        self.player_down = false;
    }

    /// Routes a raw input event to the player.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.player.handle_event(event);
    }

    /// Runs one cooperative tick and returns the events it produced.
    ///
    /// `dt` is wall-clock seconds since the previous tick.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if !self.player_down {
            let _ = self.player.update(dt, &self.index);
            self.index.insert(self.player.id(), *self.player.hitbox());

            if self.player.take_activate() {
                let reach = self.player.reach(self.config.reach_scale);
                if reach.collides(self.companion.hitbox()) {
                    self.companion.calm(self.dice.as_mut(), &self.events);
                }
            }
        }

        let player_position = self.player.position();
        self.companion.update(
            dt,
            player_position,
            self.player_down,
            &self.index,
            self.dice.as_mut(),
            &self.events,
        );
        self.index
            .insert(self.companion.id(), *self.companion.hitbox());

        for shambler in &mut self.shamblers {
            shambler.update(
                dt,
                &mut self.player,
                &mut self.companion,
                &self.index,
                self.dice.as_mut(),
                &self.events,
                self.player_down,
            );
            self.index.insert(shambler.id(), *shambler.hitbox());
        }
        // A shambler may have knocked the player or companion around
        // (damage, fear-driven speed); re-sync their entries.
        self.index.insert(self.player.id(), *self.player.hitbox());
        self.index
            .insert(self.companion.id(), *self.companion.hitbox());

        let produced = self.events.drain();
        for event in &produced {
            if matches!(event, GameEvent::Died { entity } if *entity == self.player.id()) {
                self.player_down = true;
                self.player.reset();
                self.index.insert(self.player.id(), *self.player.hitbox());
            }
        }
        produced
    }

    /// Re-resolves every entity's sprite key against the cache.
    pub fn refresh_images(&mut self, cache: &dyn GraphicsCache) {
        self.player.appearance_mut().refresh(cache);
        self.companion.appearance_mut().refresh(cache);
        for shambler in &mut self.shamblers {
            shambler.appearance_mut().refresh(cache);
        }
    }
}
