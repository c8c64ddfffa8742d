//! Player input: key bindings and per-frame direction derivation.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use thicket_common::Vec2;

/// Physical keys the core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// W key
    KeyW,
    /// A key
    KeyA,
    /// S key
    KeyS,
    /// D key
    KeyD,
    /// Space bar
    Space,
}

/// Logical actions keys can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move left
    MoveLeft,
    /// Move right
    MoveRight,
    /// Move up
    MoveUp,
    /// Move down
    MoveDown,
    /// Interact with whatever is in reach
    Activate,
}

/// Key-to-action map, rebindable at runtime.
#[derive(Debug, Clone)]
pub struct Bindings {
    map: AHashMap<KeyCode, Action>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut map = AHashMap::new();
        map.insert(KeyCode::ArrowLeft, Action::MoveLeft);
        map.insert(KeyCode::ArrowRight, Action::MoveRight);
        map.insert(KeyCode::ArrowUp, Action::MoveUp);
        map.insert(KeyCode::ArrowDown, Action::MoveDown);
        map.insert(KeyCode::KeyA, Action::MoveLeft);
        map.insert(KeyCode::KeyD, Action::MoveRight);
        map.insert(KeyCode::KeyW, Action::MoveUp);
        map.insert(KeyCode::KeyS, Action::MoveDown);
        map.insert(KeyCode::Space, Action::Activate);
        Self { map }
    }
}

impl Bindings {
    /// Binds (or rebinds) a key to an action.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.map.insert(key, action);
    }

    /// Looks up the action bound to a key.
    #[must_use]
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.map.get(&key).copied()
    }
}

/// Raw input events delivered by the (excluded) event pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key was pressed
    KeyDown(KeyCode),
    /// A key was released
    KeyUp(KeyCode),
}

/// Tracks held movement keys and derives the player's direction and
/// facing each frame.
#[derive(Debug, Clone)]
pub struct Controller {
    bindings: Bindings,
    held: AHashSet<Action>,
    /// Movement direction derived on the last update; zero when no
    /// movement key is held.
    pub direction: Vec2,
    /// Last nonzero direction. Starts out facing left.
    pub forward: Vec2,
    activate: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Bindings::default())
    }
}

impl Controller {
    /// Creates a controller with the given bindings.
    #[must_use]
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            held: AHashSet::new(),
            direction: Vec2::ZERO,
            forward: Vec2::LEFT,
            activate: false,
        }
    }

    /// Feeds a raw input event into the held-key state.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => match self.bindings.action_for(*key) {
                Some(Action::Activate) => self.activate = true,
                Some(action) => {
                    self.held.insert(action);
                }
                None => {}
            },
            InputEvent::KeyUp(key) => {
                if let Some(action) = self.bindings.action_for(*key) {
                    self.held.remove(&action);
                }
            }
        }
    }

    /// Derives direction and facing from the currently held keys.
    /// Opposing keys cancel; diagonals are normalized to unit length.
    pub fn update(&mut self) {
        let mut direction = Vec2::ZERO;
        if self.held.contains(&Action::MoveLeft) {
            direction.x -= 1.0;
        }
        if self.held.contains(&Action::MoveRight) {
            direction.x += 1.0;
        }
        if self.held.contains(&Action::MoveUp) {
            direction.y -= 1.0;
        }
        if self.held.contains(&Action::MoveDown) {
            direction.y += 1.0;
        }

        let magnitude = direction.length();
        if magnitude != 0.0 && magnitude != 1.0 {
            direction = direction.normalized();
        }
        self.direction = direction;

        // Always face the last moving direction.
        if !self.direction.is_zero() {
            self.forward = self.direction;
        }
    }

    /// Consumes the activate edge, if one was pressed since last asked.
    pub fn take_activate(&mut self) -> bool {
        std::mem::take(&mut self.activate)
    }
}
