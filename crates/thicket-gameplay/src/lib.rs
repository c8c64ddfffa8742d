//! # Thicket Gameplay
//!
//! Gameplay systems for Thicket, a top-down 2D action game where the
//! scenery fights back.
//!
//! This crate provides the real-time movement, collision, and behavior
//! core:
//! - Per-frame motion integration with acceleration/deceleration easing
//! - Axis-separated rectangle collision resolution over a shared index
//! - The player character with input-driven movement and vitals
//! - Shambler NPCs with a dormant/hostile chase state machine
//! - The companion NPC driven by a bounded fear meter
//! - A scene tying the entities, collision index, dice, and event bus
//!   together into one cooperative tick
//!
//! Rendering, audio, map loading, and the window event pump live in the
//! display layer and talk to this crate only through [`scene::Scene`],
//! [`controller::InputEvent`], and [`graphics::GraphicsCache`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod animation;
pub mod character;
pub mod collision;
pub mod companion;
pub mod config;
pub mod controller;
pub mod ease;
pub mod events;
pub mod graphics;
pub mod motion;
pub mod npc;
pub mod player;
pub mod rng;
pub mod scene;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::animation::*;
    pub use crate::character::*;
    pub use crate::collision::*;
    pub use crate::companion::*;
    pub use crate::config::*;
    pub use crate::controller::*;
    pub use crate::ease::*;
    pub use crate::events::*;
    pub use crate::graphics::*;
    pub use crate::motion::*;
    pub use crate::npc::*;
    pub use crate::player::*;
    pub use crate::rng::*;
    pub use crate::scene::*;
}

pub use prelude::*;
