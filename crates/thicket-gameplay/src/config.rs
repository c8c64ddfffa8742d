//! Behavior tuning constants.
//!
//! The magnitudes that vary between difficulty settings (wake odds,
//! fear amounts, speeds) live here as validated configuration rather
//! than scattered literals. Validation happens once, at construction;
//! none of these values are recoverable mid-frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Odds with a zero denominator or an impossible numerator
    #[error("malformed odds {0}/{1}")]
    MalformedOdds(u32, u32),
    /// Companion fear ceiling must be positive
    #[error("max hysteria must be positive, got {0}")]
    ZeroMaxHysteria(i32),
    /// Attention threshold range empty or zero
    #[error("attention range {0}..={1} is empty")]
    EmptyAttentionRange(u32, u32),
    /// A speed that must be positive was not
    #[error("non-positive speed: {field} = {value}")]
    NonPositiveSpeed {
        /// Which speed field was invalid
        field: &'static str,
        /// The offending value
        value: f32,
    },
    /// Calm roll range inverted
    #[error("calm roll range {0}..={1} is empty")]
    EmptyCalmRoll(i32, i32),
    /// Failed to parse a config document
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable constants for the movement and behavior systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Player max speed in pixels per second
    pub player_speed: f32,
    /// Player starting hit points
    pub player_hp: i32,
    /// Player maximum hit points
    pub player_max_hp: i32,
    /// Player attack power
    pub player_ap: i32,
    /// Shambler chase speed in pixels per second
    pub shambler_speed: f32,
    /// Shambler attack power
    pub shambler_ap: i32,
    /// Shambler hit points
    pub shambler_hp: i32,
    /// Odds a dormant shambler wakes when the player enters vision
    pub wake_odds: (u32, u32),
    /// Vision rect width, as a multiple of the hitbox width
    pub vision_width_factor: f32,
    /// Vision rect height, as a multiple of the hitbox height
    pub vision_height_factor: f32,
    /// Fear inflicted on the companion by direct shambler contact
    pub contact_fear: i32,
    /// Fear inflicted per frame while inside a hostile shambler's vision
    pub ambient_fear: i32,
    /// Companion fear ceiling
    pub max_hysteria: i32,
    /// Frames between companion wander refocuses, re-rolled in this range
    pub attention_range: (u32, u32),
    /// Inclusive range rolled when the player calms the companion
    pub calm_roll: (i32, i32),
    /// Added to the companion's hysteria to derive its speed
    pub companion_speed_offset: i32,
    /// Reach multiplier for the player's activate interaction
    pub reach_scale: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            player_speed: 128.0,
            player_hp: 10,
            player_max_hp: 10,
            player_ap: 1,
            shambler_speed: 64.0,
            shambler_ap: 1,
            shambler_hp: 5,
            wake_odds: (1, 2),
            vision_width_factor: 4.0,
            vision_height_factor: 2.0,
            contact_fear: 100,
            ambient_fear: 2,
            max_hysteria: 100,
            attention_range: (64, 128),
            calm_roll: (-2, 8),
            companion_speed_offset: 50,
            reach_scale: 3.0,
        }
    }
}

impl BehaviorConfig {
    /// Checks all invariants, returning the first violation.
    pub fn validate(&self) -> ConfigResult<()> {
        let (must, total) = self.wake_odds;
        if total == 0 || must > total {
            return Err(ConfigError::MalformedOdds(must, total));
        }
        if self.max_hysteria <= 0 {
            return Err(ConfigError::ZeroMaxHysteria(self.max_hysteria));
        }
        let (lo, hi) = self.attention_range;
        if lo > hi || hi == 0 {
            return Err(ConfigError::EmptyAttentionRange(lo, hi));
        }
        let (roll_lo, roll_hi) = self.calm_roll;
        if roll_lo > roll_hi {
            return Err(ConfigError::EmptyCalmRoll(roll_lo, roll_hi));
        }
        for (field, value) in [
            ("player_speed", self.player_speed),
            ("shambler_speed", self.shambler_speed),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveSpeed { field, value });
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(doc: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(doc).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
