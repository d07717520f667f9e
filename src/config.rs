/// Round configuration: screen geometry, speeds and sprite sizes.
///
/// Every field has a default, so a TOML file only needs to name the values
/// it overrides.

use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// `(width, height)` of each entity kind's visual in screen pixels.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpriteSizes {
    pub ship: (i32, i32),
    pub enemy: (i32, i32),
    pub bonus: (i32, i32),
    pub projectile: (i32, i32),
    pub barrier_cell: i32,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            ship: (50, 24),
            enemy: (36, 28),
            bonus: (60, 28),
            projectile: (4, 15),
            barrier_cell: 4,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoundConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub sprites: SpriteSizes,

    // Player
    /// The ship may not move left of this x coordinate.
    pub left_offset: i32,
    /// Distance from the bottom edge to the ship's resting baseline.
    pub player_baseline: i32,
    pub player_speed: i32,
    pub player_projectile_speed: i32,
    pub fire_delay_ms: u64,

    // Formation
    pub enemy_count: usize,
    pub enemy_padding_left: i32,
    pub enemy_spacing_x: i32,
    pub enemy_row_y: i32,
    pub enemy_projectile_speed: i32,
    pub enemy_fire_interval_ms: u64,

    // Bonus
    pub bonus_y: i32,
    pub bonus_speed: i32,
    /// Spawn x of the bonus's left edge, relative to the right screen edge.
    pub bonus_spawn_margin: i32,
    pub bonus_exit_left_margin: i32,
    pub bonus_exit_right_margin: i32,
    pub bonus_interval_min_ms: u64,
    pub bonus_interval_max_ms: u64,

    // Barriers
    pub barrier_count: usize,
    pub barrier_gap: i32,
    /// Distance from the bottom edge to the top of the barrier row.
    pub barrier_rise: i32,

    // Scoring
    pub enemy_points: u32,
    pub bonus_points: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 700,
            sprites: SpriteSizes::default(),

            left_offset: 10,
            player_baseline: 18,
            player_speed: 6,
            player_projectile_speed: 8,
            fire_delay_ms: 300,

            enemy_count: 6,
            enemy_padding_left: 40,
            enemy_spacing_x: 70,
            enemy_row_y: 40,
            enemy_projectile_speed: 5,
            enemy_fire_interval_ms: 600,

            bonus_y: 30,
            bonus_speed: 3,
            bonus_spawn_margin: 40,
            bonus_exit_left_margin: 10,
            bonus_exit_right_margin: 50,
            bonus_interval_min_ms: 4000,
            bonus_interval_max_ms: 8000,

            barrier_count: 4,
            barrier_gap: 40,
            barrier_rise: 180,

            enemy_points: 100,
            bonus_points: 300,
        }
    }
}

impl RoundConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&data).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml_str(data: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(data)?;
        if config.bonus_interval_min_ms >= config.bonus_interval_max_ms {
            anyhow::bail!(
                "bonus_interval_min_ms ({}) must be below bonus_interval_max_ms ({})",
                config.bonus_interval_min_ms,
                config.bonus_interval_max_ms
            );
        }
        Ok(config)
    }

    /// Midbottom anchor of the ship at rest.
    pub fn player_rest(&self) -> (i32, i32) {
        (
            (self.screen_width + self.left_offset) / 2,
            self.screen_height - self.player_baseline,
        )
    }
}
