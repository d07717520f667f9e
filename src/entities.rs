/// All round entity types — plain data plus their constructors.
///
/// Movement and collision rules live in `compute` and `collision`.

use rand::Rng;

use crate::barrier::Barrier;
use crate::config::RoundConfig;
use crate::rect::Rect;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Level-triggered key state, sampled fresh every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Side-effect notifications ─────────────────────────────────────────────────

/// Things that happened during a tick or signal, for sound and logging hooks.
#[derive(Clone, Debug, PartialEq)]
pub enum RoundEvent {
    PlayerFired,
    EnemyFired,
    EnemiesDestroyed { count: usize },
    BonusSpawned,
    BonusDestroyed,
    BarrierHit { cells: usize },
    PlayerHit,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Pixels added to `y` each tick: negative for the player, positive for enemies.
    pub velocity: i32,
    pub owner: Owner,
}

impl Projectile {
    /// Centered on `origin`; the owner fixes the direction of travel.
    pub fn new(origin: (i32, i32), speed: i32, owner: Owner, size: (i32, i32)) -> Self {
        let speed = speed.abs();
        let velocity = match owner {
            Owner::Player => -speed,
            Owner::Enemy => speed,
        };
        Projectile { rect: Rect::from_center(origin, size), velocity, owner }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Cooldown {
    pub ready: bool,
    pub last_fire_ms: u64,
    pub delay_ms: u64,
}

impl Cooldown {
    pub fn new(delay_ms: u64) -> Self {
        Cooldown { ready: true, last_fire_ms: 0, delay_ms }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: i32,
    pub cooldown: Cooldown,
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(config: &RoundConfig) -> Self {
        Player {
            rect: Rect::from_midbottom(config.player_rest(), config.sprites.ship),
            speed: config.player_speed,
            cooldown: Cooldown::new(config.fire_delay_ms),
            projectiles: Vec::new(),
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyColor {
    Red,
    Green,
    Yellow,
}

const PALETTE: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Yellow];

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub color: EnemyColor,
}

/// The live enemies.  Order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
}

impl Formation {
    /// A single evenly spaced row, colours cycling through the palette.
    pub fn spawn_row(config: &RoundConfig) -> Self {
        let enemies = (0..config.enemy_count)
            .map(|i| Enemy {
                rect: Rect::from_topleft(
                    (
                        config.enemy_padding_left + i as i32 * config.enemy_spacing_x,
                        config.enemy_row_y,
                    ),
                    config.sprites.enemy,
                ),
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Formation { enemies }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn pick_random(&self, rng: &mut impl Rng) -> Option<&Enemy> {
        if self.enemies.is_empty() {
            return None;
        }
        self.enemies.get(rng.gen_range(0..self.enemies.len()))
    }

    pub fn remove(&mut self, index: usize) -> Option<Enemy> {
        if index < self.enemies.len() {
            Some(self.enemies.swap_remove(index))
        } else {
            None
        }
    }

    pub fn remove_random(&mut self, rng: &mut impl Rng) -> Option<Enemy> {
        if self.enemies.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.enemies.len());
        self.remove(index)
    }
}

// ── Bonus ("mystery ship") ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bonus {
    pub rect: Rect,
    /// Horizontal pixels per tick (negative = leftward).
    pub velocity: i32,
}

impl Bonus {
    /// Starts just past the right edge.
    pub fn new(config: &RoundConfig) -> Self {
        Bonus {
            rect: Rect::from_midleft(
                (config.screen_width + config.bonus_spawn_margin, config.bonus_y),
                config.sprites.bonus,
            ),
            velocity: -config.bonus_speed.abs(),
        }
    }
}

// ── Master round state ────────────────────────────────────────────────────────

/// Everything one round owns.  Cloneable so the compute functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub config: RoundConfig,
    pub score: u32,
    /// Milliseconds of simulated time since the round started.
    pub clock_ms: u64,
    pub frame: u64,
    pub player: Player,
    pub formation: Formation,
    /// At most one bonus is alive at a time.
    pub bonus: Option<Bonus>,
    pub barriers: Vec<Barrier>,
    pub enemy_projectiles: Vec<Projectile>,
}
