/// Pure round-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `RoundState` (and, where needed, an RNG handle) and returns a brand-new
/// `RoundState`.  Side effects are limited to the injected RNG and the
/// `events` out-vector.

use rand::Rng;
use tracing::{debug, trace};

use crate::barrier::layout_barriers;
use crate::collision;
use crate::config::RoundConfig;
use crate::entities::{
    Bonus, Formation, InputState, Owner, Player, Projectile, RoundEvent, RoundState,
};
use crate::schedule::{bonus_interval, Signal, Timers};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Player at rest, one row of enemies, four barriers, score 0.
pub fn init_state(config: RoundConfig) -> RoundState {
    RoundState {
        player: Player::new(&config),
        formation: Formation::spawn_row(&config),
        bonus: None,
        barriers: layout_barriers(&config),
        enemy_projectiles: Vec::new(),
        score: 0,
        clock_ms: 0,
        frame: 0,
        config,
    }
}

// ── Per-entity update rules (in place, on a working copy) ────────────────────

fn steer_player(player: &mut Player, input: &InputState, config: &RoundConfig) {
    if input.right {
        player.rect.x += player.speed;
    }
    if input.left {
        player.rect.x -= player.speed;
    }
    constrain_player(player, config);
}

/// Keep the ship inside `[left_offset, screen_width]`.
fn constrain_player(player: &mut Player, config: &RoundConfig) {
    if player.rect.left() < config.left_offset {
        player.rect.x = config.left_offset;
    }
    if player.rect.right() > config.screen_width {
        player.rect.x = config.screen_width - player.rect.w;
    }
}

fn fire_player(
    player: &mut Player,
    now_ms: u64,
    config: &RoundConfig,
    events: &mut Vec<RoundEvent>,
) -> bool {
    if !player.cooldown.ready {
        return false;
    }
    player.cooldown.ready = false;
    player.cooldown.last_fire_ms = now_ms;
    player.projectiles.push(Projectile::new(
        player.rect.midtop(),
        config.player_projectile_speed,
        Owner::Player,
        config.sprites.projectile,
    ));
    debug!(x = player.rect.midtop().0, now_ms, "player fired");
    events.push(RoundEvent::PlayerFired);
    true
}

fn recharge(player: &mut Player, now_ms: u64) {
    let cd = &mut player.cooldown;
    if !cd.ready && now_ms.saturating_sub(cd.last_fire_ms) >= cd.delay_ms {
        cd.ready = true;
    }
}

/// Advance every projectile one step and drop those fully off-screen in
/// their direction of travel.
fn move_projectiles(projectiles: &mut Vec<Projectile>, screen_height: i32) {
    for p in projectiles.iter_mut() {
        p.rect.y += p.velocity;
    }
    projectiles.retain(|p| match p.owner {
        Owner::Player => p.rect.bottom() > 0,
        Owner::Enemy => p.rect.top() < screen_height,
    });
}

fn move_bonus(bonus: &mut Option<Bonus>, config: &RoundConfig) {
    let gone = match bonus {
        Some(b) => {
            b.rect.x += b.velocity;
            b.rect.right() < -config.bonus_exit_left_margin
                || b.rect.left() > config.screen_width + config.bonus_exit_right_margin
        }
        None => false,
    };
    if gone {
        debug!("bonus left the screen");
        *bonus = None;
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Move the ship per held direction keys, then clamp it to the screen.
pub fn move_player(state: &RoundState, input: &InputState) -> RoundState {
    let mut next = state.clone();
    steer_player(&mut next.player, input, &next.config);
    next
}

/// Fire from the ship's top-centre if the cooldown allows.
pub fn player_fire(state: &RoundState, events: &mut Vec<RoundEvent>) -> RoundState {
    let mut next = state.clone();
    fire_player(&mut next.player, next.clock_ms, &state.config, events);
    next
}

/// Back to the resting position, no shots in flight, gun ready.
pub fn reset_player(state: &RoundState) -> RoundState {
    let mut next = state.clone();
    collision::reset_player(&mut next);
    next
}

// ── Timer-signal handlers (RNG is injected) ──────────────────────────────────

/// Spawn a bonus unless one is already alive.
pub fn spawn_bonus(state: &RoundState, events: &mut Vec<RoundEvent>) -> RoundState {
    if state.bonus.is_some() {
        return state.clone();
    }
    debug!("bonus spawned");
    events.push(RoundEvent::BonusSpawned);
    RoundState {
        bonus: Some(Bonus::new(&state.config)),
        ..state.clone()
    }
}

/// Returns the new state and the freshly randomised interval until the
/// next bonus signal.  The interval is redrawn whether or not a bonus spawned.
pub fn on_bonus_spawn_signal(
    state: &RoundState,
    rng: &mut impl Rng,
    events: &mut Vec<RoundEvent>,
) -> (RoundState, u64) {
    let next = spawn_bonus(state, events);
    let interval = bonus_interval(&state.config, rng);
    (next, interval)
}

/// A random enemy fires downward from its bottom-centre.  No-op when the
/// formation is empty.  Returns the fixed re-arm interval.
pub fn on_enemy_fire_signal(
    state: &RoundState,
    rng: &mut impl Rng,
    events: &mut Vec<RoundEvent>,
) -> (RoundState, u64) {
    let interval = state.config.enemy_fire_interval_ms;
    let Some(shooter) = state.formation.pick_random(rng) else {
        return (state.clone(), interval);
    };
    let shot = Projectile::new(
        shooter.rect.midbottom(),
        state.config.enemy_projectile_speed,
        Owner::Enemy,
        state.config.sprites.projectile,
    );
    debug!(x = shooter.rect.midbottom().0, "enemy fired");
    events.push(RoundEvent::EnemyFired);

    let mut next = state.clone();
    next.enemy_projectiles.push(shot);
    (next, interval)
}

/// Debug hook: remove one random enemy without scoring it.
pub fn on_debug_kill(state: &RoundState, rng: &mut impl Rng) -> RoundState {
    let mut next = state.clone();
    if let Some(enemy) = next.formation.remove_random(rng) {
        debug!(?enemy.color, remaining = next.formation.len(), "debug kill");
    }
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `elapsed_ms`: move everything,
/// then resolve collisions once all positions are final.
pub fn tick(
    state: &RoundState,
    input: &InputState,
    elapsed_ms: u64,
    events: &mut Vec<RoundEvent>,
) -> RoundState {
    let mut next = state.clone();
    next.frame += 1;
    next.clock_ms += elapsed_ms;
    let now = next.clock_ms;
    let screen_height = next.config.screen_height;

    // ── 1. Player, and the shots it owns ─────────────────────────────────────
    steer_player(&mut next.player, input, &state.config);
    if input.fire {
        fire_player(&mut next.player, now, &state.config, events);
    }
    move_projectiles(&mut next.player.projectiles, screen_height);
    recharge(&mut next.player, now);

    // ── 2. Bonus drift (enemies are stationary) ──────────────────────────────
    move_bonus(&mut next.bonus, &state.config);

    // ── 3. Enemy shots ───────────────────────────────────────────────────────
    move_projectiles(&mut next.enemy_projectiles, screen_height);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    collision::resolve(&mut next, events);

    trace!(
        frame = next.frame,
        score = next.score,
        shots = next.player.projectiles.len(),
        enemy_shots = next.enemy_projectiles.len(),
        "tick"
    );
    next
}

/// Route one timer signal to its handler and return the re-arm interval.
pub fn on_signal(
    state: &RoundState,
    signal: Signal,
    rng: &mut impl Rng,
    events: &mut Vec<RoundEvent>,
) -> (RoundState, u64) {
    match signal {
        Signal::BonusSpawn => on_bonus_spawn_signal(state, rng, events),
        Signal::EnemyFire => on_enemy_fire_signal(state, rng, events),
    }
}

/// Deliver any timer signals due by the end of this frame, re-arm them,
/// then tick.
pub fn step_frame(
    state: &RoundState,
    timers: &mut Timers,
    input: &InputState,
    elapsed_ms: u64,
    rng: &mut impl Rng,
    events: &mut Vec<RoundEvent>,
) -> RoundState {
    let now = state.clock_ms + elapsed_ms;
    let mut current = state.clone();
    for signal in timers.poll(now) {
        let (next, interval) = on_signal(&current, signal, rng, events);
        timers.rearm(signal, now, interval);
        current = next;
    }
    tick(&current, input, elapsed_ms, events)
}
