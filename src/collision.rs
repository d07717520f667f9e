/// Collision pass, run once per tick after every entity has moved.
///
/// Player projectiles are tested against enemies, then the bonus, then
/// barrier cells, stopping at the first category that registers a hit.
/// Enemy projectiles are tested against barrier cells, then the player.

use tracing::info;

use crate::barrier::Barrier;
use crate::entities::{Projectile, RoundEvent, RoundState};
use crate::rect::Rect;

/// What a single player projectile ran into.
#[derive(Clone, Debug, PartialEq)]
enum PlayerShotHit {
    Enemies(usize),
    Bonus,
    Barrier(usize),
}

fn destroy_barrier_cells(barriers: &mut [Barrier], hitbox: &Rect) -> usize {
    barriers.iter_mut().map(|b| b.destroy_overlapping(hitbox)).sum()
}

/// Resolve one player projectile against the round, applying kills.
fn resolve_player_shot(state: &mut RoundState, shot: &Projectile) -> Option<PlayerShotHit> {
    let before = state.formation.enemies.len();
    state.formation.enemies.retain(|e| !e.rect.overlaps(&shot.rect));
    let killed = before - state.formation.enemies.len();
    if killed > 0 {
        return Some(PlayerShotHit::Enemies(killed));
    }

    if state.bonus.as_ref().is_some_and(|b| b.rect.overlaps(&shot.rect)) {
        state.bonus = None;
        return Some(PlayerShotHit::Bonus);
    }

    let cells = destroy_barrier_cells(&mut state.barriers, &shot.rect);
    if cells > 0 {
        return Some(PlayerShotHit::Barrier(cells));
    }
    None
}

/// Mutates `state` in place; `compute::tick` calls this on its working copy.
pub(crate) fn resolve(state: &mut RoundState, events: &mut Vec<RoundEvent>) {
    // ── Player projectiles ───────────────────────────────────────────────────
    let shots = std::mem::take(&mut state.player.projectiles);
    let mut surviving = Vec::with_capacity(shots.len());
    for shot in shots {
        match resolve_player_shot(state, &shot) {
            Some(PlayerShotHit::Enemies(count)) => {
                state.score += state.config.enemy_points * count as u32;
                info!(count, score = state.score, "enemies destroyed");
                events.push(RoundEvent::EnemiesDestroyed { count });
            }
            Some(PlayerShotHit::Bonus) => {
                state.score += state.config.bonus_points;
                info!(score = state.score, "bonus destroyed");
                events.push(RoundEvent::BonusDestroyed);
            }
            Some(PlayerShotHit::Barrier(cells)) => {
                events.push(RoundEvent::BarrierHit { cells });
            }
            None => surviving.push(shot),
        }
    }
    state.player.projectiles = surviving;

    // ── Enemy projectiles ────────────────────────────────────────────────────
    let shots = std::mem::take(&mut state.enemy_projectiles);
    let mut surviving = Vec::with_capacity(shots.len());
    for shot in shots {
        let cells = destroy_barrier_cells(&mut state.barriers, &shot.rect);
        if cells > 0 {
            events.push(RoundEvent::BarrierHit { cells });
            continue;
        }
        if shot.rect.overlaps(&state.player.rect) {
            info!("player hit");
            reset_player(state);
            events.push(RoundEvent::PlayerHit);
            continue;
        }
        surviving.push(shot);
    }
    state.enemy_projectiles = surviving;
}

/// Back to the resting position with no shots in flight and a ready gun.
/// No lives are lost.
pub(crate) fn reset_player(state: &mut RoundState) {
    let player = &mut state.player;
    player.rect = Rect::from_midbottom(state.config.player_rest(), state.config.sprites.ship);
    player.projectiles.clear();
    player.cooldown.ready = true;
    player.cooldown.last_fire_ms = 0;
}
