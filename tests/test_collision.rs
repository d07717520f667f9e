use invaders::compute::*;
use invaders::config::RoundConfig;
use invaders::entities::*;
use invaders::rect::Rect;

fn make_state() -> RoundState {
    init_state(RoundConfig::default())
}

fn idle() -> InputState {
    InputState::default()
}

fn player_shot(x: i32, y: i32) -> Projectile {
    Projectile { rect: Rect::new(x, y, 4, 15), velocity: -8, owner: Owner::Player }
}

fn enemy_shot(x: i32, y: i32) -> Projectile {
    Projectile { rect: Rect::new(x, y, 4, 15), velocity: 5, owner: Owner::Enemy }
}

fn cell_count(s: &RoundState) -> usize {
    s.barriers.iter().map(|b| b.cells.len()).sum()
}

// tick() moves shots BEFORE collision detection: player shots rise 8,
// enemy shots fall 5.

// ── Player shot ↔ enemies ────────────────────────────────────────────────────

#[test]
fn player_shot_kills_enemy_for_100() {
    // enemy 0 occupies x 40..76, y 40..68
    let mut s = make_state();
    s.player.projectiles.push(player_shot(50, 70)); // moves to y=62
    let mut events = Vec::new();
    let s2 = tick(&s, &idle(), 16, &mut events);
    assert_eq!(s2.formation.len(), 5);
    assert_eq!(s2.score, 100);
    assert!(s2.player.projectiles.is_empty());
    assert!(events.contains(&RoundEvent::EnemiesDestroyed { count: 1 }));
}

#[test]
fn one_shot_kills_every_overlapping_enemy() {
    let mut s = make_state();
    let stacked = s.formation.enemies[0].clone();
    s.formation.enemies.push(stacked);
    s.player.projectiles.push(player_shot(50, 70));
    let s2 = tick(&s, &idle(), 16, &mut Vec::new());
    assert_eq!(s2.formation.len(), 5);
    assert_eq!(s2.score, 200);
}

#[test]
fn enemy_score_independent_of_formation_size() {
    let mut s = make_state();
    s.formation.enemies.truncate(1);
    s.player.projectiles.push(player_shot(50, 70));
    let s2 = tick(&s, &idle(), 16, &mut Vec::new());
    assert!(s2.formation.is_empty());
    assert_eq!(s2.score, 100);
}

#[test]
fn near_miss_beside_enemy() {
    let mut s = make_state();
    s.player.projectiles.push(player_shot(76, 70)); // touches the right edge only
    let s2 = tick(&s, &idle(), 16, &mut Vec::new());
    assert_eq!(s2.formation.len(), 6);
    assert_eq!(s2.player.projectiles.len(), 1);
}

// ── Player shot ↔ bonus ──────────────────────────────────────────────────────

#[test]
fn player_shot_kills_bonus_for_300() {
    let mut s = make_state();
    s.bonus = Some(Bonus { rect: Rect::new(480, 16, 60, 28), velocity: 0 });
    s.player.projectiles.push(player_shot(500, 30)); // y 22..37, above the enemy row
    let mut events = Vec::new();
    let s2 = tick(&s, &idle(), 16, &mut events);
    assert!(s2.bonus.is_none());
    assert_eq!(s2.score, 300);
    assert!(s2.player.projectiles.is_empty());
    assert!(events.contains(&RoundEvent::BonusDestroyed));
}

#[test]
fn enemy_then_bonus_scores_400() {
    let mut s = make_state();
    s.player.projectiles.push(player_shot(50, 70));
    let s = tick(&s, &idle(), 16, &mut Vec::new());
    assert_eq!(s.score, 100);

    let mut s = s;
    s.bonus = Some(Bonus { rect: Rect::new(480, 16, 60, 28), velocity: 0 });
    s.player.projectiles.push(player_shot(500, 30));
    let s = tick(&s, &idle(), 16, &mut Vec::new());
    assert_eq!(s.score, 400);
}

#[test]
fn enemy_takes_priority_over_bonus() {
    let mut s = make_state();
    let enemy_rect = s.formation.enemies[0].rect;
    s.bonus = Some(Bonus { rect: enemy_rect, velocity: 0 });
    s.player.projectiles.push(player_shot(50, 70));
    let mut events = Vec::new();
    let s2 = tick(&s, &idle(), 16, &mut events);
    assert_eq!(s2.formation.len(), 5);
    assert!(s2.bonus.is_some());
    assert_eq!(s2.score, 100);
    assert!(s2.player.projectiles.is_empty());
    assert!(!events.contains(&RoundEvent::BonusDestroyed));
}

// ── Player shot ↔ barriers ───────────────────────────────────────────────────

#[test]
fn player_shot_chips_barrier_from_below() {
    // barrier 0 origin (56, 520); column 1 lies at x 60..64, rows 11 and 12
    // at y 564..572
    let mut s = make_state();
    let before = cell_count(&s);
    s.player.projectiles.push(player_shot(60, 575)); // moves to y 567..582
    let mut events = Vec::new();
    let s2 = tick(&s, &idle(), 16, &mut events);
    assert_eq!(cell_count(&s2), before - 2);
    assert!(s2.player.projectiles.is_empty());
    assert_eq!(s2.score, 0);
    assert!(events.contains(&RoundEvent::BarrierHit { cells: 2 }));
}

#[test]
fn barrier_hit_leaves_neighbours_intact() {
    let mut s = make_state();
    s.player.projectiles.push(player_shot(60, 575));
    let s2 = tick(&s, &idle(), 16, &mut Vec::new());
    let cells = &s2.barriers[0].cells;
    let has = |x: i32, y: i32| cells.iter().any(|c| c.rect.x == x && c.rect.y == y);
    assert!(!has(60, 564));
    assert!(!has(60, 568));
    assert!(has(56, 564));
    assert!(has(64, 564));
    assert!(has(60, 560));
}

#[test]
fn shot_through_archway_passes() {
    // column 11 of barrier 0 (x 100..104) is hollow in rows 10–12
    let mut s = make_state();
    s.player.projectiles.push(player_shot(100, 575));
    let s2 = tick(&s, &idle(), 16, &mut Vec::new());
    assert_eq!(cell_count(&s2), cell_count(&s));
    assert_eq!(s2.player.projectiles.len(), 1);
}

// ── Enemy shot ↔ barriers / player ───────────────────────────────────────────

#[test]
fn enemy_shot_chips_barrier_top() {
    // row 0 of barrier 0 spans columns 4..=18; column 5 is x 76..80
    let mut s = make_state();
    let before = cell_count(&s);
    s.enemy_projectiles.push(enemy_shot(76, 502)); // moves to y 507..522
    let s2 = tick(&s, &idle(), 16, &mut Vec::new());
    assert_eq!(cell_count(&s2), before - 1);
    assert!(s2.enemy_projectiles.is_empty());
}

#[test]
fn barrier_wins_over_player() {
    let mut s = make_state();
    s.player.rect = Rect::new(60, 515, 50, 24);
    s.enemy_projectiles.push(enemy_shot(76, 505)); // y 510..525: barrier and ship
    let mut events = Vec::new();
    let s2 = tick(&s, &idle(), 16, &mut events);
    assert!(s2.enemy_projectiles.is_empty());
    assert_eq!(s2.player.rect.x, 60);
    assert!(!events.contains(&RoundEvent::PlayerHit));
}

#[test]
fn enemy_shot_resets_player() {
    let s = make_state();
    let spawn = s.player.rect;

    // move off the spawn point, fire, and leave the gun cooling down
    let fire_right = InputState { right: true, fire: true, left: false };
    let mut s = tick(&s, &fire_right, 16, &mut Vec::new());
    assert_eq!(s.player.rect.x, 286);
    assert_eq!(s.player.projectiles.len(), 1);
    assert!(!s.player.cooldown.ready);

    s.enemy_projectiles.push(enemy_shot(309, 650)); // moves into the ship
    let mut events = Vec::new();
    let s2 = tick(&s, &idle(), 16, &mut events);
    assert_eq!(s2.player.rect, spawn);
    assert!(s2.player.projectiles.is_empty());
    assert!(s2.player.cooldown.ready);
    assert!(s2.enemy_projectiles.is_empty());
    assert_eq!(s2.score, 0);
    assert!(events.contains(&RoundEvent::PlayerHit));
}
