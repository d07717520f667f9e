/// Draw list handed to the render sink once per frame.

use crate::entities::{EnemyColor, RoundState};
use crate::rect::Rect;

/// Logical visual role; the renderer decides what each one looks like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    Background,
    Enemy(EnemyColor),
    Bonus,
    BarrierCell,
    Ship,
    PlayerLaser,
    EnemyLaser,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub visual: Visual,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub score: u32,
    /// Back to front.
    pub sprites: Vec<Sprite>,
}

/// Sprites back to front: background, formation, bonus, barrier cells,
/// player, player shots, enemy shots.
pub fn draw_list(state: &RoundState) -> Frame {
    let cfg = &state.config;
    let mut sprites = vec![Sprite {
        rect: Rect::new(0, 0, cfg.screen_width, cfg.screen_height),
        visual: Visual::Background,
    }];

    sprites.extend(
        state
            .formation
            .enemies
            .iter()
            .map(|e| Sprite { rect: e.rect, visual: Visual::Enemy(e.color) }),
    );
    sprites.extend(state.bonus.iter().map(|b| Sprite { rect: b.rect, visual: Visual::Bonus }));
    sprites.extend(
        state
            .barriers
            .iter()
            .flat_map(|b| b.cells.iter())
            .map(|c| Sprite { rect: c.rect, visual: Visual::BarrierCell }),
    );
    sprites.push(Sprite { rect: state.player.rect, visual: Visual::Ship });
    sprites.extend(
        state
            .player
            .projectiles
            .iter()
            .map(|p| Sprite { rect: p.rect, visual: Visual::PlayerLaser }),
    );
    sprites.extend(
        state
            .enemy_projectiles
            .iter()
            .map(|p| Sprite { rect: p.rect, visual: Visual::EnemyLaser }),
    );

    Frame { score: state.score, sprites }
}
