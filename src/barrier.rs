/// Destructible shields built cell-by-cell from a fixed bitmap.

use crate::config::RoundConfig;
use crate::rect::Rect;

pub const TEMPLATE_ROWS: usize = 13;
pub const TEMPLATE_COLS: usize = 23;

/// Bunker silhouette with an archway carved into the bottom centre.
pub const TEMPLATE: [[u8; TEMPLATE_COLS]; TEMPLATE_ROWS] = [
    [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
];

/// One hit point worth of shield.
#[derive(Clone, Debug, PartialEq)]
pub struct BarrierCell {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Barrier {
    pub cells: Vec<BarrierCell>,
}

impl Barrier {
    /// One cell per set template bit, offset from `(origin_x, origin_y)`.
    pub fn new(origin_x: i32, origin_y: i32, cell_size: i32) -> Self {
        let cells = TEMPLATE
            .iter()
            .enumerate()
            .flat_map(|(row, bits)| {
                bits.iter()
                    .enumerate()
                    .filter(|&(_, &bit)| bit == 1)
                    .map(move |(col, _)| BarrierCell {
                        rect: Rect::new(
                            origin_x + col as i32 * cell_size,
                            origin_y + row as i32 * cell_size,
                            cell_size,
                            cell_size,
                        ),
                    })
            })
            .collect();
        Barrier { cells }
    }

    /// Remove every cell overlapping `hitbox` and return how many went.
    /// Neighbouring cells are left alone.
    pub fn destroy_overlapping(&mut self, hitbox: &Rect) -> usize {
        let before = self.cells.len();
        self.cells.retain(|cell| !cell.rect.overlaps(hitbox));
        before - self.cells.len()
    }

    pub fn overlaps(&self, hitbox: &Rect) -> bool {
        self.cells.iter().any(|cell| cell.rect.overlaps(hitbox))
    }
}

/// Width of one barrier in pixels.
pub fn barrier_width(cell_size: i32) -> i32 {
    TEMPLATE_COLS as i32 * cell_size
}

/// Evenly spaced, horizontally centred row of barriers above the player.
pub fn layout_barriers(config: &RoundConfig) -> Vec<Barrier> {
    let count = config.barrier_count as i32;
    if count == 0 {
        return Vec::new();
    }
    let cell = config.sprites.barrier_cell;
    let width = barrier_width(cell);
    let total_width = count * width + (count - 1) * config.barrier_gap;
    let start_x = (config.screen_width - total_width) / 2;
    let y = config.screen_height - config.barrier_rise;

    (0..count)
        .map(|i| Barrier::new(start_x + i * (width + config.barrier_gap), y, cell))
        .collect()
}
