/// Axis-aligned integer rectangle used as the hitbox of every entity.
///
/// `right()` and `bottom()` are exclusive edges, so a rect with `h == 15`
/// placed at `y == 0` covers rows `0..15`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    // ── Anchor-based construction ───────────────────────────────────────────

    pub fn from_topleft((x, y): (i32, i32), (w, h): (i32, i32)) -> Self {
        Rect { x, y, w, h }
    }

    pub fn from_center((cx, cy): (i32, i32), (w, h): (i32, i32)) -> Self {
        Rect { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub fn from_midbottom((cx, bottom): (i32, i32), (w, h): (i32, i32)) -> Self {
        Rect { x: cx - w / 2, y: bottom - h, w, h }
    }

    pub fn from_midleft((left, cy): (i32, i32), (w, h): (i32, i32)) -> Self {
        Rect { x: left, y: cy - h / 2, w, h }
    }

    // ── Edges & anchors ─────────────────────────────────────────────────────

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn midtop(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y)
    }

    pub fn midbottom(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.bottom())
    }

    /// True when the two rects share at least one pixel.  Touching edges
    /// do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
