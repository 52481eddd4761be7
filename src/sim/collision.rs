//! Collision detection
//!
//! Everything collides as an axis-aligned box. The only asymmetry is the
//! knight's sword swing, which shrinks the dragon's box differently depending
//! on which side the dragon approaches from.

use glam::Vec2;

use super::state::Facing;

/// Axis-aligned box (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        crate::rect_center(self.pos, self.size)
    }
}

/// Inclusive AABB overlap: touching edges count as a hit
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.pos.x > b.right() || a.right() < b.pos.x || a.pos.y > b.bottom() || a.bottom() < b.pos.y)
}

/// Per-facing shrink of the dragon box for sword hits: (knight reach, dragon trim)
const SWING_RIGHT_FACING: (f32, f32) = (50.0, 100.0);
const SWING_LEFT_FACING: (f32, f32) = (100.0, 50.0);
const SWING_VERTICAL: (f32, f32) = (50.0, 100.0);

/// Whether a knight at `knight` reaches a dragon box facing `dragon_facing`
///
/// The knight's origin must fall inside the dragon box grown on the near side
/// by the knight's reach and trimmed on the far side.
pub fn sword_reaches(knight: Vec2, dragon: &Rect, dragon_facing: Facing) -> bool {
    let (reach_x, trim_x) = match dragon_facing {
        Facing::Right => SWING_RIGHT_FACING,
        Facing::Left => SWING_LEFT_FACING,
    };
    let (reach_y, trim_y) = SWING_VERTICAL;

    knight.x + reach_x > dragon.pos.x
        && knight.x < dragon.right() - trim_x
        && knight.y + reach_y > dragon.pos.y
        && knight.y < dragon.bottom() - trim_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_separated_boxes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &Rect::new(10.5, 0.0, 5.0, 5.0)));
        assert!(!overlaps(&a, &Rect::new(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_swing_asymmetry() {
        // Dragon at x=0..370; knight just right of the right-facing trim
        let dragon = Rect::new(0.0, 0.0, 370.0, 200.0);
        let knight = Vec2::new(290.0, 50.0);
        // Facing right trims 100 from the far side: 290 < 270 fails
        assert!(!sword_reaches(knight, &dragon, Facing::Right));
        // Facing left trims only 50: 290 < 320 holds
        assert!(sword_reaches(knight, &dragon, Facing::Left));
    }

    #[test]
    fn test_swing_near_side_reach() {
        let dragon = Rect::new(200.0, 0.0, 370.0, 200.0);
        // Knight 80px left of the dragon: only the 100px left-facing reach covers it
        let knight = Vec2::new(120.0, 50.0);
        assert!(!sword_reaches(knight, &dragon, Facing::Right));
        assert!(sword_reaches(knight, &dragon, Facing::Left));
    }

    #[test]
    fn test_swing_vertical_window() {
        let dragon = Rect::new(0.0, 0.0, 370.0, 200.0);
        assert!(!sword_reaches(Vec2::new(100.0, 100.0), &dragon, Facing::Left));
        assert!(!sword_reaches(Vec2::new(100.0, -50.0), &dragon, Facing::Left));
        assert!(sword_reaches(Vec2::new(100.0, -49.0), &dragon, Facing::Left));
    }
}
