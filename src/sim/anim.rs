//! Sprite-sheet frame cursors
//!
//! Every animated entity composes one or more cursors instead of doing its own
//! frame arithmetic. A cursor accumulates a per-tick step into a counter; once
//! the counter reaches the interval it resets and the frame advances.

use glam::Vec2;

/// Looping cursor over a single row of frames
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCursor {
    count: f32,
    interval: f32,
    frames: u32,
    frame: u32,
}

impl SpriteCursor {
    pub fn new(frames: u32, interval: f32) -> Self {
        Self {
            count: 0.0,
            interval,
            frames: frames.max(1),
            frame: 0,
        }
    }

    /// Accumulate `step` into the counter, advancing a frame when it reaches
    /// the interval. Returns true when the row wrapped back to frame zero.
    pub fn advance(&mut self, step: f32) -> bool {
        self.count += step;
        if self.count < self.interval {
            return false;
        }
        self.count = 0.0;
        self.frame += 1;
        if self.frame >= self.frames {
            self.frame = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.count = 0.0;
        self.frame = 0;
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Horizontal pixel offset into the sheet
    pub fn offset(&self, frame_width: f32) -> f32 {
        self.frame as f32 * frame_width
    }
}

/// Forward-only cursor across a grid of cells, row by row
///
/// Stops after the last cell; `is_finished` then stays true.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetCursor {
    count: f32,
    interval: f32,
    columns: u32,
    rows: u32,
    column: u32,
    row: u32,
    finished: bool,
}

impl SheetCursor {
    pub fn new(columns: u32, rows: u32, interval: f32) -> Self {
        Self {
            count: 0.0,
            interval,
            columns: columns.max(1),
            rows: rows.max(1),
            column: 0,
            row: 0,
            finished: false,
        }
    }

    /// Advance by one tick's `step`. Returns true when the displayed cell changed.
    pub fn advance(&mut self, step: f32) -> bool {
        if self.finished {
            return false;
        }
        self.count += step;
        if self.count < self.interval {
            return false;
        }
        self.count = 0.0;
        self.column += 1;
        if self.column >= self.columns {
            if self.row + 1 >= self.rows {
                self.column = self.columns - 1;
                self.finished = true;
                return false;
            }
            self.column = 0;
            self.row += 1;
        }
        true
    }

    /// (column, row) of the current cell
    pub fn cell(&self) -> (u32, u32) {
        (self.column, self.row)
    }

    pub fn is_last_cell(&self) -> bool {
        self.column + 1 == self.columns && self.row + 1 == self.rows
    }

    /// Whether the last cell of `row` is showing
    pub fn is_row_end(&self, row: u32) -> bool {
        self.row == row && self.column + 1 == self.columns
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pixel offset of the current cell for square cells of `cell_size`
    pub fn offset(&self, cell_size: f32) -> Vec2 {
        Vec2::new(self.column as f32, self.row as f32) * cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sprite_cursor_cadence() {
        let mut cursor = SpriteCursor::new(3, 4.0);
        for _ in 0..3 {
            assert!(!cursor.advance(1.0));
            assert_eq!(cursor.frame(), 0);
        }
        cursor.advance(1.0);
        assert_eq!(cursor.frame(), 1);
        assert_eq!(cursor.offset(231.0), 231.0);
    }

    #[test]
    fn test_sprite_cursor_wraps() {
        let mut cursor = SpriteCursor::new(2, 1.0);
        assert!(!cursor.advance(1.0));
        assert_eq!(cursor.frame(), 1);
        assert!(cursor.advance(1.0));
        assert_eq!(cursor.frame(), 0);
    }

    #[test]
    fn test_sprite_cursor_faster_step() {
        // A larger step reaches the interval in fewer ticks
        let mut slow = SpriteCursor::new(12, 4.0);
        let mut fast = SpriteCursor::new(12, 4.0);
        for _ in 0..20 {
            slow.advance(1.0);
            fast.advance(1.5);
        }
        assert!(fast.frame() > slow.frame());
    }

    #[test]
    fn test_sheet_cursor_rows_then_finish() {
        let mut cursor = SheetCursor::new(2, 2, 1.0);
        assert_eq!(cursor.cell(), (0, 0));
        assert!(cursor.advance(1.0));
        assert_eq!(cursor.cell(), (1, 0));
        assert!(cursor.is_row_end(0));
        assert!(cursor.advance(1.0));
        assert_eq!(cursor.cell(), (0, 1));
        assert!(cursor.advance(1.0));
        assert!(cursor.is_last_cell());
        assert!(!cursor.is_finished());
        assert!(!cursor.advance(1.0));
        assert!(cursor.is_finished());
        // Further ticks are no-ops
        assert!(!cursor.advance(1.0));
        assert_eq!(cursor.cell(), (1, 1));
    }

    #[test]
    fn test_sheet_offset() {
        let mut cursor = SheetCursor::new(5, 4, 1.0);
        for _ in 0..6 {
            cursor.advance(1.0);
        }
        assert_eq!(cursor.cell(), (1, 1));
        assert_eq!(cursor.offset(192.0), Vec2::new(192.0, 192.0));
    }

    proptest! {
        #[test]
        fn prop_sprite_frame_in_bounds(frames in 1u32..20, steps in 0usize..500, step in 0.1f32..3.0) {
            let mut cursor = SpriteCursor::new(frames, 4.0);
            for _ in 0..steps {
                cursor.advance(step);
                prop_assert!(cursor.frame() < frames);
            }
        }

        #[test]
        fn prop_sheet_finishes(columns in 1u32..6, rows in 1u32..5) {
            let mut cursor = SheetCursor::new(columns, rows, 1.0);
            for _ in 0..(columns * rows) {
                cursor.advance(1.0);
            }
            prop_assert!(cursor.is_finished());
        }
    }
}
