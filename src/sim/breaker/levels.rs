//! Brick layouts
//!
//! Codes: 0 empty, 1 normal, 2 tough, 3 power-up, 4 unbreakable.

use super::brick::{Brick, BrickKind};
use crate::consts::breaker::*;

type Layout = [[u8; BRICK_COLS]; BRICK_ROWS];

pub const LEVELS: [Layout; 3] = [
    // Simple
    [
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    // Patterned
    [
        [2, 1, 2, 1, 2, 1, 2, 1, 2],
        [1, 2, 1, 2, 1, 2, 1, 2, 1],
        [2, 1, 2, 1, 2, 1, 2, 1, 2],
        [1, 2, 1, 2, 1, 2, 1, 2, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    // Power-ups behind an unbreakable fence
    [
        [4, 3, 4, 3, 4, 3, 4, 3, 4],
        [3, 2, 3, 2, 3, 2, 3, 2, 3],
        [2, 1, 2, 1, 2, 1, 2, 1, 2],
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
    ],
];

pub fn level_count() -> usize {
    LEVELS.len()
}

/// Build the bricks for a level (index wraps)
pub fn build_level(index: usize) -> Vec<Brick> {
    let layout = &LEVELS[index % LEVELS.len()];
    let mut bricks = Vec::new();

    for (row, cells) in layout.iter().enumerate() {
        for (col, &code) in cells.iter().enumerate() {
            let Some(kind) = BrickKind::from_code(code) else {
                continue;
            };
            let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_PADDING;
            let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_MARGIN_TOP;
            bricks.push(Brick::new(x, y, BRICK_WIDTH, BRICK_HEIGHT, kind));
        }
    }

    bricks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_has_27_normal_bricks() {
        let bricks = build_level(0);
        assert_eq!(bricks.len(), 27);
        assert!(bricks.iter().all(|b| b.kind == BrickKind::Normal));
    }

    #[test]
    fn test_level_three_unbreakables_do_not_count() {
        let bricks = build_level(2);
        let clearable = bricks.iter().filter(|b| b.counts_for_clear()).count();
        assert_eq!(bricks.len(), 45);
        assert_eq!(clearable, 40);
    }

    #[test]
    fn test_grid_positions() {
        let bricks = build_level(0);
        assert_eq!(bricks[0].rect.x, BRICK_PADDING);
        assert_eq!(bricks[0].rect.y, BRICK_MARGIN_TOP);
        assert_eq!(bricks[1].rect.x, BRICK_WIDTH + 2.0 * BRICK_PADDING);
        assert_eq!(bricks[9].rect.y, BRICK_MARGIN_TOP + BRICK_HEIGHT + BRICK_PADDING);
        assert!(bricks.iter().all(|b| b.rect.right() <= SCREEN_WIDTH));
    }

    #[test]
    fn test_index_wraps() {
        assert_eq!(build_level(3).len(), build_level(0).len());
    }
}
