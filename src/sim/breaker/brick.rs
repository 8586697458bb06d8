//! Bricks and their hit state machine

use serde::{Deserialize, Serialize};

use crate::sim::geom::Rect;
use crate::Rgb;
use crate::consts::palette;

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    Tough,
    PowerUp,
    /// Cannot be destroyed, doesn't count for level clear
    Unbreakable,
}

impl BrickKind {
    /// Layout code used in level tables (0 = empty cell)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BrickKind::Normal),
            2 => Some(BrickKind::Tough),
            3 => Some(BrickKind::PowerUp),
            4 => Some(BrickKind::Unbreakable),
            _ => None,
        }
    }

    /// Points awarded when destroyed
    pub fn points(self) -> u32 {
        match self {
            BrickKind::Normal => 10,
            BrickKind::Tough => 25,
            BrickKind::PowerUp => 50,
            BrickKind::Unbreakable => 0,
        }
    }

    /// Hits to destroy; `None` for unbreakable. Always >= 1 otherwise.
    pub fn hits_needed(self) -> Option<u32> {
        match self {
            BrickKind::Normal => Some(1),
            BrickKind::Tough => Some(2),
            BrickKind::PowerUp => Some(1),
            BrickKind::Unbreakable => None,
        }
    }

    pub fn base_color(self) -> Rgb {
        match self {
            BrickKind::Normal => palette::GREEN,
            BrickKind::Tough => palette::ORANGE,
            BrickKind::PowerUp => palette::PURPLE,
            BrickKind::Unbreakable => palette::GRAY,
        }
    }
}

/// Result of a single hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    /// Full points on destruction, partial credit otherwise
    pub points: f32,
    pub destroyed: bool,
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub kind: BrickKind,
    pub hits: u32,
    /// Once false the brick is out of play for the rest of the level
    pub visible: bool,
}

impl Brick {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: BrickKind) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind,
            hits: 0,
            visible: true,
        }
    }

    /// Register a hit.
    ///
    /// Unbreakable bricks absorb hits for zero points forever. Others award
    /// `points / hits_needed` per non-final hit and full points when the
    /// final hit destroys them.
    pub fn hit(&mut self) -> HitOutcome {
        let Some(needed) = self.kind.hits_needed() else {
            return HitOutcome {
                points: 0.0,
                destroyed: false,
            };
        };

        self.hits += 1;
        let points = self.kind.points() as f32;

        if self.hits >= needed {
            self.visible = false;
            return HitOutcome {
                points,
                destroyed: true,
            };
        }

        HitOutcome {
            points: points / needed as f32,
            destroyed: false,
        }
    }

    /// Must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.kind != BrickKind::Unbreakable
    }

    /// Fraction of required hits already taken (0 for unbreakable)
    pub fn damage_ratio(&self) -> f32 {
        match self.kind.hits_needed() {
            Some(needed) => (self.hits as f32 / needed as f32).min(1.0),
            None => 0.0,
        }
    }

    /// Current color; tough bricks fade from orange toward red as they crack
    pub fn color(&self) -> Rgb {
        if self.kind == BrickKind::Tough && self.hits > 0 {
            let ratio = self.damage_ratio();
            return Rgb(
                (255.0 * (1.0 - ratio * 0.5)) as u8,
                (150.0 * (1.0 - ratio)) as u8,
                50,
            );
        }
        self.kind.base_color()
    }

    /// Short label drawn on the brick, if any
    pub fn glyph(&self) -> Option<String> {
        match self.kind {
            BrickKind::Tough => self
                .kind
                .hits_needed()
                .map(|needed| needed.saturating_sub(self.hits).to_string()),
            BrickKind::PowerUp => Some("P".to_string()),
            BrickKind::Unbreakable => Some("U".to_string()),
            BrickKind::Normal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brick(kind: BrickKind) -> Brick {
        Brick::new(0.0, 0.0, 75.0, 30.0, kind)
    }

    #[test]
    fn test_normal_brick_single_hit() {
        let mut b = brick(BrickKind::Normal);
        let out = b.hit();
        assert!(out.destroyed);
        assert_eq!(out.points, 10.0);
        assert!(!b.visible);
    }

    #[test]
    fn test_tough_brick_partial_then_full() {
        let mut b = brick(BrickKind::Tough);

        let first = b.hit();
        assert!(!first.destroyed);
        assert_eq!(first.points, 12.5);
        assert!(b.visible);
        assert_eq!(b.glyph().as_deref(), Some("1"));

        let second = b.hit();
        assert!(second.destroyed);
        assert_eq!(second.points, 25.0);
        assert!(!b.visible);
    }

    #[test]
    fn test_tough_brick_color_fades() {
        let mut b = brick(BrickKind::Tough);
        assert_eq!(b.color(), palette::ORANGE);
        b.hit();
        assert_eq!(b.color(), Rgb(191, 75, 50));
    }

    #[test]
    fn test_layout_codes() {
        assert_eq!(BrickKind::from_code(0), None);
        assert_eq!(BrickKind::from_code(3), Some(BrickKind::PowerUp));
        assert_eq!(BrickKind::from_code(4), Some(BrickKind::Unbreakable));
    }

    #[test]
    fn test_breakable_kinds_need_at_least_one_hit() {
        for kind in [BrickKind::Normal, BrickKind::Tough, BrickKind::PowerUp] {
            assert!(kind.hits_needed().is_some_and(|n| n >= 1));
        }
    }

    proptest! {
        #[test]
        fn prop_unbreakable_never_destroyed(hits in 1usize..500) {
            let mut b = brick(BrickKind::Unbreakable);
            for _ in 0..hits {
                let out = b.hit();
                prop_assert!(!out.destroyed);
                prop_assert_eq!(out.points, 0.0);
            }
            prop_assert!(b.visible);
            prop_assert_eq!(b.hits, 0);
        }
    }
}
