//! Idle/demo driver for the serpent: greedy toward food, never into a
//! cell that would end the run on the next step

use glam::IVec2;

use super::session::SerpentSession;
use crate::consts::serpent::{GRID_HEIGHT, GRID_WIDTH};
use crate::sim::input::{Direction, TickInput};

fn in_bounds(cell: IVec2) -> bool {
    (0..GRID_WIDTH).contains(&cell.x) && (0..GRID_HEIGHT).contains(&cell.y)
}

/// Whether stepping into `cell` next move is survivable
fn is_safe(session: &SerpentSession, cell: IVec2) -> bool {
    if !in_bounds(cell) || session.obstacles.is_obstacle(cell) {
        return false;
    }
    let snake = &session.snake;
    // The tail moves out of the way unless the snake is growing
    let body = if snake.grow_pending > 0 {
        snake.len()
    } else {
        snake.len().saturating_sub(1)
    };
    !snake.segments.iter().take(body).any(|&seg| seg == cell)
}

/// Pick a heading for the next step
pub fn drive(session: &SerpentSession, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let snake = &session.snake;
    let head = snake.head();
    let current = snake.direction;

    let target = session.food.as_ref().map(|f| f.pos);

    let best = Direction::ALL
        .into_iter()
        .filter(|&dir| dir != current.opposite())
        .map(|dir| (dir, head + dir.delta()))
        .filter(|&(_, cell)| is_safe(session, cell))
        .min_by_key(|&(dir, cell)| {
            let distance = target.map_or(0, |t| (t - cell).abs().element_sum());
            // Prefer going straight on ties
            (distance, dir != current)
        })
        .map(|(dir, _)| dir);

    if let Some(dir) = best {
        input.direction = Some(dir);
    }
    input
}
