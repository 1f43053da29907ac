use super::action::Direction;
use std::fmt;

/// A cell on the game grid: column `x`, row `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance, used by the headless autopilot
    pub fn distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of `length` cells trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self { body, direction }
    }

    /// Wrap an existing segment list. The caller guarantees it is non-empty.
    pub(crate) fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty());
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front. Without growth the tail cell is dropped
    /// first, so the head may take the cell the tail just left.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        if !grow {
            self.body.pop();
        }
        self.body.insert(0, new_head);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a live snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Result of a single simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The snake moved one cell
    Moved,
    /// The snake ate the food and grew by one cell
    Ate,
    /// The head left the board; the game was reset
    HitWall,
    /// The head ran into the body; the game was reset
    HitSelf,
}

impl Outcome {
    /// True when the tick ended the run and reset the board
    pub fn is_crash(self) -> bool {
        matches!(self, Outcome::HitWall | Outcome::HitSelf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Position::new(1, 1).distance(Position::new(4, -1)), 5);
        assert_eq!(Position::new(2, 2).distance(Position::new(2, 2)), 0);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(8, 6), Direction::Up, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(8, 6));
        assert_eq!(
            snake.segments(),
            &[Position::new(8, 6), Position::new(8, 7), Position::new(8, 8)]
        );
        assert_eq!(snake.tail(), Position::new(8, 8));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_outcome_is_crash() {
        assert!(!Outcome::Moved.is_crash());
        assert!(!Outcome::Ate.is_crash());
        assert!(Outcome::HitWall.is_crash());
        assert!(Outcome::HitSelf.is_crash());
    }
}
