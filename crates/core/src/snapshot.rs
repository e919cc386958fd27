use crate::types::Point;

/// One server tick as decoded from the wire.
///
/// Coordinates are expected to lie within `[0, width) x [0, height)`, but that
/// is the server's contract; nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Snake body, head first.
    pub snake: Vec<Point>,
    /// `None` when the server sent no (or a malformed) food coordinate.
    pub food: Option<Point>,
    pub score: u32,
    pub game_over: bool,
    pub width: u32,
    pub height: u32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// True if any snake segment occupies `p`.
    pub fn contains(&self, p: Point) -> bool {
        self.snake.iter().any(|s| *s == p)
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as i64) < self.width as i64 && (p.y as i64) < self.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries() {
        let snap = Snapshot {
            snake: vec![Point::new(5, 6), Point::new(5, 5)],
            food: Some(Point::new(3, 3)),
            score: 0,
            game_over: false,
            width: 20,
            height: 15,
        };
        assert_eq!(snap.head(), Some(Point::new(5, 6)));
        assert_eq!(snap.snake_len(), 2);
        assert!(snap.contains(Point::new(5, 5)));
        assert!(!snap.contains(Point::new(3, 3)));

        assert!(snap.in_bounds(Point::new(0, 0)));
        assert!(snap.in_bounds(Point::new(19, 14)));
        assert!(!snap.in_bounds(Point::new(20, 0)));
        assert!(!snap.in_bounds(Point::new(-1, 3)));
    }

    #[test]
    fn test_default_is_empty_board() {
        let snap = Snapshot::default();
        assert_eq!(snap.head(), None);
        assert!(!snap.in_bounds(Point::new(0, 0)));
    }
}
