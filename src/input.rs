/// Canonical movement directions on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// One-cell displacement for this direction, `y` growing downward.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Raw input state sampled once per timing pulse.
///
/// Direction fields are level signals (held keys stay true); the session
/// filters them through the no-reverse rule before latching. Pause and
/// restart are also level signals and are edge-detected by the session so a
/// held key fires once.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub pause: bool,
    pub restart: bool,
}

impl InputSnapshot {
    /// Snapshot with a single direction pressed.
    #[must_use]
    pub fn pressing(direction: Direction) -> Self {
        let mut snapshot = Self::default();
        match direction {
            Direction::Up => snapshot.up = true,
            Direction::Down => snapshot.down = true,
            Direction::Left => snapshot.left = true,
            Direction::Right => snapshot.right = true,
        }
        snapshot
    }

    /// Highest-priority pressed direction, if any.
    ///
    /// Scan order is Up, Left, Down, Right; at most one direction is
    /// honored per pulse.
    #[must_use]
    pub fn pressed_direction(self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.left {
            Some(Direction::Left)
        } else if self.down {
            Some(Direction::Down)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}
