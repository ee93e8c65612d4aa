use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Neighboring cell one step away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One occupied cell of the body and the direction it was entered traveling.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub position: Position,
    pub entered: Direction,
}

/// Fixed-capacity circular store of body segments, ordered tail to head.
///
/// Storing absolute positions in a ring (instead of a linked list of deltas)
/// keeps push-head, pop-tail, and random access near the tail all O(1). The
/// price is a hard capacity that must exceed the maximum body length the
/// grid can hold; the engine validates that at setup.
#[derive(Debug, Clone)]
pub struct BodyRing {
    slots: Vec<Segment>,
    head_index: usize,
    tail_index: usize,
}

impl BodyRing {
    /// Creates an empty ring with room for `capacity` segments.
    ///
    /// One slot is kept unusable so a full ring is distinguishable from an
    /// empty one; the usable length is `capacity - 1`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let filler = Segment {
            position: Position { x: 0, y: 0 },
            entered: Direction::Right,
        };
        Self {
            slots: vec![filler; capacity],
            head_index: 0,
            tail_index: 0,
        }
    }

    /// Reinitializes the ring with the starting segments, tail first.
    pub fn reset(&mut self, initial: &[Segment]) {
        debug_assert!(initial.len() < self.slots.len());

        self.tail_index = 0;
        self.head_index = initial.len();
        self.slots[..initial.len()].copy_from_slice(initial);
    }

    /// Number of live segments.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.head_index + self.slots.len() - self.tail_index) % self.slots.len()
    }

    /// Returns true when no segments are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head_index == self.tail_index
    }

    /// Appends a new head segment.
    pub fn push_head(&mut self, segment: Segment) {
        debug_assert!(
            self.len() + 1 < self.slots.len(),
            "body ring capacity exhausted; capacity must exceed grid cell count"
        );

        self.slots[self.head_index] = segment;
        self.head_index = (self.head_index + 1) % self.slots.len();
    }

    /// Removes and returns the oldest segment.
    pub fn pop_tail(&mut self) -> Segment {
        debug_assert!(!self.is_empty());

        let segment = self.slots[self.tail_index];
        self.tail_index = (self.tail_index + 1) % self.slots.len();
        segment
    }

    /// Segment at `offset` slots past the tail (offset 0 is the tail itself).
    #[must_use]
    pub fn peek_from_tail(&self, offset: usize) -> Segment {
        debug_assert!(offset < self.len());
        self.slots[(self.tail_index + offset) % self.slots.len()]
    }

    /// The most recently pushed segment.
    #[must_use]
    pub fn head(&self) -> Segment {
        debug_assert!(!self.is_empty());
        self.slots[(self.head_index + self.slots.len() - 1) % self.slots.len()]
    }

    /// Iterates over live segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.len()).map(|offset| self.peek_from_tail(offset))
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{BodyRing, Position, Segment};

    fn segment(x: i32, y: i32, entered: Direction) -> Segment {
        Segment {
            position: Position { x, y },
            entered,
        }
    }

    #[test]
    fn reset_writes_starting_segments_tail_first() {
        let mut ring = BodyRing::with_capacity(8);
        ring.reset(&[
            segment(3, 5, Direction::Right),
            segment(4, 5, Direction::Right),
            segment(5, 5, Direction::Right),
        ]);

        assert_eq!(ring.len(), 3);
        assert_eq!(ring.peek_from_tail(0).position, Position { x: 3, y: 5 });
        assert_eq!(ring.head().position, Position { x: 5, y: 5 });
    }

    #[test]
    fn push_and_pop_are_fifo() {
        let mut ring = BodyRing::with_capacity(8);
        ring.reset(&[segment(0, 0, Direction::Right)]);

        ring.push_head(segment(1, 0, Direction::Right));
        ring.push_head(segment(2, 0, Direction::Right));

        assert_eq!(ring.pop_tail().position, Position { x: 0, y: 0 });
        assert_eq!(ring.pop_tail().position, Position { x: 1, y: 0 });
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn indices_wrap_around_capacity() {
        let mut ring = BodyRing::with_capacity(4);
        ring.reset(&[segment(0, 0, Direction::Right)]);

        // Push/pop enough times to wrap both indices several times.
        for step in 1..20 {
            ring.push_head(segment(step, 0, Direction::Right));
            let tail = ring.pop_tail();
            assert_eq!(tail.position.x, step - 1);
            assert_eq!(ring.len(), 1);
        }
        assert_eq!(ring.head().position, Position { x: 19, y: 0 });
    }

    #[test]
    fn peek_from_tail_reads_interior_segments() {
        let mut ring = BodyRing::with_capacity(8);
        ring.reset(&[
            segment(1, 1, Direction::Right),
            segment(2, 1, Direction::Right),
            segment(2, 2, Direction::Down),
        ]);

        assert_eq!(ring.peek_from_tail(1).position, Position { x: 2, y: 1 });
        assert_eq!(ring.peek_from_tail(2).entered, Direction::Down);
    }

    #[test]
    fn segments_iterates_tail_to_head_across_wrap() {
        let mut ring = BodyRing::with_capacity(4);
        ring.reset(&[segment(0, 0, Direction::Right), segment(1, 0, Direction::Right)]);

        ring.push_head(segment(2, 0, Direction::Right));
        let _ = ring.pop_tail();
        ring.push_head(segment(3, 0, Direction::Right));
        let _ = ring.pop_tail();

        let xs: Vec<i32> = ring.segments().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![2, 3]);
    }
}
