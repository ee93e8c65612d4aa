use crate::body::Position;
use crate::config::GridBounds;

/// Dense per-cell occupancy bitmap with O(1) queries.
///
/// Kept in lock-step with the body ring: a cell is marked exactly while a
/// live segment sits on it. Also tracks the occupied count so "any free cell
/// left?" is O(1) for the fruit placer.
#[derive(Debug, Clone)]
pub struct OccupancyIndex {
    bounds: GridBounds,
    cells: Vec<bool>,
    occupied: usize,
}

impl OccupancyIndex {
    /// Creates an all-clear index covering `bounds`.
    #[must_use]
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells: vec![false; bounds.cell_count()],
            occupied: 0,
        }
    }

    /// Marks `position` occupied.
    pub fn mark(&mut self, position: Position) {
        let index = self.index_of(position);
        if !self.cells[index] {
            self.cells[index] = true;
            self.occupied += 1;
        }
    }

    /// Clears `position`.
    pub fn clear(&mut self, position: Position) {
        let index = self.index_of(position);
        if self.cells[index] {
            self.cells[index] = false;
            self.occupied -= 1;
        }
    }

    /// Returns true when `position` holds a live segment.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.cells[self.index_of(position)]
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells.fill(false);
        self.occupied = 0;
    }

    /// Number of unoccupied cells.
    #[must_use]
    pub fn free_cells(&self) -> usize {
        self.cells.len() - self.occupied
    }

    /// The grid this index covers.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn index_of(&self, position: Position) -> usize {
        debug_assert!(self.bounds.contains(position.x, position.y));

        let col = (position.x - self.bounds.min_x) as usize;
        let row = (position.y - self.bounds.min_y) as usize;
        row * self.bounds.width() + col
    }
}

#[cfg(test)]
mod tests {
    use crate::body::Position;
    use crate::config::GridBounds;

    use super::OccupancyIndex;

    fn small_bounds() -> GridBounds {
        GridBounds {
            min_x: 1,
            max_x: 4,
            min_y: 2,
            max_y: 4,
        }
    }

    #[test]
    fn mark_query_clear_cycle() {
        let mut index = OccupancyIndex::new(small_bounds());
        let cell = Position { x: 3, y: 4 };

        assert!(!index.is_occupied(cell));
        index.mark(cell);
        assert!(index.is_occupied(cell));
        index.clear(cell);
        assert!(!index.is_occupied(cell));
    }

    #[test]
    fn free_cell_count_tracks_marks() {
        let mut index = OccupancyIndex::new(small_bounds());
        assert_eq!(index.free_cells(), 12);

        index.mark(Position { x: 1, y: 2 });
        index.mark(Position { x: 4, y: 4 });
        assert_eq!(index.free_cells(), 10);

        // Re-marking an occupied cell must not double-count.
        index.mark(Position { x: 1, y: 2 });
        assert_eq!(index.free_cells(), 10);

        index.clear(Position { x: 4, y: 4 });
        assert_eq!(index.free_cells(), 11);
    }

    #[test]
    fn reset_clears_every_cell() {
        let mut index = OccupancyIndex::new(small_bounds());
        for x in 1..=4 {
            index.mark(Position { x, y: 3 });
        }

        index.reset();

        assert_eq!(index.free_cells(), 12);
        for x in 1..=4 {
            assert!(!index.is_occupied(Position { x, y: 3 }));
        }
    }

    #[test]
    fn cells_with_offset_origin_map_distinctly() {
        let mut index = OccupancyIndex::new(small_bounds());
        index.mark(Position { x: 1, y: 2 });

        assert!(!index.is_occupied(Position { x: 2, y: 2 }));
        assert!(!index.is_occupied(Position { x: 1, y: 3 }));
    }
}
