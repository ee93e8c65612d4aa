use rand::Rng;

use crate::body::Position;
use crate::error::BoardFull;
use crate::occupancy::OccupancyIndex;

/// Picks a uniformly random unoccupied cell for the next fruit.
///
/// Rejection-samples cells inside the grid until one is free; expected trial
/// count is `total / free`, which stays acceptable until the board is nearly
/// covered. A board with no free cell is reported as [`BoardFull`] instead
/// of sampling forever.
pub fn place_random<R: Rng + ?Sized>(
    rng: &mut R,
    occupancy: &OccupancyIndex,
) -> Result<Position, BoardFull> {
    if occupancy.free_cells() == 0 {
        return Err(BoardFull);
    }

    let bounds = occupancy.bounds();
    loop {
        let candidate = Position {
            x: rng.gen_range(bounds.min_x..=bounds.max_x),
            y: rng.gen_range(bounds.min_y..=bounds.max_y),
        };
        if !occupancy.is_occupied(candidate) {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::body::Position;
    use crate::config::GridBounds;
    use crate::error::BoardFull;
    use crate::occupancy::OccupancyIndex;

    use super::place_random;

    fn tiny_bounds() -> GridBounds {
        GridBounds {
            min_x: 1,
            max_x: 3,
            min_y: 1,
            max_y: 3,
        }
    }

    #[test]
    fn fruit_never_lands_on_an_occupied_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut occupancy = OccupancyIndex::new(tiny_bounds());
        occupancy.mark(Position { x: 1, y: 1 });
        occupancy.mark(Position { x: 2, y: 1 });
        occupancy.mark(Position { x: 3, y: 1 });

        for _ in 0..200 {
            let fruit = place_random(&mut rng, &occupancy).expect("free cells remain");
            assert!(!occupancy.is_occupied(fruit));
        }
    }

    #[test]
    fn near_full_board_yields_the_single_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut occupancy = OccupancyIndex::new(tiny_bounds());
        for y in 1..=3 {
            for x in 1..=3 {
                if (x, y) != (2, 3) {
                    occupancy.mark(Position { x, y });
                }
            }
        }

        let fruit = place_random(&mut rng, &occupancy).expect("one cell free");
        assert_eq!(fruit, Position { x: 2, y: 3 });
    }

    #[test]
    fn full_board_reports_board_full() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut occupancy = OccupancyIndex::new(tiny_bounds());
        for y in 1..=3 {
            for x in 1..=3 {
                occupancy.mark(Position { x, y });
            }
        }

        assert_eq!(place_random(&mut rng, &occupancy), Err(BoardFull));
    }
}
