use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::body::{BodyRing, Position, Segment};
use crate::config::{BODY_CAPACITY, Difficulty, GridBounds, START_LENGTH};
use crate::error::SetupError;
use crate::events::{CellPatch, RenderDelta, TileLinks};
use crate::fruit;
use crate::input::Direction;
use crate::occupancy::OccupancyIndex;

/// Everything a tick produced besides board mutation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickReport {
    pub delta: RenderDelta,
    /// New fruit cell when the old one was eaten and a replacement fit.
    pub new_fruit: Option<Position>,
    /// New total when the score changed this tick.
    pub new_score: Option<u32>,
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The snake advanced; the report describes what to redraw.
    Moved(TickReport),
    /// Boundary or self collision. The board is untouched: the failed move
    /// mutated nothing.
    Collision,
    /// The snake grew onto the last free cell. The final move is still
    /// reported for drawing, but no fruit could be placed.
    BoardFull(TickReport),
}

/// The per-tick simulation core: body, occupancy, fruit, and score.
///
/// Owns all board state exclusively and mutates it only inside [`step`].
/// The engine is headless and deterministic for a given seed; mode handling
/// and tick pacing live in the session controller.
///
/// [`step`]: Engine::step
#[derive(Debug)]
pub struct Engine {
    bounds: GridBounds,
    difficulty: Difficulty,
    body: BodyRing,
    occupancy: OccupancyIndex,
    fruit: Position,
    score: u32,
    current: Direction,
    pending: Direction,
    previous: Option<Direction>,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine with an entropy-seeded RNG.
    pub fn new(bounds: GridBounds, difficulty: Difficulty) -> Result<Self, SetupError> {
        Self::with_rng(bounds, difficulty, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    pub fn with_seed(
        bounds: GridBounds,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::with_rng(bounds, difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridBounds, difficulty: Difficulty, rng: StdRng) -> Result<Self, SetupError> {
        let cells = bounds.cell_count();
        if BODY_CAPACITY <= cells {
            return Err(SetupError::CapacityTooSmall {
                capacity: BODY_CAPACITY,
                cells,
            });
        }
        if cells < START_LENGTH + 1 {
            return Err(SetupError::GridTooSmall { cells });
        }

        let start = starting_segments(bounds);
        if !start
            .iter()
            .all(|s| bounds.contains(s.position.x, s.position.y))
        {
            return Err(SetupError::StartOutOfBounds);
        }

        let mut engine = Self {
            bounds,
            difficulty,
            body: BodyRing::with_capacity(BODY_CAPACITY),
            occupancy: OccupancyIndex::new(bounds),
            fruit: Position {
                x: bounds.min_x,
                y: bounds.min_y,
            },
            score: 0,
            current: Direction::Right,
            pending: Direction::Right,
            previous: None,
            rng,
        };
        engine.restart();
        Ok(engine)
    }

    /// Rebuilds body, occupancy, fruit, score, and directions atomically.
    pub fn restart(&mut self) {
        let start = starting_segments(self.bounds);

        self.body.reset(&start);
        self.occupancy.reset();
        for segment in &start {
            self.occupancy.mark(segment.position);
        }

        self.score = 0;
        self.current = Direction::Right;
        self.pending = Direction::Right;
        self.previous = None;
        self.fruit = fruit::place_random(&mut self.rng, &self.occupancy)
            .expect("grid validated to hold a free cell beside the starting body");
    }

    /// Latches the direction to adopt on the next tick.
    ///
    /// Callers are expected to have filtered reversals already; the session
    /// controller applies the no-reverse rule against the current direction
    /// before latching.
    pub fn set_pending(&mut self, direction: Direction) {
        self.pending = direction;
    }

    /// Executes one simulation tick.
    pub fn step(&mut self) -> StepOutcome {
        self.current = self.pending;
        let previous_head = self.body.head().position;
        let candidate = previous_head.stepped(self.current);

        if !self.bounds.contains(candidate.x, candidate.y) {
            return StepOutcome::Collision;
        }

        // Checked before this tick's tail eviction: moving onto the cell the
        // tail is about to vacate still collides.
        if self.occupancy.is_occupied(candidate) {
            return StepOutcome::Collision;
        }

        let ate_fruit = candidate == self.fruit;

        self.body.push_head(Segment {
            position: candidate,
            entered: self.current,
        });
        self.occupancy.mark(candidate);

        let mut cleared = None;
        let mut retiled_tail = None;
        if !ate_fruit {
            // Peek the two segments past the old tail before evicting it;
            // the new tail keeps only its forward link on screen.
            let new_tail = self.body.peek_from_tail(1);
            let after_tail = self.body.peek_from_tail(2);
            let old_tail = self.body.pop_tail();
            self.occupancy.clear(old_tail.position);

            cleared = Some(old_tail.position);
            retiled_tail = Some(CellPatch {
                position: new_tail.position,
                links: TileLinks {
                    back: None,
                    forward: Some(after_tail.entered),
                },
            });
        }

        let mut new_score = None;
        let mut new_fruit = None;
        let mut board_full = false;
        if ate_fruit {
            self.score += self.difficulty.score_increment;
            new_score = Some(self.score);

            // The head cell is already marked, so the replacement can never
            // reuse it.
            match fruit::place_random(&mut self.rng, &self.occupancy) {
                Ok(cell) => {
                    self.fruit = cell;
                    new_fruit = Some(cell);
                }
                Err(_) => board_full = true,
            }
        }

        let delta = RenderDelta {
            head: CellPatch {
                position: candidate,
                links: TileLinks {
                    back: Some(self.current.opposite()),
                    forward: None,
                },
            },
            neck: CellPatch {
                position: previous_head,
                links: TileLinks {
                    back: self.previous.map(Direction::opposite),
                    forward: Some(self.current),
                },
            },
            cleared,
            retiled_tail,
        };

        self.previous = Some(self.current);

        let report = TickReport {
            delta,
            new_fruit,
            new_score,
        };
        if board_full {
            StepOutcome::BoardFull(report)
        } else {
            StepOutcome::Moved(report)
        }
    }

    /// Replaces the board with an explicit body and fruit position.
    ///
    /// Segments are given tail first; the current direction becomes the
    /// head's entry direction. Useful for scripted scenarios and tests.
    pub fn load_scenario(&mut self, segments: &[Segment], fruit: Position) {
        debug_assert!(segments.len() >= START_LENGTH);

        self.body.reset(segments);
        self.occupancy.reset();
        for segment in segments {
            debug_assert!(self.bounds.contains(segment.position.x, segment.position.y));
            self.occupancy.mark(segment.position);
        }
        debug_assert!(!self.occupancy.is_occupied(fruit));

        self.fruit = fruit;
        self.current = self.body.head().entered;
        self.pending = self.current;
        self.previous = None;
    }

    /// Current fruit cell.
    #[must_use]
    pub fn fruit(&self) -> Position {
        self.fruit
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Direction adopted on the most recent tick.
    #[must_use]
    pub fn current_direction(&self) -> Direction {
        self.current
    }

    /// Active difficulty preset.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Grid bounds for this session.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of live body segments.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Iterates over live segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.body.segments()
    }

    /// Read access to the occupancy index.
    #[must_use]
    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }
}

/// Three-segment starting body at the grid center, heading right.
fn starting_segments(bounds: GridBounds) -> [Segment; START_LENGTH] {
    let head = Position {
        x: (bounds.min_x + bounds.max_x) / 2,
        y: (bounds.min_y + bounds.max_y) / 2,
    };
    [
        Segment {
            position: Position {
                x: head.x - 2,
                y: head.y,
            },
            entered: Direction::Right,
        },
        Segment {
            position: Position {
                x: head.x - 1,
                y: head.y,
            },
            entered: Direction::Right,
        },
        Segment {
            position: head,
            entered: Direction::Right,
        },
    ]
}
