use crate::body::Position;
use crate::input::Direction;
use crate::session::Mode;

/// Neighbor links encoded by one drawn body tile.
///
/// Every tile shows the connections of its segment: an interior tile links
/// both to its predecessor and successor, the head links only backward, the
/// tail only forward. This is why a single move dirties four cells — the
/// cells adjacent to a changed end need their links redrawn too.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TileLinks {
    /// Link toward the predecessor segment (toward the tail).
    pub back: Option<Direction>,
    /// Link toward the successor segment (toward the head).
    pub forward: Option<Direction>,
}

/// One cell whose tile must be redrawn.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellPatch {
    pub position: Position,
    pub links: TileLinks,
}

/// Minimal set of cells whose appearance changes in one executed tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RenderDelta {
    /// The new head cell.
    pub head: CellPatch,
    /// The previous head, now an interior (or still-head-shaped) tile.
    pub neck: CellPatch,
    /// Vacated tail cell to erase; `None` on a growth tick.
    pub cleared: Option<Position>,
    /// The new tail cell, redrawn with only its forward link; `None` on a
    /// growth tick.
    pub retiled_tail: Option<CellPatch>,
}

/// Presentation-side collaborator fed by the session once per pulse.
///
/// Implementations must not reach back into the engine; everything needed
/// to keep a display current arrives through these calls.
pub trait RenderSink {
    /// A tick executed; `delta` lists the cells that changed.
    fn tick_delta(&mut self, delta: &RenderDelta);

    /// A fruit was (re)placed at `cell`.
    fn fruit_placed(&mut self, cell: Position);

    /// The score changed to `score`.
    fn score_changed(&mut self, score: u32);

    /// The session mode changed to `mode`.
    fn mode_changed(&mut self, mode: Mode);
}

/// Everything a [`RenderSink`] can observe, as plain data.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EngineEvent {
    Tick(RenderDelta),
    FruitPlaced(Position),
    ScoreChanged(u32),
    ModeChanged(Mode),
}

/// Sink that records every event in order, for headless consumers and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<EngineEvent>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Mode changes recorded so far, in order.
    #[must_use]
    pub fn modes(&self) -> Vec<Mode> {
        self.events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::ModeChanged(mode) => Some(*mode),
                _ => None,
            })
            .collect()
    }

    /// Render deltas recorded so far, in order.
    #[must_use]
    pub fn deltas(&self) -> Vec<RenderDelta> {
        self.events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Tick(delta) => Some(*delta),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn tick_delta(&mut self, delta: &RenderDelta) {
        self.events.push(EngineEvent::Tick(*delta));
    }

    fn fruit_placed(&mut self, cell: Position) {
        self.events.push(EngineEvent::FruitPlaced(cell));
    }

    fn score_changed(&mut self, score: u32) {
        self.events.push(EngineEvent::ScoreChanged(score));
    }

    fn mode_changed(&mut self, mode: Mode) {
        self.events.push(EngineEvent::ModeChanged(mode));
    }
}
