use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::body::Position;
use crate::config::{GridBounds, Theme};
use crate::engine::Engine;
use crate::events::{RenderDelta, RenderSink, TileLinks};
use crate::input::Direction;
use crate::session::Mode;

/// Visual state of one board cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Tile {
    #[default]
    Empty,
    Body(TileLinks),
    Fruit,
}

/// Cell-level picture of the board, maintained purely from render deltas.
///
/// This is the frontend's half of the engine boundary: it never reads
/// simulation state during play, only the patches arriving through
/// [`RenderSink`]. A full [`sync`] happens only at startup and after a
/// restart, when the whole screen is rebuilt anyway.
///
/// [`sync`]: BoardCanvas::sync
#[derive(Debug)]
pub struct BoardCanvas {
    bounds: GridBounds,
    tiles: Vec<Tile>,
    score: u32,
    mode: Mode,
    board_reset: bool,
}

impl BoardCanvas {
    /// Creates an all-empty canvas covering `bounds`.
    #[must_use]
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            tiles: vec![Tile::Empty; bounds.cell_count()],
            score: 0,
            mode: Mode::Running,
            board_reset: false,
        }
    }

    /// Rebuilds every tile from current engine state.
    pub fn sync(&mut self, engine: &Engine) {
        self.tiles.fill(Tile::Empty);

        let segments: Vec<_> = engine.segments().collect();
        for (index, segment) in segments.iter().enumerate() {
            let back = (index > 0).then(|| segment.entered.opposite());
            let forward = segments.get(index + 1).map(|next| next.entered);
            self.set_tile(segment.position, Tile::Body(TileLinks { back, forward }));
        }

        self.set_tile(engine.fruit(), Tile::Fruit);
        self.score = engine.score();
        self.board_reset = false;
    }

    /// Tile currently shown at `position`.
    #[must_use]
    pub fn tile(&self, position: Position) -> Tile {
        self.tiles[self.index_of(position)]
    }

    /// Score as last reported by the session.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Mode as last reported by the session.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The grid this canvas covers.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// True once after a restart; the caller should [`sync`] then.
    ///
    /// [`sync`]: BoardCanvas::sync
    pub fn take_board_reset(&mut self) -> bool {
        std::mem::take(&mut self.board_reset)
    }

    fn set_tile(&mut self, position: Position, tile: Tile) {
        let index = self.index_of(position);
        self.tiles[index] = tile;
    }

    fn index_of(&self, position: Position) -> usize {
        debug_assert!(self.bounds.contains(position.x, position.y));

        let col = (position.x - self.bounds.min_x) as usize;
        let row = (position.y - self.bounds.min_y) as usize;
        row * self.bounds.width() + col
    }
}

impl RenderSink for BoardCanvas {
    fn tick_delta(&mut self, delta: &RenderDelta) {
        self.set_tile(delta.head.position, Tile::Body(delta.head.links));
        self.set_tile(delta.neck.position, Tile::Body(delta.neck.links));
        if let Some(cleared) = delta.cleared {
            self.set_tile(cleared, Tile::Empty);
        }
        if let Some(retiled) = delta.retiled_tail {
            self.set_tile(retiled.position, Tile::Body(retiled.links));
        }
    }

    fn fruit_placed(&mut self, cell: Position) {
        self.set_tile(cell, Tile::Fruit);
    }

    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn mode_changed(&mut self, mode: Mode) {
        self.mode = mode;
        if mode == Mode::Running {
            self.board_reset = true;
        }
    }
}

/// Extra HUD context supplied by the frontend.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub skill: u8,
    pub best_score: u32,
}

/// Renders the full frame: HUD line, framed board, and overlay messages.
pub fn render(frame: &mut Frame<'_>, canvas: &BoardCanvas, hud: HudInfo, theme: &Theme) {
    let [hud_row, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(frame.area());

    render_hud(frame, hud_row, canvas, hud, theme);

    let border_color = match canvas.mode() {
        Mode::GameOver => theme.border_over,
        _ => theme.border,
    };
    let block = Block::bordered().border_style(Style::new().fg(border_color));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_board(frame, inner, canvas, theme);

    match canvas.mode() {
        Mode::GameOver => render_banner(frame, inner, " GAME OVER  |  ENTER to play again ", theme),
        Mode::Won => render_banner(frame, inner, " YOU WIN  |  ENTER to play again ", theme),
        _ => {}
    }
}

fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    canvas: &BoardCanvas,
    hud: HudInfo,
    theme: &Theme,
) {
    let pause_hint = if canvas.mode() == Mode::Paused {
        "P to unpause"
    } else {
        "P to pause"
    };
    let line = format!(
        "Level {}  |  WASD to move  |  {}  |  Score: {:04}  |  Best: {:04}",
        hud.skill,
        pause_hint,
        canvas.score(),
        hud.best_score,
    );

    frame.render_widget(
        Paragraph::new(Line::from(line)).style(Style::new().fg(theme.hud)),
        area,
    );
}

fn render_board(frame: &mut Frame<'_>, inner: Rect, canvas: &BoardCanvas, theme: &Theme) {
    let bounds = canvas.bounds();
    let buffer = frame.buffer_mut();

    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            let position = Position { x, y };
            let Some((col, row)) = cell_to_terminal(inner, bounds, position) else {
                continue;
            };

            match canvas.tile(position) {
                Tile::Empty => {}
                Tile::Fruit => {
                    buffer.set_string(col, row, "●", Style::new().fg(theme.fruit));
                }
                Tile::Body(links) => {
                    let style = if is_head_tile(links) {
                        Style::new()
                            .fg(theme.snake_head)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::new().fg(theme.snake)
                    };
                    buffer.set_string(col, row, body_glyph(links), style);
                }
            }
        }
    }
}

fn render_banner(frame: &mut Frame<'_>, inner: Rect, message: &str, theme: &Theme) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(message))
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.message).add_modifier(Modifier::BOLD)),
        middle,
    );
}

/// The head is the only tile with a back link and no forward link.
fn is_head_tile(links: TileLinks) -> bool {
    links.back.is_some() && links.forward.is_none()
}

/// Box-drawing glyph for a tile's neighbor links.
fn body_glyph(links: TileLinks) -> &'static str {
    let mut up = false;
    let mut down = false;
    let mut left = false;
    let mut right = false;
    for direction in [links.back, links.forward].into_iter().flatten() {
        match direction {
            Direction::Up => up = true,
            Direction::Down => down = true,
            Direction::Left => left = true,
            Direction::Right => right = true,
        }
    }

    match (up, down, left, right) {
        (true, true, _, _) => "│",
        (true, false, true, false) => "┘",
        (true, false, false, true) => "└",
        (true, false, false, false) => "╵",
        (false, true, true, false) => "┐",
        (false, true, false, true) => "┌",
        (false, true, false, false) => "╷",
        (false, false, true, true) => "─",
        (false, false, true, false) => "╴",
        (false, false, false, true) => "╶",
        _ => "■",
    }
}

fn cell_to_terminal(inner: Rect, bounds: GridBounds, position: Position) -> Option<(u16, u16)> {
    let col_offset = u16::try_from(position.x - bounds.min_x).ok()?;
    let row_offset = u16::try_from(position.y - bounds.min_y).ok()?;

    let col = inner.x.saturating_add(col_offset);
    let row = inner.y.saturating_add(row_offset);
    if col >= inner.right() || row >= inner.bottom() {
        return None;
    }

    Some((col, row))
}

#[cfg(test)]
mod tests {
    use crate::body::{Position, Segment};
    use crate::config::{Difficulty, GridBounds};
    use crate::engine::{Engine, StepOutcome};
    use crate::events::{RenderSink, TileLinks};
    use crate::input::Direction;
    use crate::session::Mode;

    use super::{BoardCanvas, Tile, body_glyph};

    fn scripted_engine() -> Engine {
        let mut engine = Engine::with_seed(
            GridBounds::classic(),
            Difficulty::for_skill(5).expect("skill 5 exists"),
            17,
        )
        .expect("classic setup is valid");

        let segments: Vec<Segment> = [4, 5, 6]
            .iter()
            .map(|&x| Segment {
                position: Position { x, y: 5 },
                entered: Direction::Right,
            })
            .collect();
        engine.load_scenario(&segments, Position { x: 25, y: 20 });
        engine
    }

    #[test]
    fn deltas_alone_keep_the_canvas_in_sync() {
        let mut engine = scripted_engine();
        let mut canvas = BoardCanvas::new(engine.bounds());
        canvas.sync(&engine);

        // Steer a path long enough that every starting segment is evicted,
        // so each remaining body cell was painted purely by deltas.
        let plan = [
            (Direction::Right, 6),
            (Direction::Down, 4),
            (Direction::Left, 5),
        ];
        for (direction, count) in plan {
            engine.set_pending(direction);
            for _ in 0..count {
                let StepOutcome::Moved(report) = engine.step() else {
                    panic!("scripted path must stay safe");
                };
                canvas.tick_delta(&report.delta);
            }
        }

        let mut expected = BoardCanvas::new(engine.bounds());
        expected.sync(&engine);

        let bounds = engine.bounds();
        for y in bounds.min_y..=bounds.max_y {
            for x in bounds.min_x..=bounds.max_x {
                let position = Position { x, y };
                assert_eq!(
                    canvas.tile(position),
                    expected.tile(position),
                    "canvas mismatch at {position:?}"
                );
            }
        }
    }

    #[test]
    fn fruit_and_score_events_update_the_canvas() {
        let mut canvas = BoardCanvas::new(GridBounds::classic());

        canvas.fruit_placed(Position { x: 8, y: 9 });
        canvas.score_changed(25);

        assert_eq!(canvas.tile(Position { x: 8, y: 9 }), Tile::Fruit);
        assert_eq!(canvas.score(), 25);
    }

    #[test]
    fn restart_notification_requests_a_full_resync() {
        let mut canvas = BoardCanvas::new(GridBounds::classic());

        canvas.mode_changed(Mode::Paused);
        assert!(!canvas.take_board_reset());

        canvas.mode_changed(Mode::Running);
        assert!(canvas.take_board_reset());
        assert!(!canvas.take_board_reset(), "flag is consumed on read");
    }

    #[test]
    fn glyphs_reflect_tile_links() {
        let corner = TileLinks {
            back: Some(Direction::Up),
            forward: Some(Direction::Right),
        };
        assert_eq!(body_glyph(corner), "└");

        let straight = TileLinks {
            back: Some(Direction::Left),
            forward: Some(Direction::Right),
        };
        assert_eq!(body_glyph(straight), "─");

        let head = TileLinks {
            back: Some(Direction::Left),
            forward: None,
        };
        assert_eq!(body_glyph(head), "╴");
    }
}
