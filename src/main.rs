use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use serpentine::config::{self, Difficulty, GridBounds, MAX_SKILL, PULSE_INTERVAL_MS, Theme};
use serpentine::engine::Engine;
use serpentine::error::AppError;
use serpentine::input::InputSnapshot;
use serpentine::renderer::{self, BoardCanvas, HudInfo};
use serpentine::score::{BestScores, load_best_scores, save_best_scores};
use serpentine::session::{Mode, Session};
use serpentine::terminal_runtime::TerminalGuard;

#[derive(Debug, Parser)]
#[command(version, about = "Classic grid snake in the terminal")]
struct Cli {
    /// Skill level: 0 (slowest) to 9 (fastest).
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_SKILL)))]
    skill: u8,

    /// Seed for deterministic fruit placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme name.
    #[arg(long, default_value = "classic")]
    theme: String,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let theme = config::theme_by_name(&cli.theme)
        .ok_or_else(|| AppError::UnknownTheme(cli.theme.clone()))?;
    let difficulty =
        Difficulty::for_skill(cli.skill).expect("clap already validated the skill range");

    let bounds = GridBounds::classic();
    let engine = match cli.seed {
        Some(seed) => Engine::with_seed(bounds, difficulty, seed)?,
        None => Engine::new(bounds, difficulty)?,
    };

    let mut best = load_best_scores().unwrap_or_else(|error| {
        eprintln!("Warning: could not read best scores: {error}");
        BestScores::default()
    });

    let mut guard = TerminalGuard::acquire()?;
    run(&mut guard, Session::new(engine), &mut best, cli.skill, theme)?;
    drop(guard);

    save_best_scores(&best)?;
    Ok(())
}

fn run(
    guard: &mut TerminalGuard,
    mut session: Session,
    best: &mut BestScores,
    skill: u8,
    theme: &Theme,
) -> Result<(), AppError> {
    let mut canvas = BoardCanvas::new(session.engine().bounds());
    canvas.sync(session.engine());

    let pulse_interval = Duration::from_millis(PULSE_INTERVAL_MS);
    let mut last_mode = session.mode();

    loop {
        let deadline = Instant::now() + pulse_interval;
        let Some(snapshot) = gather_input(deadline)? else {
            return Ok(());
        };

        session.pulse(snapshot, &mut canvas);
        if canvas.take_board_reset() {
            canvas.sync(session.engine());
        }

        let mode = session.mode();
        if mode != last_mode {
            if matches!(mode, Mode::GameOver | Mode::Won) {
                best.record(skill, session.engine().score());
            }
            last_mode = mode;
        }

        let hud = HudInfo {
            skill,
            best_score: best.for_skill(skill),
        };
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &canvas, hud, theme))?;
    }
}

/// Collects key events until `deadline` into one per-pulse snapshot.
///
/// Returns `None` when the user asked to quit.
fn gather_input(deadline: Instant) -> Result<Option<InputSnapshot>, AppError> {
    let mut snapshot = InputSnapshot::default();

    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            return Ok(Some(snapshot));
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                KeyCode::Char('w') | KeyCode::Up => snapshot.up = true,
                KeyCode::Char('a') | KeyCode::Left => snapshot.left = true,
                KeyCode::Char('s') | KeyCode::Down => snapshot.down = true,
                KeyCode::Char('d') | KeyCode::Right => snapshot.right = true,
                KeyCode::Char('p') => snapshot.pause = true,
                KeyCode::Enter => snapshot.restart = true,
                _ => {}
            }
        }

        if Instant::now() >= deadline {
            return Ok(Some(snapshot));
        }
    }
}
