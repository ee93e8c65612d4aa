use ratatui::style::Color;

/// Inclusive rectangular play area, fixed for the whole session.
///
/// Bounds are inclusive on all four edges, matching the classic board where
/// the playfield spans x 1..=30 and y 2..=22 inside a drawn frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl GridBounds {
    /// The classic 30×21 board.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            min_x: 1,
            max_x: 30,
            min_y: 2,
            max_y: 22,
        }
    }

    /// Number of cells per row.
    #[must_use]
    pub fn width(self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    /// Number of rows.
    #[must_use]
    pub fn height(self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(self) -> usize {
        self.width() * self.height()
    }

    /// Returns true when `(x, y)` lies inside the bounds.
    #[must_use]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Highest selectable skill level.
pub const MAX_SKILL: u8 = 9;

/// Pulses between simulation ticks, per skill level 0–9.
pub const SKILL_TICK_DIVISORS: [u32; 10] = [40, 25, 20, 15, 12, 10, 7, 4, 3, 2];

/// Speed and scoring parameters for one session, chosen at start or restart.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Difficulty {
    pub skill: u8,
    /// Raw timing pulses per executed simulation tick.
    pub tick_divisor: u32,
    /// Points granted per fruit eaten.
    pub score_increment: u32,
}

impl Difficulty {
    /// Looks up the preset for `skill`, or `None` when out of range.
    ///
    /// The score increment is clamped to at least 1 so every fruit is worth
    /// something even on the slowest level.
    #[must_use]
    pub fn for_skill(skill: u8) -> Option<Self> {
        let divisor = *SKILL_TICK_DIVISORS.get(usize::from(skill))?;
        Some(Self {
            skill,
            tick_divisor: divisor,
            score_increment: u32::from(skill).max(1),
        })
    }
}

/// Fixed ring capacity for the body buffer.
///
/// Must strictly exceed the grid cell count so growth can never wrap the
/// head index into unread tail history; checked at session setup.
pub const BODY_CAPACITY: usize = 1024;

/// Segments the snake starts with after every restart.
pub const START_LENGTH: usize = 3;

/// Milliseconds between timing pulses fed to the session (50 Hz).
pub const PULSE_INTERVAL_MS: u64 = 20;

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake: Color,
    pub snake_head: Color,
    pub fruit: Color,
    pub border: Color,
    pub border_over: Color,
    pub hud: Color,
    pub message: Color,
}

/// Classic white snake, blue frame.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake: Color::White,
    snake_head: Color::White,
    fruit: Color::Green,
    border: Color::Blue,
    border_over: Color::Red,
    hud: Color::Cyan,
    message: Color::Yellow,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake: Color::Cyan,
    snake_head: Color::White,
    fruit: Color::Yellow,
    border: Color::Cyan,
    border_over: Color::Red,
    hud: Color::Cyan,
    message: Color::Yellow,
};

/// All available themes.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN];

/// Finds a theme by its case-insensitive name.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::{BODY_CAPACITY, Difficulty, GridBounds, SKILL_TICK_DIVISORS, theme_by_name};

    #[test]
    fn classic_bounds_cover_the_framed_playfield() {
        let bounds = GridBounds::classic();

        assert_eq!(bounds.width(), 30);
        assert_eq!(bounds.height(), 21);
        assert_eq!(bounds.cell_count(), 630);
        assert!(bounds.contains(1, 2));
        assert!(bounds.contains(30, 22));
        assert!(!bounds.contains(0, 10));
        assert!(!bounds.contains(31, 10));
        assert!(!bounds.contains(10, 1));
        assert!(!bounds.contains(10, 23));
    }

    #[test]
    fn ring_capacity_exceeds_classic_cell_count() {
        assert!(BODY_CAPACITY > GridBounds::classic().cell_count());
    }

    #[test]
    fn difficulty_presets_cover_all_skills() {
        for skill in 0..=9u8 {
            let difficulty = Difficulty::for_skill(skill).expect("skill in range");
            assert_eq!(
                difficulty.tick_divisor,
                SKILL_TICK_DIVISORS[usize::from(skill)]
            );
            assert!(difficulty.score_increment >= 1);
        }
        assert!(Difficulty::for_skill(10).is_none());
    }

    #[test]
    fn skill_zero_still_scores_points() {
        let difficulty = Difficulty::for_skill(0).expect("skill 0 exists");
        assert_eq!(difficulty.score_increment, 1);
    }

    #[test]
    fn theme_lookup_is_case_insensitive() {
        assert_eq!(theme_by_name("Classic").map(|t| t.name), Some("classic"));
        assert!(theme_by_name("neon").is_none());
    }
}
