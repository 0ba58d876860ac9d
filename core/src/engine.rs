use chrono::prelude::*;
use serde::Serialize;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EngineState {
    /// No cell revealed yet, flags may already be placed
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Represents a game from start to finish. Each value is an independent session.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Random game seeded from the thread rng.
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        log::debug!(
            "New game {}x{} with {} mines, seed: {}",
            config.rows(),
            config.cols(),
            config.mines(),
            seed
        );
        Self::from_layout(RandomMinefieldGenerator::new(seed).generate(config))
    }

    /// Game from a caller-supplied generator, which has to honour the requested config exactly.
    pub fn with_generator(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        Ok(Self::from_grid(config, Grid::generate(config, generator)?))
    }

    /// Game over a known layout. Size and mine count are taken from the layout itself.
    pub fn from_layout(layout: MineLayout) -> Self {
        Self::from_grid(layout.game_config(), Grid::from_layout(&layout))
    }

    fn from_grid(config: GameConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            state: Default::default(),
            triggered_mine: None,
            started_at: None,
            ended_at: None,
        }
    }

    /// Throws the whole board away and starts over with a fresh random layout.
    pub fn reset(&mut self) {
        log::debug!("Resetting game");
        *self = Self::new(self.config);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, EngineState::Won)
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Revealed cells, mines uncovered after a loss included.
    pub fn revealed_count(&self) -> CellCount {
        self.grid.revealed_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.grid.flagged_count()
    }

    /// How many mines have not been flagged yet, negative with too many flags
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.grid.flagged_count() as isize)
    }

    /// How many seconds have passed since game started, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .clamp(0, u32::MAX.into()) as u32
        } else {
            0
        }
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        Ok(CellView::new(self.grid.cell(coords)?, self.is_game_over()))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.grid.reveal(coords)?;
        match &outcome {
            RevealOutcome::NoChange => {}
            RevealOutcome::HitMine(at) => {
                self.mark_started();
                self.triggered_mine = Some(*at);
                self.end_game(false);
                self.grid.reveal_all_mines();
            }
            RevealOutcome::Revealed(_) => {
                self.mark_started();
                if self.grid.check_win(self.config.mines()) {
                    self.end_game(true);
                }
            }
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        self.grid.toggle_flag(coords)
    }

    /// Moves from initial to in-progress, recording the start time
    fn mark_started(&mut self) {
        if self.state.is_initial() {
            self.state = EngineState::InProgress;
            self.started_at = Some(Utc::now());
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        self.ended_at = Some(Utc::now());
        log::debug!(
            "Game ended as {:?} after {}s",
            self.state,
            self.elapsed_secs()
        );
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
