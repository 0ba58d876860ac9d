use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// What a presentation layer may show for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    /// Only known once the game is over
    pub mine: Option<bool>,
    /// Only known for revealed safe cells
    pub adjacent: Option<u8>,
}

impl CellView {
    pub fn new(cell: Cell, game_over: bool) -> Self {
        Self {
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
            mine: game_over.then_some(cell.is_mine()),
            adjacent: (cell.is_revealed() && !cell.is_mine()).then_some(cell.adjacent_count()),
        }
    }
}

/// Snapshot of everything needed to draw a game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardView {
    pub size: Coord2,
    pub state: EngineState,
    pub mines: CellCount,
    pub mines_left: isize,
    pub elapsed_secs: u32,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_game(game: &Game) -> Self {
        let game_over = game.is_game_over();
        let grid = game.grid();
        let cells = Array2::from_shape_fn(game.size().to_nd_index(), |index| {
            let coords = from_nd_index(index);
            // shape comes from the same config, every index is in bounds
            let cell = grid.cell(coords).unwrap_or_default();
            CellView::new(cell, game_over)
        });

        Self {
            size: game.size(),
            state: game.state(),
            mines: game.total_mines(),
            mines_left: game.mines_left(),
            elapsed_secs: game.elapsed_secs(),
            cells,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}
