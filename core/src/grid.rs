use std::collections::VecDeque;

use core::num::Saturating;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// The board data model: every cell with its mine, adjacency count, and cover.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<Cell>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
}

impl Grid {
    /// Builds a grid from the generator's layout, which has to match `config` exactly.
    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let layout = generator.generate(config);
        let actual = layout.game_config();
        if actual != config {
            return Err(GameError::LayoutMismatch {
                expected: config,
                actual,
            });
        }
        Ok(Self::from_layout(&layout))
    }

    pub fn from_layout(layout: &MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |index| {
            let coords = from_nd_index(index);
            if layout.contains_mine(coords) {
                Cell::mine()
            } else {
                Cell::safe(layout.adjacent_mine_count(coords))
            }
        });
        Self {
            cells,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
        }
    }

    pub fn size(&self) -> Coord2 {
        from_nd_index(self.cells.dim())
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords, size })
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// All cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|(index, &cell)| (from_nd_index(index), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine()).count() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Mines that carry a flag.
    pub fn correctly_flagged_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine() && cell.is_flagged())
            .count() as CellCount
    }

    /// Uncovers a cell and, when it has no adjacent mines, the whole connected empty region around it.
    ///
    /// Flags on cells reached by the flood-fill are dropped. Mines are revealed but never cascade.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.cells[coords.to_nd_index()].is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }

        self.uncover(coords);
        let cell = self.cells[coords.to_nd_index()];
        if cell.is_mine() {
            return Ok(RevealOutcome::HitMine(coords));
        }
        log::debug!(
            "Revealed cell at {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_count()
        );

        let mut revealed = vec![coords];
        if cell.adjacent_count() == 0 {
            // only zero cells are queued, each one gets revealed before being pushed
            let mut to_expand = VecDeque::from([coords]);

            while let Some(expand_coords) = to_expand.pop_front() {
                for pos in self.iter_neighbors(expand_coords) {
                    if self.cells[pos.to_nd_index()].is_revealed() {
                        continue;
                    }

                    self.uncover(pos);
                    revealed.push(pos);
                    let count = self.cells[pos.to_nd_index()].adjacent_count();
                    log::trace!("Flood revealed cell at {:?}, adjacent mines: {}", pos, count);

                    if count == 0 {
                        to_expand.push_back(pos);
                    }
                }
            }
        }

        Ok(RevealOutcome::Revealed(revealed))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        Ok(match self.cells[coords.to_nd_index()].toggle_flag() {
            Some(true) => {
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Some(false) => {
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            None => FlagOutcome::NoChange,
        })
    }

    /// Uncovers every mine, returning how many were still covered.
    pub fn reveal_all_mines(&mut self) -> CellCount {
        let mines: Vec<Coord2> = self
            .iter()
            .filter(|(_, cell)| cell.is_mine() && !cell.is_revealed())
            .map(|(coords, _)| coords)
            .collect();

        for &coords in &mines {
            self.uncover(coords);
        }
        mines.len() as CellCount
    }

    /// Won when every mine is flagged and every safe cell is revealed, both at once.
    pub fn check_win(&self, mines: CellCount) -> bool {
        self.correctly_flagged_count() == mines
            && self.revealed_count() == self.total_cells().saturating_sub(mines)
    }

    fn uncover(&mut self, coords: Coord2) {
        match self.cells[coords.to_nd_index()].reveal() {
            Cover::Hidden => self.revealed_count += 1,
            Cover::Flagged => {
                self.flagged_count -= 1;
                self.revealed_count += 1;
            }
            Cover::Revealed => {}
        }
    }
}
