use serde::Serialize;

/// What the player currently sees on top of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Cover {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for Cover {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Single grid cell. Mine and adjacency are fixed at generation, only the cover changes during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    mine: bool,
    adjacent: u8,
    cover: Cover,
}

impl Cell {
    pub const fn mine() -> Self {
        Self {
            mine: true,
            adjacent: 0,
            cover: Cover::Hidden,
        }
    }

    pub const fn safe(adjacent: u8) -> Self {
        Self {
            mine: false,
            adjacent,
            cover: Cover::Hidden,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.mine
    }

    /// Number of mines among the neighbours, always 0 for mines.
    pub const fn adjacent_count(self) -> u8 {
        self.adjacent
    }

    pub const fn cover(self) -> Cover {
        self.cover
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.cover, Cover::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.cover, Cover::Flagged)
    }

    /// Uncovers the cell, dropping any flag. Returns the previous cover.
    pub(crate) fn reveal(&mut self) -> Cover {
        core::mem::replace(&mut self.cover, Cover::Revealed)
    }

    /// Flips the flag of an unrevealed cell. Returns the new flag state, `None` when revealed.
    pub(crate) fn toggle_flag(&mut self) -> Option<bool> {
        match self.cover {
            Cover::Hidden => {
                self.cover = Cover::Flagged;
                Some(true)
            }
            Cover::Flagged => {
                self.cover = Cover::Hidden;
                Some(false)
            }
            Cover::Revealed => None,
        }
    }
}
