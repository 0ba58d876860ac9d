use super::*;

/// How mines are drawn from the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Pick random cells until enough distinct ones were hit. Cheap on sparse boards, slows down near full ones.
    Rejection,
    /// Draw exactly `mines` distinct cells in one pass, bounded cost at any density.
    Shuffle,
}

impl Default for SamplingStrategy {
    fn default() -> Self {
        Self::Shuffle
    }
}

/// Seeded, purely random placement. The same seed, config and strategy always give the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    strategy: SamplingStrategy,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            strategy: Default::default(),
        }
    }

    pub fn with_strategy(self, strategy: SamplingStrategy) -> Self {
        Self { strategy, ..self }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use SamplingStrategy::*;
        use rand::prelude::*;

        let (rows, cols) = config.size();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        match self.strategy {
            Rejection => {
                // terminates because a valid config never asks for more mines than cells
                let mut mines_placed = 0;
                while mines_placed < config.mines() {
                    let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
                    let tile = &mut mines[coords.to_nd_index()];
                    if !*tile {
                        *tile = true;
                        mines_placed += 1;
                    }
                }
            }
            Shuffle => {
                let cols = usize::from(cols);
                let picks = rand::seq::index::sample(
                    &mut rng,
                    config.total_cells().into(),
                    config.mines().into(),
                );
                for index in picks.into_iter() {
                    mines[[index / cols, index % cols]] = true;
                }
            }
        }

        let layout = MineLayout::from_mine_mask(mines);
        if layout.mine_count() != config.mines() {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines()
            );
        }
        layout
    }
}
