use std::collections::BTreeSet;

use proptest::prelude::*;
use sweeper_core::{
    Cell, Coord2, EngineState, Game, GameConfig, GameError, Grid, MineLayout,
    RandomMinefieldGenerator, RevealOutcome, SamplingStrategy, mult,
};

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (1..=16u8, 1..=16u8)
        .prop_flat_map(|(rows, cols)| (Just(rows), Just(cols), 0..=mult(rows, cols)))
        .prop_map(|(rows, cols, mines)| GameConfig::new(rows, cols, mines).unwrap())
}

fn sampling_strategy() -> impl Strategy<Value = SamplingStrategy> {
    prop_oneof![Just(SamplingStrategy::Rejection), Just(SamplingStrategy::Shuffle)]
}

fn brute_force_count(grid: &Grid, (row, col): Coord2) -> u8 {
    let (rows, cols) = grid.size();
    let mut count = 0;
    for r in row.saturating_sub(1)..=row.saturating_add(1).min(rows - 1) {
        for c in col.saturating_sub(1)..=col.saturating_add(1).min(cols - 1) {
            if (r, c) != (row, col) && grid.cell((r, c)).unwrap().is_mine() {
                count += 1;
            }
        }
    }
    count
}

/// Zero region containing `start` plus its numbered border, computed without the engine.
fn expected_region(grid: &Grid, start: Coord2) -> BTreeSet<Coord2> {
    let mut region = BTreeSet::from([start]);
    if grid.cell(start).unwrap().adjacent_count() != 0 {
        return region;
    }
    let mut stack = vec![start];
    while let Some(coords) = stack.pop() {
        for pos in grid.iter_neighbors(coords) {
            if region.insert(pos) && grid.cell(pos).unwrap().adjacent_count() == 0 {
                stack.push(pos);
            }
        }
    }
    region
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generation_places_exact_mine_count(
        config in config_strategy(),
        strategy in sampling_strategy(),
        seed in any::<u64>(),
    ) {
        let generator = RandomMinefieldGenerator::new(seed).with_strategy(strategy);
        let grid = Grid::generate(config, generator).unwrap();

        prop_assert_eq!(grid.size(), config.size());
        prop_assert_eq!(grid.mine_count(), config.mines());
        prop_assert!(grid.iter().all(|(_, cell)| !cell.is_revealed() && !cell.is_flagged()));
    }

    #[test]
    fn adjacency_matches_brute_force(config in config_strategy(), seed in any::<u64>()) {
        let grid = Grid::generate(config, RandomMinefieldGenerator::new(seed)).unwrap();

        for (coords, cell) in grid.iter().filter(|(_, cell)| !cell.is_mine()) {
            prop_assert_eq!(cell.adjacent_count(), brute_force_count(&grid, coords));
        }
    }

    #[test]
    fn reveal_opens_exactly_the_connected_region(
        config in config_strategy(),
        seed in any::<u64>(),
        row in any::<u8>(),
        col in any::<u8>(),
    ) {
        let mut grid = Grid::generate(config, RandomMinefieldGenerator::new(seed)).unwrap();
        let target = (row % config.rows(), col % config.cols());
        prop_assume!(!grid.cell(target).unwrap().is_mine());
        let expected = expected_region(&grid, target);

        let outcome = grid.reveal(target).unwrap();

        let cells: BTreeSet<Coord2> = outcome.revealed_cells().iter().copied().collect();
        prop_assert_eq!(cells.len(), outcome.revealed_cells().len());
        prop_assert_eq!(&cells, &expected);
        let revealed: BTreeSet<Coord2> = grid
            .iter()
            .filter(|(_, cell)| cell.is_revealed())
            .map(|(coords, _)| coords)
            .collect();
        prop_assert_eq!(revealed, expected);
    }

    #[test]
    fn reveal_is_idempotent(
        config in config_strategy(),
        seed in any::<u64>(),
        row in any::<u8>(),
        col in any::<u8>(),
    ) {
        let mut game = Game::with_seed(config, seed);
        let target = (row % config.rows(), col % config.cols());

        let first = game.reveal(target).unwrap();
        let after_first = game.clone();
        let second = game.reveal(target).unwrap();

        prop_assert!(first.has_update());
        prop_assert_eq!(second, RevealOutcome::NoChange);
        prop_assert_eq!(game, after_first);
    }

    #[test]
    fn loss_never_wins(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.mines() > 0);
        let mut game = Game::with_seed(config, seed);
        let mine = game
            .grid()
            .iter()
            .find(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .unwrap();
        let flags: Vec<Coord2> = game
            .grid()
            .iter()
            .filter(|(coords, cell)| cell.is_mine() && *coords != mine)
            .map(|(coords, _)| coords)
            .collect();
        for coords in flags {
            game.toggle_flag(coords).unwrap();
        }

        prop_assert_eq!(game.reveal(mine).unwrap(), RevealOutcome::HitMine(mine));
        prop_assert_eq!(game.state(), EngineState::Lost);
        prop_assert!(!game.grid().check_win(config.mines()));
        prop_assert!(game.grid().iter().all(|(_, cell)| !cell.is_mine() || cell.is_revealed()));

        for (coords, _) in game.grid().clone().iter() {
            prop_assert_eq!(game.reveal(coords).unwrap(), RevealOutcome::NoChange);
        }
        prop_assert!(!game.is_won());
    }

    #[test]
    fn flag_every_mine_and_reveal_every_safe_cell_wins(
        config in config_strategy(),
        seed in any::<u64>(),
    ) {
        prop_assume!(config.safe_cells() > 0);
        let mut game = Game::with_seed(config, seed);
        let cells: Vec<(Coord2, Cell)> = game.grid().iter().collect();
        for &(coords, cell) in &cells {
            if cell.is_mine() {
                game.toggle_flag(coords).unwrap();
            }
        }
        for &(coords, cell) in &cells {
            if !cell.is_mine() {
                game.reveal(coords).unwrap();
            }
        }

        prop_assert!(game.is_won());
        prop_assert_eq!(game.revealed_count(), config.safe_cells());
        prop_assert_eq!(game.mines_left(), 0);
    }
}

#[test]
fn corner_mine_on_three_by_three_board() {
    let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
    let mut game = Game::from_layout(layout);

    let outcome = game.reveal((2, 2)).unwrap();

    assert_eq!(outcome.revealed_cells().len(), 8);
    assert_eq!(game.cell_view((2, 2)).unwrap().adjacent, Some(0));
    for coords in [(0, 1), (1, 0), (1, 1)] {
        assert_eq!(game.cell_view(coords).unwrap().adjacent, Some(1));
    }
    for coords in [(0, 2), (1, 2), (2, 0), (2, 1)] {
        assert_eq!(game.cell_view(coords).unwrap().adjacent, Some(0));
    }
    assert!(!game.cell_view((0, 0)).unwrap().revealed);
}

#[test]
fn oversized_mine_count_is_rejected() {
    assert_eq!(
        GameConfig::new(5, 5, 26),
        Err(GameError::InvalidConfiguration {
            rows: 5,
            cols: 5,
            mines: 26
        })
    );
}
