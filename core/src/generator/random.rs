use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Places mines uniformly at random once the first cell is known, retrying
/// any pick that would break the start tile guarantee.
///
/// The generator is seeded explicitly so a session can be replayed exactly.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    rng: SmallRng,
    start_tile: StartTile,
}

impl RandomMinePlacer {
    pub fn new(seed: u64, start_tile: StartTile) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            start_tile,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(seed, StartTile::default())
    }

    /// Seeds from operating system entropy.
    pub fn from_os_rng(start_tile: StartTile) -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
            start_tile,
        }
    }

    pub fn start_tile(&self) -> StartTile {
        self.start_tile
    }

    fn random_coords(&mut self, (width, height): Coord2) -> Coord2 {
        (
            self.rng.random_range(0..width),
            self.rng.random_range(0..height),
        )
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(&mut self, board: &mut Board, mines: CellCount, start: Option<Coord2>) -> CellCount {
        use StartTile::*;

        let size = board.size();
        let total_cells = board.total_cells();

        // optimize for full boards
        if mines >= total_cells {
            if mines > total_cells {
                log::warn!(
                    "Board already full, requested {} mines but only fits {}",
                    mines,
                    total_cells
                );
            }
            for coords in board.iter_coords() {
                let _ = board.place_mine(coords);
            }
            return board.mine_count();
        }

        let policy = match start {
            Some(start) => {
                let start_area = board.iter_neighbors(start).count() as CellCount + 1;
                self.start_tile.fit(mines, total_cells, start_area)
            }
            None => Random,
        };
        let start = start.filter(|_| policy != Random);
        log::debug!(
            "placing {} mines on {:?} around {:?} ({:?})",
            mines,
            size,
            start,
            policy
        );

        let mut placed = 0;
        let mut attempts: u32 = 0;
        while placed < mines {
            attempts += 1;
            let coords = self.random_coords(size);

            if start == Some(coords) {
                continue;
            }
            if !matches!(board.place_mine(coords), Ok(true)) {
                continue;
            }
            let start_touched = start.is_some_and(|start| board[start].adjacent_mines() != 0);
            if policy == AlwaysZero && start_touched {
                let _ = board.remove_mine(coords);
                continue;
            }
            placed += 1;
        }

        log::trace!("placed {} mines in {} attempts", placed, attempts);
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed_board(seed: u64, size: Coord2, mines: CellCount, start: Coord2) -> Board {
        let mut board = Board::new(size.0, size.1).unwrap();
        let placed = RandomMinePlacer::from_seed(seed).place(&mut board, mines, Some(start));
        assert_eq!(placed, mines);
        assert_eq!(board.mine_count(), mines);
        board
    }

    #[test]
    fn start_tile_always_opens_a_region() {
        for seed in 0..50 {
            let start = ((seed % 9) as Coord, (seed % 7) as Coord);
            let board = placed_board(seed, (9, 9), 10, start);

            assert!(!board[start].is_mine());
            assert_eq!(board[start].adjacent_mines(), 0, "seed {seed}");
        }
    }

    #[test]
    fn tight_board_still_keeps_start_clear() {
        // 5x5 minus the 9-cell start area leaves exactly 16 spots
        let board = placed_board(3, (5, 5), 16, (2, 2));

        assert_eq!(board[(2, 2)].adjacent_mines(), 0);
        for pos in board.iter_coords() {
            assert_eq!(board[pos].is_mine(), chebyshev(pos, (2, 2)) > 1);
        }
    }

    #[test]
    fn corner_start_protects_only_its_neighbors() {
        let board = placed_board(11, (3, 3), 5, (0, 0));

        assert_eq!(board[(0, 0)].adjacent_mines(), 0);
        assert!(board.mines().all(|pos| chebyshev(pos, (0, 0)) > 1));
    }

    #[test]
    fn overfull_request_falls_back_to_simple_safe() {
        let board = placed_board(5, (3, 3), 8, (1, 1));

        assert!(!board[(1, 1)].is_mine());
        assert_eq!(board[(1, 1)].adjacent_mines(), 8);
    }

    #[test]
    fn full_board_is_filled_directly() {
        let board = placed_board(1, (4, 2), 8, (0, 0));

        assert!(board[(0, 0)].is_mine());
    }

    #[test]
    fn without_start_tile_any_cell_may_be_mined() {
        let mut board = Board::new(3, 3).unwrap();

        let placed = RandomMinePlacer::from_seed(9).place(&mut board, 8, None);

        assert_eq!(placed, 8);
        assert_eq!(board.mine_count(), 8);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = placed_board(42, (16, 16), 40, (3, 4));
        let b = placed_board(42, (16, 16), 40, (3, 4));

        assert_eq!(a, b);
    }
}
