use alloc::collections::BTreeSet;

use super::*;

/// Places a predetermined set of mines, ignoring the first click.
///
/// Used for handcrafted boards and for reproducing exact positions in tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMinePlacer {
    mines: BTreeSet<Coord2>,
}

impl FixedMinePlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len().try_into().unwrap_or(CellCount::MAX)
    }
}

impl MinePlacer for FixedMinePlacer {
    fn validate(&self, config: &GameConfig) -> Result<()> {
        if self.mines.iter().any(|&coords| !in_bounds(coords, config.size)) {
            return Err(GameError::InvalidCoords);
        }
        if self.mine_count() != config.mines {
            return Err(GameError::MineCountMismatch);
        }
        Ok(())
    }

    fn is_deferred(&self) -> bool {
        false
    }

    fn place(&mut self, board: &mut Board, mines: CellCount, _start: Option<Coord2>) -> CellCount {
        log::debug!(
            "placing {} fixed mines ({} requested)",
            self.mines.len(),
            mines
        );
        let mut placed = 0;
        for &coords in &self.mines {
            if let Ok(true) = board.place_mine(coords) {
                placed += 1;
            }
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_given_mines() {
        let mut board = Board::new(3, 3).unwrap();
        let mut placer = FixedMinePlacer::new([(0, 0), (2, 2), (0, 0)]);

        let placed = placer.place(&mut board, 2, None);

        assert_eq!(placed, 2);
        assert_eq!(board[(1, 1)].adjacent_mines(), 2);
        assert!(board[(0, 0)].is_mine());
    }

    #[test]
    fn validate_checks_bounds_and_count() {
        let config = GameConfig::new((3, 3), 1).unwrap();

        assert_eq!(FixedMinePlacer::new([(1, 1)]).validate(&config), Ok(()));
        assert_eq!(
            FixedMinePlacer::new([(3, 1)]).validate(&config),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            FixedMinePlacer::new([(0, 0), (1, 1)]).validate(&config),
            Err(GameError::MineCountMismatch)
        );
    }
}
