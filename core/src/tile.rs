use serde::{Deserialize, Serialize};

/// One grid position: either a mine or a safe cell carrying its adjacency count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Number of mines in the Moore neighborhood. Always `0` for a mine cell.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Player-visible projection of this cell.
    pub const fn view(self) -> CellView {
        match (self.revealed, self.flagged, self.mine) {
            (true, _, true) => CellView::Mine,
            (true, _, false) => CellView::Revealed(self.adjacent_mines),
            (false, true, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
        }
    }

    pub(crate) fn set_mine(&mut self, mine: bool) {
        self.mine = mine;
        self.adjacent_mines = 0;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn increment_adjacent(&mut self) {
        self.adjacent_mines += 1;
    }

    pub(crate) fn decrement_adjacent(&mut self) {
        self.adjacent_mines = self.adjacent_mines.saturating_sub(1);
    }

    pub(crate) fn set_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flagged => 'F',
            Self::Mine => '*',
            Self::Revealed(0) => '.',
            Self::Revealed(count) => (b'0' + count) as char,
        }
    }
}
