use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Active (first reveal)
/// - NotStarted -> Won (flagging a board whose mines were placed up front)
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game: a board, its state machine and the listeners watching it.
///
/// Mines are placed lazily by the session's [`MinePlacer`] when the first
/// cell is revealed. All operations run to completion synchronously,
/// including listener dispatch.
#[derive(Debug)]
pub struct GameSession<P = RandomMinePlacer> {
    config: GameConfig,
    board: Board,
    placer: P,
    mines_placed: bool,
    state: SessionState,
    mines_to_find: isize,
    triggered_mine: Option<Coord2>,
    tile_listeners: Listeners<TilesChanged>,
    state_listeners: Listeners<SessionState>,
}

impl GameSession<RandomMinePlacer> {
    /// Session whose mines are drawn from a generator seeded with `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_placer(config, RandomMinePlacer::from_seed(seed))
    }

    pub fn from_dimensions(size: Coord2, mines: CellCount, seed: u64) -> Result<Self> {
        Self::new(GameConfig::new(size, mines)?, seed)
    }

    pub fn from_entropy(config: GameConfig) -> Result<Self> {
        Self::with_placer(config, RandomMinePlacer::from_os_rng(StartTile::default()))
    }
}

impl GameSession<FixedMinePlacer> {
    /// Session with mines at exactly `mines`, placed immediately.
    pub fn with_mine_layout(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let placer = FixedMinePlacer::new(mines.iter().copied());
        let config = GameConfig::new(size, placer.mine_count())?;
        Self::with_placer(config, placer)
    }
}

impl<P: MinePlacer> GameSession<P> {
    pub fn with_placer(config: GameConfig, placer: P) -> Result<Self> {
        config.validate()?;
        placer.validate(&config)?;

        let (width, height) = config.size;
        let mut session = Self {
            config,
            board: Board::new(width, height)?,
            placer,
            mines_placed: false,
            state: SessionState::NotStarted,
            mines_to_find: config.mines as isize,
            triggered_mine: None,
            tile_listeners: Listeners::new(),
            state_listeners: Listeners::new(),
        };
        if !session.placer.is_deferred() {
            session.place_mines(None);
        }
        Ok(session)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Flags still to place before the game can be won. Negative when the
    /// player has placed more flags than there are mines.
    pub fn mines_remaining(&self) -> isize {
        self.mines_to_find
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.board.cell_at(coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(Cell::is_revealed)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(Cell::is_flagged)
    }

    pub fn on_tiles_changed<F>(&mut self, callback: F) -> ListenerId<TilesChanged>
    where
        F: FnMut(&TilesChanged) + 'static,
    {
        self.tile_listeners.subscribe(callback)
    }

    pub fn on_state_changed<F>(&mut self, callback: F) -> ListenerId<SessionState>
    where
        F: FnMut(&SessionState) + 'static,
    {
        self.state_listeners.subscribe(callback)
    }

    pub fn unsubscribe_tiles(&mut self, listener: ListenerId<TilesChanged>) -> bool {
        self.tile_listeners.unsubscribe(listener)
    }

    pub fn unsubscribe_state(&mut self, listener: ListenerId<SessionState>) -> bool {
        self.state_listeners.unsubscribe(listener)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        log::trace!("reveal {:?}", coords);

        if !self.state.is_started() {
            if !self.mines_placed {
                self.place_mines(Some(coords));
            }
            self.change_state(SessionState::Active);
        }

        if self.board[coords].is_mine() {
            self.lose(coords);
            return Ok(RevealOutcome::HitMine);
        }

        let changed = self.flood_reveal(coords);
        if changed.is_empty() {
            return Ok(RevealOutcome::NoChange);
        }
        self.emit_tiles(changed);

        Ok(if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || self.board[coords].is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        let flagged = !self.board[coords].is_flagged();
        self.board.cell_mut(coords).set_flagged(flagged);
        self.mines_to_find += if flagged { -1 } else { 1 };
        log::trace!("flag {:?} -> {}, {} left", coords, flagged, self.mines_to_find);
        self.emit_tiles(vec![coords]);

        Ok(if self.check_win() {
            MarkOutcome::Won
        } else {
            MarkOutcome::Changed
        })
    }

    fn place_mines(&mut self, start: Option<Coord2>) {
        let placed = self
            .placer
            .place(&mut self.board, self.config.mines, start);
        if placed != self.config.mines {
            log::warn!(
                "Mine count mismatch, placed: {}, requested: {}",
                placed,
                self.config.mines
            );
        }
        self.mines_placed = true;
    }

    /// Reveals the connected zero region around `start` plus its numbered
    /// frontier, returning every cell that changed.
    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut changed = Vec::new();
        let mut visited = HashSet::new();
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            if !visited.insert(coords) {
                continue;
            }

            let cell = self.board[coords];
            if cell.is_revealed() || cell.is_mine() {
                continue;
            }

            if cell.is_flagged() {
                self.mines_to_find += 1;
            }
            let target = self.board.cell_mut(coords);
            target.set_flagged(false);
            target.set_revealed();
            changed.push(coords);

            if cell.adjacent_mines() == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        changed
    }

    fn lose(&mut self, coords: Coord2) {
        self.triggered_mine = Some(coords);

        let mines: Vec<_> = self.board.mines().collect();
        for &pos in &mines {
            self.board.cell_mut(pos).set_revealed();
        }
        log::info!("Hit mine at {:?}, game lost", coords);

        self.emit_tiles(mines);
        self.change_state(SessionState::Lost);
    }

    /// Ends the game when every mine carries a flag and no spare flags are
    /// down, uncovering what is left.
    fn check_win(&mut self) -> bool {
        if !self.mines_placed || self.state.is_finished() || self.mines_to_find != 0 {
            return false;
        }
        if !self.board.mines().all(|pos| self.board[pos].is_flagged()) {
            return false;
        }

        let hidden: Vec<_> = self
            .board
            .iter_coords()
            .filter(|&pos| {
                let cell = self.board[pos];
                !cell.is_mine() && !cell.is_revealed()
            })
            .collect();
        for &pos in &hidden {
            self.board.cell_mut(pos).set_revealed();
        }
        log::info!("All {} mines flagged, game won", self.config.mines);

        self.emit_tiles(hidden);
        self.change_state(SessionState::Won);
        true
    }

    fn emit_tiles(&mut self, coords: Vec<Coord2>) {
        if coords.is_empty() {
            return;
        }
        let changes = TilesChanged::collect(&self.board, coords);
        self.tile_listeners.emit(&changes);
    }

    fn change_state(&mut self, state: SessionState) {
        self.state = state;
        self.state_listeners.emit(&state);
    }

    fn count_cells(&self, predicate: fn(Cell) -> bool) -> CellCount {
        self.board
            .iter_coords()
            .filter(|&pos| predicate(self.board[pos]))
            .count() as CellCount
    }
}

/// Renders what the player sees, one row per line.
impl<P> fmt::Display for GameSession<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.board.size();
        for y in 0..height {
            for x in 0..width {
                write!(f, "{}", self.board[(x, y)].view().as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
