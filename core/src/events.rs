use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::*;

/// Handle returned when subscribing, used to unsubscribe later.
///
/// The event type parameter keeps handles from one channel from being used
/// on another.
pub struct ListenerId<E> {
    id: u64,
    _event: PhantomData<fn(&E)>,
}

impl<E> Clone for ListenerId<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ListenerId<E> {}

impl<E> PartialEq for ListenerId<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for ListenerId<E> {}

impl<E> fmt::Debug for ListenerId<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerId").field(&self.id).finish()
    }
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered list of callbacks for one kind of event.
///
/// Dispatch is synchronous and follows subscription order.
pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(u64, Callback<E>)>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId<E>
    where
        F: FnMut(&E) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        ListenerId {
            id,
            _event: PhantomData,
        }
    }

    /// Returns `false` if the listener was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, listener: ListenerId<E>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != listener.id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// A cell that changed in one logical operation, with its new state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileUpdate {
    pub coords: Coord2,
    pub cell: Cell,
}

/// Payload of the tile-change channel: every cell mutated by one operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TilesChanged {
    tiles: Vec<TileUpdate>,
}

impl TilesChanged {
    pub(crate) fn collect(board: &Board, coords: impl IntoIterator<Item = Coord2>) -> Self {
        let tiles = coords
            .into_iter()
            .map(|coords| TileUpdate {
                coords,
                cell: board[coords],
            })
            .collect();
        Self { tiles }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileUpdate> {
        self.tiles.iter()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.tiles.iter().map(|tile| tile.coords)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.tiles.iter().any(|tile| tile.coords == coords)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn emits_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::<u32>::new();

        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            listeners.subscribe(move |value: &u32| log.borrow_mut().push((tag, *value)));
        }
        listeners.emit(&7);

        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7), ("c", 7)]);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::<()>::new();

        let first = {
            let calls = Rc::clone(&calls);
            listeners.subscribe(move |_| *calls.borrow_mut() += 1)
        };
        let second = {
            let calls = Rc::clone(&calls);
            listeners.subscribe(move |_| *calls.borrow_mut() += 10)
        };

        assert!(listeners.unsubscribe(first));
        assert!(!listeners.unsubscribe(first));
        listeners.emit(&());

        assert_eq!(*calls.borrow(), 10);
        assert_eq!(listeners.len(), 1);
        assert_ne!(first, second);
    }

    #[test]
    fn tiles_changed_snapshots_cells() {
        let mut board = Board::new(2, 2).unwrap();
        board.place_mine((0, 0)).unwrap();

        let changes = TilesChanged::collect(&board, [(0, 0), (1, 1)]);

        assert_eq!(changes.len(), 2);
        assert!(changes.contains((1, 1)));
        assert!(!changes.contains((1, 0)));
        assert!(changes.iter().next().unwrap().cell.is_mine());
        assert_eq!(changes.iter().nth(1).unwrap().cell.adjacent_mines(), 1);
    }
}
