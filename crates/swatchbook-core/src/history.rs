//! Bounded undo/redo history of full snapshots.

/// Default number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Two bounded stacks of snapshots.
///
/// `past` holds older states with the most recent last. `future` holds
/// undone states; the next one to redo is on top (last).
#[derive(Debug, Clone)]
pub struct History<T> {
    past: Vec<T>,
    future: Vec<T>,
    limit: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl<T> History<T> {
    /// Create an empty history keeping at most `limit` states per stack.
    pub fn new(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record `previous` as an undo point and drop any redo states.
    pub fn record(&mut self, previous: T) {
        self.past.push(previous);
        self.future.clear();

        if self.past.len() > self.limit {
            self.past.remove(0);
        }
    }

    /// Step back. `current` moves onto the redo stack and the last undo
    /// point is returned, or `current` is handed back if there is none.
    pub fn undo(&mut self, current: T) -> Result<T, T> {
        match self.past.pop() {
            Some(previous) => {
                self.future.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Inverse of [`History::undo`].
    pub fn redo(&mut self, current: T) -> Result<T, T> {
        match self.future.pop() {
            Some(next) => {
                self.past.push(current);
                if self.past.len() > self.limit {
                    self.past.remove(0);
                }
                Ok(next)
            }
            None => Err(current),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
