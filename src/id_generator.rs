use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a finished stroke across pages and the undo/redo log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StrokeId(pub usize);

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing stroke ids, starting at 0.
#[derive(Debug, Default)]
pub struct StrokeIdGenerator {
    next_id: usize,
}

impl StrokeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id_and_advance(&mut self) -> StrokeId {
        let id = self.next_id;
        self.next_id = id.checked_add(1).expect("stroke id counter overflowed");
        StrokeId(id)
    }

    /// Rewinds (or advances) the counter so `id` is handed out next.
    pub fn reset_id_to(&mut self, id: StrokeId) {
        self.next_id = id.0;
    }

    pub fn peek_next_id(&self) -> StrokeId {
        StrokeId(self.next_id)
    }
}
