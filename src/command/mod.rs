mod history;

use crate::id_generator::StrokeId;
use std::collections::BTreeSet;

pub use history::UndoRedoModel;

/// Ids of strokes whose draw commands were dropped from the log. The owner of
/// those strokes must delete them and reclaim their ids.
pub type DiscardedDrawCommands = BTreeSet<StrokeId>;

/// One entry of the undo/redo log, or the commands to apply after an undo or
/// redo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Commands {
    /// Nothing to apply.
    #[default]
    None,
    /// Strokes that become visible.
    Draw(BTreeSet<StrokeId>),
    /// Strokes that become hidden.
    Erase(BTreeSet<StrokeId>),
}

impl Commands {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn ids(&self) -> Option<&BTreeSet<StrokeId>> {
        match self {
            Self::None => None,
            Self::Draw(ids) | Self::Erase(ids) => Some(ids),
        }
    }

    /// The commands that revert this one.
    fn inverse(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Draw(ids) => Self::Erase(ids.clone()),
            Self::Erase(ids) => Self::Draw(ids.clone()),
        }
    }
}
