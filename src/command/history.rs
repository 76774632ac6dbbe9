use super::{Commands, DiscardedDrawCommands};
use crate::id_generator::StrokeId;
use std::collections::BTreeSet;

/// Undo/redo log of draw and erase gestures.
///
/// Entries before `position` are applied history, entries after it are
/// redoable. While a gesture is open its entry is the last one, sitting at
/// `position`, and finishing it commits it by advancing past it.
#[derive(Debug, Default)]
pub struct UndoRedoModel {
    stack: Vec<Commands>,
    position: usize,
    open: bool,
}

impl UndoRedoModel {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a draw gesture. Returns the strokes whose redoable draws were
    /// thrown away to make room for it.
    pub fn start_draw(&mut self) -> DiscardedDrawCommands {
        self.start(Commands::Draw(BTreeSet::new()))
    }

    /// Records `id` as drawn by the open draw gesture.
    pub fn draw(&mut self, id: StrokeId) {
        match self.open_entry_mut() {
            Some(Commands::Draw(ids)) => {
                assert!(ids.insert(id), "stroke {id} drawn twice in one gesture");
            }
            _ => panic!("draw({id}) without an open draw gesture"),
        }
    }

    pub fn finish_draw(&mut self) {
        assert!(
            matches!(self.open_entry_mut(), Some(Commands::Draw(_))),
            "finish_draw() without an open draw gesture"
        );
        self.finish();
    }

    /// Opens an erase gesture. Returns the strokes whose redoable draws were
    /// thrown away to make room for it.
    pub fn start_erase(&mut self) -> DiscardedDrawCommands {
        self.start(Commands::Erase(BTreeSet::new()))
    }

    /// Records `id` as erased by the open erase gesture.
    pub fn erase(&mut self, id: StrokeId) {
        match self.open_entry_mut() {
            Some(Commands::Erase(ids)) => {
                assert!(ids.insert(id), "stroke {id} erased twice in one gesture");
            }
            _ => panic!("erase({id}) without an open erase gesture"),
        }
    }

    pub fn finish_erase(&mut self) {
        assert!(
            matches!(self.open_entry_mut(), Some(Commands::Erase(_))),
            "finish_erase() without an open erase gesture"
        );
        self.finish();
    }

    /// Steps back one gesture and returns the commands that revert it.
    pub fn undo(&mut self) -> Commands {
        if self.has_open_gesture() {
            log::warn!("Ignoring undo while a gesture is in progress");
            return Commands::None;
        }
        if self.position == 0 {
            return Commands::None;
        }
        self.position -= 1;
        self.stack[self.position].inverse()
    }

    /// Steps forward one gesture and returns the commands that reapply it.
    pub fn redo(&mut self) -> Commands {
        if self.has_open_gesture() {
            log::warn!("Ignoring redo while a gesture is in progress");
            return Commands::None;
        }
        if self.position == self.stack.len() {
            return Commands::None;
        }
        self.position += 1;
        self.stack[self.position - 1].clone()
    }

    /// Returns true if there are gestures that can be undone
    pub fn can_undo(&self) -> bool {
        !self.has_open_gesture() && self.position > 0
    }

    /// Returns true if there are gestures that can be redone
    pub fn can_redo(&self) -> bool {
        !self.has_open_gesture() && self.position < self.stack.len()
    }

    pub fn has_open_gesture(&self) -> bool {
        self.open
    }

    fn open_entry_mut(&mut self) -> Option<&mut Commands> {
        if self.has_open_gesture() {
            self.stack.last_mut()
        } else {
            None
        }
    }

    fn start(&mut self, entry: Commands) -> DiscardedDrawCommands {
        assert!(!self.has_open_gesture(), "a gesture is already in progress");

        let discarded: DiscardedDrawCommands = self
            .stack
            .drain(self.position..)
            .filter_map(|commands| match commands {
                Commands::Draw(ids) => Some(ids),
                Commands::Erase(_) | Commands::None => None,
            })
            .flatten()
            .collect();
        if !discarded.is_empty() {
            log::debug!("Discarding {} redoable strokes", discarded.len());
        }

        self.stack.push(entry);
        self.open = true;
        discarded
    }

    fn finish(&mut self) {
        self.open = false;
        let is_empty = self.stack.last().and_then(Commands::ids).is_none_or(BTreeSet::is_empty);
        if is_empty {
            // Gestures that changed nothing don't become undo steps.
            self.stack.pop();
        } else {
            self.position += 1;
        }
    }
}
