//! Bounded undo/redo stacks of diffs.
//!
//! Undo pops a diff and hands it to a caller-supplied restore routine,
//! which re-applies the diff's `out` side through the layer mutators where
//! the current lock state permits and returns the inverse diff; that
//! inverse lands on the redo stack. Redo is symmetric.

use std::collections::VecDeque;

use crate::diff::Diff;

const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: VecDeque<Diff>,
    redo_stack: VecDeque<Diff>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed operation. Empty diffs and diffs equal to the
    /// current top are dropped. Appending invalidates the redo stack.
    pub fn append(&mut self, diff: Diff) {
        if diff.is_empty() {
            return;
        }
        Self::push(&mut self.undo_stack, diff);
        self.redo_stack.clear();
    }

    /// Undoes the most recent operation via `restore`, which must apply the
    /// diff's `out` side and return the inverse. Returns false if there was
    /// nothing to undo.
    pub fn undo(&mut self, restore: impl FnOnce(&Diff) -> Diff) -> bool {
        let Some(last) = self.undo_stack.pop_back() else {
            return false;
        };
        let inverse = restore(&last);
        Self::push(&mut self.redo_stack, inverse);
        true
    }

    /// Re-applies the most recently undone operation. Returns false if
    /// there was nothing to redo.
    pub fn redo(&mut self, restore: impl FnOnce(&Diff) -> Diff) -> bool {
        let Some(last) = self.redo_stack.pop_back() else {
            return false;
        };
        let inverse = restore(&last);
        Self::push(&mut self.undo_stack, inverse);
        true
    }

    pub fn undo_size(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_size(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push(stack: &mut VecDeque<Diff>, diff: Diff) {
        if diff.is_empty() {
            return;
        }
        // coalesce consecutive duplicates
        if stack.back() == Some(&diff) {
            return;
        }
        stack.push_back(diff);
        while stack.len() > MAX_ENTRIES {
            stack.pop_front();
        }
    }
}
