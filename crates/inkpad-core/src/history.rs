//! Transactional undo/redo over whole-`App` transitions.
//!
//! One transaction per gesture: `begin` captures the checkpoint when the
//! pointer goes down, intermediate mutations only replace the engine's
//! current value, and `commit` seals the `(before, after)` pair when the
//! pointer comes up. A single undo therefore reverts the entire gesture.

use crate::state::App;

/// Maximum number of undo transactions to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// An immutable whole-state transition.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub before: App,
    pub after: App,
    /// Operation tag for transitions that are not pointer gestures
    /// (e.g. hydration via `set_full_state`).
    pub op_id: Option<String>,
}

/// Linear undo/redo stacks plus the checkpoint of the gesture in flight.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    pending: Option<App>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the state a gesture starts from. A begin while another
    /// checkpoint is pending replaces it; gestures cannot nest.
    pub fn begin(&mut self, before: App) {
        if self.pending.is_some() {
            log::warn!("starting a transaction while another is pending; replacing checkpoint");
        }
        self.pending = Some(before);
    }

    /// Seal the pending gesture as a `(before, after)` pair.
    /// No-op when no checkpoint is pending.
    pub fn commit(&mut self, after: App) {
        if let Some(before) = self.pending.take() {
            self.push(Transaction {
                before,
                after,
                op_id: None,
            });
        }
    }

    /// Record a single-shot transition that was not a pointer gesture.
    pub fn record(&mut self, before: App, after: App, op_id: Option<String>) {
        self.push(Transaction {
            before,
            after,
            op_id,
        });
    }

    /// Discard the pending checkpoint without recording anything.
    pub fn abort(&mut self) {
        self.pending = None;
    }

    fn push(&mut self, transaction: Transaction) {
        self.undo_stack.push(transaction);
        // Any new recorded mutation invalidates the redo branch.
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Step back one transaction, returning the state to restore.
    pub fn undo(&mut self) -> Option<App> {
        self.pending = None;
        let transaction = self.undo_stack.pop()?;
        let before = transaction.before.clone();
        self.redo_stack.push(transaction);
        Some(before)
    }

    /// Step forward one undone transaction, returning the state to restore.
    pub fn redo(&mut self) -> Option<App> {
        let transaction = self.redo_stack.pop()?;
        let after = transaction.after.clone();
        self.undo_stack.push(transaction);
        Some(after)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all history, including any pending checkpoint.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, App};

    fn state_with_action(action: Action) -> App {
        App {
            action,
            ..App::default()
        }
    }

    #[test]
    fn test_commit_without_begin_is_noop() {
        let mut history = History::new();
        history.commit(App::default());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_returns_checkpoint() {
        let mut history = History::new();
        let before = App::default();
        let after = state_with_action(Action::DrawingFreehand);

        history.begin(before.clone());
        history.commit(after);

        assert!(history.can_undo());
        assert_eq!(history.undo().unwrap(), before);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn test_redo_returns_committed_state() {
        let mut history = History::new();
        let after = state_with_action(Action::Erasing);

        history.begin(App::default());
        history.commit(after.clone());

        history.undo().unwrap();
        assert_eq!(history.redo().unwrap(), after);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_commit_clears_redo() {
        let mut history = History::new();

        history.begin(App::default());
        history.commit(state_with_action(Action::DrawingFreehand));
        history.undo().unwrap();
        assert!(history.can_redo());

        history.begin(App::default());
        history.commit(state_with_action(Action::Erasing));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_is_undoable() {
        let mut history = History::new();
        let before = App::default();
        let after = state_with_action(Action::Erasing);

        history.record(before.clone(), after, Some("hydrate".to_string()));
        assert_eq!(history.undo().unwrap(), before);
    }

    #[test]
    fn test_abort_discards_pending() {
        let mut history = History::new();
        history.begin(App::default());
        history.abort();
        history.commit(state_with_action(Action::Erasing));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for _ in 0..(MAX_UNDO_HISTORY + 10) {
            history.begin(App::default());
            history.commit(state_with_action(Action::DrawingFreehand));
        }

        let mut undone = 0;
        while history.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, MAX_UNDO_HISTORY);
    }
}
