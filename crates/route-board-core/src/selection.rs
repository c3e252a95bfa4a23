//! Selection Tracker
//!
//! Set of selected cards, independent of which column they sit in.

use std::collections::BTreeSet;
use std::fmt;

use crate::route::RouteId;

type Observer = Box<dyn Fn(&[RouteId])>;

/// Selected route ids plus an optional observer notified after each change
#[derive(Default)]
pub struct SelectionTracker {
    selected: BTreeSet<RouteId>,
    observer: Option<Observer>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker that reports every change to `observer`.
    ///
    /// The observer runs synchronously inside the mutating call and receives
    /// the whole selection in ascending id order.
    pub fn with_observer(observer: impl Fn(&[RouteId]) + 'static) -> Self {
        Self {
            selected: BTreeSet::new(),
            observer: Some(Box::new(observer)),
        }
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: RouteId) -> bool {
        let selected = if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        };
        self.notify();
        selected
    }

    pub fn deselect(&mut self, id: RouteId) {
        if self.selected.remove(&id) {
            self.notify();
        }
    }

    /// Empty the selection (explicit deselect-all, or a wholesale route refresh)
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.notify();
        }
    }

    pub fn is_selected(&self, id: RouteId) -> bool {
        self.selected.contains(&id)
    }

    pub fn snapshot(&self) -> BTreeSet<RouteId> {
        self.selected.clone()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            let ids: Vec<RouteId> = self.selected.iter().copied().collect();
            observer(&ids);
        }
    }
}

impl fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("selected", &self.selected)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
