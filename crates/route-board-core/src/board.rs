//! Board State Store
//!
//! Projects routes into one column per [`Status`]. Snapshots are values:
//! `rebuild` and `move_card` build new snapshots and never touch the old one,
//! so a caller can keep the previous board around. [`BoardStore`] is the single
//! owner of the snapshot the UI renders.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{BoardError, Result};
use crate::route::{Route, RouteId, Status};

/// A route left off the board because its status matched no column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRoute {
    pub id: RouteId,
    pub raw_status: String,
}

/// Diagnostics from a rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Number of cards placed on the board
    pub placed: usize,
    /// Routes with an unknown status, in input order
    pub skipped: Vec<SkippedRoute>,
    /// Ids seen more than once; only the first occurrence is placed
    pub duplicates: Vec<RouteId>,
}

impl RebuildReport {
    pub fn skipped_ids(&self) -> Vec<RouteId> {
        self.skipped.iter().map(|s| s.id).collect()
    }
}

/// Full Status → Column mapping at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    columns: [Vec<Route>; 6],
}

impl BoardSnapshot {
    /// Board with every column empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a fresh board from the upstream route list.
    ///
    /// Cards keep input order within their column and carry the canonical
    /// status name.
    pub fn rebuild(routes: &[Route]) -> (BoardSnapshot, RebuildReport) {
        let mut snapshot = BoardSnapshot::empty();
        let mut report = RebuildReport::default();
        let mut seen = HashSet::with_capacity(routes.len());

        for route in routes {
            // First occurrence decides, known or not
            if !seen.insert(route.id) {
                warn!(route = %route.id, "duplicate route in upstream list, keeping first");
                report.duplicates.push(route.id);
                continue;
            }
            let Some(status) = route.status() else {
                warn!(
                    route = %route.id,
                    status = %route.status.as_str(),
                    "route has unknown status, left off the board"
                );
                report.skipped.push(SkippedRoute {
                    id: route.id,
                    raw_status: route.status.as_str().to_string(),
                });
                continue;
            };
            snapshot.columns[status.index()].push(route.with_status(status));
            report.placed += 1;
        }

        (snapshot, report)
    }

    pub fn column(&self, status: Status) -> &[Route] {
        &self.columns[status.index()]
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = (Status, &[Route])> + '_ {
        Status::ALL.into_iter().map(move |s| (s, self.column(s)))
    }

    pub fn column_ids(&self, status: Status) -> Vec<RouteId> {
        self.column(status).iter().map(|r| r.id).collect()
    }

    /// Column currently owning `id`
    pub fn locate(&self, id: RouteId) -> Option<Status> {
        self.columns()
            .find(|(_, routes)| routes.iter().any(|r| r.id == id))
            .map(|(status, _)| status)
    }

    /// The route `id` if it sits in `status`' column
    pub fn find(&self, status: Status, id: RouteId) -> Option<&Route> {
        self.column(status).iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RouteId) -> bool {
        self.locate(id).is_some()
    }

    /// Total number of cards
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move a card between columns, rewriting its status to the target column.
    ///
    /// Fails with [`BoardError::NotInColumn`] when `from` does not hold the
    /// route. A card already present in `to` is not inserted twice.
    pub fn move_card(&self, id: RouteId, from: Status, to: Status) -> Result<BoardSnapshot> {
        let Some(route) = self.find(from, id) else {
            return Err(BoardError::NotInColumn { route: id, column: from });
        };
        if from == to {
            return Ok(self.clone());
        }

        let moved = route.with_status(to);
        let mut next = self.clone();
        next.columns[from.index()].retain(|r| r.id != id);
        let target = &mut next.columns[to.index()];
        if !target.iter().any(|r| r.id == id) {
            target.push(moved);
        }
        Ok(next)
    }
}

/// Owner of the board snapshot. All board mutations go through here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardStore {
    snapshot: BoardSnapshot,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Replace the board wholesale from a fresh route list
    pub fn rebuild(&mut self, routes: &[Route]) -> RebuildReport {
        let (snapshot, report) = BoardSnapshot::rebuild(routes);
        debug!(placed = report.placed, skipped = report.skipped.len(), "board rebuilt");
        self.snapshot = snapshot;
        report
    }

    /// Apply a card move. Returns the pre-move snapshot.
    pub fn move_card(&mut self, id: RouteId, from: Status, to: Status) -> Result<BoardSnapshot> {
        let next = self.snapshot.move_card(id, from, to)?;
        Ok(std::mem::replace(&mut self.snapshot, next))
    }

    /// Drop every card
    pub fn reset(&mut self) {
        self.snapshot = BoardSnapshot::empty();
    }
}
