//! Reconciliation Controller
//!
//! Optimistic status changes: the board moves the card first, then the
//! remote update runs in the background. A failed update is reported, not
//! rolled back.

use std::rc::Rc;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::board::BoardStore;
use crate::drag::TransitionRequest;
use crate::error::{BoardError, Result, UpdateError};
use crate::route::{RouteId, Status};

/// Remote status update endpoint
#[async_trait(?Send)]
pub trait StatusUpdateApi {
    async fn update_status(&self, route_id: RouteId, status: Status) -> std::result::Result<(), UpdateError>;
}

/// The backend refused or never received a status update
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to update route {} status to {}: {reason}", .request.route_id, .request.to)]
pub struct RemoteUpdateFailure {
    pub request: TransitionRequest,
    pub reason: String,
}

impl RemoteUpdateFailure {
    /// Message for the blocking notice shown to the dispatcher
    pub fn notice(&self) -> String {
        format!(
            "Failed to update route {} status to {} ({}). The board may be out of sync, please refresh.",
            self.request.route_id,
            self.request.to.title(),
            self.reason
        )
    }
}

/// Completion of one remote update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    Confirmed(TransitionRequest),
    Failed(RemoteUpdateFailure),
}

type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;
type EventSink = Rc<dyn Fn(ReconcileEvent)>;

/// The only component that talks to the status update API
pub struct ReconciliationController<A: ?Sized> {
    api: Rc<A>,
    spawner: Spawner,
    sink: EventSink,
}

impl<A: ?Sized> Clone for ReconciliationController<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            spawner: self.spawner.clone(),
            sink: self.sink.clone(),
        }
    }
}

impl<A: StatusUpdateApi + ?Sized + 'static> ReconciliationController<A> {
    /// `spawner` runs fire-and-forget futures; `sink` receives every
    /// completion, in completion order.
    pub fn new(
        api: Rc<A>,
        spawner: impl Fn(LocalBoxFuture<'static, ()>) + 'static,
        sink: impl Fn(ReconcileEvent) + 'static,
    ) -> Self {
        Self {
            api,
            spawner: Rc::new(spawner),
            sink: Rc::new(sink),
        }
    }

    /// Accept a transition: move the card now, confirm with the backend later.
    ///
    /// Rejected without a network call when the route is not in the request's
    /// source column, or when source and target are the same column. Requests
    /// are never queued per route; two in-flight updates for one route
    /// complete in whatever order the network returns them, while the board
    /// shows the last accepted move.
    pub fn submit(&self, store: &mut BoardStore, request: TransitionRequest) -> Result<()> {
        let TransitionRequest { route_id, from, to } = request;
        if from == to {
            debug!(route = %route_id, column = %from, "transition to own column, nothing to update");
            return Err(BoardError::NoChange { route: route_id, column: from });
        }
        if store.snapshot().find(from, route_id).is_none() {
            warn!(route = %route_id, column = %from, "move source does not hold route, request dropped");
            return Err(BoardError::NotInColumn { route: route_id, column: from });
        }
        store.move_card(route_id, from, to)?;

        let api = self.api.clone();
        let sink = self.sink.clone();
        (self.spawner)(Box::pin(async move {
            match api.update_status(route_id, to).await {
                Ok(()) => {
                    info!(route = %route_id, status = %to, "status update confirmed");
                    sink(ReconcileEvent::Confirmed(request));
                }
                Err(err) => {
                    let failure = RemoteUpdateFailure {
                        request,
                        reason: err.reason,
                    };
                    error!("{failure}");
                    sink(ReconcileEvent::Failed(failure));
                }
            }
        }));
        Ok(())
    }
}
