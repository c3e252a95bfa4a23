//! Board Scenario Tests
//!
//! Drag → transition → optimistic move → remote update, end to end, with a
//! scripted status update API.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    use crate::{
        async_trait, BoardPhase, BoardStore, DragEngine, DropOutcome, DropTarget, ReconcileEvent,
        ReconciliationController, Route, RouteId, RouteSupply, SelectionTracker, Status,
        StatusUpdateApi, UpdateError,
    };

    type Reply = Result<(), UpdateError>;

    /// Records every call; each call waits until the test answers it
    #[derive(Default)]
    struct ScriptedApi {
        calls: RefCell<Vec<(RouteId, Status)>>,
        replies: RefCell<Vec<oneshot::Sender<Reply>>>,
    }

    impl ScriptedApi {
        fn answer(&self, call: usize, reply: Reply) {
            let mut replies = self.replies.borrow_mut();
            let (tx, _) = oneshot::channel();
            let sender = std::mem::replace(&mut replies[call], tx);
            sender.send(reply).expect("call still waiting");
        }
    }

    #[async_trait(?Send)]
    impl StatusUpdateApi for ScriptedApi {
        async fn update_status(&self, route_id: RouteId, status: Status) -> Reply {
            self.calls.borrow_mut().push((route_id, status));
            let (tx, rx) = oneshot::channel();
            self.replies.borrow_mut().push(tx);
            rx.await.unwrap_or_else(|_| Err(UpdateError::new("dropped")))
        }
    }

    struct Harness {
        pool: LocalPool,
        api: Rc<ScriptedApi>,
        store: BoardStore,
        engine: DragEngine,
        controller: ReconciliationController<ScriptedApi>,
        events: Rc<RefCell<Vec<ReconcileEvent>>>,
    }

    impl Harness {
        fn new(routes: Vec<Route>) -> Self {
            let pool = LocalPool::new();
            let api = Rc::new(ScriptedApi::default());
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = events.clone();
            let spawner = pool.spawner();
            let controller = ReconciliationController::new(
                api.clone(),
                move |fut| spawner.spawn_local(fut).expect("pool alive"),
                move |event| sink.borrow_mut().push(event),
            );
            let mut store = BoardStore::new();
            store.apply_supply(&RouteSupply::loaded(routes));
            Self {
                pool,
                api,
                store,
                engine: DragEngine::new(),
                controller,
                events,
            }
        }

        /// Full gesture: grab `id`, drop over `target`, submit any transition
        fn drag(&mut self, id: u32, target: Option<DropTarget>) -> DropOutcome {
            self.engine.grab(RouteId(id), self.store.snapshot()).unwrap();
            let outcome = self.engine.release(target, self.store.snapshot());
            if let DropOutcome::Transition(request) = outcome {
                self.controller.submit(&mut self.store, request).unwrap();
            }
            self.pool.run_until_stalled();
            outcome
        }

        fn column(&self, status: Status) -> Vec<u32> {
            self.store.snapshot().column(status).iter().map(|r| r.id.0).collect()
        }
    }

    fn scenario_routes() -> Vec<Route> {
        vec![Route::new(1, "pending"), Route::new(2, "ASSIGNED")]
    }

    #[test]
    fn test_rebuild_places_routes_in_their_columns() {
        let h = Harness::new(scenario_routes());
        assert_eq!(h.column(Status::Pending), vec![1]);
        assert_eq!(h.column(Status::Assigned), vec![2]);
        for status in [Status::InTransit, Status::Completed, Status::Delayed, Status::Cancelled] {
            assert!(h.column(status).is_empty());
        }
    }

    #[test]
    fn test_move_fires_exactly_one_update() {
        let mut h = Harness::new(scenario_routes());
        h.drag(1, Some(DropTarget::Column(Status::InTransit)));

        assert!(h.column(Status::Pending).is_empty());
        assert_eq!(h.column(Status::InTransit), vec![1]);
        let card = h.store.snapshot().find(Status::InTransit, RouteId(1)).unwrap();
        assert_eq!(card.status.as_str(), "IN_TRANSIT");
        assert_eq!(*h.api.calls.borrow(), vec![(RouteId(1), Status::InTransit)]);

        h.api.answer(0, Ok(()));
        h.pool.run_until_stalled();
        assert!(matches!(h.events.borrow()[0], ReconcileEvent::Confirmed(_)));
        assert_eq!(h.column(Status::InTransit), vec![1]);
    }

    #[test]
    fn test_failed_update_keeps_optimistic_move() {
        let mut h = Harness::new(scenario_routes());
        h.drag(1, Some(DropTarget::Column(Status::InTransit)));

        h.api.answer(0, Err(UpdateError::new("Route not found.")));
        h.pool.run_until_stalled();

        assert_eq!(h.column(Status::InTransit), vec![1]);
        assert!(h.column(Status::Pending).is_empty());
        let events = h.events.borrow();
        assert_eq!(events.len(), 1);
        let ReconcileEvent::Failed(failure) = &events[0] else {
            panic!("expected a failure notice");
        };
        assert_eq!(failure.request.route_id, RouteId(1));
        assert_eq!(failure.reason, "Route not found.");
    }

    #[test]
    fn test_selection_survives_moves() {
        let mut h = Harness::new(scenario_routes());
        let mut selection = SelectionTracker::new();
        selection.toggle(RouteId(1));
        selection.toggle(RouteId(2));

        h.drag(1, Some(DropTarget::Column(Status::Completed)));

        assert_eq!(selection.snapshot(), BTreeSet::from([RouteId(1), RouteId(2)]));
    }

    #[test]
    fn test_drop_on_card_moves_to_its_column() {
        let mut h = Harness::new(scenario_routes());
        h.drag(1, Some(DropTarget::Card(RouteId(2))));
        assert_eq!(h.column(Status::Assigned), vec![2, 1]);
        assert_eq!(*h.api.calls.borrow(), vec![(RouteId(1), Status::Assigned)]);
    }

    #[test]
    fn test_same_column_and_outside_drops_make_no_calls() {
        let mut h = Harness::new(vec![Route::new(1, "PENDING"), Route::new(2, "PENDING")]);
        assert_eq!(h.drag(1, Some(DropTarget::Card(RouteId(2)))), DropOutcome::SameColumn);
        assert_eq!(h.drag(2, None), DropOutcome::DroppedOutside);

        assert_eq!(h.column(Status::Pending), vec![1, 2]);
        assert!(h.api.calls.borrow().is_empty());
    }

    /// Two in-flight updates for one route are not serialized: the board shows
    /// the last move initiated even when the first call completes last.
    #[test]
    fn test_out_of_order_completions_leave_last_initiated_move() {
        let mut h = Harness::new(scenario_routes());
        h.drag(1, Some(DropTarget::Column(Status::InTransit)));
        h.drag(1, Some(DropTarget::Column(Status::Delayed)));
        assert_eq!(
            *h.api.calls.borrow(),
            vec![(RouteId(1), Status::InTransit), (RouteId(1), Status::Delayed)]
        );

        h.api.answer(1, Ok(()));
        h.pool.run_until_stalled();
        h.api.answer(0, Ok(()));
        h.pool.run_until_stalled();

        assert_eq!(h.column(Status::Delayed), vec![1]);
        assert!(h.column(Status::InTransit).is_empty());
        let confirmed: Vec<Status> = h
            .events
            .borrow()
            .iter()
            .map(|e| match e {
                ReconcileEvent::Confirmed(r) => r.to,
                ReconcileEvent::Failed(f) => f.request.to,
            })
            .collect();
        assert_eq!(confirmed, vec![Status::Delayed, Status::InTransit]);
    }

    /// A refresh that has not caught up with an unconfirmed move puts the card
    /// back where the backend last saw it.
    #[test]
    fn test_refresh_can_undo_unconfirmed_move() {
        let mut h = Harness::new(scenario_routes());
        h.drag(1, Some(DropTarget::Column(Status::Completed)));
        assert_eq!(h.column(Status::Completed), vec![1]);

        h.store.apply_supply(&RouteSupply::loaded(scenario_routes()));
        assert_eq!(h.column(Status::Pending), vec![1]);
        assert!(h.column(Status::Completed).is_empty());

        // the late confirmation does not touch the board
        h.api.answer(0, Ok(()));
        h.pool.run_until_stalled();
        assert_eq!(h.column(Status::Pending), vec![1]);
    }

    /// Selection with an observer log of every reported selection
    fn observed_selection() -> (SelectionTracker, Rc<RefCell<Vec<Vec<RouteId>>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let selection = SelectionTracker::with_observer(move |ids: &[RouteId]| {
            sink.borrow_mut().push(ids.to_vec())
        });
        (selection, log)
    }

    #[test]
    fn test_fresh_route_list_clears_selection() {
        let mut h = Harness::new(scenario_routes());
        let (mut selection, log) = observed_selection();
        selection.toggle(RouteId(1));
        selection.toggle(RouteId(2));

        let phase = h
            .store
            .apply_supply_with_selection(&RouteSupply::loaded(scenario_routes()), &mut selection);

        assert!(matches!(phase, BoardPhase::Ready(_)));
        assert!(selection.is_empty());
        assert_eq!(log.borrow().last(), Some(&Vec::new()));
        assert_eq!(h.column(Status::Pending), vec![1]);
    }

    #[test]
    fn test_failed_route_list_clears_selection() {
        let mut h = Harness::new(scenario_routes());
        let (mut selection, log) = observed_selection();
        selection.toggle(RouteId(1));
        selection.toggle(RouteId(2));

        let phase = h
            .store
            .apply_supply_with_selection(&RouteSupply::failed("backend down"), &mut selection);

        assert_eq!(phase, BoardPhase::Failed("backend down".to_string()));
        assert!(h.store.snapshot().is_empty());
        assert!(selection.is_empty());
        assert_eq!(log.borrow().last(), Some(&Vec::new()));
    }
}
