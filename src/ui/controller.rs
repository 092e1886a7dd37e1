use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::state::TourView;
use crate::messaging::{CommandOutcome, EventKind, EventPayload, SubscriptionId};
use crate::tour::{ChecklistItem, SharedEngine, Step};

/// Binds a shared engine to observable UI state.
///
/// Attaching snapshots the engine and registers one observer per event kind;
/// each observer refreshes only the view fields its event affects. Clones share
/// the same view and subscriptions. Subscriptions are revoked by [`detach`] or
/// when the last clone is dropped.
///
/// Lock order is always engine, then view. Do not drop a controller while
/// holding the engine lock.
///
/// [`detach`]: TourController::detach
#[derive(Clone, Debug)]
pub struct TourController {
    inner: Arc<ControllerInner>,
}

#[derive(Debug)]
struct ControllerInner {
    engine: SharedEngine,
    view: Arc<Mutex<TourView>>,
    subscriptions: Mutex<Vec<SubscriptionId>>,
}

impl TourController {
    pub fn attach(engine: SharedEngine) -> Self {
        let view = Arc::new(Mutex::new(TourView::default()));
        let mut subscriptions = Vec::with_capacity(EventKind::ALL.len());

        {
            let mut guard = engine.lock();
            *view.lock() = TourView::snapshot(guard.state());

            let v = Arc::clone(&view);
            subscriptions.push(guard.on(EventKind::FlowStarted, move |_, state| {
                let mut view = v.lock();
                view.is_active = true;
                view.refresh_step(state);
                view.checklist = state.checklist();
            }));

            let v = Arc::clone(&view);
            subscriptions.push(guard.on(EventKind::StepChanged, move |_, state| {
                v.lock().refresh_step(state);
            }));

            let v = Arc::clone(&view);
            subscriptions.push(guard.on(EventKind::FlowCompleted, move |_, _| {
                v.lock().close();
            }));

            let v = Arc::clone(&view);
            subscriptions.push(guard.on(EventKind::FlowSkipped, move |_, _| {
                v.lock().close();
            }));

            let v = Arc::clone(&view);
            subscriptions.push(guard.on(EventKind::ChecklistUpdated, move |event, _| {
                if let EventPayload::ChecklistUpdated { items, .. } = &event.payload {
                    v.lock().checklist = items.clone();
                }
            }));
        }

        debug!("Tour controller attached ({} observers)", subscriptions.len());

        Self {
            inner: Arc::new(ControllerInner {
                engine,
                view,
                subscriptions: Mutex::new(subscriptions),
            }),
        }
    }

    /// Revoke every observer this controller registered. Idempotent.
    pub fn detach(&self) {
        let ids = std::mem::take(&mut *self.inner.subscriptions.lock());
        self.inner.revoke(ids);
    }

    pub fn is_attached(&self) -> bool {
        !self.inner.subscriptions.lock().is_empty()
    }

    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.inner.engine)
    }

    /// Snapshot of the observable fields
    pub fn view(&self) -> TourView {
        self.inner.view.lock().clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.view.lock().is_active
    }

    pub fn current_step(&self) -> Option<Step> {
        self.inner.view.lock().current_step.clone()
    }

    pub fn step_index(&self) -> usize {
        self.inner.view.lock().step_index
    }

    pub fn checklist(&self) -> Vec<ChecklistItem> {
        self.inner.view.lock().checklist.clone()
    }

    /// Checklist progress as (completed, total)
    pub fn checklist_progress(&self) -> (usize, usize) {
        self.inner.view.lock().checklist_progress()
    }

    pub fn help_indicators(&self) -> Vec<String> {
        self.inner.engine.lock().help_indicators().to_vec()
    }

    pub fn completed_steps(&self) -> Vec<String> {
        self.inner.engine.lock().completed_steps()
    }

    /// Step count of the active flow, 0 when idle
    pub fn total_steps(&self) -> usize {
        self.inner.engine.lock().total_steps()
    }

    pub fn start_flow(&self, flow_id: &str) -> CommandOutcome {
        self.inner.engine.lock().start_flow(flow_id)
    }

    pub fn next_step(&self) -> CommandOutcome {
        self.inner.engine.lock().next_step()
    }

    pub fn skip_flow(&self) -> CommandOutcome {
        self.inner.engine.lock().skip_flow()
    }

    pub fn complete_checklist_item(&self, item_id: &str) -> CommandOutcome {
        self.inner.engine.lock().complete_checklist_item(item_id)
    }

    /// Reset the engine and re-snapshot the view, since reset emits no event
    pub fn reset(&self) -> CommandOutcome {
        let mut engine = self.inner.engine.lock();
        let outcome = engine.reset();
        *self.inner.view.lock() = TourView::snapshot(engine.state());
        outcome
    }
}

impl ControllerInner {
    fn revoke(&self, ids: Vec<SubscriptionId>) {
        if ids.is_empty() {
            return;
        }

        let mut engine = self.engine.lock();
        for id in &ids {
            engine.off(*id);
        }
        debug!("Tour controller detached ({} observers)", ids.len());
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        let ids = std::mem::take(self.subscriptions.get_mut());
        self.revoke(ids);
    }
}
