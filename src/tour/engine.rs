/// Tour engine
///
/// Sole owner of tour state. Applies commands, then notifies observers
/// synchronously through the embedded event bus.
use std::sync::Arc;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use super::flow::{ChecklistItem, Flow, Step};
use super::state::TourState;
use crate::config::TourConfig;
use crate::messaging::{
    CommandOutcome, EventBus, EventKind, EventPayload, IgnoreReason, SubscriptionId, TourCommand,
    TourEvent,
};

/// Engine handle shared between several UI controllers
pub type SharedEngine = Arc<Mutex<TourEngine>>;

/// Guided-flow sequencing engine
///
/// State machine:
///
/// ```text
/// Idle ──start_flow(found)──> Active(id, 0)
/// Active(id, i) ──next_step, i < last──> Active(id, i + 1)   [step_changed]
/// Active(id, last) ──next_step──> Idle                        [flow_completed]
/// Active(id, i) ──skip_flow──> Idle                           [flow_skipped]
/// any ──reset──> Idle                                         [no event]
/// ```
///
/// Observers registered with [`TourEngine::on`] run inside the command call,
/// in registration order, and receive the state as it is at emission time.
#[derive(Debug)]
pub struct TourEngine {
    state: TourState,
    bus: EventBus,
}

impl TourEngine {
    /// Create an idle engine over a static configuration
    pub fn new(config: TourConfig) -> Self {
        Self {
            state: TourState::new(config),
            bus: EventBus::new(),
        }
    }

    /// Create an engine wrapped for sharing between controllers
    pub fn shared(config: TourConfig) -> SharedEngine {
        Arc::new(Mutex::new(Self::new(config)))
    }

    /// Read-only view of the engine state
    pub fn state(&self) -> &TourState {
        &self.state
    }

    /// Start the flow `flow_id` at its first step.
    ///
    /// Unknown ids are ignored without emitting anything.
    pub fn start_flow(&mut self, flow_id: &str) -> CommandOutcome {
        let Some(index) = self.state.find_flow(flow_id) else {
            return self.ignore(IgnoreReason::FlowNotFound(flow_id.to_string()));
        };

        let flow = self.state.flow_at(index);
        if flow.steps.is_empty() {
            return self.ignore(IgnoreReason::FlowHasNoSteps(flow.id.clone()));
        }

        self.state.activate(index);
        tracing::debug!(flow_id = %flow.id, steps = flow.step_count(), "Flow started");

        self.emit(EventPayload::FlowStarted {
            flow_id: flow.id.clone(),
            flow,
        });
        CommandOutcome::Applied
    }

    /// Complete the current step and advance.
    ///
    /// On the last step the session ends: `flow_completed` is emitted while the
    /// finishing session is still visible to observers, then the engine goes idle.
    pub fn next_step(&mut self) -> CommandOutcome {
        let Some(flow) = self.state.active_flow_handle() else {
            return self.ignore(IgnoreReason::NoActiveFlow);
        };

        // Active flows always have at least one step and a valid index
        let index = self.state.current_step_index();
        self.state.mark_step_completed(&flow.steps[index].id);

        if flow.is_last(index) {
            tracing::debug!(flow_id = %flow.id, "Flow completed");
            self.emit(EventPayload::FlowCompleted {
                flow_id: flow.id.clone(),
            });
            self.state.deactivate();
        } else {
            let next = index + 1;
            self.state.set_current_step(next);
            tracing::debug!(flow_id = %flow.id, index = next, "Step changed");
            self.emit(EventPayload::StepChanged {
                flow_id: flow.id.clone(),
                index: next,
                step: flow.steps[next].clone(),
            });
        }

        CommandOutcome::Applied
    }

    /// Abandon the active flow.
    ///
    /// `flow_skipped` is emitted before the session is cleared. Completed steps
    /// are kept until the next `start_flow`.
    pub fn skip_flow(&mut self) -> CommandOutcome {
        let Some(flow_id) = self.state.active_flow_id().map(str::to_string) else {
            return self.ignore(IgnoreReason::NoActiveFlow);
        };

        tracing::debug!(flow_id = %flow_id, index = self.state.current_step_index(), "Flow skipped");
        self.emit(EventPayload::FlowSkipped { flow_id });
        self.state.deactivate();

        CommandOutcome::Applied
    }

    /// Mark a checklist item as completed.
    ///
    /// The id is not validated. The event reports the active flow's checklist,
    /// which is empty when no flow is active.
    pub fn complete_checklist_item(&mut self, item_id: &str) -> CommandOutcome {
        self.state.mark_checklist_item(item_id);
        tracing::debug!(item_id, "Checklist item completed");

        self.emit(EventPayload::ChecklistUpdated {
            item_id: item_id.to_string(),
            completed: true,
            items: self.state.checklist(),
        });
        CommandOutcome::Applied
    }

    /// Return to idle and clear all progress, checklist included. Emits nothing.
    pub fn reset(&mut self) -> CommandOutcome {
        self.state.clear();
        tracing::debug!("Tour engine reset");
        CommandOutcome::Applied
    }

    /// Apply a command
    pub fn execute(&mut self, command: TourCommand) -> CommandOutcome {
        tracing::trace!("Executing command: {}", command.description());

        match command {
            TourCommand::StartFlow { flow_id } => self.start_flow(&flow_id),
            TourCommand::NextStep => self.next_step(),
            TourCommand::SkipFlow => self.skip_flow(),
            TourCommand::CompleteChecklistItem { item_id } => {
                self.complete_checklist_item(&item_id)
            }
            TourCommand::Reset => self.reset(),
        }
    }

    /// Register an observer for `kind`
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&TourEvent, &TourState) + Send + 'static,
    {
        self.bus.subscribe(kind, callback)
    }

    /// Register a channel observer for `kind`
    pub fn on_channel(&mut self, kind: EventKind) -> (Receiver<TourEvent>, SubscriptionId) {
        self.bus.subscribe_channel(kind)
    }

    /// Revoke an observer by its handle
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Get number of observers for `kind`
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.bus.subscriber_count(kind)
    }

    pub fn current_flow(&self) -> Option<&Flow> {
        self.state.current_flow()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.state.current_step()
    }

    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index()
    }

    pub fn completed_steps(&self) -> Vec<String> {
        self.state.completed_steps()
    }

    pub fn checklist(&self) -> Vec<ChecklistItem> {
        self.state.checklist()
    }

    pub fn is_flow_active(&self) -> bool {
        self.state.is_flow_active()
    }

    pub fn help_indicators(&self) -> &[String] {
        self.state.help_indicators()
    }

    pub fn total_steps(&self) -> usize {
        self.state.total_steps()
    }

    fn emit(&mut self, payload: EventPayload) {
        let event = TourEvent::new(payload);
        self.bus.publish(&event, &self.state);
    }

    fn ignore(&self, reason: IgnoreReason) -> CommandOutcome {
        tracing::debug!("Command ignored: {}", reason);
        CommandOutcome::Ignored(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TourEngine {
        TourEngine::new(TourConfig::dashboard_demo())
    }

    /// Record every event kind the engine emits
    fn record_all(engine: &mut TourEngine) -> Arc<Mutex<Vec<EventKind>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for kind in EventKind::ALL {
            let log = Arc::clone(&log);
            engine.on(kind, move |event, _| log.lock().push(event.kind()));
        }
        log
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = engine();
        assert!(!engine.is_flow_active());
        assert!(engine.current_step().is_none());
        assert_eq!(engine.total_steps(), 0);
    }

    #[test]
    fn test_start_flow() {
        let mut engine = engine();
        let log = record_all(&mut engine);

        assert_eq!(engine.start_flow("dashboard-tour"), CommandOutcome::Applied);
        assert!(engine.is_flow_active());
        assert_eq!(engine.current_step_index(), 0);
        assert_eq!(engine.current_step().unwrap().id, "header");
        assert_eq!(engine.total_steps(), 4);
        assert_eq!(*log.lock(), vec![EventKind::FlowStarted]);
    }

    #[test]
    fn test_start_unknown_flow_is_ignored() {
        let mut engine = engine();
        let log = record_all(&mut engine);

        let outcome = engine.start_flow("nope");
        assert_eq!(
            outcome,
            CommandOutcome::Ignored(IgnoreReason::FlowNotFound("nope".to_string()))
        );
        assert!(!engine.is_flow_active());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_start_empty_flow_is_ignored() {
        let config = TourConfig::new(vec![Flow::new("empty", "Empty", vec![])]);
        let mut engine = TourEngine::new(config);
        let log = record_all(&mut engine);

        assert!(engine.start_flow("empty").is_ignored());
        assert!(!engine.is_flow_active());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_commands_while_idle_are_ignored() {
        let mut engine = engine();
        let log = record_all(&mut engine);

        assert_eq!(
            engine.next_step(),
            CommandOutcome::Ignored(IgnoreReason::NoActiveFlow)
        );
        assert_eq!(
            engine.skip_flow(),
            CommandOutcome::Ignored(IgnoreReason::NoActiveFlow)
        );
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_next_step_marks_and_advances() {
        let mut engine = engine();
        engine.start_flow("dashboard-tour");

        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        engine.on(EventKind::StepChanged, move |event, state| {
            if let EventPayload::StepChanged { index, step, .. } = &event.payload {
                // Observers read post-mutation state
                assert_eq!(state.current_step_index(), *index);
                *sink.lock() = Some((*index, step.id.clone()));
            }
        });

        engine.next_step();
        assert_eq!(*seen.lock(), Some((1, "analytics".to_string())));
        assert_eq!(engine.completed_steps(), vec!["header".to_string()]);
    }

    #[test]
    fn test_last_step_completes_flow() {
        let mut engine = engine();
        engine.start_flow("dashboard-tour");
        let log = record_all(&mut engine);

        for _ in 0..4 {
            assert!(engine.next_step().is_applied());
        }

        assert!(!engine.is_flow_active());
        assert_eq!(engine.current_step_index(), 0);
        assert_eq!(
            *log.lock(),
            vec![
                EventKind::StepChanged,
                EventKind::StepChanged,
                EventKind::StepChanged,
                EventKind::FlowCompleted
            ]
        );
    }

    #[test]
    fn test_skip_emits_before_clearing() {
        let mut engine = engine();
        engine.start_flow("dashboard-tour");
        engine.next_step();

        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        engine.on(EventKind::FlowSkipped, move |_, state| {
            *sink.lock() = Some((state.is_flow_active(), state.completed_count()));
        });

        assert!(engine.skip_flow().is_applied());
        assert_eq!(*observed.lock(), Some((true, 1)));
        assert!(!engine.is_flow_active());
        // Completed steps survive until the next start
        assert_eq!(engine.completed_steps().len(), 1);
    }

    #[test]
    fn test_checklist_update_while_idle_reports_empty_items() {
        let mut engine = engine();
        let (rx, _id) = engine.on_channel(EventKind::ChecklistUpdated);

        engine.complete_checklist_item("analytics");

        let event = rx.try_recv().unwrap();
        match event.payload {
            EventPayload::ChecklistUpdated {
                item_id,
                completed,
                items,
            } => {
                assert_eq!(item_id, "analytics");
                assert!(completed);
                assert!(items.is_empty());
            }
            _ => panic!("Wrong event type received"),
        }

        // Completion is reported once the flow becomes active
        engine.start_flow("dashboard-tour");
        let analytics = engine
            .checklist()
            .into_iter()
            .find(|i| i.id == "analytics")
            .unwrap();
        assert!(analytics.completed);
    }

    #[test]
    fn test_unknown_checklist_item_is_still_recorded() {
        let mut engine = engine();
        assert!(engine.complete_checklist_item("not-configured").is_applied());
        assert!(engine.state().is_checklist_item_completed("not-configured"));
    }

    #[test]
    fn test_reset_is_silent() {
        let mut engine = engine();
        engine.start_flow("dashboard-tour");
        engine.next_step();
        engine.complete_checklist_item("analytics");
        let log = record_all(&mut engine);

        assert!(engine.reset().is_applied());
        assert!(log.lock().is_empty());
        assert!(!engine.is_flow_active());
        assert!(engine.completed_steps().is_empty());
        assert!(!engine.state().is_checklist_item_completed("analytics"));
    }

    #[test]
    fn test_execute_dispatches() {
        let mut engine = engine();

        let outcome = engine.execute(TourCommand::StartFlow {
            flow_id: "dashboard-tour".to_string(),
        });
        assert!(outcome.is_applied());

        engine.execute(TourCommand::NextStep);
        assert_eq!(engine.current_step_index(), 1);

        engine.execute(TourCommand::SkipFlow);
        assert!(!engine.is_flow_active());
    }

    #[test]
    fn test_off_removes_observer() {
        let mut engine = engine();
        let id = engine.on(EventKind::FlowStarted, |_, _| {});
        assert_eq!(engine.subscriber_count(EventKind::FlowStarted), 1);

        assert!(engine.off(id));
        assert_eq!(engine.subscriber_count(EventKind::FlowStarted), 0);
    }

    #[test]
    fn test_shared_engine() {
        let shared = TourEngine::shared(TourConfig::dashboard_demo());
        shared.lock().start_flow("dashboard-tour");
        assert!(shared.lock().is_flow_active());
    }
}
