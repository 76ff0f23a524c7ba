//! Asynchronous state machine for the single in-flight translation request.
//!
//! The remote call runs on a background thread and reports back through a
//! message channel; the TUI loop polls for settlements each tick. Every
//! settlement carries the request token it was issued for, so a late response
//! from a superseded call can never overwrite a newer state.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::models::{ErrorDetail, TranslationResult};
use crate::services::translator::{TranslateError, TranslateRequest, Translator};
use crate::services::validator;

/// Monotonically increasing identifier for one submission.
///
/// A settlement is applied only if its token matches the orchestrator's
/// current token.
pub type RequestToken = u64;

/// Phase of the translation surface, read by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorState {
    /// No request active and nothing to show.
    Idle,
    /// A remote call is in flight.
    Loading,
    /// The last request settled with a conforming result.
    Success(TranslationResult),
    /// The last request failed; the detail is shown in place of a result.
    Failed(ErrorDetail),
}

impl OrchestratorState {
    /// Whether the translation surface should be visible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Settlement of one remote call, sent from its worker thread.
struct Settlement {
    token: RequestToken,
    outcome: Result<serde_json::Value, TranslateError>,
}

/// Owns the single in-flight translation request.
///
/// The remote client is injected so tests can drive the full state machine
/// with stubs. All state transitions happen on the caller's thread, either
/// directly in [`submit`](Self::submit)/[`dismiss`](Self::dismiss) or in
/// [`poll`](Self::poll) when a settlement arrives.
pub struct TranslationOrchestrator {
    state: OrchestratorState,
    token: RequestToken,
    receiver: Option<Receiver<Settlement>>,
    translator: Arc<dyn Translator>,
}

impl TranslationOrchestrator {
    /// Creates an idle orchestrator around an injected remote client.
    #[must_use]
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            state: OrchestratorState::Idle,
            token: 0,
            receiver: None,
            translator,
        }
    }

    /// The current phase.
    #[must_use]
    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    /// Whether a remote call is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, OrchestratorState::Loading)
    }

    /// Submits the composed text for translation.
    ///
    /// Empty (trimmed) input fails immediately with no remote call. Otherwise
    /// the state moves to `Loading`, any prior result or error is discarded,
    /// and exactly one remote call is issued. A submission while `Loading`
    /// supersedes the earlier call: the old call is not cancelled, but its
    /// settlement arrives with a stale token and is dropped.
    pub fn submit(&mut self, text: &str) {
        self.token += 1;

        if text.trim().is_empty() {
            debug!(token = self.token, "rejected empty submission");
            self.receiver = None;
            self.state = OrchestratorState::Failed(ErrorDetail::new(
                TranslateError::EmptyInput.to_string(),
            ));
            return;
        }

        if self.is_loading() {
            info!(token = self.token, "superseding in-flight translation");
        }

        let (sender, receiver): (Sender<Settlement>, Receiver<Settlement>) = channel();
        self.receiver = Some(receiver);
        self.state = OrchestratorState::Loading;

        let token = self.token;
        let translator = Arc::clone(&self.translator);
        let request = TranslateRequest::for_prompt(text);
        info!(token, chars = text.len(), "submitting translation request");

        thread::spawn(move || {
            let outcome = translator.translate(&request);
            // The receiver may be gone if a newer submission replaced it.
            let _ = sender.send(Settlement { token, outcome });
        });
    }

    /// Drains settled remote calls and applies at most the current one.
    ///
    /// Returns `true` if the state changed. Settlements whose token does not
    /// match the current request are stale and are dropped unapplied.
    pub fn poll(&mut self) -> bool {
        let mut outcomes = Vec::new();
        {
            let Some(receiver) = &self.receiver else {
                return false;
            };

            while let Ok(settlement) = receiver.try_recv() {
                if settlement.token != self.token {
                    warn!(
                        stale = settlement.token,
                        current = self.token,
                        "dropping stale settlement"
                    );
                    continue;
                }
                outcomes.push(settlement.outcome);
            }
        }

        let mut changed = false;
        for outcome in outcomes {
            self.apply(outcome);
            changed = true;
        }
        if changed {
            self.receiver = None;
        }
        changed
    }

    /// Dismisses the translation surface and returns to `Idle`.
    ///
    /// Bumping the token here means a settlement for a dismissed request is
    /// stale by the time it arrives.
    pub fn dismiss(&mut self) {
        self.token += 1;
        self.receiver = None;
        self.state = OrchestratorState::Idle;
    }

    fn apply(&mut self, outcome: Result<serde_json::Value, TranslateError>) {
        let validated =
            outcome.and_then(|raw| validator::validate(&raw).map_err(TranslateError::from));
        self.state = match validated {
            Ok(result) => {
                info!(token = self.token, "translation settled successfully");
                OrchestratorState::Success(result)
            }
            Err(err) => {
                warn!(token = self.token, error = %err, "translation failed");
                OrchestratorState::Failed(ErrorDetail::new(err.to_string()))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Stub translator returning a fixed outcome and counting invocations.
    struct StubTranslator {
        outcome: Result<serde_json::Value, TranslateError>,
        calls: AtomicUsize,
    }

    impl StubTranslator {
        fn ok(payload: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                outcome: Ok(payload),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(err: TranslateError) -> Arc<Self> {
            Arc::new(Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Translator for StubTranslator {
        fn translate(
            &self,
            _request: &TranslateRequest,
        ) -> Result<serde_json::Value, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn well_formed() -> serde_json::Value {
        json!({
            "translation": "A quiet truth",
            "interpretation": ["**Q** asks for quiet"],
            "spiritualMessage": "Be still"
        })
    }

    fn settle(orchestrator: &mut TranslationOrchestrator) {
        for _ in 0..100 {
            if orchestrator.poll() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("settlement never arrived");
    }

    #[test]
    fn test_empty_submission_fails_without_remote_call() {
        let stub = StubTranslator::ok(well_formed());
        let mut orchestrator = TranslationOrchestrator::new(Arc::clone(&stub) as Arc<dyn Translator>);

        orchestrator.submit("");
        assert!(matches!(orchestrator.state(), OrchestratorState::Failed(_)));

        orchestrator.submit("   ");
        assert!(matches!(orchestrator.state(), OrchestratorState::Failed(_)));

        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_success_path_goes_through_loading() {
        let stub = StubTranslator::ok(well_formed());
        let mut orchestrator = TranslationOrchestrator::new(stub as Arc<dyn Translator>);

        orchestrator.submit("HELLO");
        assert!(orchestrator.is_loading());

        settle(&mut orchestrator);
        match orchestrator.state() {
            OrchestratorState::Success(result) => {
                assert_eq!(result.translation, "A quiet truth");
                assert_eq!(result.spiritual_message, "Be still");
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn test_nonconforming_payload_fails_validation() {
        let mut payload = well_formed();
        payload.as_object_mut().unwrap().remove("spiritualMessage");
        let stub = StubTranslator::ok(payload);
        let mut orchestrator = TranslationOrchestrator::new(stub as Arc<dyn Translator>);

        orchestrator.submit("HELLO");
        settle(&mut orchestrator);
        match orchestrator.state() {
            OrchestratorState::Failed(detail) => {
                assert!(detail.message.contains("spiritualMessage"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_remote_failure_surfaces_message() {
        let stub = StubTranslator::failing(TranslateError::RemoteCall(
            "connection refused".to_string(),
        ));
        let mut orchestrator = TranslationOrchestrator::new(stub as Arc<dyn Translator>);

        orchestrator.submit("HELLO");
        settle(&mut orchestrator);
        match orchestrator.state() {
            OrchestratorState::Failed(detail) => {
                assert!(detail.message.contains("connection refused"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_dismiss_returns_to_idle_and_stales_inflight_call() {
        let stub = StubTranslator::ok(well_formed());
        let mut orchestrator = TranslationOrchestrator::new(stub as Arc<dyn Translator>);

        orchestrator.submit("HELLO");
        orchestrator.dismiss();
        assert_eq!(orchestrator.state(), &OrchestratorState::Idle);

        // The in-flight settlement is stale now and must not resurface.
        thread::sleep(Duration::from_millis(50));
        assert!(!orchestrator.poll());
        assert_eq!(orchestrator.state(), &OrchestratorState::Idle);
    }

    #[test]
    fn test_new_submission_discards_previous_terminal_state() {
        let stub = StubTranslator::ok(well_formed());
        let mut orchestrator = TranslationOrchestrator::new(stub as Arc<dyn Translator>);

        orchestrator.submit("FIRST");
        settle(&mut orchestrator);
        assert!(matches!(orchestrator.state(), OrchestratorState::Success(_)));

        orchestrator.submit("SECOND");
        assert!(orchestrator.is_loading());
    }
}
