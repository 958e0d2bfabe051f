use super::{
    outcome::SuggestionOutcome,
    state::{RequestEvent, RequestState, RequestStateMachine},
    view::{Element, View},
};
use crate::{
    Result,
    config::UiConfig,
    highlight::Highlighter,
    suggest::{Suggestion, SuggestionApi, SuggestionRequest},
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const INTEGRATED_MESSAGE: &str = "Code integrated into the source input!";
pub const NOTHING_TO_INTEGRATE_MESSAGE: &str = "No suggested code available to integrate.";

#[derive(Debug, Default)]
struct ControllerState {
    fsm: RequestStateMachine,
    /// Last successfully parsed suggestion, empty while loading or after a failure.
    current_suggested_code: String,
}

/// Drives one request/response/render cycle against a [`View`].
pub struct SuggestionController {
    api: Arc<dyn SuggestionApi>,
    view: Arc<dyn View>,
    highlighter: Arc<dyn Highlighter>,
    ui: UiConfig,
    state: Mutex<ControllerState>,
}

impl SuggestionController {
    /// Creates the controller and puts the view in its idle layout.
    pub fn new(
        api: Arc<dyn SuggestionApi>,
        view: Arc<dyn View>,
        highlighter: Arc<dyn Highlighter>,
        ui: UiConfig,
    ) -> Self {
        view.set_trigger(true, &ui.idle_label);
        for element in [
            Element::ResultPanel,
            Element::LoadingIndicator,
            Element::ErrorPanel,
            Element::IntegrateButton,
        ] {
            view.set_visible(element, false);
        }

        Self {
            api,
            view,
            highlighter,
            ui,
            state: Mutex::new(ControllerState::default()),
        }
    }

    pub fn state(&self) -> RequestState {
        self.lock_state().fsm.current_state()
    }

    pub fn current_suggested_code(&self) -> String {
        self.lock_state().current_suggested_code.clone()
    }

    /// Reads both inputs from the view, sends them to the service and
    /// renders whatever comes back. A call made while another request is
    /// loading returns [`SuggestionOutcome::Busy`] and does nothing.
    pub async fn request_suggestion(&self) -> SuggestionOutcome {
        if self.lock_state().fsm.is_loading() {
            debug!("Suggestion request ignored, another one is in flight");
            return SuggestionOutcome::Busy;
        }

        let request =
            match SuggestionRequest::new(self.view.selected_code(), self.view.user_prompt()) {
                Ok(request) => request,
                Err(e) => {
                    let message = e.user_message();
                    self.view.alert(&message);
                    return SuggestionOutcome::ValidationError(message);
                }
            };

        let Some(request_id) = self.begin() else {
            return SuggestionOutcome::Busy;
        };

        info!("Requesting suggestion {}", request_id);
        self.view.set_trigger(false, &self.ui.busy_label);
        self.view.set_visible(Element::ResultPanel, false);
        self.view.set_visible(Element::ErrorPanel, false);
        self.view.set_visible(Element::LoadingIndicator, true);
        self.view.set_visible(Element::IntegrateButton, false);

        // Resets the controller if this future is dropped or the service panics.
        let guard = InFlight {
            controller: self,
            request_id,
            armed: true,
        };

        let result = self.api.suggest(&request).await;
        guard.disarm();

        self.complete(request_id, result)
    }

    /// Copies the current suggestion into the source input. Returns whether
    /// anything was copied.
    pub fn integrate_suggestion(&self) -> bool {
        let code = self.current_suggested_code();
        if code.is_empty() {
            self.view.alert(NOTHING_TO_INTEGRATE_MESSAGE);
            return false;
        }

        debug!("Integrating {} bytes of suggested code", code.len());
        self.view.set_selected_code(&code);
        self.view.alert(INTEGRATED_MESSAGE);
        true
    }

    fn begin(&self) -> Option<Uuid> {
        let mut state = self.lock_state();
        if let Err(e) = state.fsm.transition(RequestEvent::Submit) {
            debug!("Suggestion request not started: {}", e);
            return None;
        }

        state.current_suggested_code.clear();
        Some(Uuid::new_v4())
    }

    fn complete(&self, request_id: Uuid, result: Result<Suggestion>) -> SuggestionOutcome {
        let mut state = self.lock_state();
        let outcome = match result {
            Ok(suggestion) => {
                advance(&mut state, RequestEvent::ResponseReceived);
                state.current_suggested_code = suggestion.suggested_code.clone();
                SuggestionOutcome::Success(suggestion)
            }
            Err(e) => {
                error!("Suggestion request {} failed: {}", request_id, e);
                advance(&mut state, RequestEvent::RequestFailed);
                SuggestionOutcome::from(e)
            }
        };
        advance(&mut state, RequestEvent::Settle);
        drop(state);

        // Loading ends before any panel is drawn.
        self.finish_loading();
        self.render(&outcome);
        outcome
    }

    fn abandon(&self, request_id: Uuid) {
        warn!("Suggestion request {} abandoned before completion", request_id);
        {
            let mut state = self.lock_state();
            advance(&mut state, RequestEvent::RequestFailed);
            advance(&mut state, RequestEvent::Settle);
        }
        self.finish_loading();
    }

    fn finish_loading(&self) {
        self.view.set_visible(Element::LoadingIndicator, false);
        self.view.set_trigger(true, &self.ui.idle_label);
    }

    fn render(&self, outcome: &SuggestionOutcome) {
        match outcome {
            SuggestionOutcome::Success(suggestion) => {
                self.view.set_explanation(&suggestion.explanation);
                let code = self
                    .highlighter
                    .highlight(&suggestion.suggested_code, &self.ui.language);
                self.view.set_suggested_code(&code);
                self.view.set_visible(Element::ResultPanel, true);
                self.view.set_visible(Element::IntegrateButton, true);
            }
            other => {
                if let Some(message) = other.error_message() {
                    self.view.set_error_details(message);
                    self.view.set_visible(Element::ErrorPanel, true);
                }
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Returns the controller to idle unless disarmed once the service answered.
struct InFlight<'a> {
    controller: &'a SuggestionController,
    request_id: Uuid,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abandon(self.request_id);
        }
    }
}

fn advance(state: &mut ControllerState, event: RequestEvent) {
    if let Err(e) = state.fsm.transition(event) {
        error!("Request state machine out of step: {}", e);
    }
}
