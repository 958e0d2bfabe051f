use async_trait::async_trait;
use code_iterator::{
    Error, Result,
    controller::{Element, View},
    highlight::HighlightedCode,
    suggest::{Suggestion, SuggestionApi, SuggestionRequest},
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// In-memory view that records the state of every element
#[derive(Debug, Default)]
pub struct RecordingView {
    pub selected_code: Mutex<String>,
    pub user_prompt: Mutex<String>,
    pub alerts: Mutex<Vec<String>>,
    pub trigger: Mutex<(bool, String)>,
    pub trigger_history: Mutex<Vec<(bool, String)>>,
    pub visible: Mutex<HashSet<Element>>,
    pub visibility_history: Mutex<Vec<(Element, bool)>>,
    pub explanation: Mutex<String>,
    pub code: Mutex<Option<HighlightedCode>>,
    pub error_details: Mutex<String>,
}

impl RecordingView {
    pub fn new(selected_code: &str, user_prompt: &str) -> Arc<Self> {
        let view = Self::default();
        *view.selected_code.lock().unwrap() = selected_code.to_string();
        *view.user_prompt.lock().unwrap() = user_prompt.to_string();
        Arc::new(view)
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.lock().unwrap().contains(&element)
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn trigger(&self) -> (bool, String) {
        self.trigger.lock().unwrap().clone()
    }

    pub fn code_text(&self) -> Option<String> {
        self.code.lock().unwrap().as_ref().map(|c| c.text.clone())
    }

    pub fn explanation(&self) -> String {
        self.explanation.lock().unwrap().clone()
    }

    pub fn error_details(&self) -> String {
        self.error_details.lock().unwrap().clone()
    }

    /// Index of the first time `element` was switched to `visible`
    pub fn first_toggle(&self, element: Element, visible: bool) -> Option<usize> {
        self.visibility_history
            .lock()
            .unwrap()
            .iter()
            .position(|entry| *entry == (element, visible))
    }

    pub fn source(&self) -> String {
        self.selected_code.lock().unwrap().clone()
    }
}

impl View for RecordingView {
    fn selected_code(&self) -> String {
        self.selected_code.lock().unwrap().clone()
    }

    fn user_prompt(&self) -> String {
        self.user_prompt.lock().unwrap().clone()
    }

    fn set_selected_code(&self, code: &str) {
        *self.selected_code.lock().unwrap() = code.to_string();
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn set_trigger(&self, enabled: bool, label: &str) {
        let trigger = (enabled, label.to_string());
        self.trigger_history.lock().unwrap().push(trigger.clone());
        *self.trigger.lock().unwrap() = trigger;
    }

    fn set_visible(&self, element: Element, visible: bool) {
        self.visibility_history
            .lock()
            .unwrap()
            .push((element, visible));
        let mut set = self.visible.lock().unwrap();
        if visible {
            set.insert(element);
        } else {
            set.remove(&element);
        }
    }

    fn set_explanation(&self, text: &str) {
        *self.explanation.lock().unwrap() = text.to_string();
    }

    fn set_suggested_code(&self, code: &HighlightedCode) {
        *self.code.lock().unwrap() = Some(code.clone());
    }

    fn set_error_details(&self, text: &str) {
        *self.error_details.lock().unwrap() = text.to_string();
    }
}

/// Scripted suggestion service for testing
#[derive(Debug)]
pub struct StubSuggestionApi {
    pub responses: Arc<Mutex<Vec<Result<Suggestion>>>>,
    pub requests: Arc<Mutex<Vec<SuggestionRequest>>>,
    /// When set, every call parks until the gate is notified
    pub gate: Option<Arc<Notify>>,
}

impl StubSuggestionApi {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn with_response(self, response: Result<Suggestion>) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn get_requests(&self) -> Vec<SuggestionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for StubSuggestionApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SuggestionApi for StubSuggestionApi {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::malformed("No more stub responses available"));
        }
        responses.remove(0)
    }
}
