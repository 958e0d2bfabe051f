use code_iterator::{
    config::{ServiceConfig, UiConfig},
    controller::SuggestionController,
    highlight::PlainHighlighter,
    suggest::{HttpSuggestionClient, Suggestion, SuggestionApi},
};
use std::sync::Arc;
use wiremock::MockServer;

use super::RecordingView;

pub const IDLE_LABEL: &str = "Get Suggestion ✨";
pub const BUSY_LABEL: &str = "Generating...";

/// Service configuration pointing at a wiremock server
pub fn service_config(server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        base_url: server.uri(),
        timeout_secs: Some(5),
    }
}

pub fn http_client(server: &MockServer) -> HttpSuggestionClient {
    HttpSuggestionClient::new(&service_config(server)).expect("Failed to build client")
}

/// Controller wired to a recording view and plain highlighting
pub fn create_controller(
    api: Arc<dyn SuggestionApi>,
    view: Arc<RecordingView>,
) -> SuggestionController {
    SuggestionController::new(api, view, Arc::new(PlainHighlighter), UiConfig::default())
}

/// Controller talking HTTP to a wiremock server
pub fn create_http_controller(server: &MockServer, view: Arc<RecordingView>) -> SuggestionController {
    create_controller(Arc::new(http_client(server)), view)
}

pub fn suggestion(explanation: &str, code: &str) -> Suggestion {
    Suggestion {
        explanation: explanation.to_string(),
        suggested_code: code.to_string(),
    }
}

/// The trigger must always end enabled with its idle caption
pub fn assert_trigger_idle(view: &RecordingView) {
    assert_eq!(view.trigger(), (true, IDLE_LABEL.to_string()));
}

pub const SAMPLE_CONFIG_YAML: &str = r#"
service:
  base_url: "http://localhost:9000"
  timeout_secs: 10

ui:
  language: "rust"
  idle_label: "Suggest"
  busy_label: "Working..."
  theme: "InspiredGitHub"

logs:
  level: "debug"
  json: true
"#;
