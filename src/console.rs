//! Terminal host surface for the suggestion controller.
//!
//! A terminal cannot hide what it already printed, so panels are rendered
//! at the moment they become visible and the spinner stands in for the
//! loading indicator.

use crate::controller::{Element, View};
use crate::highlight::HighlightedCode;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default)]
struct ConsoleState {
    selected_code: String,
    user_prompt: String,
    trigger_enabled: bool,
    trigger_label: String,
    visible: HashSet<Element>,
    explanation: String,
    code: Option<HighlightedCode>,
    error_details: String,
}

pub struct ConsoleView {
    state: Mutex<ConsoleState>,
    spinner: Mutex<Option<ProgressBar>>,
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl ConsoleView {
    pub fn new(selected_code: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self::with_writer(selected_code, user_prompt, Box::new(std::io::stdout()), true)
    }

    pub fn with_writer(
        selected_code: impl Into<String>,
        user_prompt: impl Into<String>,
        out: Box<dyn Write + Send>,
        color: bool,
    ) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                selected_code: selected_code.into(),
                user_prompt: user_prompt.into(),
                trigger_enabled: true,
                ..ConsoleState::default()
            }),
            spinner: Mutex::new(None),
            out: Mutex::new(out),
            color,
        }
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.lock_state().visible.contains(&element)
    }

    pub fn trigger(&self) -> (bool, String) {
        let state = self.lock_state();
        (state.trigger_enabled, state.trigger_label.clone())
    }

    fn lock_state(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn print(&self, text: &str) {
        let write = || {
            let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
            // Output errors (closed pipe) are not actionable from a view.
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        };

        match self.spinner.lock().unwrap_or_else(|p| p.into_inner()).as_ref() {
            Some(spinner) => spinner.suspend(write),
            None => write(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn rule(&self) -> String {
        let line = "─".repeat(40);
        if self.color {
            line.dimmed().to_string()
        } else {
            line
        }
    }

    fn start_spinner(&self, message: String) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        *self.spinner.lock().unwrap_or_else(|p| p.into_inner()) = Some(spinner);
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().unwrap_or_else(|p| p.into_inner()).take() {
            spinner.finish_and_clear();
        }
    }

    fn render_result(&self) {
        let (explanation, code) = {
            let state = self.lock_state();
            (state.explanation.clone(), state.code.clone())
        };

        self.print(&self.heading("Explanation:"));
        self.print(&explanation);
        self.print("");

        if let Some(code) = code {
            self.print(&self.heading(&format!("Suggested code ({}):", code.language)));
            self.print(&self.rule());
            let body = if self.color { &code.rendered } else { &code.text };
            self.print(body.trim_end_matches('\n'));
            self.print(&self.rule());
        }
    }

    fn render_error(&self) {
        let details = self.lock_state().error_details.clone();
        let label = "Error:";
        let label = if self.color {
            label.red().bold().to_string()
        } else {
            label.to_string()
        };
        self.print(&format!("{} {}", label, details));
    }
}

impl View for ConsoleView {
    fn selected_code(&self) -> String {
        self.lock_state().selected_code.clone()
    }

    fn user_prompt(&self) -> String {
        self.lock_state().user_prompt.clone()
    }

    fn set_selected_code(&self, code: &str) {
        self.lock_state().selected_code = code.to_string();
    }

    fn alert(&self, message: &str) {
        let text = if self.color {
            message.yellow().to_string()
        } else {
            message.to_string()
        };
        self.print(&text);
    }

    fn set_trigger(&self, enabled: bool, label: &str) {
        debug!("Trigger {} ({})", if enabled { "enabled" } else { "disabled" }, label);
        let mut state = self.lock_state();
        state.trigger_enabled = enabled;
        state.trigger_label = label.to_string();
    }

    fn set_visible(&self, element: Element, visible: bool) {
        let newly_shown = {
            let mut state = self.lock_state();
            if visible {
                state.visible.insert(element)
            } else {
                state.visible.remove(&element);
                false
            }
        };

        match (element, visible) {
            (Element::LoadingIndicator, true) if newly_shown => {
                let label = self.lock_state().trigger_label.clone();
                self.start_spinner(label);
            }
            (Element::LoadingIndicator, false) => self.stop_spinner(),
            (Element::ResultPanel, true) if newly_shown => self.render_result(),
            (Element::ErrorPanel, true) if newly_shown => self.render_error(),
            _ => {}
        }
    }

    fn set_explanation(&self, text: &str) {
        self.lock_state().explanation = text.to_string();
    }

    fn set_suggested_code(&self, code: &HighlightedCode) {
        self.lock_state().code = Some(code.clone());
    }

    fn set_error_details(&self, text: &str) {
        self.lock_state().error_details = text.to_string();
    }
}
