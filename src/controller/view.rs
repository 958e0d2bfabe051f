use crate::highlight::HighlightedCode;

/// Toggleable regions of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    ResultPanel,
    LoadingIndicator,
    ErrorPanel,
    IntegrateButton,
}

/// The host surface the controller drives.
///
/// Every setter takes plain text. Implementations must never interpret
/// explanation or error text as markup.
pub trait View: Send + Sync {
    fn selected_code(&self) -> String;

    fn user_prompt(&self) -> String;

    fn set_selected_code(&self, code: &str);

    /// Blocking notice to the user (validation and integrate feedback).
    fn alert(&self, message: &str);

    fn set_trigger(&self, enabled: bool, label: &str);

    fn set_visible(&self, element: Element, visible: bool);

    fn set_explanation(&self, text: &str);

    fn set_suggested_code(&self, code: &HighlightedCode);

    fn set_error_details(&self, text: &str);
}
