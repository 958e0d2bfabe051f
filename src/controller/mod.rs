#[allow(clippy::module_inception)]
mod controller;
mod outcome;
pub mod state;
mod view;

pub use controller::{INTEGRATED_MESSAGE, NOTHING_TO_INTEGRATE_MESSAGE, SuggestionController};
pub use outcome::SuggestionOutcome;
pub use state::{RequestEvent, RequestState, RequestStateMachine};
pub use view::{Element, View};
