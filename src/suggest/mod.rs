pub mod client;
pub mod types;

pub use client::{HttpSuggestionClient, SUGGEST_PATH, SuggestionApi};
pub use types::*;

#[cfg(test)]
pub use client::MockSuggestionApi;
