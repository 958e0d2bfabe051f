pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod highlight;
pub mod suggest;

pub use error::{Error, Result};
