pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod probe;
pub mod terminal;
pub mod text;
pub mod timestamp;

pub use error::{Error, Result};
