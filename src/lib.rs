pub mod app;
pub mod cli;
pub mod codec;
pub mod components;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod logging;
pub mod theme;

pub use error::{Error, Result};
