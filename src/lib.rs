pub mod config;
pub mod error;
pub mod estimation;
pub mod llm;
pub mod project;
pub mod server;

pub use error::{Error, Result};
