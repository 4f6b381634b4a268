// Core modules
pub mod config;
pub mod data;
pub mod error;
pub mod template;

// Re-export commonly used types
pub use config::Config;
pub use data::RenderData;
pub use error::{DummyError, Result};
pub use template::{Dummy, MissingFieldPolicy, Record, TemplateError};
