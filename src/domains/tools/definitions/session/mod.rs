//! Session tools: channel validation, server metadata and trivia.
//!
//! None of these call the upstream API.

pub mod about;
pub mod trivia;
pub mod validate;

pub use about::AboutTool;
pub use trivia::TriviaTool;
pub use validate::ValidateTool;
