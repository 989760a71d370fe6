//! Domains module containing the server's business logic.
//!
//! The F1 server only exposes tools; resources and prompts are not offered.

pub mod tools;
