//! Tools domain module.
//!
//! Each tool turns one or a few upstream F1 API calls into a formatted
//! text block.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `F1Tool` trait and the generic glue to rmcp
//! - `context.rs` - Shared inputs of every call (upstream client, config, clock)
//! - `registry.rs` - Central tool registry and dispatch by name
//! - `router.rs` - rmcp ToolRouter derived from the registry
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in the matching `definitions/` category
//! 2. Implement `F1Tool` (name, description, params, `run`)
//! 3. Export it from the category and from `definitions/mod.rs`
//! 4. Add `ToolEntry::of::<NewTool>()` to the catalogue in `registry.rs`
//!
//! Both transports pick the new tool up from the registry.

mod context;
pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use context::{Clock, ToolContext};
pub use error::{ToolError, ToolResult};
pub use handlers::{F1Tool, Handler, NoParams, Reply, dispatch, error_result, execute, to_tool};
pub use registry::{TOOL_COUNT, ToolEntry, ToolRegistry};
pub use router::build_tool_router;
