#![forbid(unsafe_code)]

//! Runtime for chained API tests: the HTTP executor, the chain state machine, read-only
//! session consumers and the tool registry that exposes them.

pub mod executor;
pub mod report;
pub mod tools;

pub use crate::executor::{ApiTestResponse, ChainExecutor, ExecutionError, ExecutorConfig};
pub use crate::tools::{Tool, ToolError, ToolRegistry};
