//! Tool registry and execution

mod executor;
mod registry;

#[cfg(test)]
pub(crate) mod mock;

pub use executor::ToolExecutor;
pub use registry::ToolName;
