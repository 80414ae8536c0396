//! Server capabilities

use serde::{Deserialize, Serialize};

/// Server capabilities advertised during initialization
///
/// The analyzer only serves tools; the tool list never changes at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

impl ServerCapabilities {
    /// Create capabilities with tools support
    pub fn with_tools() -> Self {
        Self {
            tools: Some(ToolsCapability::default()),
        }
    }
}

/// Tools capability
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_capability_serialization() {
        let value = serde_json::to_value(ServerCapabilities::with_tools()).unwrap();
        assert_eq!(value, serde_json::json!({ "tools": {} }));
    }
}
