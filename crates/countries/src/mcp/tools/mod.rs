mod countries;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "countries".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "countries_list".to_string(),
            description: "List countries from restcountries.com sorted by name. Narrow the \
                listing with a region, a spoken language and a case-insensitive name search. \
                Returns a window of at most `limit` countries plus the total number of matches."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "region": {
                        "type": "string",
                        "description": "Only countries in this region (e.g. 'Europe', 'Americas')"
                    },
                    "language": {
                        "type": "string",
                        "description": "Only countries speaking this language (e.g. 'Spanish')"
                    },
                    "search": {
                        "type": "string",
                        "description": "Case-insensitive substring of the country name"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Number of countries to return (default: 20)",
                        "default": 20
                    }
                }
            }),
        },
        Tool {
            name: "countries_show".to_string(),
            description: "Show the full record of one country looked up by its exact name: \
                official and native names, capital, population, currencies, languages, top \
                level domains, flag, map and the names of its bordering countries."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Exact country name (e.g. 'Peru', 'United States')"
                    }
                },
                "required": ["name"]
            }),
        },
        Tool {
            name: "countries_facets".to_string(),
            description: "List every region and language present in the catalog. Use these \
                values for the `region` and `language` arguments of countries_list."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
    ];

    let result = ToolsList { tools };
    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "countries_list" => countries::handle_countries_list(params.arguments, global).await,
        "countries_show" => countries::handle_countries_show(params.arguments, global).await,
        "countries_facets" => countries::handle_countries_facets(params.arguments, global).await,
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            params.name
        ))),
    }
}

/// Wraps serializable tool output as a single text content block.
fn text_result<T: Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data)
        .map_err(|e| JsonRpcError::internal(format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}
