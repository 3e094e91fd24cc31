// src/mcp/mod.rs
// MCP server: exposes the operation catalog as tools over stdio

use crate::error::CalcError;
use crate::registry::{OperationDescriptor, Registry};
use crate::response::Response;
use rmcp::{
    ErrorData, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
};
use serde_json::{Map, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_INSTRUCTIONS: &str = "Calculator tools: arithmetic, roots, trigonometry, logarithms, \
statistics, combinatorics, number theory, complex numbers, matrices, numerical methods, \
financial formulas, unit conversion and geometry. Every tool is stateless; angles are in radians \
unless the tool says otherwise.";

/// MCP server state
#[derive(Clone)]
pub struct CalculatorServer {
    registry: Arc<Registry>,
    instructions: String,
}

impl CalculatorServer {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Every catalog entry rendered as an MCP tool
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.operations().map(to_tool).collect()
    }

    /// Dispatch one tool call against the registry
    pub fn dispatch(
        &self,
        name: &str,
        arguments: Option<Map<String, serde_json::Value>>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = arguments.unwrap_or_default();
        self.registry
            .invoke(name, &arguments)
            .map(to_call_result)
            .map_err(to_error_data)
    }
}

fn to_tool(op: &OperationDescriptor) -> Tool {
    let mut tool = Tool::new(op.name, op.description, Arc::new(op.input_schema()));
    tool.title = Some(op.title.to_string());
    tool
}

fn to_call_result(response: Response) -> CallToolResult {
    let content = response
        .content
        .into_iter()
        .map(|c| Content::text(c.text))
        .collect();
    if response.is_error.unwrap_or(false) {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

fn to_error_data(err: CalcError) -> ErrorData {
    match err {
        CalcError::Validation(v) => {
            let data = json!({"parameter": v.parameter, "reason": v.reason});
            ErrorData::invalid_params(v.to_string(), Some(data))
        }
        CalcError::UnknownOperation(name) => ErrorData::invalid_params(
            format!("unknown operation: {}", name),
            Some(json!({"operation": name})),
        ),
        other => ErrorData::internal_error(other.to_string(), None),
    }
}

impl ServerHandler for CalculatorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "calculator".into(),
                title: Some("Calculator - math operations over MCP".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(self.instructions.clone()),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        }))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let tool_name = request.name.to_string();
            let call_id = uuid::Uuid::new_v4().to_string();
            let start = Instant::now();

            let result = self.dispatch(&tool_name, request.arguments);

            let duration_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) => debug!(
                    %call_id,
                    tool = %tool_name,
                    duration_ms,
                    is_error = r.is_error.unwrap_or(false),
                    "Tool call finished"
                ),
                Err(e) => warn!(
                    %call_id,
                    tool = %tool_name,
                    duration_ms,
                    error = %e.message,
                    "Tool call rejected"
                ),
            }
            result
        }
    }
}

/// Serve the registry over stdio until the client disconnects
pub async fn run_stdio(server: CalculatorServer) -> anyhow::Result<()> {
    info!(tools = server.registry().len(), "Starting MCP server on stdio");
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> CalculatorServer {
        CalculatorServer::new(Arc::new(Registry::standard().unwrap()))
    }

    fn args(v: serde_json::Value) -> Option<Map<String, serde_json::Value>> {
        v.as_object().cloned()
    }

    fn first_text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_tools_carry_titles_and_schemas() {
        let tools = server().tools();
        assert_eq!(tools.len(), 101);
        let add = tools.iter().find(|t| t.name == "add").unwrap();
        assert_eq!(add.title.as_deref(), Some("Addition"));
        assert_eq!(add.input_schema["type"], "object");
        assert_eq!(add.input_schema["required"], json!(["a", "b"]));
    }

    #[test]
    fn test_dispatch_success() {
        let result = server().dispatch("add", args(json!({"a": 2, "b": 3}))).unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(first_text(&result).contains("= 5"));
    }

    #[test]
    fn test_domain_error_is_tool_result() {
        let result = server()
            .dispatch("divide", args(json!({"a": 1, "b": 0})))
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(first_text(&result).starts_with("Error: "));
    }

    #[test]
    fn test_validation_error_is_invalid_params() {
        let err = server().dispatch("add", args(json!({"a": 2}))).unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["parameter"], "b");
    }

    #[test]
    fn test_unknown_tool_is_invalid_params() {
        let err = server().dispatch("frobnicate", None).unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_custom_instructions() {
        let info = server().with_instructions("hello").get_info();
        assert_eq!(info.instructions.as_deref(), Some("hello"));
        assert!(info.capabilities.tools.is_some());
    }
}
