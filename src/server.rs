//! MCP bridge exposing every registered node as a tool over stdio

use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::SelectorError;
use crate::registry::{registry, NodeRegistry, RegisteredNode};

const INSTRUCTIONS: &str = "Picks a preset video frame size from a generation mode, \
                            an aspect ratio category and a quality tier.";

/// Tool definition for a registered node
pub fn node_tool(node: &RegisteredNode) -> Tool {
    let descriptor = &node.descriptor;
    let mut tool = Tool::new(
        descriptor.id,
        descriptor.description,
        Arc::new(descriptor.input_schema()),
    );
    tool.title = Some(descriptor.display_name.to_string());
    tool.output_schema = node.output_schema.clone().map(Arc::new);
    tool
}

/// Pair each output with its declared name
pub fn named_outputs(node: &RegisteredNode, outputs: Vec<Value>) -> Map<String, Value> {
    node.descriptor
        .outputs
        .iter()
        .map(|output| output.name.to_string())
        .zip(outputs)
        .collect()
}

fn to_mcp_error(err: SelectorError) -> McpError {
    match err {
        SelectorError::UnknownNode(_) => McpError::invalid_request(err.to_string(), None),
        e if e.is_invalid_input() => McpError::invalid_params(e.to_string(), None),
        e => McpError::internal_error(e.to_string(), None),
    }
}

/// Selector service backed by the process-wide node registry
#[derive(Clone)]
pub struct SelectorService {
    registry: &'static NodeRegistry,
    /// Version information for the service
    pub version: &'static str,
}

impl Default for SelectorService {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorService {
    pub fn new() -> Self {
        info!("Creating new SelectorService instance");
        Self {
            registry: registry(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.registry
            .ids()
            .filter_map(|id| self.registry.get(id).ok())
            .map(node_tool)
            .collect()
    }

    /// Run a node and shape its outputs as a tool result
    pub fn run_tool(
        &self,
        name: &str,
        args: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, McpError> {
        let node = self.registry.get(name).map_err(to_mcp_error)?;
        let args = args.map_or(Value::Null, Value::Object);
        let outputs = (node.run)(&args).map_err(|e| {
            warn!("Tool {} failed: {}", name, e);
            to_mcp_error(e)
        })?;
        let structured = named_outputs(node, outputs);
        Ok(CallToolResult::structured(Value::Object(structured)))
    }
}

impl ServerHandler for SelectorService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "video-resolution-selector".into(),
                version: self.version.to_string(),
                title: Some("Video Resolution Selector".to_string()),
                icons: None,
                website_url: None,
            },
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.into()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        param: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Tool call: {}", param.name);
        self.run_tool(param.name.as_ref(), param.arguments)
    }
}

/// Create and start the bridge on stdio
pub async fn start_server() -> anyhow::Result<()> {
    info!("Starting video-resolution-selector MCP bridge");
    let service = SelectorService::new();

    let server = service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error starting server: {}", e);
    })?;
    server.waiting().await?;

    Ok(())
}
