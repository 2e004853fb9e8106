//! MCP server: the composed registry exposed over the MCP protocol.
//!
//! Every MCP method is a thin projection of the dispatcher. Listing methods
//! derive from discovery and call methods go through the same resolve,
//! validate and invoke pipeline as the verb protocol, so both surfaces
//! always agree.
//!
//! Capabilities live in `domains/`; adding one never requires touching this
//! file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::capability::{
    CapabilityDescriptor, CapabilityGroup, CapabilityKind, ParameterSpec, PrimitiveType,
    RootRegistry, schema,
};
use super::config::Config;
use super::dispatch::{DispatchError, Dispatcher, StatusClass};
use super::error::Result;
use crate::domains;

const INSTRUCTIONS: &str = "Corporate assistant: look up holidays and employees, \
     list meeting rooms, send email, draft onboarding and status messages, \
     and check the weather.";

/// The server handler shared by every transport.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Build the configured groups and compose them.
    ///
    /// Fails on unknown group names or any composition conflict, before
    /// anything is served.
    pub fn new(config: Config) -> Result<Self> {
        let groups = domains::build_groups(&config)?;
        Self::with_groups(config, groups)
    }

    /// Compose an explicit set of groups.
    pub fn with_groups(config: Config, groups: Vec<CapabilityGroup>) -> Result<Self> {
        let registry = RootRegistry::compose(groups)?;
        info!(
            "Server '{}' ready with {} capabilities",
            config.server.name,
            registry.len()
        );
        Ok(Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(registry),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The dispatcher behind every transport.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // ========================================================================
    // MCP projections, shared by the rmcp handler and the HTTP JSON-RPC route
    // ========================================================================

    /// Tools as MCP tool definitions.
    pub fn tools(&self) -> Vec<Tool> {
        self.descriptors(CapabilityKind::Tool)
            .map(|d| Tool {
                name: d.name().to_string().into(),
                description: d.description().map(|s| s.to_string().into()),
                input_schema: Arc::new(schema::input_schema(d.parameters())),
                annotations: None,
                output_schema: None,
                icons: None,
                meta: None,
                title: None,
            })
            .collect()
    }

    /// Resources whose template has no placeholders, as concrete MCP resources.
    pub fn resources(&self) -> Vec<Resource> {
        self.descriptors(CapabilityKind::Resource)
            .filter_map(|d| {
                let uri = d.uri_template().filter(|t| !t.contains('{'))?;
                let mut raw = RawResource::new(uri, d.name());
                raw.description = d.description().map(str::to_string);
                raw.mime_type = d.mime_type().map(str::to_string);
                Some(raw.no_annotation())
            })
            .collect()
    }

    /// Templated resources as MCP resource templates.
    pub fn resource_templates(&self) -> Vec<ResourceTemplate> {
        self.descriptors(CapabilityKind::Resource)
            .filter_map(|d| {
                let uri_template = d.uri_template().filter(|t| t.contains('{'))?;
                Some(
                    RawResourceTemplate {
                        uri_template: uri_template.to_string(),
                        name: d.name().to_string(),
                        title: None,
                        description: d.description().map(str::to_string),
                        mime_type: d.mime_type().map(str::to_string),
                    }
                    .no_annotation(),
                )
            })
            .collect()
    }

    /// Prompts as MCP prompt definitions.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.descriptors(CapabilityKind::Prompt)
            .map(|d| Prompt {
                name: d.name().to_string(),
                title: None,
                description: d.description().map(str::to_string),
                arguments: Some(d.parameters().iter().map(prompt_argument).collect()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Run a tool. Handler failures become an `isError` result, not a
    /// protocol error.
    #[instrument(skip(self, arguments))]
    pub async fn run_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self
            .dispatcher
            .execute(name, arguments.unwrap_or_default())
            .await
        {
            Ok(value) => Ok(CallToolResult::success(vec![Content::text(text_of(&value))])),
            Err(DispatchError::Handler(err)) => {
                Ok(CallToolResult::error(vec![Content::text(err.message())]))
            }
            Err(err) => Err(to_mcp_error(err)),
        }
    }

    /// Read a resource by URI.
    #[instrument(skip(self))]
    pub async fn fetch_resource(&self, uri: &str) -> std::result::Result<ReadResourceResult, McpError> {
        let value = self.dispatcher.read(uri).await.map_err(to_mcp_error)?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text_of(&value), uri)],
        })
    }

    /// Render a prompt.
    ///
    /// MCP sends prompt arguments as strings; values for non-string
    /// parameters are parsed to their declared type before validation.
    #[instrument(skip(self, arguments))]
    pub async fn render_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        let descriptor = self
            .dispatcher
            .registry()
            .lookup(CapabilityKind::Prompt, name)
            .cloned();
        let arguments = match &descriptor {
            Some(d) => coerce_arguments(d.parameters(), arguments.unwrap_or_default()),
            None => arguments.unwrap_or_default(),
        };

        let value = self
            .dispatcher
            .prompt_get(name, arguments)
            .await
            .map_err(to_mcp_error)?;

        Ok(GetPromptResult {
            description: descriptor.and_then(|d| d.description().map(str::to_string)),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                text_of(&value),
            )],
        })
    }

    fn descriptors(&self, kind: CapabilityKind) -> impl Iterator<Item = &Arc<CapabilityDescriptor>> {
        self.dispatcher.registry().descriptors(Some(kind))
    }
}

fn prompt_argument(spec: &ParameterSpec) -> PromptArgument {
    PromptArgument {
        name: spec.name.clone(),
        title: None,
        description: spec.description.clone(),
        required: Some(spec.required),
    }
}

/// Render a handler value as MCP text content.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn coerce_arguments(params: &[ParameterSpec], arguments: JsonObject) -> JsonObject {
    arguments
        .into_iter()
        .map(|(name, value)| {
            let declared = params.iter().find(|p| p.name == name).map(|p| p.ty);
            let parsed = match (declared, value.as_str()) {
                (Some(ty), Some(text)) if ty != PrimitiveType::String => parse_as(ty, text),
                _ => None,
            };
            (name, parsed.unwrap_or(value))
        })
        .collect()
}

fn parse_as(ty: PrimitiveType, text: &str) -> Option<Value> {
    let text = text.trim();
    match ty {
        PrimitiveType::Integer => text.parse::<i64>().ok().map(Value::from),
        PrimitiveType::Number => text.parse::<f64>().ok().map(Value::from),
        PrimitiveType::Boolean => text.parse::<bool>().ok().map(Value::from),
        PrimitiveType::String => None,
    }
}

/// Map a dispatch failure onto an MCP error.
pub fn to_mcp_error(err: DispatchError) -> McpError {
    let message = err.to_string();
    match err.status_class() {
        StatusClass::NotFound => McpError::resource_not_found(message, None),
        StatusClass::BadRequest => McpError::invalid_params(message, None),
        StatusClass::HandlerError => McpError::internal_error(message, None),
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        self.run_tool(&request.name, request.arguments).await
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.resources(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        Ok(ListResourceTemplatesResult {
            resource_templates: self.resource_templates(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.fetch_resource(&request.uri).await
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: self.prompts(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        self.render_prompt(&request.name, request.arguments).await
    }
}
