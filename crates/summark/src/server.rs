//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the renderer, the keyword extractor and the table builder over
//! stdio so an assistant can format its own output before showing it.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library
//! that the CLI commands use; each `#[tool]` method delegates to
//! `summark_core` rather than implementing logic directly. Defaults come
//! from the loaded [`Config`], and tool parameters override them per call.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use summark_core::config::Config;
use summark_core::keywords::{self, KeywordOptions, KeywordOrder};
use summark_core::markdown::{self, Document, HtmlOptions, table};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `render_markdown` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RenderMarkdownParams {
    /// The Markdown text to render.
    pub text: String,
    /// Class attribute for highlight (`==x==`) elements.
    pub highlight_class: Option<String>,
    /// Class attribute for inline code elements.
    pub code_class: Option<String>,
    /// Also return the parsed block/inline tree.
    #[serde(default)]
    pub include_tree: bool,
}

/// Parameters for the `extract_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ExtractKeywordsParams {
    /// The text to scan.
    pub text: String,
    /// Maximum number of keywords.
    pub limit: Option<usize>,
    /// Display order: "shuffled" or "ranked".
    pub order: Option<KeywordOrder>,
    /// Seed for a reproducible shuffle.
    pub seed: Option<u64>,
    /// Extra stop words for this call.
    #[serde(default)]
    pub stop_words: Vec<String>,
    /// Parse the text as Markdown and scan only its visible text.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `json_to_table` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct JsonToTableParams {
    /// A flat JSON object, or a string containing one.
    pub data: serde_json::Value,
    /// Also return the table rendered as HTML.
    #[serde(default)]
    pub html: bool,
}

#[derive(Serialize)]
struct RenderResult {
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<Document>,
}

#[derive(Serialize)]
struct TableResult {
    markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

/// MCP server exposing summark functionality to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input: Option<usize>,
    keyword_options: KeywordOptions,
    keyword_order: KeywordOrder,
    html_options: HtmlOptions,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with default configuration.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create a server whose defaults come from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input: config.input_limit(),
            keyword_options: config.keyword_options(),
            keyword_order: config.keywords.order,
            html_options: config.html_options(),
        }
    }

    fn check_input_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Render Markdown to escaped HTML.
    #[tool(
        description = "Render Markdown (headings, lists, pipe tables, **strong**, *emphasis*, ~~strike~~, `code`, ==highlight==) to HTML that is safe to display without further escaping."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn render_markdown(
        &self,
        Parameters(params): Parameters<RenderMarkdownParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "render_markdown",
            include_tree = params.include_tree,
            "executing MCP tool"
        );
        self.check_input_size(&params.text)?;

        let options = HtmlOptions {
            highlight_class: params
                .highlight_class
                .or_else(|| self.html_options.highlight_class.clone()),
            code_class: params
                .code_class
                .or_else(|| self.html_options.code_class.clone()),
        };
        let document = markdown::parse(&params.text);
        let result = RenderResult {
            html: document.to_html(&options),
            document: params.include_tree.then_some(document),
        };

        tracing::info!(tool = "render_markdown", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &result,
        )?)]))
    }

    /// Build a keyword cloud.
    #[tool(
        description = "Extract up to 50 keywords from text for a word cloud. Returns {text, value, size} records; size is scaled from 1 to 3 by frequency."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn extract_keywords(
        &self,
        Parameters(params): Parameters<ExtractKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "extract_keywords",
            limit = ?params.limit,
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );
        self.check_input_size(&params.text)?;

        let text = if params.strip_markdown {
            markdown::parse(&params.text).plain_text()
        } else {
            params.text
        };
        let mut options = self
            .keyword_options
            .clone()
            .with_stop_words(&params.stop_words);
        if let Some(limit) = params.limit {
            options = options.with_max_keywords(limit);
        }
        let order = params.order.unwrap_or(self.keyword_order);
        let mut shuffle = order.shuffler(params.seed);

        let entries = keywords::extract_with(&text, &options, shuffle.as_mut());

        tracing::info!(
            tool = "extract_keywords",
            count = entries.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &entries,
        )?)]))
    }

    /// Convert a JSON object into a Markdown table.
    #[tool(
        description = "Convert a flat JSON object into a two-row Markdown table (keys, then values). Optionally also returns the rendered HTML."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn json_to_table(
        &self,
        Parameters(params): Parameters<JsonToTableParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "json_to_table", html = params.html, "executing MCP tool");

        let markdown_table = match params.data {
            serde_json::Value::Object(ref object) => table::from_json_object(object),
            serde_json::Value::String(ref json) => {
                self.check_input_size(json)?;
                table::from_json_str(json)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?
            }
            ref other => {
                return Err(McpError::invalid_params(
                    format!("expected a JSON object, got {other}"),
                    None,
                ));
            }
        };
        let result = TableResult {
            html: params
                .html
                .then(|| markdown::render_with(&markdown_table, &self.html_options)),
            markdown: markdown_table,
        };

        tracing::info!(tool = "json_to_table", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &result,
        )?)]))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use render_markdown to turn Markdown into safe HTML, \
                 extract_keywords for word clouds, and json_to_table for extracted fields.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
