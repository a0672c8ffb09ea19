//! Tool builder and contract for vipfetch

use crate::client::{build_client, fetch_page, FetchOptions};
use crate::error::FetchError;
use crate::gate::AllowedDomains;
use crate::types::{FetchOutput, FetchRequest, FetchResult};
use crate::{TOOL_DESCRIPTION, TOOL_LLMTXT, TOOL_NAME};
use schemars::schema_for;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring the vipfetch tool
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    domains: AllowedDomains,
    options: FetchOptions,
}

impl ToolBuilder {
    /// Create a new tool builder with the VIP Leilões allowlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the allowed domain set
    pub fn domains(mut self, domains: AllowedDomains) -> Self {
        self.domains = domains;
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = ua.into();
        self
    }

    /// Set the total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set the maximum number of characters returned
    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.options.max_chars = max_chars;
        self
    }

    /// Set the maximum accepted response body size
    pub fn max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.options.max_body_bytes = max_body_bytes;
        self
    }

    /// Pin a host name to a socket address instead of resolving it
    ///
    /// The port of `addr` is ignored; the URL's port is used.
    pub fn resolve(mut self, host: impl Into<String>, addr: SocketAddr) -> Self {
        self.options.resolve.push((host.into(), addr));
        self
    }

    /// Build the tool
    pub fn build(self) -> Result<Tool, FetchError> {
        let domains = Arc::new(self.domains);
        let client = build_client(&self.options, Arc::clone(&domains))?;
        Ok(Tool {
            client,
            domains,
            options: self.options,
        })
    }
}

/// Configured vipfetch tool
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Tool {
    client: reqwest::Client,
    domains: Arc<AllowedDomains>,
    options: FetchOptions,
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Name under which the tool is exposed to clients
    pub fn name(&self) -> &'static str {
        TOOL_NAME
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Allowed domain set
    pub fn domains(&self) -> &AllowedDomains {
        &self.domains
    }

    /// Active fetch options
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(FetchRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(FetchOutput);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Returns true if the URL passes the domain gate
    pub fn is_allowed(&self, url: &str) -> bool {
        self.domains.is_allowed(url)
    }

    /// Fetch a page and return its visible text
    pub async fn fetch(&self, url: &str) -> FetchResult {
        fetch_page(&self.client, &self.domains, &self.options, url).await
    }

    /// Execute the tool with the given request
    pub async fn execute(&self, req: FetchRequest) -> FetchResult {
        self.fetch(&req.url).await
    }
}
