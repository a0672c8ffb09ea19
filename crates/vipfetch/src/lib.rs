//! vipfetch - domain-restricted web page text extraction
//!
//! Exposes one capability to tool-calling clients: fetch a page from an
//! approved set of domains and return its visible text.
//!
//! ## Pipeline
//!
//! 1. [`AllowedDomains`] checks the URL host (exact match or proper
//!    subdomain). Rejected URLs never reach the network.
//! 2. A single GET with a fixed timeout and an identifying User-Agent.
//!    Non-success statuses become [`UpstreamError`].
//! 3. The body is parsed with a tolerant HTML parser and reduced to one
//!    line per visible text node.
//! 4. The text is cut to [`MAX_CONTENT_CHARS`] characters and flagged
//!    as truncated when that happens.
//!
//! ```no_run
//! # async fn run() {
//! let tool = vipfetch::Tool::builder().build().unwrap();
//! match tool.fetch("https://vipleiloes.com.br/").await {
//!     vipfetch::FetchResult::Content { text, truncated } => println!("{truncated} {text}"),
//!     other => eprintln!("{}", other.message()),
//! }
//! # }
//! ```

pub mod client;
mod convert;
mod error;
pub mod gate;
mod tool;
mod types;

use std::time::Duration;

pub use client::{fetch, FetchOptions};
pub use convert::{html_to_text, truncate_chars};
pub use error::{FetchError, UpstreamError};
pub use gate::{host_of, AllowedDomains, VIP_LEILOES_DOMAINS, VIP_LEILOES_GROUP};
pub use tool::{Tool, ToolBuilder};
pub use types::{FetchOutput, FetchRequest, FetchResult};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "VIP-MCP-Server/1.0";

/// Default total request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Maximum characters of extracted text returned to the caller
pub const MAX_CONTENT_CHARS: usize = 15_000;

/// Maximum response body accepted from upstream (5 MiB)
pub const MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;

/// Name of the tool as exposed to clients
pub const TOOL_NAME: &str = "vip_fetch";

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = r#"Fetches a public page from the VIP Leilões group sites and returns its visible text.

- Only vipleiloes.com.br, leilaovip.com.br and their subdomains
- Text only, one text fragment per line
- Output capped at 15000 characters"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# vip_fetch Tool

Fetches a public page from the VIP Leilões group sites and returns its visible text.

## Capabilities
- HTTP GET of pages on allowed domains
- HTML reduced to plain text (scripts and styles removed)
- Output capped at 15000 characters

## Allowed Domains
- vipleiloes.com.br
- leilaovip.com.br
- correios.vipleiloes.com.br
- any subdomain of the above

## Input Parameters
- `url` (required): The page URL (must be http:// or https://)

## Output
- `content`: Visible text of the page, one text fragment per line
- `truncated`: True if the text was cut at 15000 characters
- `error`: Present instead of `content` when the URL was refused or the fetch failed

## Examples

### Fetch an auction page
```json
{"url": "https://vipleiloes.com.br/leilao/1"}
```

## Error Handling
- URLs outside the allowed domains are refused without any request
- Timeouts (15 seconds) and non-2xx responses return an error message
- No retries; call again if needed
"#;
