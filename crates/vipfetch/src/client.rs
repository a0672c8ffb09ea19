//! HTTP client and fetch pipeline
//!
//! Gate, single GET, status check, HTML reduction, truncation. Every path
//! ends in a [`FetchResult`]; nothing here returns an error to the caller.

use crate::convert::{html_to_text, truncate_chars};
use crate::error::{FetchError, UpstreamError};
use crate::gate::AllowedDomains;
use crate::tool::Tool;
use crate::types::FetchResult;
use crate::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, MAX_BODY_BYTES, MAX_CONTENT_CHARS};
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::redirect::Policy;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Maximum redirect hops followed inside the allowlist
const MAX_REDIRECTS: usize = 10;

/// Message for URLs on allowed hosts with a non-HTTP scheme
const INVALID_SCHEME_MESSAGE: &str = "Invalid URL: must start with http:// or https://";

/// Fetch options that can be configured via tool builder
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// User-Agent sent upstream
    pub user_agent: String,
    /// Total request timeout (connect, headers and body)
    pub timeout: Duration,
    /// Maximum characters of extracted text
    pub max_chars: usize,
    /// Maximum response body size in bytes
    pub max_body_bytes: u64,
    /// Host to address overrides, bypassing DNS
    pub resolve: Vec<(String, SocketAddr)>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_chars: MAX_CONTENT_CHARS,
            max_body_bytes: MAX_BODY_BYTES,
            resolve: Vec::new(),
        }
    }
}

/// Fetch a URL with the built-in VIP Leilões allowlist and default options
///
/// Each call builds a new HTTP client with its own connection pool. For
/// repeated fetches or custom settings, build a [`Tool`] once and reuse it.
pub async fn fetch(url: &str) -> FetchResult {
    match Tool::builder().build() {
        Ok(tool) => tool.fetch(url).await,
        Err(e) => {
            error!(error = %e, "Failed to build fetch tool");
            FetchResult::UpstreamError(UpstreamError::Request(e.to_string()))
        }
    }
}

/// Build the shared HTTP client
///
/// Redirects are followed only while the target stays inside `domains`.
pub(crate) fn build_client(
    options: &FetchOptions,
    domains: Arc<AllowedDomains>,
) -> Result<reqwest::Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&options.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html, application/xhtml+xml, text/plain, */*;q=0.8"),
    );

    let redirect_policy = Policy::custom(move |attempt| {
        let hops = attempt.previous().len();
        let allowed = domains.is_allowed_url(attempt.url());
        if hops >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if allowed {
            attempt.follow()
        } else {
            debug!(redirect_to = %attempt.url(), "Redirect leaves allowed domains, not following");
            attempt.stop()
        }
    });

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(options.timeout)
        .timeout(options.timeout)
        .redirect(redirect_policy);

    for (host, addr) in &options.resolve {
        builder = builder.resolve(host, *addr);
    }

    builder.build().map_err(FetchError::ClientBuildError)
}

/// Run the gate and, if it passes, fetch and reduce the page
pub(crate) async fn fetch_page(
    client: &reqwest::Client,
    domains: &AllowedDomains,
    options: &FetchOptions,
    url: &str,
) -> FetchResult {
    if !domains.is_allowed(url) {
        debug!(url, "URL rejected by domain gate");
        return FetchResult::Rejected {
            reason: domains.rejection_reason(),
        };
    }

    let Ok(parsed) = Url::parse(url.trim()) else {
        return FetchResult::Rejected {
            reason: domains.rejection_reason(),
        };
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        debug!(url, scheme = parsed.scheme(), "URL rejected, unsupported scheme");
        return FetchResult::Rejected {
            reason: INVALID_SCHEME_MESSAGE.to_string(),
        };
    }

    debug!(url = %parsed, "Fetching");

    let response = match client.get(parsed.clone()).send().await {
        Ok(response) => response,
        Err(e) => return upstream_failure(&parsed, UpstreamError::from_reqwest(e)),
    };

    let status = response.status();
    if !status.is_success() {
        return upstream_failure(&parsed, UpstreamError::from_status(status));
    }

    if let Some(size) = response.content_length() {
        if size > options.max_body_bytes {
            return upstream_failure(
                &parsed,
                UpstreamError::BodyTooLarge {
                    size,
                    limit: options.max_body_bytes,
                },
            );
        }
    }

    let body = match read_body_limited(response, options.max_body_bytes).await {
        Ok(body) => body,
        Err(e) => return upstream_failure(&parsed, e),
    };
    let size = body.len() as u64;
    let body = String::from_utf8_lossy(&body);

    let text = html_to_text(&body);
    let (text, truncated) = truncate_chars(text, options.max_chars);

    debug!(
        url = %parsed,
        body_bytes = size,
        chars = text.chars().count(),
        truncated,
        "Fetched page"
    );

    FetchResult::Content { text, truncated }
}

/// Read the response body, giving up as soon as it exceeds `limit` bytes
async fn read_body_limited(
    response: reqwest::Response,
    limit: u64,
) -> Result<Bytes, UpstreamError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(UpstreamError::from_reqwest)?;
        let size = (body.len() + chunk.len()) as u64;
        if size > limit {
            return Err(UpstreamError::BodyTooLarge { size, limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}

fn upstream_failure(url: &Url, err: UpstreamError) -> FetchResult {
    warn!(url = %url, error = %err, "Upstream fetch failed");
    FetchResult::UpstreamError(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_rejects_foreign_domain() {
        let result = fetch("https://evil.com/").await;
        assert_eq!(
            result,
            FetchResult::Rejected {
                reason: "URL not permitted — only VIP Leilões domains are allowed".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_url() {
        assert!(fetch("").await.is_rejected());
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_http_scheme() {
        let result = fetch("ftp://vipleiloes.com.br/file.txt").await;
        assert_eq!(
            result,
            FetchResult::Rejected {
                reason: INVALID_SCHEME_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.user_agent, "VIP-MCP-Server/1.0");
        assert_eq!(options.timeout, Duration::from_secs(15));
        assert_eq!(options.max_chars, 15_000);
        assert!(options.resolve.is_empty());
    }

    #[test]
    fn test_build_client_with_invalid_user_agent() {
        let options = FetchOptions {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        assert!(build_client(&options, Arc::new(AllowedDomains::vip_leiloes())).is_ok());
    }
}
