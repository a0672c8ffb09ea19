//! vipfetch CLI - MCP server and one-shot page fetcher

mod http;
mod mcp;

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vipfetch::{FetchResult, Tool, DEFAULT_USER_AGENT, TOOL_LLMTXT};

/// Output format for fetch subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Plain text with a small metadata header
    #[default]
    Md,
    /// JSON `{"content": ...}` or `{"error": ...}`
    Json,
}

/// vipfetch - fetch VIP Leilões pages as plain text for AI agents
#[derive(Parser, Debug)]
#[command(name = "vipfetch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,

    /// User-Agent sent to upstream servers
    #[arg(long, global = true, env = "VIPFETCH_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP server over HTTP, with health check and JSON fetch endpoint
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 10000)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
    },
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Fetch URL and print its visible text
    Fetch {
        /// URL to fetch
        url: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        return Ok(());
    }

    init_logging();

    let tool = Tool::builder()
        .user_agent(cli.user_agent)
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;

    match cli.command {
        Some(Commands::Serve { port, host }) => {
            http::serve(tool, SocketAddr::new(host, port)).await?;
        }
        Some(Commands::Mcp) => {
            mcp::run_stdio(tool).await?;
        }
        Some(Commands::Fetch { url, output }) => {
            run_fetch(&tool, &url, output).await;
        }
        None => {
            eprintln!("Usage: vipfetch serve [--port <PORT>]");
            eprintln!("   or: vipfetch mcp");
            eprintln!("   or: vipfetch fetch <URL>");
            eprintln!("   or: vipfetch --help");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Log to stderr; stdout is reserved for MCP messages and fetch output
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run_fetch(tool: &Tool, url: &str, output: OutputFormat) {
    let result = tool.fetch(url).await;
    let failed = !result.is_content();

    match output {
        OutputFormat::Md => writeln_safe(&format_md(url, &result)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.into_output()).unwrap_or_else(|e| {
                eprintln!("Error serializing response: {}", e);
                std::process::exit(1);
            });
            writeln_safe(&json);
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Format a fetch outcome as text with YAML frontmatter
fn format_md(url: &str, result: &FetchResult) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("url: {}\n", url));
    match result {
        FetchResult::Content { truncated, .. } => {
            if *truncated {
                output.push_str("truncated: true\n");
            }
        }
        FetchResult::Rejected { .. } => output.push_str("status: rejected\n"),
        FetchResult::UpstreamError(_) => output.push_str("status: upstream_error\n"),
    }
    output.push_str("---\n");
    output.push_str(&result.message());

    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
