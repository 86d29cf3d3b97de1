//! Rulesheet API Server binary
//!
//! Upload form plus HTTP API for expanding Rules-Header sheets.

use clap::Parser;
use rulesheet_forge::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "rulesheet-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Rulesheet Server - upload form and HTTP API for Rules-Header expansion")]
#[command(long_about = r#"
Rulesheet Server - upload form and HTTP API

Endpoints:
  - GET  /                        - Upload form (multiple .xlsx files)
  - POST /upload                  - Process uploads, page with download links
  - POST /api/v1/expand           - Process uploads, JSON results (base64 workbooks)
  - POST /api/v1/expand/download  - Process one upload, returns the .xlsx

Additional endpoints:
  - GET  /health                  - Health check
  - GET  /version                 - Server version info
  - GET  /api                     - API documentation

Multipart fields:
  files      one or more .xlsx workbooks (also accepted as 'file')
  placement  'anchored' (default) or 'leading'

Example usage:
  rulesheet-server                           # Start on localhost:8080
  rulesheet-server --host 0.0.0.0 --port 3000

  curl -F files=@rules.xlsx -F placement=leading \
    http://localhost:8080/api/v1/expand/download -o rules_GIFT.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "RULESHEET_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "RULESHEET_PORT")]
    port: u16,

    /// Largest accepted upload request, in MiB
    #[arg(long, default_value = "32", env = "RULESHEET_MAX_UPLOAD_MB")]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
    };

    run_api_server(config).await
}
