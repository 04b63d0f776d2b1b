//! Fake-It TUI - Terminal dashboard for the Fake-It mock endpoint server
//!
//! # Usage
//!
//! ```bash
//! # Run the dashboard (connects to localhost:8080 by default)
//! fakeit-tui
//!
//! # Connect to a different management API
//! fakeit-tui --api-url http://server:8080/fake-it/v1
//!
//! # Send test requests somewhere other than the management host
//! fakeit-tui --mock-url http://server:9090
//! ```

use clap::Parser;
use fakeit_client::{resolve_mock_base, ApiClient, DEFAULT_API_URL};
use fakeit_tui::App;

#[derive(Parser, Debug)]
#[command(name = "fakeit-tui")]
#[command(author, version, about = "Terminal dashboard for the Fake-It mock server")]
struct Args {
    /// Management API URL
    #[arg(short, long, default_value = DEFAULT_API_URL, env = "FAKE_IT_API_URL")]
    api_url: String,

    /// Base URL for invoking mocks; defaults to the origin of the API URL
    #[arg(short, long, env = "FAKE_IT_MOCK_URL")]
    mock_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let client = ApiClient::new(&args.api_url);
    let mock_base = resolve_mock_base(&args.api_url, args.mock_url.as_deref());
    let app = App::new(client, mock_base);

    fakeit_tui::run(app).await
}
