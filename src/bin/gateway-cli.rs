use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inference_gateway::completion::{ChatCompletionRequest, Message};
use inference_gateway::http::X_REQUEST_ID;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Client for the inference gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Correlation ID to send as X-Request-ID
    #[arg(short, long)]
    request_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single user prompt
    Chat {
        prompt: String,
        /// Optional system message placed before the prompt
        #[arg(short, long)]
        system: Option<String>,
    },
    /// POST a raw JSON request body from a file
    Send { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}/v1/chat/completions", cli.url.trim_end_matches('/'));

    let body = match cli.command {
        Commands::Chat { prompt, system } => {
            let mut messages = Vec::new();
            if let Some(system) = system {
                messages.push(Message::new("system", system));
            }
            messages.push(Message::new("user", prompt));
            serde_json::to_vec(&ChatCompletionRequest { messages, stream: false })?
        }
        Commands::Send { file } => std::fs::read(file)?,
    };

    let mut request = client
        .post(&endpoint)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body);
    if let Some(id) = &cli.request_id {
        request = request.header(X_REQUEST_ID, id);
    }

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(id) = res.headers().get(X_REQUEST_ID).and_then(|v| v.to_str().ok()) {
        eprintln!("X-Request-ID: {}", id);
    }

    if !status.is_success() {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text.trim_end());
        }
        return Err(format!("gateway returned status {}", status).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
