pub mod models;
pub mod llm;
pub mod cli;

pub use llm::bridge::MessageBridge;
pub use llm::error::{ BridgeError, ErrorKind };
pub use llm::{ BridgeConfig, CallResult };
pub use models::chat::{ ChatMessage, Role };

use cli::Args;
use log::info;
use models::chat::parse_transcript;
use std::error::Error;
use tokio::io::AsyncReadExt;

pub async fn run(args: Args) -> Result<CallResult, Box<dyn Error + Send + Sync>> {
    info!("--- Bridge Configuration ---");
    info!("Model: {}", args.model);
    info!("Temperature: {}", args.temperature);
    info!("Transcript: {}", args.transcript.as_deref().unwrap_or("<stdin>"));
    info!("Base URL: {}", args.base_url.as_deref().unwrap_or(llm::gemini::DEFAULT_BASE_URL));
    info!("API Key Present: {}", args.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()));
    info!("----------------------------");

    let raw = match &args.transcript {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    let transcript = parse_transcript(&raw)?;
    info!("Loaded {} transcript entries", transcript.len());

    let bridge = MessageBridge::initialize(&BridgeConfig::from_args(&args));
    Ok(bridge.invoke(&args.model, &transcript, args.temperature).await)
}
