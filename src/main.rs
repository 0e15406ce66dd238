use clap::Parser;
use dotenv::dotenv;
use log::{ info, warn };
use message_bridge::cli::Args;
use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let dotenv_path = dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match dotenv_path {
        Ok(path) => info!("Loading .env file from: {}", path.display()),
        Err(_) => warn!(".env file not found, using process environment only."),
    }
    let args = Args::parse();

    let result = message_bridge::run(args).await?;
    if let Some(usage) = result.usage() {
        info!("Usage: {}", serde_json::to_string(usage)?);
    }

    if result.is_success() {
        println!("{}", result.into_text());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", result.into_text());
        Ok(ExitCode::FAILURE)
    }
}
