use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Model Args ---
    /// Gemini model to call (e.g., gemini-1.5-flash, models/gemini-1.5-pro)
    #[arg(short = 'm', long, env = "BRIDGE_MODEL", default_value = "gemini-1.5-flash")]
    pub model: String,

    /// Sampling temperature. Values outside 0.0..=1.0 are clamped.
    #[arg(short = 't', long, env = "BRIDGE_TEMPERATURE", default_value = "0.0", allow_hyphen_values = true)]
    pub temperature: f32,

    // --- Input Args ---
    /// Path to a JSON array of {"role", "content"} messages. Reads stdin when omitted.
    #[arg(short = 'i', long, env = "BRIDGE_TRANSCRIPT")]
    pub transcript: Option<String>,

    // --- Provider Args ---
    /// Google API key for the Generative Language API
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override for the API root (e.g., http://localhost:8080/v1beta)
    #[arg(long, env = "GEMINI_BASE_URL")] // No default, the transport falls back to the public endpoint
    pub base_url: Option<String>,
}
