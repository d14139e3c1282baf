use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sensible default — the service boots with an empty env.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Simulated engine latency. A real remote engine's completion replaces this.
    pub engine_latency_ms: u64,
    /// Whether changing a tuning parameter re-runs optimization automatically.
    /// Off by default: sliders update state without recomputing the result.
    pub auto_reoptimize: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            engine_latency_ms: std::env::var("ENGINE_LATENCY_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u64>()
                .context("ENGINE_LATENCY_MS must be a number of milliseconds")?,
            auto_reoptimize: std::env::var("AUTO_REOPTIMIZE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}
