use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Runtime configuration, read from the environment once at startup.
/// Base URLs vary between deployments, so none are hard-coded.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the properties API.
    pub api_base_url: String,
    /// DeepSeek chat-completion endpoint.
    pub deepseek_url: String,
    /// DeepSeek bearer token; without it the assistant is disabled but
    /// the listing still works.
    pub deepseek_api_key: Option<String>,
    /// Listings per page.
    pub page_size: u32,
    /// Where the favorites JSON lives.
    pub favorites_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_base_url: load_or("HOME_SEARCH_API_URL", "http://127.0.0.1:5000"),
            deepseek_url: load_or(
                "DEEPSEEK_API_URL",
                "https://api.deepseek.com/v1/chat/completions",
            ),
            deepseek_api_key: env::var("DEEPSEEK_API_KEY").ok().filter(|k| !k.is_empty()),
            page_size: load_or("HOME_SEARCH_PAGE_SIZE", "12"),
            favorites_path: env::var("HOME_SEARCH_FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_favorites_path()),
        }
    }
}

fn load_or<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = match env::var(key) {
        Ok(raw) => raw,
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value {raw:?} ({e}), using default: {default}");
            default
                .parse()
                .unwrap_or_else(|_| unreachable!("default for {key} must parse"))
        }
    }
}

fn default_favorites_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("home-search")
        .join("favorites.json")
}
