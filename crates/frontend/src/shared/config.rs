//! Startup configuration of the console
//!
//! Values come from localStorage overrides first, then from the current
//! window location.

use log::Level;
use web_sys::window;

const API_BASE_KEY: &str = "sql_console_api_base";
const LOG_LEVEL_KEY: &str = "sql_console_log_level";
const BACKEND_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Prefix for all REST calls; empty means same-origin relative URLs
    pub api_base: String,
    pub log_level: Level,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: Level::Debug,
        }
    }
}

impl ConsoleConfig {
    pub fn load() -> Self {
        let api_base = read_setting(API_BASE_KEY)
            .filter(|s| !s.trim().is_empty())
            .or_else(api_base_from_location)
            .unwrap_or_default();
        let log_level = read_setting(LOG_LEVEL_KEY)
            .and_then(|s| parse_log_level(&s))
            .unwrap_or(Level::Debug);

        Self {
            api_base,
            log_level,
        }
    }
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn read_setting(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

fn api_base_from_location() -> Option<String> {
    let location = window()?.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    Some(backend_base(&protocol, &hostname))
}

/// e.g. "http:" + "localhost" -> "http://localhost:3000"
pub fn backend_base(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" | "warning" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_base() {
        assert_eq!(backend_base("http:", "localhost"), "http://localhost:3000");
        assert_eq!(
            backend_base("https:", "db.example.com"),
            "https://db.example.com:3000"
        );
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("WARN"), Some(Level::Warn));
        assert_eq!(parse_log_level(" trace "), Some(Level::Trace));
        assert_eq!(parse_log_level("verbose"), None);
    }
}
