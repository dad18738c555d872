use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "forecasthub_";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Backend API host; `None` talks to the origin the page was served from
    pub api_host: Option<String>,

    /// Backend API port, only used together with `api_host`
    pub api_port: Option<u16>,

    /// API path prefix (e.g., "/api/v1")
    pub api_path: String,

    /// Use HTTPS for API requests to an explicit host
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: None,
            api_port: None,
            api_path: "/api/v1".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from the window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                settings.apply_overrides(|key| {
                    storage
                        .get_item(&format!("{}{}", STORAGE_PREFIX, key))
                        .ok()
                        .flatten()
                });
            }
        }

        settings
    }

    /// Applies stored overrides; `lookup` receives the key without prefix.
    ///
    /// Unparsable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_host) = lookup("api_host").filter(|h| !h.is_empty()) {
            self.api_host = Some(api_host);
        }

        if let Some(port) = lookup("api_port").and_then(|p| p.parse::<u16>().ok()) {
            self.api_port = Some(port);
        }

        if let Some(api_path) = lookup("api_path") {
            self.api_path = api_path;
        }

        if let Some(use_https) = lookup("api_use_https") {
            self.api_use_https = use_https.eq_ignore_ascii_case("true");
        }

        if let Some(level) = lookup("log_level").and_then(|l| parse_log_level(&l)) {
            self.log_level = level;
        }
    }

    /// Get the base API URL
    ///
    /// Without an explicit host this is just the path, so requests go to the
    /// server that delivered the page.
    pub fn api_base_url(&self) -> String {
        match &self.api_host {
            Some(host) => {
                let protocol = if self.api_use_https { "https" } else { "http" };
                match self.api_port {
                    Some(port) => format!("{}://{}:{}{}", protocol, host, port, self.api_path),
                    None => format!("{}://{}{}", protocol, host, self.api_path),
                }
            }
            None => self.api_path.clone(),
        }
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
