use serde::Deserialize;
use std::time::Duration;

const MAX_REQUEST_TIMEOUT_SECS: f32 = 300.0;

/// Flat app configuration, built from the sectioned TOML tables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: ThemeMode,
    pub books_dir: String,
    pub thumbnails_dir: String,
    pub bookmarks_path: String,
    pub cache_dir: String,
    pub thumbnail_size: u32,
    pub render_dpi: u32,
    pub window_width: f32,
    pub window_height: f32,
    pub library_columns: usize,
    pub sound_enabled: bool,
    pub sound_api_base: String,
    pub sound_api_key: String,
    pub mood_query: String,
    pub environment_query: String,
    pub play_environment: bool,
    pub mood_volume: f32,
    pub environment_volume: f32,
    pub request_timeout_secs: f32,
    pub log_level: LogLevel,
    pub key_next_page: String,
    pub key_prev_page: String,
    pub key_back: String,
    pub key_add_book: String,
    pub key_toggle_sound: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            books_dir: crate::config::defaults::default_books_dir(),
            thumbnails_dir: crate::config::defaults::default_thumbnails_dir(),
            bookmarks_path: crate::config::defaults::default_bookmarks_path(),
            cache_dir: crate::config::defaults::default_cache_dir(),
            thumbnail_size: crate::config::defaults::default_thumbnail_size(),
            render_dpi: crate::config::defaults::default_render_dpi(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            library_columns: crate::config::defaults::default_library_columns(),
            sound_enabled: crate::config::defaults::default_sound_enabled(),
            sound_api_base: crate::config::defaults::default_sound_api_base(),
            sound_api_key: String::new(),
            mood_query: crate::config::defaults::default_mood_query(),
            environment_query: crate::config::defaults::default_environment_query(),
            play_environment: crate::config::defaults::default_play_environment(),
            mood_volume: crate::config::defaults::default_mood_volume(),
            environment_volume: crate::config::defaults::default_environment_volume(),
            request_timeout_secs: crate::config::defaults::default_request_timeout_secs(),
            log_level: crate::config::defaults::default_log_level(),
            key_next_page: crate::config::defaults::default_key_next_page(),
            key_prev_page: crate::config::defaults::default_key_prev_page(),
            key_back: crate::config::defaults::default_key_back(),
            key_add_book: crate::config::defaults::default_key_add_book(),
            key_toggle_sound: crate::config::defaults::default_key_toggle_sound(),
        }
    }
}

impl AppConfig {
    /// API key for the sound service; `FREESOUND_API_KEY` wins over the file.
    pub fn effective_api_key(&self) -> String {
        match std::env::var("FREESOUND_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => self.sound_api_key.trim().to_string(),
        }
    }

    /// HTTP timeout for sound lookups, kept within 1 to 300 seconds. A value
    /// that is not a finite number falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        let secs = if self.request_timeout_secs.is_finite() {
            self.request_timeout_secs.clamp(1.0, MAX_REQUEST_TIMEOUT_SECS)
        } else {
            crate::config::defaults::default_request_timeout_secs()
        };
        Duration::try_from_secs_f32(secs).unwrap_or(Duration::from_secs(10))
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Night
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
