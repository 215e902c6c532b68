use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `conf/config.toml`, one table per concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    library: LibraryConfig,
    #[serde(default)]
    reader: ReaderConfig,
    #[serde(default)]
    sound: SoundConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.ui.theme,
            books_dir: tables.library.books_dir,
            thumbnails_dir: tables.library.thumbnails_dir,
            bookmarks_path: tables.library.bookmarks_path,
            cache_dir: tables.library.cache_dir,
            thumbnail_size: tables.library.thumbnail_size,
            render_dpi: tables.reader.render_dpi,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            library_columns: tables.ui.library_columns,
            sound_enabled: tables.sound.enabled,
            sound_api_base: tables.sound.api_base,
            sound_api_key: tables.sound.api_key,
            mood_query: tables.sound.mood_query,
            environment_query: tables.sound.environment_query,
            play_environment: tables.sound.play_environment,
            mood_volume: tables.sound.mood_volume,
            environment_volume: tables.sound.environment_volume,
            request_timeout_secs: tables.sound.request_timeout_secs,
            log_level: tables.logging.log_level,
            key_next_page: tables.keys.next_page,
            key_prev_page: tables.keys.prev_page,
            key_back: tables.keys.back,
            key_add_book: tables.keys.add_book,
            key_toggle_sound: tables.keys.toggle_sound,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            library: LibraryConfig {
                books_dir: config.books_dir.clone(),
                thumbnails_dir: config.thumbnails_dir.clone(),
                bookmarks_path: config.bookmarks_path.clone(),
                cache_dir: config.cache_dir.clone(),
                thumbnail_size: config.thumbnail_size,
            },
            reader: ReaderConfig {
                render_dpi: config.render_dpi,
            },
            sound: SoundConfig {
                enabled: config.sound_enabled,
                api_base: config.sound_api_base.clone(),
                api_key: config.sound_api_key.clone(),
                mood_query: config.mood_query.clone(),
                environment_query: config.environment_query.clone(),
                play_environment: config.play_environment,
                mood_volume: config.mood_volume,
                environment_volume: config.environment_volume,
                request_timeout_secs: config.request_timeout_secs,
            },
            ui: UiConfig {
                theme: config.theme,
                window_width: config.window_width,
                window_height: config.window_height,
                library_columns: config.library_columns,
            },
            keys: KeysConfig {
                next_page: config.key_next_page.clone(),
                prev_page: config.key_prev_page.clone(),
                back: config.key_back.clone(),
                add_book: config.key_add_book.clone(),
                toggle_sound: config.key_toggle_sound.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LibraryConfig {
    #[serde(default = "defaults::default_books_dir")]
    books_dir: String,
    #[serde(default = "defaults::default_thumbnails_dir")]
    thumbnails_dir: String,
    #[serde(default = "defaults::default_bookmarks_path")]
    bookmarks_path: String,
    #[serde(default = "defaults::default_cache_dir")]
    cache_dir: String,
    #[serde(default = "defaults::default_thumbnail_size")]
    thumbnail_size: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig {
            books_dir: defaults::default_books_dir(),
            thumbnails_dir: defaults::default_thumbnails_dir(),
            bookmarks_path: defaults::default_bookmarks_path(),
            cache_dir: defaults::default_cache_dir(),
            thumbnail_size: defaults::default_thumbnail_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ReaderConfig {
    #[serde(default = "defaults::default_render_dpi")]
    render_dpi: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            render_dpi: defaults::default_render_dpi(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SoundConfig {
    #[serde(default = "defaults::default_sound_enabled")]
    enabled: bool,
    #[serde(default = "defaults::default_sound_api_base")]
    api_base: String,
    #[serde(default)]
    api_key: String,
    #[serde(default = "defaults::default_mood_query")]
    mood_query: String,
    #[serde(default = "defaults::default_environment_query")]
    environment_query: String,
    #[serde(default = "defaults::default_play_environment")]
    play_environment: bool,
    #[serde(default = "defaults::default_mood_volume")]
    mood_volume: f32,
    #[serde(default = "defaults::default_environment_volume")]
    environment_volume: f32,
    #[serde(default = "defaults::default_request_timeout_secs")]
    request_timeout_secs: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            enabled: defaults::default_sound_enabled(),
            api_base: defaults::default_sound_api_base(),
            api_key: String::new(),
            mood_query: defaults::default_mood_query(),
            environment_query: defaults::default_environment_query(),
            play_environment: defaults::default_play_environment(),
            mood_volume: defaults::default_mood_volume(),
            environment_volume: defaults::default_environment_volume(),
            request_timeout_secs: defaults::default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_library_columns")]
    library_columns: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: ThemeMode::default(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            library_columns: defaults::default_library_columns(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_next_page")]
    next_page: String,
    #[serde(default = "defaults::default_key_prev_page")]
    prev_page: String,
    #[serde(default = "defaults::default_key_back")]
    back: String,
    #[serde(default = "defaults::default_key_add_book")]
    add_book: String,
    #[serde(default = "defaults::default_key_toggle_sound")]
    toggle_sound: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            next_page: defaults::default_key_next_page(),
            prev_page: defaults::default_key_prev_page(),
            back: defaults::default_key_back(),
            add_book: defaults::default_key_add_book(),
            toggle_sound: defaults::default_key_toggle_sound(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
