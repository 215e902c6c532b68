pub(crate) fn default_books_dir() -> String {
    "./books".to_string()
}

pub(crate) fn default_thumbnails_dir() -> String {
    "./thumbnails".to_string()
}

pub(crate) fn default_bookmarks_path() -> String {
    "./bookmarks.json".to_string()
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}

pub(crate) fn default_thumbnail_size() -> u32 {
    256
}

pub(crate) fn default_render_dpi() -> u32 {
    110
}

pub(crate) fn default_window_width() -> f32 {
    1024.0
}

pub(crate) fn default_window_height() -> f32 {
    900.0
}

pub(crate) fn default_library_columns() -> usize {
    4
}

pub(crate) fn default_sound_enabled() -> bool {
    true
}

pub(crate) fn default_sound_api_base() -> String {
    "https://freesound.org/apiv2".to_string()
}

pub(crate) fn default_mood_query() -> String {
    "{value} piano sound".to_string()
}

pub(crate) fn default_environment_query() -> String {
    "{value} sound".to_string()
}

pub(crate) fn default_play_environment() -> bool {
    true
}

pub(crate) fn default_mood_volume() -> f32 {
    0.8
}

pub(crate) fn default_environment_volume() -> f32 {
    0.4
}

pub(crate) fn default_request_timeout_secs() -> f32 {
    10.0
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_key_next_page() -> String {
    "n".to_string()
}

pub(crate) fn default_key_prev_page() -> String {
    "p".to_string()
}

pub(crate) fn default_key_back() -> String {
    "escape".to_string()
}

pub(crate) fn default_key_add_book() -> String {
    "ctrl+o".to_string()
}

pub(crate) fn default_key_toggle_sound() -> String {
    "m".to_string()
}
