mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::{LoadedConfig, ThemeMode};
use iced::{Size, Theme, window};
use std::path::PathBuf;

/// Launch the library window. `import` lists PDFs to add on startup.
pub fn run_app(loaded: LoadedConfig, import: Vec<PathBuf>) -> iced::Result {
    let config = &loaded.config;
    let window_settings = window::Settings {
        size: Size::new(
            config.window_width.max(480.0),
            config.window_height.max(360.0),
        ),
        min_size: Some(Size::new(480.0, 360.0)),
        ..window::Settings::default()
    };

    iced::application("BookSmart", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| match app.config.theme {
            ThemeMode::Night => Theme::Dark,
            ThemeMode::Day => Theme::Light,
        })
        .run_with(move || App::bootstrap(loaded.config, loaded.writable, import))
}
