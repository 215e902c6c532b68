use super::super::super::messages::Message;
use super::super::super::state::{App, Screen};
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::ArrowRight) => "right".to_string(),
            Key::Named(key::Named::ArrowLeft) => "left".to_string(),
            Key::Named(key::Named::Escape) => "escape".to_string(),
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        let bound = |raw: &str, fallback: &str| {
            Self::shortcut_matches(raw, fallback, &pressed, modifiers)
        };

        if bound(&self.config.key_toggle_sound, "m") {
            return Some(Message::ToggleSound);
        }

        match self.screen {
            Screen::Reader => {
                if bound(&self.config.key_next_page, "n") || bound("right", "right") {
                    Some(Message::NextPage)
                } else if bound(&self.config.key_prev_page, "p") || bound("left", "left") {
                    Some(Message::PreviousPage)
                } else if bound(&self.config.key_back, "escape") {
                    Some(Message::BackToLibrary)
                } else {
                    None
                }
            }
            Screen::Library => {
                if bound(&self.config.key_add_book, "ctrl+o") {
                    Some(Message::AddBookRequested)
                } else {
                    None
                }
            }
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let Some(required_key) = required_key else {
            return false;
        };
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    /// Lowercase and fold common key aliases. An empty binding falls back to
    /// the default.
    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        let normalized = if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
        };
        normalized
            .replace("spacebar", "space")
            .replace("arrowright", "right")
            .replace("arrowleft", "left")
            .split('+')
            .map(|token| if token.trim() == "esc" { "escape" } else { token })
            .collect::<Vec<_>>()
            .join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_key_aliases() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
        assert_eq!(App::normalize_shortcut_token("Esc", "x"), "escape");
        assert_eq!(App::normalize_shortcut_token("ArrowRight", "x"), "right");
        assert_eq!(App::normalize_shortcut_token("   ", "ctrl+o"), "ctrl+o");
    }

    #[test]
    fn matches_ctrl_o_shortcut() {
        assert!(App::shortcut_matches("ctrl+o", "x", "o", Modifiers::CTRL));
        assert!(!App::shortcut_matches("ctrl+o", "x", "o", Modifiers::empty()));
    }

    #[test]
    fn matches_plain_letter_without_modifiers() {
        assert!(App::shortcut_matches("n", "n", "n", Modifiers::empty()));
        assert!(!App::shortcut_matches("n", "n", "p", Modifiers::empty()));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+o",
            "x",
            "o",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
        assert!(!App::shortcut_matches("m", "m", "m", Modifiers::ALT));
    }

    #[test]
    fn modifier_only_binding_never_matches() {
        assert!(!App::shortcut_matches("ctrl+", "x", "ctrl", Modifiers::CTRL));
    }
}
