use super::super::state::App;
use super::Effect;
use crate::mood::MoodProfile;
use crate::playback::{AudioClip, Layer};
use crate::sound::Facets;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_toggle_sound(&mut self, effects: &mut Vec<Effect>) {
        self.config.sound_enabled = !self.config.sound_enabled;
        info!(enabled = self.config.sound_enabled, "Toggled soundtrack");
        effects.push(Effect::SaveConfig);

        if !self.config.sound_enabled {
            effects.push(Effect::StopAudio);
            self.sound.controller.reset();
            return;
        }
        let profile = self.reader.as_ref().and_then(|reader| reader.profile);
        if let Some(profile) = profile {
            self.sound.controller.reset();
            self.observe_profile(profile, effects);
        }
    }

    /// Feed a freshly analyzed page to the controller and schedule whatever
    /// the transition asks for.
    pub(super) fn observe_profile(&mut self, profile: MoodProfile, effects: &mut Vec<Effect>) {
        if !self.config.sound_enabled {
            return;
        }
        let transition = self.sound.controller.observe(&profile);
        if transition.is_keep() {
            debug!(mood = %profile.mood, "Soundtrack unchanged");
            return;
        }

        let mut facets = transition.facets();
        facets.environment &= self.config.play_environment;
        if transition.switch_mood {
            effects.push(Effect::StopLayer(Layer::Mood));
        }
        if transition.switch_environment {
            effects.push(Effect::StopLayer(Layer::Environment));
        }
        if facets.any() {
            self.sound.pending_lookup = Some(transition.request_id);
            effects.push(Effect::FetchSoundtrack {
                request_id: transition.request_id,
                profile,
                facets,
            });
        }
    }

    pub(super) fn handle_soundtrack_ready(
        &mut self,
        request_id: u64,
        facets: Facets,
        mood: Option<AudioClip>,
        environment: Option<AudioClip>,
        effects: &mut Vec<Effect>,
    ) {
        if self.sound.pending_lookup == Some(request_id) {
            self.sound.pending_lookup = None;
        }
        if !self.config.sound_enabled || self.reader.is_none() {
            debug!(request_id, "Soundtrack arrived after sound was turned off");
            return;
        }
        let layers = [
            (Layer::Mood, facets.mood, mood),
            (Layer::Environment, facets.environment, environment),
        ];
        for (layer, requested, clip) in layers {
            if !requested {
                continue;
            }
            if !self.sound.controller.accept(layer, request_id) {
                debug!(request_id, ?layer, "Dropping superseded soundtrack");
                continue;
            }
            match clip {
                Some(clip) => effects.push(Effect::PlayClip { layer, clip }),
                None => info!(request_id, ?layer, "No soundtrack found for layer"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::{Environment, Mood};
    use tempfile::TempDir;

    fn page(mood: Mood, environment: Environment) -> MoodProfile {
        MoodProfile {
            mood,
            environment,
            polarity: 0.0,
        }
    }

    fn reading_app(tmp: &TempDir) -> App {
        let mut app = App::for_tests(tmp.path());
        app.open_for_tests(20);
        app
    }

    fn clip(name: &str) -> Option<AudioClip> {
        Some(AudioClip::new(format!("https://cdn/{name}.mp3"), vec![1, 2, 3]))
    }

    #[test]
    fn first_page_stops_and_fetches_both_layers() {
        let tmp = TempDir::new().expect("temp dir");
        let mut app = reading_app(&tmp);
        let mut effects = Vec::new();
        app.observe_profile(page(Mood::Calm, Environment::Forest), &mut effects);

        assert_eq!(effects.len(), 3, "{effects:?}");
        assert!(matches!(effects[0], Effect::StopLayer(Layer::Mood)));
        assert!(matches!(effects[1], Effect::StopLayer(Layer::Environment)));
        match &effects[2] {
            Effect::FetchSoundtrack {
                request_id, facets, ..
            } => {
                assert_eq!(
                    *facets,
                    Facets {
                        mood: true,
                        environment: true,
                    }
                );
                assert_eq!(app.sound.pending_lookup, Some(*request_id));
            }
            other => panic!("expected a lookup, got {other:?}"),
        }
    }

    #[test]
    fn unchanged_page_schedules_nothing() {
        let tmp = TempDir::new().expect("temp dir");
        let mut app = reading_app(&tmp);
        let mut effects = Vec::new();
        app.observe_profile(page(Mood::Calm, Environment::Forest), &mut effects);

        let mut again = Vec::new();
        app.observe_profile(page(Mood::Calm, Environment::Forest), &mut again);
        assert!(again.is_empty(), "{again:?}");
    }

    #[test]
    fn mood_change_touches_only_the_mood_layer() {
        let tmp = TempDir::new().expect("temp dir");
        let mut app = reading_app(&tmp);
        let mut effects = Vec::new();
        app.observe_profile(page(Mood::Calm, Environment::Forest), &mut effects);

        let mut next = Vec::new();
        app.observe_profile(page(Mood::Sad, Environment::Forest), &mut next);
        assert_eq!(next.len(), 2, "{next:?}");
        assert!(matches!(next[0], Effect::StopLayer(Layer::Mood)));
        assert!(matches!(
            next[1],
            Effect::FetchSoundtrack {
                facets: Facets {
                    mood: true,
                    environment: false,
                },
                ..
            }
        ));
    }

    #[test]
    fn environment_layer_can_be_disabled() {
        let tmp = TempDir::new().expect("temp dir");
        let mut app = reading_app(&tmp);
        app.config.play_environment = false;
        let mut effects = Vec::new();
        app.observe_profile(page(Mood::Happy, Environment::Beach), &mut effects);

        let lookup = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::FetchSoundtrack { facets, .. } => Some(*facets),
                _ => None,
            })
            .expect("mood lookup still dispatched");
        assert!(lookup.mood);
        assert!(!lookup.environment);

        // A setting-only change has nothing left to fetch.
        let mut next = Vec::new();
        app.observe_profile(page(Mood::Happy, Environment::City), &mut next);
        assert!(
            !next
                .iter()
                .any(|effect| matches!(effect, Effect::FetchSoundtrack { .. })),
            "{next:?}"
        );
    }

    #[test]
    fn superseded_layer_result_is_dropped() {
        let tmp = TempDir::new().expect("temp dir");
        let mut app = reading_app(&tmp);
        let first = app.sound.controller.observe(&page(Mood::Calm, Environment::Forest));
        let second = app.sound.controller.observe(&page(Mood::Sad, Environment::Forest));
        app.sound.pending_lookup = Some(second.request_id);

        // The first lookup's mood clip is stale; its forest clip is still wanted.
        let mut effects = Vec::new();
        app.handle_soundtrack_ready(
            first.request_id,
            first.facets(),
            clip("calm"),
            clip("forest"),
            &mut effects,
        );
        assert_eq!(effects.len(), 1, "{effects:?}");
        assert!(matches!(
            &effects[0],
            Effect::PlayClip {
                layer: Layer::Environment,
                clip,
            } if clip.url.ends_with("forest.mp3")
        ));
        assert_eq!(app.sound.pending_lookup, Some(second.request_id));

        let mut effects = Vec::new();
        app.handle_soundtrack_ready(second.request_id, second.facets(), clip("sad"), None, &mut effects);
        assert_eq!(effects.len(), 1, "{effects:?}");
        assert!(matches!(
            &effects[0],
            Effect::PlayClip {
                layer: Layer::Mood,
                clip,
            } if clip.url.ends_with("sad.mp3")
        ));
        assert_eq!(app.sound.pending_lookup, None);
    }

    #[test]
    fn missing_clip_plays_nothing() {
        let tmp = TempDir::new().expect("temp dir");
        let mut app = reading_app(&tmp);
        let t = app.sound.controller.observe(&page(Mood::Angry, Environment::Battle));
        let mut effects = Vec::new();
        app.handle_soundtrack_ready(t.request_id, t.facets(), None, None, &mut effects);
        assert!(effects.is_empty(), "{effects:?}");
    }

    #[test]
    fn toggling_off_stops_audio_and_forgets_the_soundtrack() {
        let tmp = TempDir::new().expect("temp dir");
        let mut app = reading_app(&tmp);
        let profile = page(Mood::Calm, Environment::Night);
        if let Some(reader) = app.reader.as_mut() {
            reader.profile = Some(profile);
        }
        let mut effects = Vec::new();
        app.observe_profile(profile, &mut effects);
        let request_id = app.sound.pending_lookup.expect("lookup pending");

        let mut off = Vec::new();
        app.handle_toggle_sound(&mut off);
        assert!(!app.config.sound_enabled);
        assert!(off.iter().any(|e| matches!(e, Effect::SaveConfig)), "{off:?}");
        assert!(off.iter().any(|e| matches!(e, Effect::StopAudio)), "{off:?}");
        assert!(!app.sound.controller.accept(Layer::Mood, request_id));

        // A late result for the old lookup is ignored.
        let mut late = Vec::new();
        app.handle_soundtrack_ready(
            request_id,
            Facets {
                mood: true,
                environment: true,
            },
            clip("calm"),
            clip("night"),
            &mut late,
        );
        assert!(late.is_empty(), "{late:?}");

        // Turning it back on looks the current page up again.
        let mut on = Vec::new();
        app.handle_toggle_sound(&mut on);
        assert!(app.config.sound_enabled);
        assert!(
            on.iter().any(|e| matches!(
                e,
                Effect::FetchSoundtrack {
                    facets: Facets {
                        mood: true,
                        environment: true,
                    },
                    ..
                }
            )),
            "{on:?}"
        );
    }
}
