//! Conversation Orchestrator
//!
//! A single-user, turn-based dialogue. Each call to
//! [`Conversation::handle_message`] consumes one user message, advances the
//! state by at most one question, and returns exactly one reply. External
//! calls happen one at a time inside the turn, and every failure degrades to
//! a templated reply.
//!
//! Question order:
//! difficulty → max distance → scenery → route type → (trail picked) →
//! weather? → pubs/cafes? → (which kind?) → done

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::TrailBuddyConfig;
use crate::llm::CompletionProvider;
use crate::models::{AmenityKind, Difficulty, TrailRecord};
use crate::places::PlacesProvider;
use crate::trails::{
    SceneryPreference, SelectionRationale, TrailCatalog, TrailQuery, filter_by_scenery,
    rank_candidates,
};
use crate::weather::WeatherProvider;

pub mod replies;
pub mod state;

pub use state::{AwaitingInput, ConversationState};

/// External collaborators of a conversation
#[derive(Clone)]
pub struct Services {
    pub completion: Arc<dyn CompletionProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub places: Arc<dyn PlacesProvider>,
}

/// Tunables for a conversation
#[derive(Debug, Clone, Copy)]
pub struct ConversationSettings {
    /// Token bound for each completion request
    pub max_output_tokens: u32,
    /// Amenity search radius in meters
    pub places_radius_m: u32,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            max_output_tokens: 500,
            places_radius_m: 20_000,
        }
    }
}

impl From<&TrailBuddyConfig> for ConversationSettings {
    fn from(config: &TrailBuddyConfig) -> Self {
        Self {
            max_output_tokens: config.llm.max_output_tokens,
            places_radius_m: config.places.radius_m,
        }
    }
}

/// One user's conversation with the assistant
pub struct Conversation {
    catalog: Arc<TrailCatalog>,
    services: Services,
    settings: ConversationSettings,
    state: ConversationState,
}

impl Conversation {
    #[must_use]
    pub fn new(
        catalog: Arc<TrailCatalog>,
        services: Services,
        settings: ConversationSettings,
    ) -> Self {
        Self {
            catalog,
            services,
            settings,
            state: ConversationState::new(),
        }
    }

    /// Opening lines shown before the first user message
    #[must_use]
    pub fn greeting(&self) -> String {
        format!("{}\n{}", replies::GREETING, replies::ASK_DIFFICULTY)
    }

    #[must_use]
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Process one user message and produce the reply
    pub async fn handle_message(&mut self, message: &str) -> String {
        let before = self.state.awaiting();

        let reply = match before {
            AwaitingInput::Difficulty => self.on_difficulty(message),
            AwaitingInput::MaxDistance => self.on_max_distance(message),
            AwaitingInput::Scenery => self.on_scenery(message),
            AwaitingInput::RouteType => self.on_route_type(message).await,
            AwaitingInput::ConfirmWeather => self.on_confirm_weather(message).await,
            AwaitingInput::ConfirmPlaces => self.on_confirm_places(message).await,
            AwaitingInput::PlaceType => self.on_place_type(message).await,
            AwaitingInput::Nothing => replies::FALLBACK.to_string(),
        };

        debug!("Conversation turn: {} -> {}", before, self.state.awaiting());
        reply
    }

    fn on_difficulty(&mut self, message: &str) -> String {
        match Difficulty::detect(message) {
            Some(difficulty) => {
                self.state.record_difficulty(difficulty);
                replies::ASK_MAX_DISTANCE.to_string()
            }
            None => replies::ASK_DIFFICULTY.to_string(),
        }
    }

    fn on_max_distance(&mut self, message: &str) -> String {
        match message.trim().parse::<f64>() {
            Ok(km) if km.is_finite() => {
                self.state.record_max_distance(km);
                replies::ASK_SCENERY.to_string()
            }
            _ => replies::INVALID_DISTANCE.to_string(),
        }
    }

    fn on_scenery(&mut self, message: &str) -> String {
        self.state.record_scenery(message);
        replies::ASK_ROUTE_TYPE.to_string()
    }

    async fn on_route_type(&mut self, message: &str) -> String {
        self.state.record_route_type(message);

        let Some(trail) = self.pick_trail() else {
            info!("No trail matches the collected preferences");
            self.state.finish();
            return replies::NO_MATCH.to_string();
        };

        let description = self
            .complete_or(&replies::trail_description_prompt(&trail), || {
                trail.summary_line()
            })
            .await;

        self.state.select_trail(trail);
        format!("{description}\n\n{}", replies::ASK_WEATHER)
    }

    /// Filter, apply scenery preference, rank, take the best
    fn pick_trail(&self) -> Option<TrailRecord> {
        let query = TrailQuery {
            difficulty: self.state.difficulty(),
            max_distance_km: self.state.max_distance_km(),
            route_type: self.state.route_type().map(str::to_string),
            soft_distance: true,
        };
        let preference = SceneryPreference::parse(self.state.scenery().unwrap_or_default());

        let candidates = filter_by_scenery(self.catalog.filter(&query), &preference);
        let ranked = rank_candidates(candidates, &preference);

        if let Some(rationale) = SelectionRationale::new(&query, &preference, &ranked) {
            debug!("Trail selection: {}", rationale);
        }

        ranked.into_iter().next().map(|candidate| candidate.trail)
    }

    async fn on_confirm_weather(&mut self, message: &str) -> String {
        self.state.await_places_confirmation();

        let Some(trail) = self.state.selected_trail().cloned() else {
            warn!("Weather requested without a selected trail");
            return replies::SKIP_WEATHER.to_string();
        };

        if !is_affirmative(message) {
            return replies::SKIP_WEATHER.to_string();
        }

        let weather = self
            .services
            .weather
            .current_weather(trail.latitude, trail.longitude)
            .await;

        let summary = self
            .complete_or(&replies::weather_summary_prompt(&trail, &weather), || {
                replies::weather_fallback(&trail, &weather)
            })
            .await;

        format!("{summary}\n\n{}", replies::ASK_PLACES)
    }

    async fn on_confirm_places(&mut self, message: &str) -> String {
        if let Some(kind) = AmenityKind::from_selection(message) {
            return self.lookup_places(&[kind]).await;
        }

        if is_affirmative(message) {
            self.state.await_place_type();
            return replies::ASK_PLACE_TYPE.to_string();
        }

        self.state.finish();
        replies::FAREWELL.to_string()
    }

    async fn on_place_type(&mut self, message: &str) -> String {
        match AmenityKind::from_selection(message) {
            Some(kind) => self.lookup_places(&[kind]).await,
            None => self.lookup_places(&[AmenityKind::Cafe, AmenityKind::Pub]).await,
        }
    }

    async fn lookup_places(&mut self, kinds: &[AmenityKind]) -> String {
        self.state.finish();

        let Some(trail) = self.state.selected_trail().cloned() else {
            warn!("Places requested without a selected trail");
            return replies::FAREWELL.to_string();
        };

        let radius_m = self.settings.places_radius_m;
        let places = self
            .services
            .places
            .nearby(trail.latitude, trail.longitude, radius_m, kinds)
            .await;

        if places.is_empty() {
            return replies::no_places_message(kinds, radius_m);
        }

        let list = replies::format_place_list(&places);
        self.complete_or(&replies::places_summary_prompt(&trail, kinds, &list), || {
            list.clone()
        })
        .await
    }

    /// Ask the completion service, falling back to a template on empty output
    async fn complete_or(&self, prompt: &str, fallback: impl FnOnce() -> String) -> String {
        let text = self
            .services
            .completion
            .complete(prompt, self.settings.max_output_tokens)
            .await;

        if text.trim().is_empty() {
            debug!("Completion unavailable, using templated reply");
            fallback()
        } else {
            text
        }
    }
}

fn is_affirmative(message: &str) -> bool {
    matches!(message.trim().to_lowercase().as_str(), "yes" | "y")
}
