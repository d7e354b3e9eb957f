//! Conversation state
//!
//! Fields are filled strictly in question order. The only way to populate a
//! field is the matching `record_*` method, which also moves the
//! conversation on to the next question.

use std::fmt;

use crate::models::{Difficulty, TrailRecord};

/// The answer the conversation is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaitingInput {
    Difficulty,
    MaxDistance,
    Scenery,
    RouteType,
    ConfirmWeather,
    ConfirmPlaces,
    PlaceType,
    /// Terminal; nothing more is asked
    Nothing,
}

impl fmt::Display for AwaitingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AwaitingInput::Difficulty => "difficulty",
            AwaitingInput::MaxDistance => "max_distance",
            AwaitingInput::Scenery => "scenery",
            AwaitingInput::RouteType => "route_type",
            AwaitingInput::ConfirmWeather => "confirm_weather",
            AwaitingInput::ConfirmPlaces => "confirm_pubs",
            AwaitingInput::PlaceType => "place_type",
            AwaitingInput::Nothing => "none",
        };
        f.write_str(name)
    }
}

/// Per-session answers collected so far
#[derive(Debug, Clone)]
pub struct ConversationState {
    awaiting: AwaitingInput,
    difficulty: Option<Difficulty>,
    max_distance_km: Option<f64>,
    scenery: Option<String>,
    route_type: Option<String>,
    selected_trail: Option<TrailRecord>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            awaiting: AwaitingInput::Difficulty,
            difficulty: None,
            max_distance_km: None,
            scenery: None,
            route_type: None,
            selected_trail: None,
        }
    }

    #[must_use]
    pub fn awaiting(&self) -> AwaitingInput {
        self.awaiting
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.awaiting == AwaitingInput::Nothing
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn max_distance_km(&self) -> Option<f64> {
        self.max_distance_km
    }

    #[must_use]
    pub fn scenery(&self) -> Option<&str> {
        self.scenery.as_deref()
    }

    #[must_use]
    pub fn route_type(&self) -> Option<&str> {
        self.route_type.as_deref()
    }

    #[must_use]
    pub fn selected_trail(&self) -> Option<&TrailRecord> {
        self.selected_trail.as_ref()
    }

    pub(crate) fn record_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = Some(difficulty);
        self.awaiting = AwaitingInput::MaxDistance;
    }

    pub(crate) fn record_max_distance(&mut self, max_distance_km: f64) {
        self.max_distance_km = Some(max_distance_km);
        self.awaiting = AwaitingInput::Scenery;
    }

    /// Blank answers are stored as "no preference"
    pub(crate) fn record_scenery(&mut self, scenery: &str) {
        self.scenery = non_blank(scenery);
        self.awaiting = AwaitingInput::RouteType;
    }

    /// Stores the route preference; the caller follows up with
    /// [`select_trail`](Self::select_trail) or [`finish`](Self::finish)
    pub(crate) fn record_route_type(&mut self, route_type: &str) {
        self.route_type = non_blank(route_type);
    }

    pub(crate) fn select_trail(&mut self, trail: TrailRecord) {
        self.selected_trail = Some(trail);
        self.awaiting = AwaitingInput::ConfirmWeather;
    }

    pub(crate) fn await_places_confirmation(&mut self) {
        self.awaiting = AwaitingInput::ConfirmPlaces;
    }

    pub(crate) fn await_place_type(&mut self) {
        self.awaiting = AwaitingInput::PlaceType;
    }

    pub(crate) fn finish(&mut self) {
        self.awaiting = AwaitingInput::Nothing;
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_awaits_difficulty() {
        let state = ConversationState::new();
        assert_eq!(state.awaiting(), AwaitingInput::Difficulty);
        assert!(state.difficulty().is_none());
        assert!(state.selected_trail().is_none());
        assert!(!state.is_finished());
    }

    #[test]
    fn test_fields_fill_in_order() {
        let mut state = ConversationState::new();
        state.record_difficulty(Difficulty::Hard);
        assert_eq!(state.awaiting(), AwaitingInput::MaxDistance);
        assert!(state.max_distance_km().is_none());

        state.record_max_distance(12.0);
        assert_eq!(state.awaiting(), AwaitingInput::Scenery);

        state.record_scenery("  lake ");
        assert_eq!(state.scenery(), Some("lake"));
        assert_eq!(state.awaiting(), AwaitingInput::RouteType);

        state.record_route_type("");
        assert_eq!(state.route_type(), None);
        state.finish();
        assert!(state.is_finished());
    }

    #[test]
    fn test_awaiting_display_names() {
        assert_eq!(AwaitingInput::ConfirmPlaces.to_string(), "confirm_pubs");
        assert_eq!(AwaitingInput::Nothing.to_string(), "none");
    }
}
