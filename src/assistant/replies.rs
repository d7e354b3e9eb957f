//! Fixed replies, LLM prompts and their templated fallbacks

use crate::models::{AmenityKind, PlaceResult, TrailRecord, WeatherReport, format_decimal};

pub const GREETING: &str = "AI Trail Buddy is ready! Type 'exit' to quit.";
pub const ASK_DIFFICULTY: &str = "Choose difficulty: Very Easy, Easy, Moderate, Hard, Very Hard";
pub const ASK_MAX_DISTANCE: &str = "Max distance (km)?";
pub const INVALID_DISTANCE: &str = "Please enter a number.";
pub const ASK_SCENERY: &str = "Preferred scenery? (Lake, Forest, Panoramic, etc., optional)";
pub const ASK_ROUTE_TYPE: &str = "Preferred route type? (Loop, Out-and-back, Ridge)";
pub const NO_MATCH: &str = "Sorry, I couldn't find any trails matching your preferences.";
pub const ASK_WEATHER: &str = "Would you like the current weather for this trail?";
pub const ASK_PLACES: &str = "Would you like me to find cafes or pubs nearby?";
pub const SKIP_WEATHER: &str = "No problem! Would you like me to find cafes or pubs nearby?";
pub const ASK_PLACE_TYPE: &str = "Pubs, cafes, or both?";
pub const FAREWELL: &str = "Alright! Enjoy your hike! 🌄";
pub const FALLBACK: &str = "I'm not sure how to respond. Please follow the prompts.";

pub fn trail_description_prompt(trail: &TrailRecord) -> String {
    format!(
        "You are a friendly hiking guide. Recommend this trail in a cheerful paragraph:\n\n\
         Name: {}\nDifficulty: {}\nDistance: {} km\nRoute: {}\nTags: {}",
        trail.name,
        trail.difficulty,
        format_decimal(trail.distance_km),
        trail.route,
        trail.tags
    )
}

pub fn weather_summary_prompt(trail: &TrailRecord, weather: &WeatherReport) -> String {
    format!(
        "You are a friendly hiking assistant. Provide a short, cheerful summary of the \
         current weather at {} for hikers:\nTemperature: {}°C\nWindspeed: {} km/h\nCondition: {}",
        trail.name,
        weather.format_temperature(),
        weather.format_windspeed(),
        weather.description()
    )
}

/// Used when the completion service returns nothing
pub fn weather_fallback(trail: &TrailRecord, weather: &WeatherReport) -> String {
    format!(
        "Current weather at {}: {}°C, wind {} km/h, {}.",
        trail.name,
        weather.format_temperature(),
        weather.format_windspeed(),
        weather.description().to_lowercase()
    )
}

/// Numbered list, one place per line
pub fn format_place_list(places: &[PlaceResult]) -> String {
    places
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!("{}. {} - {} km away", i + 1, p.name, format_decimal(p.distance_km))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn places_summary_prompt(trail: &TrailRecord, kinds: &[AmenityKind], list: &str) -> String {
    format!(
        "You are a friendly hiking assistant. Here is a list of nearby {} for the trail {}:\n{}\n\
         Please summarize this in 2-3 cheerful sentences highlighting good options and distances.",
        AmenityKind::join(kinds),
        trail.name,
        list
    )
}

pub fn no_places_message(kinds: &[AmenityKind], radius_m: u32) -> String {
    format!(
        "Sorry, no nearby {} found within {} km.",
        AmenityKind::join(kinds),
        f64::from(radius_m) / 1000.0
    )
}
