//! `TrailBuddy` - Conversational hiking trail recommendations
//!
//! This library asks a hiker a few questions, picks a trail from a local
//! dataset, and enriches the pick with current weather, nearby pubs and
//! cafes, and friendly summaries from a hosted language model.

pub mod assistant;
pub mod config;
pub mod error;
pub mod geo;
pub mod llm;
pub mod models;
pub mod places;
pub mod telemetry;
pub mod trails;
pub mod weather;

// Re-export core types for public API
pub use assistant::{AwaitingInput, Conversation, ConversationSettings, ConversationState, Services};
pub use config::TrailBuddyConfig;
pub use error::TrailBuddyError;
pub use llm::{CompletionProvider, GeminiClient};
pub use models::{AmenityKind, Difficulty, PlaceResult, TrailRecord, WeatherReport};
pub use places::{OverpassClient, PlacesProvider};
pub use trails::{TrailCandidate, TrailCatalog, TrailQuery};
pub use weather::{OpenMeteoClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TrailBuddyError>;
