// Core algorithm exports
pub mod error;
pub mod filters;
pub mod normalize;
pub mod ranking;
pub mod recommender;
pub mod scoring;

pub use error::EngineError;
pub use filters::{city_matches, filter_candidates, FilterOutcome};
pub use normalize::{normalize, normalize_profile};
pub use ranking::rank;
pub use recommender::{RecommendationOutcome, Recommender};
pub use scoring::{calculate_match_score, CandidateScore};
