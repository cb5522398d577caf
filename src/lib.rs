//! Unimatch - university recommendation and eligibility-matching service
//!
//! The engine in [`core`] turns a student's marks and preferences into a
//! ranked list of universities with a match score and reasons. It is a pure
//! function over a catalog supplied per call; [`services`] provides the
//! catalog from bundled JSON or a remote source with local fallback.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, EngineError, RecommendationOutcome, Recommender};
pub use crate::models::{
    RecommendationRequest, RecommendationResult, ScoringWeights, StudentProfile, TypePreference,
    UniversityCatalogEntry,
};
