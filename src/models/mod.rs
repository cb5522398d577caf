// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AcademicPolicy, InstitutionType, Marks, NormalizedMarks, ProgramOffering,
    RecommendationResult, ScoringWeights, StudentProfile, TypePreference, UniversityCatalogEntry,
    DEFAULT_ENTRY_TEST_TOTAL, DEFAULT_MARKS_TOTAL, DEFAULT_MERIT_THRESHOLD,
};
pub use requests::RecommendationRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendationsResponse, UniversitiesResponse};
