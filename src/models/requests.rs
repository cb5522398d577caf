use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{
    Marks, StudentProfile, TypePreference, DEFAULT_ENTRY_TEST_TOTAL, DEFAULT_MARKS_TOTAL,
};

/// Request to compute university recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(range(min = 0.0))]
    #[serde(rename = "matricMarks")]
    pub matric_marks: f64,
    #[serde(rename = "matricTotal", default = "default_marks_total")]
    pub matric_total: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "interMarks")]
    pub inter_marks: f64,
    #[serde(rename = "interTotal", default = "default_marks_total")]
    pub inter_total: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "entryTestScore", default)]
    pub entry_test_score: Option<f64>,
    #[serde(rename = "entryTestTotal", default)]
    pub entry_test_total: Option<f64>,
    #[validate(length(max = 32))]
    #[serde(rename = "preferredPrograms", default)]
    pub preferred_programs: Vec<String>,
    #[validate(length(max = 32))]
    #[serde(rename = "preferredCities", default)]
    pub preferred_cities: Vec<String>,
    #[serde(rename = "universityType", default)]
    pub university_type: TypePreference,
    /// Presentation-side truncation; the engine always ranks everything
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

fn default_marks_total() -> f64 {
    DEFAULT_MARKS_TOTAL
}

impl From<&RecommendationRequest> for StudentProfile {
    /// Obtained/total consistency is left to the normalizer, which fails fast
    fn from(req: &RecommendationRequest) -> Self {
        let entry_test = req.entry_test_score.map(|score| {
            Marks::new(score, req.entry_test_total.unwrap_or(DEFAULT_ENTRY_TEST_TOTAL))
        });

        StudentProfile {
            matric: Marks::new(req.matric_marks, req.matric_total),
            inter: Marks::new(req.inter_marks, req.inter_total),
            entry_test,
            preferred_programs: clean_labels(&req.preferred_programs),
            preferred_cities: clean_labels(&req.preferred_cities),
            type_preference: req.university_type,
        }
    }
}

/// Trim labels and drop blanks; blanks would otherwise match every city
fn clean_labels(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
