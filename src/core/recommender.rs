use crate::core::{
    filters::{filter_candidates, program_set},
    normalize::normalize_profile,
    ranking::rank,
    scoring::calculate_match_score,
    EngineError,
};
use crate::models::{
    AcademicPolicy, RecommendationResult, ScoringWeights, StudentProfile, UniversityCatalogEntry,
};

/// Result of the recommendation process
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<RecommendationResult>,
    /// Catalog size before filtering
    pub total_candidates: usize,
    pub program_relaxed: bool,
    pub eligibility_relaxed: bool,
}

/// Recommendation orchestrator - implements the eligibility-matching pipeline
///
/// # Pipeline Stages
/// 1. Normalize marks onto a percentage scale
/// 2. Strict city/type filter
/// 3. Program/eligibility filter, relaxed when it empties the set
/// 4. Scoring and ranking
///
/// Holds only tunables; the catalog is passed on every call so a refreshed
/// catalog is picked up without invalidation.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
    policy: AcademicPolicy,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, policy: AcademicPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), AcademicPolicy::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank every eligible university in `catalog` for `profile`
    ///
    /// # Errors
    /// `EngineError::InvalidInput` when a total is not positive or marks fall
    /// outside `0..=total`. An empty result is returned as `Ok`.
    pub fn recommend(
        &self,
        catalog: &[UniversityCatalogEntry],
        profile: &StudentProfile,
    ) -> Result<RecommendationOutcome, EngineError> {
        let marks = normalize_profile(profile)?;
        let programs = program_set(profile);

        let filtered = filter_candidates(catalog, profile, &marks);

        let scored: Vec<RecommendationResult> = filtered
            .candidates
            .into_iter()
            .map(|entry| {
                let scored = calculate_match_score(
                    entry,
                    profile,
                    &marks,
                    &self.weights,
                    &self.policy,
                    &programs,
                );
                RecommendationResult {
                    university: entry.clone(),
                    match_score: scored.score,
                    match_reasons: scored.reasons,
                }
            })
            .collect();

        Ok(RecommendationOutcome {
            recommendations: rank(scored),
            total_candidates: catalog.len(),
            program_relaxed: filtered.program_relaxed,
            eligibility_relaxed: filtered.eligibility_relaxed,
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstitutionType, Marks, ProgramOffering, TypePreference};

    fn create_entry(
        short: &str,
        city: &str,
        kind: InstitutionType,
        programs: &[(&str, f64)],
    ) -> UniversityCatalogEntry {
        UniversityCatalogEntry {
            short_name: short.to_string(),
            name: format!("University {}", short),
            city: city.to_string(),
            institution_type: kind,
            established_year: 1970,
            campuses: vec![],
            estimated_fee_range: None,
            ranking_national: None,
            programs: programs
                .iter()
                .map(|(category, merit)| ProgramOffering {
                    category: category.to_string(),
                    name: None,
                    closing_merit: Some(*merit),
                    minimum_percentage: None,
                })
                .collect(),
        }
    }

    fn create_profile(programs: &[&str], cities: &[&str], kind: TypePreference) -> StudentProfile {
        StudentProfile {
            matric: Marks::new(1000.0, 1200.0),
            inter: Marks::new(950.0, 1200.0),
            entry_test: None,
            preferred_programs: programs.iter().map(|s| s.to_string()).collect(),
            preferred_cities: cities.iter().map(|s| s.to_string()).collect(),
            type_preference: kind,
        }
    }

    fn catalog() -> Vec<UniversityCatalogEntry> {
        vec![
            create_entry("UET", "Lahore", InstitutionType::Public, &[("Engineering", 75.0)]),
            create_entry("GCU", "Lahore", InstitutionType::Public, &[("Arts", 75.0)]),
            create_entry("NED", "Karachi", InstitutionType::Public, &[("Engineering", 75.0)]),
            create_entry("BUITEMS", "Quetta", InstitutionType::Public, &[("Engineering", 60.0)]),
        ]
    }

    #[test]
    fn test_recommend_confined_to_city() {
        let recommender = Recommender::with_default_weights();
        let profile = create_profile(&["Engineering"], &["Lahore"], TypePreference::Both);

        let outcome = recommender.recommend(&catalog(), &profile).unwrap();

        assert_eq!(outcome.total_candidates, 4);
        assert_eq!(outcome.recommendations.len(), 1);
        assert_eq!(outcome.recommendations[0].university.short_name, "UET");
    }

    #[test]
    fn test_recommend_relaxes_programs() {
        let recommender = Recommender::with_default_weights();
        let profile = create_profile(&["Medical"], &["Quetta"], TypePreference::Public);

        let outcome = recommender.recommend(&catalog(), &profile).unwrap();

        assert!(outcome.program_relaxed);
        assert_eq!(outcome.recommendations.len(), 1);
        let reasons = &outcome.recommendations[0].match_reasons;
        assert!(!reasons.is_empty());
        assert!(!reasons.iter().any(|r| r.contains("preferred program")));
    }

    #[test]
    fn test_recommend_invalid_total() {
        let recommender = Recommender::with_default_weights();
        let mut profile = create_profile(&[], &[], TypePreference::Both);
        profile.matric.total = 0.0;

        let result = recommender.recommend(&catalog(), &profile);
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_recommend_empty_catalog() {
        let recommender = Recommender::with_default_weights();
        let profile = create_profile(&["Engineering"], &["Lahore"], TypePreference::Both);

        let outcome = recommender.recommend(&[], &profile).unwrap();
        assert!(outcome.recommendations.is_empty());
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let recommender = Recommender::with_default_weights();
        let profile = create_profile(&["Engineering"], &[], TypePreference::Both);
        let catalog = catalog();

        let first = recommender.recommend(&catalog, &profile).unwrap();
        let second = recommender.recommend(&catalog, &profile).unwrap();
        assert_eq!(first, second);
    }
}
