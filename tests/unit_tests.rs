// Unit tests for the Unimatch engine components

use unimatch::core::{
    filters::{city_matches, filter_candidates, program_set},
    normalize::{normalize, normalize_profile},
    ranking::rank,
    scoring::calculate_match_score,
    EngineError,
};
use unimatch::models::{
    AcademicPolicy, InstitutionType, Marks, ProgramOffering, RecommendationResult, ScoringWeights,
    StudentProfile, TypePreference, UniversityCatalogEntry,
};

fn offering(category: &str, merit: f64) -> ProgramOffering {
    ProgramOffering {
        category: category.to_string(),
        name: None,
        closing_merit: Some(merit),
        minimum_percentage: None,
    }
}

fn create_entry(
    short: &str,
    city: &str,
    kind: InstitutionType,
    programs: Vec<ProgramOffering>,
) -> UniversityCatalogEntry {
    UniversityCatalogEntry {
        short_name: short.to_string(),
        name: format!("University {}", short),
        city: city.to_string(),
        institution_type: kind,
        established_year: 1980,
        campuses: vec![],
        estimated_fee_range: None,
        ranking_national: None,
        programs,
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

#[test]
fn test_normalize_caller_supplied_totals() {
    // Same share on the old and new scales
    let old_scale = normalize(550.0, 1100.0).unwrap();
    let new_scale = normalize(600.0, 1200.0).unwrap();
    assert!((old_scale - new_scale).abs() < 1e-9);
}

#[test]
fn test_normalize_rejects_zero_total() {
    assert_eq!(
        normalize(0.0, 0.0).map_err(|e| matches!(e, EngineError::InvalidInput(_))),
        Err(true)
    );
}

#[test]
fn test_entry_test_absent_stays_absent() {
    let profile = create_profile(&[], &[], TypePreference::Both);
    let marks = normalize_profile(&profile).unwrap();
    assert!(marks.entry_test.is_none());
}

#[test]
fn test_city_partial_names() {
    assert!(city_matches("Lahore Cantt", "Lahore"));
    assert!(city_matches("lahore", "Lahore Cantt"));
    assert!(!city_matches("Multan", "Lahore"));
}

#[test]
fn test_city_filter_never_relaxed() {
    let catalog = vec![
        create_entry("UET", "Lahore", InstitutionType::Public, vec![offering("Engineering", 80.0)]),
        create_entry("KMC", "Peshawar", InstitutionType::Public, vec![offering("Medical", 90.0)]),
    ];
    let profile = create_profile(&["Medical"], &["Lahore"], TypePreference::Both);
    let marks = normalize_profile(&profile).unwrap();

    let outcome = filter_candidates(&catalog, &profile, &marks);

    assert!(outcome.program_relaxed);
    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].city, "Lahore");
}

#[test]
fn test_type_filter_strict() {
    let catalog = vec![
        create_entry("LUMS", "Lahore", InstitutionType::Private, vec![offering("Business", 85.0)]),
        create_entry("PU", "Lahore", InstitutionType::Public, vec![offering("Arts", 65.0)]),
    ];
    let profile = create_profile(&["Business"], &[], TypePreference::Public);
    let marks = normalize_profile(&profile).unwrap();

    let outcome = filter_candidates(&catalog, &profile, &marks);

    assert!(outcome
        .candidates
        .iter()
        .all(|c| c.institution_type == InstitutionType::Public));
}

#[test]
fn test_monotonic_preference_overlap() {
    let profile = create_profile(&["Engineering"], &["Lahore"], TypePreference::Public);
    let marks = normalize_profile(&profile).unwrap();
    let programs = program_set(&profile);
    let weights = ScoringWeights::default();
    let policy = AcademicPolicy::default();

    let full = create_entry("A", "Lahore", InstitutionType::Public, vec![offering("Engineering", 70.0)]);
    let no_program = create_entry("B", "Lahore", InstitutionType::Public, vec![offering("Arts", 70.0)]);
    let no_city = create_entry("C", "Karachi", InstitutionType::Public, vec![offering("Engineering", 70.0)]);
    let no_type = create_entry("D", "Lahore", InstitutionType::Private, vec![offering("Engineering", 70.0)]);
    let none = create_entry("E", "Karachi", InstitutionType::Private, vec![offering("Arts", 70.0)]);

    let score = |e: &UniversityCatalogEntry| {
        calculate_match_score(e, &profile, &marks, &weights, &policy, &programs).score
    };

    assert!(score(&full) >= score(&no_program));
    assert!(score(&full) >= score(&no_city));
    assert!(score(&full) >= score(&no_type));
    assert!(score(&no_program) >= score(&none));
    assert!(score(&no_city) >= score(&none));
    assert!(score(&no_type) >= score(&none));
    // Program outweighs city, which outweighs type
    assert!(score(&no_type) >= score(&no_city));
    assert!(score(&no_city) >= score(&no_program));
}

#[test]
fn test_reasons_only_for_positive_components() {
    let profile = create_profile(&["Medical"], &["Quetta"], TypePreference::Public);
    let marks = normalize_profile(&profile).unwrap();
    let programs = program_set(&profile);
    let entry = create_entry("UOB", "Quetta", InstitutionType::Public, vec![offering("Arts", 55.0)]);

    let result = calculate_match_score(
        &entry,
        &profile,
        &marks,
        &ScoringWeights::default(),
        &AcademicPolicy::default(),
        &programs,
    );

    assert!(result.score > 0);
    assert_eq!(result.reasons.len(), 3);
    assert!(result.reasons.iter().any(|r| r.contains("preferred city (Quetta)")));
    assert!(result.reasons.iter().any(|r| r.contains("public universities")));
    assert!(!result.reasons.iter().any(|r| r.contains("preferred program")));
}

#[test]
fn test_rank_tie_break_by_short_name() {
    let results = vec!["LUMS", "AKU"]
        .into_iter()
        .map(|short| RecommendationResult {
            university: create_entry(short, "Karachi", InstitutionType::Private, vec![]),
            match_score: 88,
            match_reasons: vec!["Same".to_string()],
        })
        .collect();

    let ranked = rank(results);
    assert_eq!(ranked[0].university.short_name, "AKU");
    assert_eq!(ranked[1].university.short_name, "LUMS");
}
