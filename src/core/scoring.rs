use crate::core::filters::{matched_city, qualifying_offerings};
use crate::models::{
    AcademicPolicy, NormalizedMarks, ScoringWeights, StudentProfile, UniversityCatalogEntry,
};

/// Share of the academic component earned just by meeting the threshold
const QUALIFIED_BASE: f64 = 0.60;
/// Extra share earned by clearing the threshold by the comfort margin
const COMFORT_SHARE: f64 = 0.25;
/// Extra share scaled by how selective the program is
const SELECTIVITY_SHARE: f64 = 0.15;
/// Percentage points below threshold over which the academic credit decays
const ASPIRATIONAL_RANGE: f64 = 20.0;
/// Academic credit never drops below this, aspirational picks stay visible
const ASPIRATIONAL_FLOOR: f64 = 0.10;
/// Program credit when a preferred program is offered but its requirement is not met
const PARTIAL_PROGRAM_CREDIT: f64 = 0.30;

/// Per-component credits in `[0, 1]`; `None` marks an inactive component
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub academic: f64,
    pub program: Option<f64>,
    pub city: Option<f64>,
    pub institution_type: Option<f64>,
    pub entry_test: Option<f64>,
}

/// Score and justification for one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    /// Rounded 0-100 match score
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
}

/// How far a qualifying aggregate clears the threshold, as a 0-1 ratio
///
/// The comfort margin is capped by the headroom left above the threshold, so
/// a program near 100% is fully comfortable for a student who tops it.
#[inline]
fn comfort_ratio(margin: f64, threshold: f64, policy: &AcademicPolicy) -> f64 {
    let span = policy.comfort_margin.min(100.0 - threshold);
    if span <= 0.0 {
        1.0
    } else {
        (margin / span).clamp(0.0, 1.0)
    }
}

/// Academic credit (0-1) for an aggregate against a merit threshold
///
/// Meeting the threshold earns the base share, clearing it comfortably and
/// aiming at a selective program add the rest. Falling short decays linearly
/// down to a floor instead of reaching zero.
#[inline]
pub fn academic_fit(aggregate: f64, threshold: f64, policy: &AcademicPolicy) -> f64 {
    let margin = aggregate - threshold;

    if margin >= 0.0 {
        let comfort = comfort_ratio(margin, threshold, policy);
        let selectivity = (threshold / 100.0).clamp(0.0, 1.0);
        QUALIFIED_BASE + COMFORT_SHARE * comfort + SELECTIVITY_SHARE * selectivity
    } else {
        (QUALIFIED_BASE * (1.0 + margin / ASPIRATIONAL_RANGE)).max(ASPIRATIONAL_FLOOR)
    }
}

/// Best academic credit over the offerings relevant to the student, with the threshold used
fn best_academic_fit(
    entry: &UniversityCatalogEntry,
    programs: &[String],
    marks: &NormalizedMarks,
    policy: &AcademicPolicy,
) -> (f64, f64) {
    let mut relevant = qualifying_offerings(entry, programs, marks);
    if relevant.is_empty() {
        relevant = qualifying_offerings(entry, &[], marks);
    }
    if relevant.is_empty() {
        relevant = entry.programs.iter().collect();
    }

    let thresholds: Vec<f64> = if relevant.is_empty() {
        vec![policy.default_threshold]
    } else {
        relevant
            .iter()
            .map(|o| o.closing_merit.unwrap_or(policy.default_threshold))
            .collect()
    };

    thresholds
        .into_iter()
        .map(|t| (academic_fit(marks.aggregate, t, policy), t))
        .fold((f64::MIN, policy.default_threshold), |best, cur| {
            if cur.0 > best.0 { cur } else { best }
        })
}

/// Calculate a match score (0-100) and reasons for a candidate
///
/// Only active components are weighted: program and city when the student
/// stated preferences, type unless the preference is `Both`, entry test only
/// when a test percentage exists. The weighted sum is divided by the active
/// weights so the score stays on a 0-100 scale.
pub fn calculate_match_score(
    entry: &UniversityCatalogEntry,
    profile: &StudentProfile,
    marks: &NormalizedMarks,
    weights: &ScoringWeights,
    policy: &AcademicPolicy,
    programs: &[String],
) -> CandidateScore {
    let mut reasons = Vec::new();
    let mut breakdown = ScoreBreakdown::default();

    // Academic margin
    let (academic, threshold) = best_academic_fit(entry, programs, marks, policy);
    breakdown.academic = academic;
    let margin = marks.aggregate - threshold;
    let academic_reason = if margin >= 0.0 && comfort_ratio(margin, threshold, policy) >= 1.0 {
        format!(
            "Your aggregate of {:.1}% comfortably exceeds the typical merit of {:.1}%",
            marks.aggregate, threshold
        )
    } else if margin >= 0.0 {
        format!(
            "Your aggregate of {:.1}% meets the typical merit of {:.1}%",
            marks.aggregate, threshold
        )
    } else {
        format!(
            "Aspirational pick: typical merit is {:.1} points above your aggregate",
            -margin
        )
    };
    push_reason(&mut reasons, academic, weights.academic, Some(academic_reason));

    // Program overlap
    if !programs.is_empty() {
        let attainable = qualifying_offerings(entry, programs, marks);
        let (credit, reason) = if let Some(offering) = attainable.first() {
            (1.0, Some(format!("Matches your preferred program ({})", offering.category)))
        } else if let Some(offering) = entry
            .programs
            .iter()
            .find(|o| programs.iter().any(|p| o.is_category(p)))
        {
            let reason = format!(
                "Offers your preferred program ({}), though its entry requirement is above your aggregate",
                offering.category
            );
            (PARTIAL_PROGRAM_CREDIT, Some(reason))
        } else {
            (0.0, None)
        };
        push_reason(&mut reasons, credit, weights.program, reason);
        breakdown.program = Some(credit);
    }

    // City overlap
    if !profile.preferred_cities.is_empty() {
        let (credit, reason) = match matched_city(entry, &profile.preferred_cities) {
            Some(city) => (1.0, Some(format!("Located in your preferred city ({})", city))),
            None => (0.0, None),
        };
        push_reason(&mut reasons, credit, weights.city, reason);
        breakdown.city = Some(credit);
    }

    // Institution type
    if let Some(required) = profile.type_preference.required() {
        let (credit, reason) = if entry.institution_type == required {
            (1.0, Some(format!("Matches your preference for {} universities", required)))
        } else {
            (0.0, None)
        };
        push_reason(&mut reasons, credit, weights.institution_type, reason);
        breakdown.institution_type = Some(credit);
    }

    // Entry test, never defaulted when absent
    if let Some(pct) = marks.entry_test {
        let credit = (pct / 100.0).clamp(0.0, 1.0);
        let reason = format!("Entry test score of {:.0}% strengthens your application", pct);
        push_reason(&mut reasons, credit, weights.entry_test, Some(reason));
        breakdown.entry_test = Some(credit);
    }

    let score = combine(&breakdown, weights);
    if score == 0 {
        reasons.clear();
    }

    CandidateScore {
        score,
        breakdown,
        reasons,
    }
}

/// Keep a reason only for a component that actually moved the score
#[inline]
fn push_reason(reasons: &mut Vec<String>, credit: f64, weight: f64, reason: Option<String>) {
    if credit * weight > 0.0 {
        reasons.extend(reason);
    }
}

/// Weighted combination of active components, rounded to an integer 0-100
pub fn combine(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> u8 {
    let components = [
        (Some(breakdown.academic), weights.academic),
        (breakdown.program, weights.program),
        (breakdown.city, weights.city),
        (breakdown.institution_type, weights.institution_type),
        (breakdown.entry_test, weights.entry_test),
    ];

    let (weighted, active) = components
        .iter()
        .filter_map(|(credit, weight)| credit.map(|c| (c * weight, *weight)))
        .fold((0.0, 0.0), |(sum, total), (c, w)| (sum + c, total + w));

    if active <= 0.0 {
        return 0;
    }

    let total_score = weighted / active * 100.0;
    total_score.clamp(0.0, 100.0).round() as u8
}
