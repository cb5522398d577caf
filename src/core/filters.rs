use crate::models::{NormalizedMarks, ProgramOffering, StudentProfile, UniversityCatalogEntry};

/// Outcome of the eligibility filter
#[derive(Debug)]
pub struct FilterOutcome<'a> {
    pub candidates: Vec<&'a UniversityCatalogEntry>,
    /// True when the program constraint was dropped to avoid an empty result
    pub program_relaxed: bool,
    /// True when no program was preferred but every candidate failed its
    /// entry requirement, so requirements were waived
    pub eligibility_relaxed: bool,
}

/// Case-insensitive, bidirectional substring match between a city and a preference
///
/// "Lahore" matches "Lahore Cantt" and vice versa.
#[inline]
pub fn city_matches(city: &str, preference: &str) -> bool {
    let city = city.trim().to_lowercase();
    let preference = preference.trim().to_lowercase();
    if city.is_empty() || preference.is_empty() {
        return false;
    }
    city.contains(&preference) || preference.contains(&city)
}

/// Preferred city the entry matches, if any
pub fn matched_city<'p>(entry: &UniversityCatalogEntry, preferred: &'p [String]) -> Option<&'p str> {
    preferred
        .iter()
        .find(|p| city_matches(&entry.city, p))
        .map(String::as_str)
}

/// Check the non-relaxing constraints: city and institution type
///
/// This is Stage 1 of the eligibility filter.
#[inline]
pub fn matches_location_and_type(entry: &UniversityCatalogEntry, profile: &StudentProfile) -> bool {
    if !profile.preferred_cities.is_empty()
        && matched_city(entry, &profile.preferred_cities).is_none() {
        return false;
    }

    if let Some(required) = profile.type_preference.required() {
        if entry.institution_type != required {
            return false;
        }
    }

    true
}

/// Lowercased, deduplicated program preferences
pub fn program_set(profile: &StudentProfile) -> Vec<String> {
    let mut set: Vec<String> = profile
        .preferred_programs
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    set.sort();
    set.dedup();
    set
}

/// Whether the student meets an offering's hard entry requirement
#[inline]
pub fn meets_requirement(offering: &ProgramOffering, marks: &NormalizedMarks) -> bool {
    offering
        .minimum_percentage
        .map_or(true, |min| marks.aggregate >= min)
}

/// Offerings of an entry that are both wanted and attainable
///
/// With no program preferences every attainable offering qualifies.
pub fn qualifying_offerings<'a>(
    entry: &'a UniversityCatalogEntry,
    programs: &[String],
    marks: &NormalizedMarks,
) -> Vec<&'a ProgramOffering> {
    entry
        .programs
        .iter()
        .filter(|o| programs.is_empty() || programs.iter().any(|p| o.is_category(p)))
        .filter(|o| meets_requirement(o, marks))
        .collect()
}

/// Check the program constraint (Stage 2)
///
/// An entry without any listed offerings only passes when no programs were requested.
#[inline]
pub fn matches_programs(
    entry: &UniversityCatalogEntry,
    programs: &[String],
    marks: &NormalizedMarks,
) -> bool {
    if entry.programs.is_empty() {
        return programs.is_empty();
    }
    !qualifying_offerings(entry, programs, marks).is_empty()
}

/// Reduce the catalog to plausible candidates
///
/// City and type are strict. The program/eligibility stage is relaxed when it
/// would leave nothing, so results stay confined to the chosen cities and type.
/// Which flag is raised depends on whether a program constraint existed.
pub fn filter_candidates<'a>(
    catalog: &'a [UniversityCatalogEntry],
    profile: &StudentProfile,
    marks: &NormalizedMarks,
) -> FilterOutcome<'a> {
    let base: Vec<&UniversityCatalogEntry> = catalog
        .iter()
        .filter(|entry| matches_location_and_type(entry, profile))
        .collect();

    let programs = program_set(profile);
    let strict: Vec<&UniversityCatalogEntry> = base
        .iter()
        .copied()
        .filter(|entry| matches_programs(entry, &programs, marks))
        .collect();

    tracing::debug!(
        "Eligibility filter: {} in catalog, {} after city/type, {} after programs",
        catalog.len(),
        base.len(),
        strict.len()
    );

    if strict.is_empty() && !base.is_empty() {
        let program_relaxed = !programs.is_empty();
        if program_relaxed {
            tracing::debug!("No program matches, relaxing program constraint");
        } else {
            tracing::debug!("No candidate meets its entry requirement, waiving requirements");
        }
        return FilterOutcome {
            candidates: base,
            program_relaxed,
            eligibility_relaxed: !program_relaxed,
        };
    }

    FilterOutcome {
        candidates: strict,
        program_relaxed: false,
        eligibility_relaxed: false,
    }
}
