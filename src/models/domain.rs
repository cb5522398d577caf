use serde::{Deserialize, Serialize};
use std::fmt;

/// Default closing merit (percent) for offerings that do not publish one
pub const DEFAULT_MERIT_THRESHOLD: f64 = 60.0;

/// Default total marks for matric and intermediate results
pub const DEFAULT_MARKS_TOTAL: f64 = 1200.0;

/// Default total marks for an entry test
pub const DEFAULT_ENTRY_TEST_TOTAL: f64 = 200.0;

/// Public or private institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionType {
    #[serde(alias = "Public")]
    Public,
    #[serde(alias = "Private")]
    Private,
}

impl fmt::Display for InstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstitutionType::Public => write!(f, "public"),
            InstitutionType::Private => write!(f, "private"),
        }
    }
}

/// Student's stated preference on institution type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypePreference {
    #[serde(alias = "public")]
    Public,
    #[serde(alias = "private")]
    Private,
    #[default]
    #[serde(alias = "both")]
    Both,
}

impl TypePreference {
    /// The institution type this preference confines results to, if any
    pub fn required(&self) -> Option<InstitutionType> {
        match self {
            TypePreference::Public => Some(InstitutionType::Public),
            TypePreference::Private => Some(InstitutionType::Private),
            TypePreference::Both => None,
        }
    }
}

/// A program category offered by a university
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramOffering {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Typical closing merit in percent
    #[serde(rename = "closingMerit", default, skip_serializing_if = "Option::is_none")]
    pub closing_merit: Option<f64>,
    /// Hard entry requirement in percent
    #[serde(rename = "minimumPercentage", default, skip_serializing_if = "Option::is_none")]
    pub minimum_percentage: Option<f64>,
}

impl ProgramOffering {
    /// Case-insensitive category comparison against an already-lowercased label
    pub fn is_category(&self, lowered: &str) -> bool {
        self.category.trim().to_lowercase() == lowered
    }
}

/// Read-only university record from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityCatalogEntry {
    #[serde(rename = "shortName")]
    pub short_name: String,
    pub name: String,
    pub city: String,
    #[serde(rename = "type")]
    pub institution_type: InstitutionType,
    #[serde(rename = "establishedYear")]
    pub established_year: u16,
    #[serde(default)]
    pub campuses: Vec<String>,
    #[serde(rename = "estimatedFeeRange", default, skip_serializing_if = "Option::is_none")]
    pub estimated_fee_range: Option<String>,
    #[serde(rename = "rankingNational", default, skip_serializing_if = "Option::is_none")]
    pub ranking_national: Option<u32>,
    #[serde(default)]
    pub programs: Vec<ProgramOffering>,
}

/// An obtained/total pair before normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marks {
    pub obtained: f64,
    pub total: f64,
}

impl Marks {
    pub fn new(obtained: f64, total: f64) -> Self {
        Self { obtained, total }
    }
}

/// Per-request student input as seen by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub matric: Marks,
    pub inter: Marks,
    /// Absent when the student has not taken an entry test
    pub entry_test: Option<Marks>,
    pub preferred_programs: Vec<String>,
    pub preferred_cities: Vec<String>,
    pub type_preference: TypePreference,
}

/// Student percentages on a common 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedMarks {
    pub matric: f64,
    pub inter: f64,
    pub entry_test: Option<f64>,
    /// Weighted matric/inter aggregate compared against merit thresholds
    pub aggregate: f64,
}

/// Ranked recommendation handed back to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub university: UniversityCatalogEntry,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// Scoring weights
///
/// Non-increasing in importance: academic, program, city, type, entry test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub academic: f64,
    pub program: f64,
    pub city: f64,
    pub institution_type: f64,
    pub entry_test: f64,
}

impl ScoringWeights {
    /// Finite, non-negative, academic positive, and non-increasing from
    /// academic down to entry test
    pub fn is_valid(&self) -> bool {
        let all = [
            self.academic,
            self.program,
            self.city,
            self.institution_type,
            self.entry_test,
        ];
        all.iter().all(|w| w.is_finite() && *w >= 0.0)
            && self.academic > 0.0
            && all.windows(2).all(|pair| pair[0] >= pair[1])
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            academic: 0.40,
            program: 0.25,
            city: 0.15,
            institution_type: 0.10,
            entry_test: 0.10,
        }
    }
}

/// Tunables for the academic-margin component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcademicPolicy {
    /// Margin (percentage points) above threshold that earns full comfort credit
    pub comfort_margin: f64,
    /// Threshold assumed for offerings with no published closing merit
    pub default_threshold: f64,
}

impl Default for AcademicPolicy {
    fn default() -> Self {
        Self {
            comfort_margin: 5.0,
            default_threshold: DEFAULT_MERIT_THRESHOLD,
        }
    }
}
