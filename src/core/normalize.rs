use crate::core::EngineError;
use crate::models::{Marks, NormalizedMarks, StudentProfile};

/// Share of the matric percentage in the student aggregate
pub const MATRIC_SHARE: f64 = 0.30;

/// Share of the intermediate percentage in the student aggregate
pub const INTER_SHARE: f64 = 0.70;

/// Convert an obtained/total pair into a percentage in `[0, 100]`
///
/// Totals are always caller-supplied. Invalid pairs fail instead of being
/// clamped so that a caller bug cannot surface as a plausible score.
pub fn normalize(obtained: f64, total: f64) -> Result<f64, EngineError> {
    if !total.is_finite() || total <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "total must be a positive number, got {}",
            total
        )));
    }
    if !obtained.is_finite() || obtained < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "obtained marks must be a non-negative number, got {}",
            obtained
        )));
    }
    if obtained > total {
        return Err(EngineError::InvalidInput(format!(
            "obtained marks {} exceed total {}",
            obtained, total
        )));
    }

    Ok((obtained / total * 100.0).clamp(0.0, 100.0))
}

fn normalize_labeled(label: &str, marks: Marks) -> Result<f64, EngineError> {
    normalize(marks.obtained, marks.total)
        .map_err(|EngineError::InvalidInput(msg)| EngineError::InvalidInput(format!("{}: {}", label, msg)))
}

/// Normalize every mark pair on the profile
///
/// The entry test is only normalized when the profile carries one; it is never
/// defaulted.
pub fn normalize_profile(profile: &StudentProfile) -> Result<NormalizedMarks, EngineError> {
    let matric = normalize_labeled("matric", profile.matric)?;
    let inter = normalize_labeled("inter", profile.inter)?;
    let entry_test = profile
        .entry_test
        .map(|marks| normalize_labeled("entry test", marks))
        .transpose()?;

    Ok(NormalizedMarks {
        matric,
        inter,
        entry_test,
        aggregate: matric * MATRIC_SHARE + inter * INTER_SHARE,
    })
}
