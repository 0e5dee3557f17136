use super::rules::RULE_BLOCKS;
use super::RequirementProfile;
use crate::survey::SurveyAnswers;
use thiserror::Error;

/// Compilation rejects only the hard-required answers; everything optional
/// falls back to a documented default and skips its rule contribution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("household size is required and must be at least 1")]
    MissingHouseholdSize,
    #[error("monthly payment, when given, must be a positive amount")]
    InvalidMonthlyPayment,
}

/// Compiles a survey answer set into a [`RequirementProfile`].
///
/// Deterministic and free of clock or randomness dependence: identical
/// answers always produce an identical profile. Rule blocks run in a fixed
/// order and each only raises minimums, tightens caps or latches flags, so
/// answering one more optional question never weakens the profile.
pub fn compile(answers: &SurveyAnswers) -> Result<RequirementProfile, CompileError> {
    match answers.household_size {
        None | Some(0) => return Err(CompileError::MissingHouseholdSize),
        Some(_) => {}
    }
    if answers.monthly_payment == Some(0) {
        return Err(CompileError::InvalidMonthlyPayment);
    }

    let mut profile = RequirementProfile::baseline();
    for block in RULE_BLOCKS {
        block(answers, &mut profile);
    }
    profile.finalize();
    Ok(profile)
}
