//! Additive rubric for priced, mileage-bearing market listings.
//!
//! Starts from a neutral baseline of 50 and applies bonuses and penalties,
//! clamping the result to 0..=100 at the end. Unknown fields (the 0
//! sentinel) contribute nothing either way. Point values are hand-tuned
//! calibration constants.

use crate::domain::{BodyStyle, CandidateRecord, DriveType, FuelType, Transmission};
use crate::profile::RequirementProfile;

const BASELINE: i32 = 50;

const POWER_DEFICIT_SCALE: f32 = 25.0;
const POWER_SURPLUS_CAP: i32 = 20;

const AGE_FRESH: i32 = 10;
const AGE_RECENT: i32 = 6;
const AGE_ACCEPTABLE: i32 = 3;
const AGE_PENALTY: i32 = -5;

const MILEAGE_LOW: i32 = 10;
const MILEAGE_MEDIUM: i32 = 6;
const MILEAGE_HIGH: i32 = 2;
const MILEAGE_PENALTY: i32 = -5;

const AUTOMATIC_BONUS: i32 = 5;
const PETROL_BONUS: i32 = 3;
const DIESEL_BONUS: i32 = 2;

const BODY_STYLE_MATCH: i32 = 8;
const BODY_STYLE_MISMATCH: i32 = -3;

const AWD_MET: i32 = 15;
const AWD_MISSING_ON_SUV: i32 = -20;
const AWD_MISSING: i32 = -10;

pub(super) fn score(
    candidate: &CandidateRecord,
    profile: &RequirementProfile,
    current_year: i32,
) -> (u32, Vec<String>) {
    let mut warnings = Vec::new();
    let mut score = BASELINE;

    score += power_adjustment(candidate, profile, &mut warnings);
    score += age_adjustment(candidate, current_year, &mut warnings);
    score += mileage_adjustment(candidate, &mut warnings);

    if candidate.transmission == Transmission::Automatic {
        score += AUTOMATIC_BONUS;
    }
    score += match candidate.fuel_type {
        FuelType::Petrol => PETROL_BONUS,
        FuelType::Diesel => DIESEL_BONUS,
        _ => 0,
    };

    score += body_style_adjustment(candidate, profile);
    score += drivetrain_adjustment(candidate, profile, &mut warnings);

    (score.clamp(0, 100) as u32, warnings)
}

fn power_adjustment(
    candidate: &CandidateRecord,
    profile: &RequirementProfile,
    warnings: &mut Vec<String>,
) -> i32 {
    if candidate.power_kw == 0 || profile.min_power_kw == 0 {
        return 0;
    }
    if candidate.power_kw < profile.min_power_kw {
        let deficit = profile.min_power_kw - candidate.power_kw;
        warnings.push(format!(
            "Engine output {} kW is below the {} kW requirement.",
            candidate.power_kw, profile.min_power_kw
        ));
        let penalty =
            (deficit as f32 / profile.min_power_kw as f32 * POWER_DEFICIT_SCALE).round() as i32;
        return -penalty;
    }
    let surplus = (candidate.power_kw - profile.min_power_kw) as i32;
    (surplus / 10).min(POWER_SURPLUS_CAP)
}

fn age_adjustment(candidate: &CandidateRecord, current_year: i32, warnings: &mut Vec<String>) -> i32 {
    if candidate.model_year == 0 {
        return 0;
    }
    let age = current_year - candidate.model_year;
    if age <= 3 {
        AGE_FRESH
    } else if age <= 7 {
        AGE_RECENT
    } else if age <= 10 {
        AGE_ACCEPTABLE
    } else {
        warnings.push(format!("At {age} years old, major wear items may be due."));
        AGE_PENALTY
    }
}

fn mileage_adjustment(candidate: &CandidateRecord, warnings: &mut Vec<String>) -> i32 {
    if candidate.mileage_km == 0 {
        return 0;
    }
    match candidate.mileage_km {
        0..=50_000 => MILEAGE_LOW,
        50_001..=100_000 => MILEAGE_MEDIUM,
        100_001..=150_000 => MILEAGE_HIGH,
        _ => {
            warnings.push(format!(
                "{} km on the clock is well past the comfortable range.",
                candidate.mileage_km
            ));
            MILEAGE_PENALTY
        }
    }
}

fn body_style_adjustment(candidate: &CandidateRecord, profile: &RequirementProfile) -> i32 {
    if candidate.body_style == BodyStyle::Unknown {
        return 0;
    }
    if candidate.body_style == profile.recommended_body_style {
        BODY_STYLE_MATCH
    } else {
        BODY_STYLE_MISMATCH
    }
}

fn drivetrain_adjustment(
    candidate: &CandidateRecord,
    profile: &RequirementProfile,
    warnings: &mut Vec<String>,
) -> i32 {
    if !profile.all_wheel_drive_required {
        return 0;
    }
    if candidate.drive_type == DriveType::AllWheel {
        return AWD_MET;
    }
    if candidate.body_style == BodyStyle::Suv {
        // An SUV without all-wheel drive defeats the reason it was required.
        warnings.push("SUV body without the required all-wheel drive.".to_string());
        AWD_MISSING_ON_SUV
    } else {
        warnings.push("All-wheel drive required but not fitted.".to_string());
        AWD_MISSING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateSource;
    use crate::scoring::tests::candidate;
    use crate::survey::SurveyAnswers;

    fn profile() -> RequirementProfile {
        crate::profile::compile(&SurveyAnswers {
            household_size: Some(2),
            ..Default::default()
        })
        .expect("profile compiles")
    }

    #[test]
    fn stale_high_mileage_underpowered_listing_scores_low() {
        let profile = profile();
        let mut record = candidate("classifieds:1", CandidateSource::Classifieds);
        record.model_year = 2026 - 12;
        record.mileage_km = 220_000;
        record.power_kw = profile.min_power_kw / 2;

        let (score, warnings) = score(&record, &profile, 2026);
        assert!(score < 50, "expected below baseline, got {score}");
        assert!(warnings.len() >= 3, "age, mileage and power should warn");
    }

    #[test]
    fn surplus_power_bonus_is_capped() {
        let profile = profile();
        let mut record = candidate("classifieds:2", CandidateSource::Classifieds);
        record.power_kw = profile.min_power_kw + 400;

        let mut warnings = Vec::new();
        assert_eq!(
            power_adjustment(&record, &profile, &mut warnings),
            POWER_SURPLUS_CAP
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn power_deficit_penalty_is_proportional() {
        let mut profile = profile();
        profile.min_power_kw = 100;
        let mut record = candidate("classifieds:3", CandidateSource::Classifieds);
        record.power_kw = 50;

        let mut warnings = Vec::new();
        assert_eq!(power_adjustment(&record, &profile, &mut warnings), -13);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unknown_mileage_is_not_penalized() {
        let mut warnings = Vec::new();
        let mut record = candidate("classifieds:4", CandidateSource::Classifieds);
        record.mileage_km = 0;
        assert_eq!(mileage_adjustment(&record, &mut warnings), 0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_awd_on_suv_is_penalized_hardest() {
        let mut profile = profile();
        profile.all_wheel_drive_required = true;

        let mut record = candidate("classifieds:5", CandidateSource::Classifieds);
        record.body_style = BodyStyle::Suv;
        record.drive_type = DriveType::FrontWheel;

        let mut warnings = Vec::new();
        assert_eq!(
            drivetrain_adjustment(&record, &profile, &mut warnings),
            AWD_MISSING_ON_SUV
        );
        assert_eq!(warnings.len(), 1);

        record.drive_type = DriveType::AllWheel;
        assert_eq!(
            drivetrain_adjustment(&record, &profile, &mut warnings),
            AWD_MET
        );
    }

    #[test]
    fn fresh_low_mileage_automatic_match_clears_threshold() {
        let profile = profile();
        let mut record = candidate("classifieds:6", CandidateSource::Classifieds);
        record.model_year = 2024;
        record.mileage_km = 30_000;
        record.transmission = Transmission::Automatic;
        record.body_style = profile.recommended_body_style;
        record.power_kw = profile.min_power_kw + 50;

        let (score, warnings) = score(&record, &profile, 2026);
        assert!(score >= crate::scoring::MATCH_THRESHOLD);
        assert!(warnings.is_empty());
    }
}
