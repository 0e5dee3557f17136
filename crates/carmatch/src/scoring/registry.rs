//! Fixed-weight rubric for specification-only registry records.
//!
//! Weights sum to 100: power 40, seating 40, fuel preference 20. Unknown
//! values (the 0 sentinel) earn a flat middling credit instead of a harsh
//! penalty, since registry data gaps say nothing about the vehicle itself.
//! The tier constants are hand-tuned calibration values.

use crate::domain::{CandidateRecord, FuelType};
use crate::profile::RequirementProfile;

const POWER_FULL: u32 = 40;
const POWER_STRONG: u32 = 30;
const POWER_PARTIAL: u32 = 22;
const POWER_WEAK: u32 = 15;
const POWER_UNKNOWN: u32 = 25;

const SEATS_FULL: u32 = 40;
const SEATS_NO_THIRD_ROW: u32 = 32;
const SEATS_NEAR_MISS: u32 = 26;
const SEATS_WEAK: u32 = 18;
const SEATS_UNKNOWN: u32 = 24;

const FUEL_EXACT: u32 = 20;
const FUEL_EQUIVALENT: u32 = 15;
const FUEL_OTHER: u32 = 10;

const MAX_POINTS: u32 = POWER_FULL + SEATS_FULL + FUEL_EXACT;

pub(super) fn score(
    candidate: &CandidateRecord,
    profile: &RequirementProfile,
) -> (u32, Vec<String>) {
    let mut warnings = Vec::new();

    let power_points = power_points(candidate, profile, &mut warnings);
    let seat_points = seat_points(candidate, profile, &mut warnings);
    let fuel_points = fuel_points(candidate, profile, &mut warnings);

    let sum = power_points + seat_points + fuel_points;
    let score = (sum * 100 + MAX_POINTS / 2) / MAX_POINTS;
    (score, warnings)
}

fn power_points(
    candidate: &CandidateRecord,
    profile: &RequirementProfile,
    warnings: &mut Vec<String>,
) -> u32 {
    if candidate.power_kw == 0 {
        return POWER_UNKNOWN;
    }
    let min_power = profile.min_power_kw;
    if candidate.power_kw >= min_power {
        POWER_FULL
    } else if candidate.power_kw * 10 >= min_power * 8 {
        POWER_STRONG
    } else if candidate.power_kw * 10 >= min_power * 6 {
        POWER_PARTIAL
    } else {
        warnings.push(format!(
            "Engine output {} kW falls well short of the {} kW requirement.",
            candidate.power_kw, min_power
        ));
        POWER_WEAK
    }
}

fn seat_points(
    candidate: &CandidateRecord,
    profile: &RequirementProfile,
    warnings: &mut Vec<String>,
) -> u32 {
    if candidate.seat_count == 0 {
        return SEATS_UNKNOWN;
    }
    if candidate.seat_count >= profile.min_seats {
        // Full credit needs the numeric floor and the third-row flag to
        // agree; a sufficient count without the row is still a discount.
        if profile.third_row_required && !candidate.has_third_row {
            warnings.push(format!(
                "{} seats but no third row, which the household requires.",
                candidate.seat_count
            ));
            return SEATS_WEAK;
        }
        if !profile.third_row_required && !candidate.has_third_row {
            return SEATS_NO_THIRD_ROW;
        }
        return SEATS_FULL;
    }
    if candidate.seat_count + 1 >= profile.min_seats {
        return SEATS_NEAR_MISS;
    }
    warnings.push(format!(
        "Only {} seats against a minimum of {}.",
        candidate.seat_count, profile.min_seats
    ));
    SEATS_WEAK
}

fn fuel_points(
    candidate: &CandidateRecord,
    profile: &RequirementProfile,
    warnings: &mut Vec<String>,
) -> u32 {
    let Some(first_preference) = profile.preferred_fuel_types.first() else {
        return FUEL_OTHER;
    };
    if candidate.fuel_type == *first_preference {
        return FUEL_EXACT;
    }
    if registry_equivalent(*first_preference, candidate.fuel_type) {
        return FUEL_EQUIVALENT;
    }
    warnings.push(format!(
        "Fuel type {} is not among the preferred types.",
        candidate.fuel_type.label()
    ));
    FUEL_OTHER
}

/// Registry fuel codes that are close enough to the stated preference to
/// earn partial credit. Plug-in hybrids satisfy both hybrid and electric
/// preferences.
fn registry_equivalent(preference: FuelType, candidate: FuelType) -> bool {
    matches!(
        (preference, candidate),
        (FuelType::Hybrid, FuelType::PluginHybrid)
            | (FuelType::Electric, FuelType::PluginHybrid)
            | (FuelType::PluginHybrid, FuelType::Hybrid)
    )
}
