//! Rule blocks the compiler folds over a profile accumulator.
//!
//! Blocks run unconditionally in the order of [`RULE_BLOCKS`]. Each block may
//! only raise minimums, tighten caps, latch flags or append notes, so the
//! contribution of one answer composes additively with every other. The one
//! sanctioned exception is the terrain tier inside the power block, which is
//! a single tier selection rather than a sequence of overwrites.

use super::RequirementProfile;
use crate::domain::{FuelType, ReliabilityPriority, Segment};
use crate::survey::{CommuteType, SurveyAnswers, Terrain, TowingNeed, VacationStyle, WinterSeverity};

pub(crate) type RuleBlock = fn(&SurveyAnswers, &mut RequirementProfile);

/// Fixed execution order. Later blocks may read fields earlier blocks wrote
/// (the power block reads the recommended trunk, the fuel block reads the
/// budget, the segment block reads the third-row and drivetrain flags).
pub(crate) const RULE_BLOCKS: &[RuleBlock] = &[
    trunk_capacity_block,
    seating_block,
    power_block,
    towing_block,
    clearance_drivetrain_block,
    budget_block,
    fuel_type_block,
    segment_block,
    reliability_block,
];

pub(crate) const BASE_MIN_TRUNK_L: u32 = 250;
pub(crate) const BASE_RECOMMENDED_TRUNK_L: u32 = 400;
pub(crate) const MIN_SEATS_FLOOR: u32 = 5;
pub(crate) const BASE_MIN_POWER_KW: u32 = 90;
pub(crate) const BASE_RECOMMENDED_POWER_KW: u32 = 110;
pub(crate) const BASE_MAX_ACCELERATION_SEC: f32 = 12.0;
pub(crate) const BASE_GROUND_CLEARANCE_MM: u32 = 140;
pub(crate) const BASE_MAX_CONSUMPTION_L: f32 = 9.0;

/// Fixed defaults when no monthly payment was answered, in local price units.
pub(crate) const DEFAULT_MAX_BUDGET: u32 = 80_000;
pub(crate) const DEFAULT_RECOMMENDED_BUDGET: u32 = 60_000;

/// Amortization horizon for turning a monthly payment into a purchase
/// ceiling. Hand-tuned calibration values, not market data.
const BUDGET_MONTHS_MAX: u32 = 48;
const BUDGET_MONTHS_RECOMMENDED: u32 = 42;

const FUEL_PRICE_PER_L: f32 = 1.6;
const ASSUMED_CONSUMPTION_L: f32 = 7.5;
const INSURANCE_MONTHLY: u32 = 110;
const SERVICE_MONTHLY: u32 = 55;

const DIESEL_DISTANCE_KM: u32 = 1_500;
const HYBRID_DISTANCE_KM: u32 = 2_200;
const HYBRID_BUDGET_FLOOR: u32 = 70_000;
const ECONOMY_CONSUMPTION_CAP_L: f32 = 7.0;

const PAYLOAD_BUMP_THRESHOLD_KG: u32 = 500;
const PERSON_WEIGHT_KG: u32 = 75;
const HIGHWAY_MIN_POWER_KW: u32 = 120;
const HIGHWAY_MAX_ACCELERATION_SEC: f32 = 10.0;

const LONG_OWNERSHIP_YEARS: u32 = 8;

fn trunk_capacity_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    let (household_min, household_rec) = match answers.household() {
        0..=2 => (0, 0),
        3..=4 => (70, 100),
        5..=6 => (120, 180),
        _ => (180, 250),
    };
    profile.add_trunk(household_min, household_rec);

    if answers.weekly_groceries {
        profile.add_trunk(30, 50);
        profile.note("Weekly grocery runs for the household were factored into trunk capacity.");
    }
    if answers.stroller {
        profile.add_trunk(60, 80);
        profile.note("A stroller needs a wide, flat trunk floor; capacity raised accordingly.");
    }
    if answers.sports_equipment {
        profile.add_trunk(50, 80);
        profile.note("Regular sports equipment transport added to the trunk requirement.");
    }
    if answers.pet {
        profile.add_trunk(40, 70);
        profile.note("Travelling with a pet reserves a separated trunk area.");
    }
    match answers.vacation_style {
        VacationStyle::None => {}
        VacationStyle::WeekendTrips => {
            profile.add_trunk(30, 50);
            profile.note("Weekend getaways add luggage space on top of daily needs.");
        }
        VacationStyle::RoadTrips => {
            profile.add_trunk(80, 120);
            profile.note("Long road-trip vacations require substantial luggage capacity.");
        }
    }
}

fn seating_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    let household = answers.household();
    profile.min_seats = profile.min_seats.max(household);

    let third_row = household > 5 || (household == 5 && answers.children_count >= 3);
    if third_row {
        profile.third_row_required = true;
        profile.min_seats = profile.min_seats.max(7);
        profile.note("Household size calls for a third seat row.");
    }
}

fn power_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    // Single tier selection; exactly one terrain tier is active and it
    // replaces the flat-terrain base outright.
    let (min_power, recommended_power, max_accel) = match answers.terrain {
        Terrain::Flat => (
            BASE_MIN_POWER_KW,
            BASE_RECOMMENDED_POWER_KW,
            BASE_MAX_ACCELERATION_SEC,
        ),
        Terrain::Moderate => (110, 130, 11.0),
        Terrain::Mountainous => (130, 160, 9.5),
    };
    profile.min_power_kw = min_power;
    profile.recommended_power_kw = recommended_power;
    profile.max_acceleration_sec = max_accel;
    if answers.terrain == Terrain::Mountainous {
        profile.note("Mountainous terrain demands reserves of engine power.");
    }

    // Saturating: any serde-valid answer compiles, however implausible.
    let payload_kg = answers
        .household()
        .saturating_mul(PERSON_WEIGHT_KG)
        .saturating_add(profile.recommended_trunk_capacity_l / 2);
    if payload_kg > PAYLOAD_BUMP_THRESHOLD_KG {
        profile.min_power_kw += 20;
        profile.recommended_power_kw += 20;
        profile.max_acceleration_sec -= 1.0;
        profile.note(format!(
            "An estimated {payload_kg} kg regular payload raises the power requirement."
        ));
    }

    // Clamps, not reassignment, so the highway rule stays monotonic over
    // whatever the tier and payload rules produced.
    if answers.commute == CommuteType::Highway {
        profile.min_power_kw = profile.min_power_kw.max(HIGHWAY_MIN_POWER_KW);
        profile.max_acceleration_sec = profile
            .max_acceleration_sec
            .min(HIGHWAY_MAX_ACCELERATION_SEC);
        profile.note("Frequent highway driving needs confident overtaking performance.");
    }
}

fn towing_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    profile.towing_capacity_kg = match answers.towing {
        TowingNeed::None => 0,
        TowingNeed::Occasional => 750,
        TowingNeed::Regular => 1_500,
    };
    if answers.towing != TowingNeed::None {
        profile.note(format!(
            "Trailer use requires at least {} kg of braked towing capacity.",
            profile.towing_capacity_kg
        ));
    }
}

fn clearance_drivetrain_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    if answers.unpaved_roads {
        profile.min_ground_clearance_mm = profile.min_ground_clearance_mm.max(180);
        profile.all_wheel_drive_required = true;
        profile.note("Regular unpaved-road driving raises ground clearance and requires AWD.");
    }
    match answers.winter_severity {
        WinterSeverity::Mild => {}
        WinterSeverity::Moderate => {
            profile.winter_tires_required = true;
            profile.note("Seasonal winter conditions require a winter tire set.");
        }
        WinterSeverity::Harsh => {
            profile.min_ground_clearance_mm = profile.min_ground_clearance_mm.max(160);
            profile.all_wheel_drive_required = true;
            profile.winter_tires_required = true;
            profile.note("Harsh winters require all-wheel drive and winter tires.");
        }
    }
}

fn budget_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    if let Some(monthly_payment) = answers.monthly_payment {
        profile.max_budget = monthly_payment.saturating_mul(BUDGET_MONTHS_MAX);
        profile.recommended_budget = monthly_payment.saturating_mul(BUDGET_MONTHS_RECOMMENDED);
        profile.note(format!(
            "A {monthly_payment}/month payment supports a purchase budget up to {}.",
            profile.max_budget
        ));
    }

    let monthly_km = answers.monthly_distance_km();
    let fuel_cost = monthly_km as f32 / 100.0 * ASSUMED_CONSUMPTION_L * FUEL_PRICE_PER_L;
    profile.max_monthly_cost_estimate =
        (fuel_cost.round() as u32).saturating_add(INSURANCE_MONTHLY + SERVICE_MONTHLY);
    profile.monthly_distance_km = monthly_km;
}

/// Exhaustive distance/budget decision table; every combination reaches
/// exactly one terminal branch and appends exactly one note.
fn fuel_type_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    let monthly_km = answers.monthly_distance_km();

    if monthly_km > HYBRID_DISTANCE_KM && profile.max_budget > HYBRID_BUDGET_FLOOR {
        profile.recommended_fuel_type = FuelType::Hybrid;
        profile.preferred_fuel_types = vec![FuelType::Hybrid, FuelType::Petrol];
        profile.note(format!(
            "Very high monthly distance ({monthly_km} km) with a sufficient budget favors a hybrid."
        ));
    } else if monthly_km > DIESEL_DISTANCE_KM {
        profile.recommended_fuel_type = FuelType::Diesel;
        profile.preferred_fuel_types = vec![FuelType::Diesel, FuelType::Hybrid];
        profile.note(format!(
            "High monthly distance ({monthly_km} km) makes a diesel the economical choice."
        ));
    } else {
        profile.recommended_fuel_type = FuelType::Petrol;
        profile.preferred_fuel_types = vec![FuelType::Petrol, FuelType::Hybrid];
        profile.note("Moderate driving distance is best served by a petrol engine.");
    }

    if monthly_km > DIESEL_DISTANCE_KM {
        profile.max_fuel_consumption_l_per_100km = profile
            .max_fuel_consumption_l_per_100km
            .min(ECONOMY_CONSUMPTION_CAP_L);
    }
}

fn segment_block(_answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    let chain: &[Segment] = if profile.third_row_required {
        &[Segment::Van, Segment::LargeSuv]
    } else if profile.recommended_trunk_capacity_l > 600 {
        &[Segment::C, Segment::CSuv, Segment::D]
    } else if profile.recommended_trunk_capacity_l > 450 {
        &[Segment::B, Segment::C, Segment::BSuv, Segment::CSuv]
    } else {
        &[Segment::A, Segment::B]
    };
    for segment in chain {
        profile.push_segment(*segment);
    }

    if profile.all_wheel_drive_required {
        insert_suv_after_first_plain(&mut profile.recommended_segments);
    }

    if let Some(first) = profile.recommended_segments.first() {
        profile.recommended_body_style = first.typical_body_style();
    }
}

/// Places the SUV counterpart of the first plain segment right after it,
/// unless an SUV entry is already adjacent or present elsewhere.
fn insert_suv_after_first_plain(segments: &mut Vec<Segment>) {
    let Some(position) = segments.iter().position(|segment| segment.is_plain()) else {
        return;
    };
    let Some(counterpart) = segments[position].suv_counterpart() else {
        return;
    };
    if segments.contains(&counterpart) {
        return;
    }
    segments.insert(position + 1, counterpart);
}

fn reliability_block(answers: &SurveyAnswers, profile: &mut RequirementProfile) {
    let long_ownership = answers.planned_ownership_years >= LONG_OWNERSHIP_YEARS;
    let high = !answers.mechanical_skill || long_ownership || answers.reliability_concern;
    profile.reliability_priority = if high {
        ReliabilityPriority::High
    } else {
        ReliabilityPriority::Medium
    };
    if high {
        profile.note("Reliability weighted highly based on ownership plans and self-service skill.");
    }
}
