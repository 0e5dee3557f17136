mod compiler;
mod rules;

pub use compiler::{compile, CompileError};

use crate::domain::{BodyStyle, FuelType, ReliabilityPriority, Segment};
use serde::{Deserialize, Serialize};

/// Objective vehicle specification compiled from one survey session.
///
/// Produced once by [`compile`] and never mutated afterwards; consumed by the
/// scorer and the data gateway. All `recommended_*` numeric fields are at
/// least their paired `min_*` counterpart, `recommended_budget` never exceeds
/// `max_budget`, and a required third row implies at least seven seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProfile {
    pub min_trunk_capacity_l: u32,
    pub recommended_trunk_capacity_l: u32,
    pub min_seats: u32,
    pub min_power_kw: u32,
    pub recommended_power_kw: u32,
    /// 0-100 km/h ceiling in seconds; lower is faster.
    pub max_acceleration_sec: f32,
    pub min_ground_clearance_mm: u32,
    pub towing_capacity_kg: u32,
    pub max_fuel_consumption_l_per_100km: f32,
    pub max_budget: u32,
    pub recommended_budget: u32,
    pub max_monthly_cost_estimate: u32,
    pub third_row_required: bool,
    pub all_wheel_drive_required: bool,
    pub winter_tires_required: bool,
    pub recommended_fuel_type: FuelType,
    pub recommended_body_style: BodyStyle,
    pub reliability_priority: ReliabilityPriority,
    /// Preference-ranked segments, duplicate-free.
    pub recommended_segments: Vec<Segment>,
    /// Preference-ranked acceptable fuel types.
    pub preferred_fuel_types: Vec<FuelType>,
    /// Human-readable justification trail, one entry per triggered rule.
    pub lifestyle_notes: Vec<String>,
    /// Derived monthly driving distance the fuel inference was based on.
    pub monthly_distance_km: u32,
}

impl RequirementProfile {
    /// Starting point every rule block accumulates onto.
    pub(crate) fn baseline() -> Self {
        Self {
            min_trunk_capacity_l: rules::BASE_MIN_TRUNK_L,
            recommended_trunk_capacity_l: rules::BASE_RECOMMENDED_TRUNK_L,
            min_seats: rules::MIN_SEATS_FLOOR,
            min_power_kw: rules::BASE_MIN_POWER_KW,
            recommended_power_kw: rules::BASE_RECOMMENDED_POWER_KW,
            max_acceleration_sec: rules::BASE_MAX_ACCELERATION_SEC,
            min_ground_clearance_mm: rules::BASE_GROUND_CLEARANCE_MM,
            towing_capacity_kg: 0,
            max_fuel_consumption_l_per_100km: rules::BASE_MAX_CONSUMPTION_L,
            max_budget: rules::DEFAULT_MAX_BUDGET,
            recommended_budget: rules::DEFAULT_RECOMMENDED_BUDGET,
            max_monthly_cost_estimate: 0,
            third_row_required: false,
            all_wheel_drive_required: false,
            winter_tires_required: false,
            recommended_fuel_type: FuelType::Petrol,
            recommended_body_style: BodyStyle::Hatchback,
            reliability_priority: ReliabilityPriority::Medium,
            recommended_segments: Vec::new(),
            preferred_fuel_types: Vec::new(),
            lifestyle_notes: Vec::new(),
            monthly_distance_km: 0,
        }
    }

    /// Additive trunk contribution; blocks never subtract.
    pub(crate) fn add_trunk(&mut self, min_delta: u32, recommended_delta: u32) {
        self.min_trunk_capacity_l += min_delta;
        self.recommended_trunk_capacity_l += recommended_delta;
    }

    pub(crate) fn note(&mut self, note: impl Into<String>) {
        self.lifestyle_notes.push(note.into());
    }

    /// Appends a segment unless it is already present, preserving order.
    pub(crate) fn push_segment(&mut self, segment: Segment) {
        if !self.recommended_segments.contains(&segment) {
            self.recommended_segments.push(segment);
        }
    }

    /// Repairs the paired-field invariants after all blocks have run. Blocks
    /// are monotonic on their own fields, but a min raised by a late block
    /// may overtake a recommendation set earlier.
    pub(crate) fn finalize(&mut self) {
        self.recommended_trunk_capacity_l = self
            .recommended_trunk_capacity_l
            .max(self.min_trunk_capacity_l);
        self.recommended_power_kw = self.recommended_power_kw.max(self.min_power_kw);
        self.recommended_budget = self.recommended_budget.min(self.max_budget);
        if self.third_row_required {
            self.min_seats = self.min_seats.max(7);
        }
    }
}
