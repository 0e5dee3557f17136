use serde::{Deserialize, Serialize};

/// Terrain the buyer mostly drives on. Exactly one tier is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Flat,
    Moderate,
    Mountainous,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommuteType {
    #[default]
    City,
    Mixed,
    Highway,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationStyle {
    #[default]
    None,
    WeekendTrips,
    RoadTrips,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowingNeed {
    #[default]
    None,
    Occasional,
    Regular,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinterSeverity {
    #[default]
    Mild,
    Moderate,
    Harsh,
}

/// Flat record of one completed survey session.
///
/// Only `household_size` is hard-required; every other answer has a
/// zero/none default that skips the corresponding rule contribution during
/// compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyAnswers {
    pub household_size: Option<u32>,
    #[serde(default)]
    pub children_count: u32,
    #[serde(default)]
    pub weekly_groceries: bool,
    #[serde(default)]
    pub stroller: bool,
    #[serde(default)]
    pub sports_equipment: bool,
    #[serde(default)]
    pub pet: bool,
    #[serde(default)]
    pub vacation_style: VacationStyle,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub commute: CommuteType,
    /// One-way daily commute distance in km.
    #[serde(default)]
    pub daily_commute_km: u32,
    #[serde(default)]
    pub towing: TowingNeed,
    #[serde(default)]
    pub unpaved_roads: bool,
    #[serde(default)]
    pub winter_severity: WinterSeverity,
    /// Affordable monthly payment in local price units; absent means the
    /// fixed default budget applies.
    #[serde(default)]
    pub monthly_payment: Option<u32>,
    #[serde(default)]
    pub mechanical_skill: bool,
    #[serde(default)]
    pub planned_ownership_years: u32,
    #[serde(default)]
    pub reliability_concern: bool,
}

impl SurveyAnswers {
    /// Household size after compile-time validation. Callers outside the
    /// compiler must not rely on the fallback value.
    pub(crate) fn household(&self) -> u32 {
        self.household_size.unwrap_or(1)
    }

    /// Monthly driving distance derived from the commute answers; feeds the
    /// fuel-type inference and the operating cost estimate.
    pub fn monthly_distance_km(&self) -> u32 {
        // Saturating: an implausibly long commute must not panic the compiler.
        let commuting = self.daily_commute_km.saturating_mul(2 * 21);
        let pattern = match self.commute {
            CommuteType::City => 0,
            CommuteType::Mixed => 150,
            CommuteType::Highway => 400,
        };
        let leisure = match self.vacation_style {
            VacationStyle::None => 0,
            VacationStyle::WeekendTrips => 120,
            VacationStyle::RoadTrips => 300,
        };
        commuting.saturating_add(pattern).saturating_add(leisure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_distance_combines_commute_and_leisure() {
        let answers = SurveyAnswers {
            household_size: Some(2),
            daily_commute_km: 20,
            commute: CommuteType::Highway,
            vacation_style: VacationStyle::RoadTrips,
            ..SurveyAnswers::default()
        };

        assert_eq!(answers.monthly_distance_km(), 20 * 2 * 21 + 400 + 300);
    }

    #[test]
    fn defaults_deserialize_from_minimal_json() {
        let answers: SurveyAnswers =
            serde_json::from_str(r#"{"household_size": 4}"#).expect("minimal answers parse");
        assert_eq!(answers.household_size, Some(4));
        assert_eq!(answers.terrain, Terrain::Flat);
        assert_eq!(answers.towing, TowingNeed::None);
        assert!(answers.monthly_payment.is_none());
    }
}
