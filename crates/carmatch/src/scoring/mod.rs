mod market;
mod registry;

use crate::domain::{CandidateRecord, CandidateSource};
use crate::profile::RequirementProfile;
use serde::{Deserialize, Serialize};

/// Minimum match percentage for a candidate to count as a real fit,
/// regardless of strategy.
pub const MATCH_THRESHOLD: u32 = 60;

/// The two scoring rubrics. Registry records describe a bare specification
/// (no price, no mileage) and are graded against fixed weights; market
/// listings carry age, mileage and price and are graded by additive bonuses
/// and penalties around a neutral baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringStrategy {
    RegistryScore,
    MarketScore,
}

impl ScoringStrategy {
    /// Default strategy for a candidate's source. Synthetic records imitate
    /// market listings, so they score like one.
    pub fn for_source(source: CandidateSource) -> Self {
        match source {
            CandidateSource::Registry => Self::RegistryScore,
            CandidateSource::Classifieds | CandidateSource::Synthetic => Self::MarketScore,
        }
    }

    /// Scores one candidate against a profile. Pure: identical inputs always
    /// yield identical output; `current_year` is caller-supplied so age
    /// arithmetic stays testable.
    pub fn score(
        self,
        candidate: &CandidateRecord,
        profile: &RequirementProfile,
        current_year: i32,
    ) -> ScoredCandidate {
        let (match_score, warnings) = match self {
            Self::RegistryScore => registry::score(candidate, profile),
            Self::MarketScore => market::score(candidate, profile, current_year),
        };

        ScoredCandidate {
            meets_threshold: match_score >= MATCH_THRESHOLD,
            candidate: candidate.clone(),
            match_score,
            warnings,
        }
    }
}

/// A candidate annotated with its match percentage and the reasons any
/// criterion scored poorly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: CandidateRecord,
    /// Integer percentage in 0..=100.
    pub match_score: u32,
    pub meets_threshold: bool,
    pub warnings: Vec<String>,
}

/// Orders a scored batch best-first and keeps the top `limit` entries. The
/// strategies themselves guarantee no ordering; presentation layers call
/// this.
pub fn rank(mut scored: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyStyle, DriveType, FuelType, Transmission};

    pub(crate) fn candidate(id: &str, source: CandidateSource) -> CandidateRecord {
        CandidateRecord {
            id: id.to_string(),
            source,
            make: "Skoda".to_string(),
            model: "Octavia".to_string(),
            variant: "Combi".to_string(),
            model_year: 2020,
            body_style: BodyStyle::Estate,
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Manual,
            power_kw: 110,
            torque_nm: 250,
            mileage_km: 60_000,
            asking_price: 18_000,
            seat_count: 5,
            has_third_row: false,
            length_mm: 4_689,
            width_mm: 1_829,
            height_mm: 1_470,
            fuel_consumption_l_per_100km: 6.1,
            co2_g_per_km: 140,
            drive_type: DriveType::FrontWheel,
        }
    }

    #[test]
    fn strategy_follows_candidate_source() {
        assert_eq!(
            ScoringStrategy::for_source(CandidateSource::Registry),
            ScoringStrategy::RegistryScore
        );
        assert_eq!(
            ScoringStrategy::for_source(CandidateSource::Synthetic),
            ScoringStrategy::MarketScore
        );
    }

    #[test]
    fn rank_orders_descending_and_truncates() {
        let profile = crate::profile::compile(&crate::survey::SurveyAnswers {
            household_size: Some(2),
            ..Default::default()
        })
        .expect("profile compiles");

        let scored: Vec<ScoredCandidate> = (0..4)
            .map(|i| {
                let mut record = candidate(&format!("classifieds:{i}"), CandidateSource::Classifieds);
                record.model_year = 2010 + i * 4;
                ScoringStrategy::MarketScore.score(&record, &profile, 2026)
            })
            .collect();

        let top = rank(scored, 2);
        assert_eq!(top.len(), 2);
        assert!(top[0].match_score >= top[1].match_score);
    }

    #[test]
    fn scores_stay_in_bounds_under_both_strategies() {
        let profile = crate::profile::compile(&crate::survey::SurveyAnswers {
            household_size: Some(6),
            terrain: crate::survey::Terrain::Mountainous,
            unpaved_roads: true,
            ..Default::default()
        })
        .expect("profile compiles");

        for year in [1998, 2010, 2026] {
            for power in [0, 30, 400] {
                let mut record = candidate("registry:x", CandidateSource::Registry);
                record.model_year = year;
                record.power_kw = power;
                let scored = ScoringStrategy::RegistryScore.score(&record, &profile, 2026);
                assert!(scored.match_score <= 100);

                record.source = CandidateSource::Classifieds;
                let scored = ScoringStrategy::MarketScore.score(&record, &profile, 2026);
                assert!(scored.match_score <= 100);
            }
        }
    }
}
