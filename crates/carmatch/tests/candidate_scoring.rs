use carmatch::domain::{
    BodyStyle, CandidateRecord, CandidateSource, DriveType, FuelType, Transmission,
};
use carmatch::profile::compile;
use carmatch::scoring::{rank, ScoringStrategy, MATCH_THRESHOLD};
use carmatch::survey::{SurveyAnswers, Terrain};

const CURRENT_YEAR: i32 = 2026;

fn family_answers() -> SurveyAnswers {
    SurveyAnswers {
        household_size: Some(6),
        terrain: Terrain::Flat,
        ..SurveyAnswers::default()
    }
}

fn seven_seater(id: &str, source: CandidateSource) -> CandidateRecord {
    CandidateRecord {
        id: id.to_string(),
        source,
        make: "Kia".to_string(),
        model: "Sorento".to_string(),
        variant: "2.2 CRDi".to_string(),
        model_year: 2023,
        body_style: BodyStyle::Suv,
        fuel_type: FuelType::Petrol,
        transmission: Transmission::Automatic,
        power_kw: 200,
        torque_nm: 440,
        mileage_km: 40_000,
        asking_price: 38_000,
        seat_count: 7,
        has_third_row: true,
        length_mm: 4_810,
        width_mm: 1_900,
        height_mm: 1_700,
        fuel_consumption_l_per_100km: 6.3,
        co2_g_per_km: 165,
        drive_type: DriveType::AllWheel,
    }
}

#[test]
fn registry_strategy_rates_a_perfect_fit_at_the_ceiling() {
    let profile = compile(&family_answers()).expect("profile compiles");
    let candidate = seven_seater("registry:1", CandidateSource::Registry);

    let scored = ScoringStrategy::for_source(candidate.source).score(
        &candidate,
        &profile,
        CURRENT_YEAR,
    );

    assert_eq!(scored.match_score, 100);
    assert!(scored.meets_threshold);
    assert!(scored.warnings.is_empty());
}

#[test]
fn market_strategy_flags_a_stale_listing_below_threshold() {
    let profile = compile(&family_answers()).expect("profile compiles");
    let stale = CandidateRecord {
        model_year: 2012,
        mileage_km: 230_000,
        transmission: Transmission::Manual,
        fuel_type: FuelType::Unknown,
        body_style: BodyStyle::Sedan,
        drive_type: DriveType::FrontWheel,
        power_kw: 66,
        ..seven_seater("classifieds:stale", CandidateSource::Classifieds)
    };

    let scored = ScoringStrategy::for_source(stale.source).score(&stale, &profile, CURRENT_YEAR);

    assert!(scored.match_score < MATCH_THRESHOLD);
    assert!(!scored.meets_threshold);
    assert!(
        scored.warnings.len() >= 3,
        "expected age, mileage and power warnings, got {:?}",
        scored.warnings
    );
}

#[test]
fn both_strategies_stay_within_the_score_scale() {
    let profile = compile(&family_answers()).expect("profile compiles");
    let extremes = [
        CandidateRecord {
            power_kw: 0,
            seat_count: 0,
            model_year: 0,
            mileage_km: 0,
            ..seven_seater("x:unknowns", CandidateSource::Classifieds)
        },
        CandidateRecord {
            model_year: 2001,
            mileage_km: 400_000,
            power_kw: 40,
            drive_type: DriveType::FrontWheel,
            body_style: BodyStyle::Coupe,
            ..seven_seater("x:worst", CandidateSource::Classifieds)
        },
        seven_seater("x:best", CandidateSource::Registry),
    ];

    for candidate in &extremes {
        for strategy in [ScoringStrategy::RegistryScore, ScoringStrategy::MarketScore] {
            let scored = strategy.score(candidate, &profile, CURRENT_YEAR);
            assert!(scored.match_score <= 100, "{}: {}", candidate.id, scored.match_score);
            assert_eq!(scored.meets_threshold, scored.match_score >= MATCH_THRESHOLD);
        }
    }
}

#[test]
fn ranking_orders_by_score_and_truncates() {
    let profile = compile(&family_answers()).expect("profile compiles");
    let candidates = vec![
        CandidateRecord {
            model_year: 2014,
            mileage_km: 190_000,
            ..seven_seater("classifieds:old", CandidateSource::Classifieds)
        },
        seven_seater("classifieds:fresh", CandidateSource::Classifieds),
        CandidateRecord {
            model_year: 2019,
            mileage_km: 90_000,
            ..seven_seater("classifieds:mid", CandidateSource::Classifieds)
        },
    ];

    let scored: Vec<_> = candidates
        .iter()
        .map(|candidate| {
            ScoringStrategy::for_source(candidate.source).score(candidate, &profile, CURRENT_YEAR)
        })
        .collect();
    let ranked = rank(scored, 2);

    assert_eq!(ranked.len(), 2);
    assert!(ranked[0].match_score >= ranked[1].match_score);
    assert_eq!(ranked[0].candidate.id, "classifieds:fresh");
}
