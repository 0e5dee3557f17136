use carmatch::config::GatewayConfig;
use carmatch::domain::CandidateSource;
use carmatch::gateway::{
    CandidateGateway, GatewayError, GatewaySource, ProfileQuery, FALLBACK_PRICE_PERCENTAGES,
};
use carmatch::profile::compile;
use carmatch::survey::SurveyAnswers;
use chrono::NaiveDate;

// Port 9 (discard) is never listening locally, so requests fail fast
// without touching the network.
fn unreachable_config() -> GatewayConfig {
    GatewayConfig {
        registry_url: "http://127.0.0.1:9/v1/registrations".to_string(),
        classifieds_url: "http://127.0.0.1:9/search".to_string(),
        http_timeout_secs: 2,
    }
}

fn query(budget: u32) -> ProfileQuery {
    let profile = compile(&SurveyAnswers {
        household_size: Some(4),
        monthly_payment: Some(budget / 48),
        ..SurveyAnswers::default()
    })
    .expect("profile compiles");
    ProfileQuery::from_profile(&profile, Some("Pest".to_string()))
}

#[tokio::test]
async fn classifieds_outage_degrades_to_the_synthetic_catalog() {
    let gateway = CandidateGateway::new(&unreachable_config()).expect("client builds");
    let query = query(48_000);
    let as_of = NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date");

    let records = gateway
        .fetch(&query, GatewaySource::Classifieds, as_of)
        .await
        .expect("classifieds fetch never fails");

    assert_eq!(records.len(), FALLBACK_PRICE_PERCENTAGES.len());
    for (record, percentage) in records.iter().zip(FALLBACK_PRICE_PERCENTAGES) {
        assert_eq!(record.source, CandidateSource::Synthetic);
        let expected_price = (u64::from(query.budget) * u64::from(percentage) / 100) as u32;
        assert_eq!(record.asking_price, expected_price);
        assert!(record.seat_count >= 5);
    }

    let mut ids: Vec<_> = records.iter().map(|record| record.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), records.len(), "record ids must be unique");
}

#[tokio::test]
async fn registry_outage_surfaces_as_unavailable() {
    let gateway = CandidateGateway::new(&unreachable_config()).expect("client builds");
    let query = query(30_000);
    let as_of = NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date");

    let result = gateway.fetch(&query, GatewaySource::Registry, as_of).await;

    match result {
        Err(GatewayError::DataUnavailable { source_name, .. }) => {
            assert_eq!(source_name, "registry");
        }
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
}
