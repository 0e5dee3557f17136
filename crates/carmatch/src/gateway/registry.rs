//! The government vehicle-registry source.
//!
//! Registry records describe type-approval specifications, not individual
//! used units: mileage stays at the unknown sentinel and there is no asking
//! price. The query uses a ten-year rolling registration window ending at
//! the caller's `as_of` date; the width trades precision for the chance of a
//! non-empty result set.

use super::mapping;
use super::{GatewayError, ProfileQuery};
use crate::domain::{CandidateRecord, CandidateSource, Transmission};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;

const WINDOW_YEARS: i32 = 10;

pub(super) async fn fetch(
    client: &reqwest::Client,
    url: &str,
    query: &ProfileQuery,
    as_of: NaiveDate,
) -> Result<Vec<CandidateRecord>, GatewayError> {
    let params = build_query(query, as_of);

    let response = client.get(url).query(&params).send().await.map_err(|err| {
        GatewayError::unavailable(CandidateSource::Registry, format!("request failed: {err}"))
    })?;

    if !response.status().is_success() {
        return Err(GatewayError::unavailable(
            CandidateSource::Registry,
            format!("upstream status {}", response.status()),
        ));
    }

    let body = response.text().await.map_err(|err| {
        GatewayError::unavailable(CandidateSource::Registry, format!("body read failed: {err}"))
    })?;

    let records = normalize_payload(&body)?;
    if records.is_empty() {
        return Err(GatewayError::unavailable(
            CandidateSource::Registry,
            "query matched no registrations",
        ));
    }
    Ok(records)
}

pub(super) fn build_query(query: &ProfileQuery, as_of: NaiveDate) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("registered_from", window_start(as_of).to_string()),
        ("registered_to", as_of.to_string()),
    ];
    if let Some(code) = query.region.as_deref().and_then(mapping::region_code) {
        params.push(("region_code", code.to_string()));
    }
    if let Some(code) = query.fuel.and_then(mapping::registry_fuel_code) {
        params.push(("fuel_code", code.to_string()));
    }
    params
}

fn window_start(as_of: NaiveDate) -> NaiveDate {
    as_of
        .with_year(as_of.year() - WINDOW_YEARS)
        // Feb 29 in a non-leap target year.
        .unwrap_or_else(|| as_of - Duration::days(WINDOW_YEARS as i64 * 365 + 3))
}

/// One row of the registry payload; unknown fields default to the 0/empty
/// sentinel so a sparse row still normalizes.
#[derive(Debug, Deserialize)]
struct RegistryRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    make: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    variant: String,
    #[serde(default)]
    first_registration_year: i32,
    #[serde(default)]
    body_style: String,
    #[serde(default)]
    fuel_code: String,
    #[serde(default)]
    transmission: String,
    #[serde(default)]
    power_kw: u32,
    #[serde(default)]
    torque_nm: u32,
    #[serde(default)]
    seat_count: u32,
    #[serde(default)]
    length_mm: u32,
    #[serde(default)]
    width_mm: u32,
    #[serde(default)]
    height_mm: u32,
    #[serde(default)]
    fuel_consumption_l_per_100km: f32,
    #[serde(default)]
    co2_g_per_km: u32,
    #[serde(default)]
    drive: String,
}

/// Accepts either a bare JSON array or a `{"results": [...]}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryPayload {
    Bare(Vec<RegistryRow>),
    Enveloped { results: Vec<RegistryRow> },
}

pub(super) fn normalize_payload(body: &str) -> Result<Vec<CandidateRecord>, GatewayError> {
    let payload: RegistryPayload = serde_json::from_str(body).map_err(|err| {
        GatewayError::unavailable(CandidateSource::Registry, format!("unparseable payload: {err}"))
    })?;
    let rows = match payload {
        RegistryPayload::Bare(rows) => rows,
        RegistryPayload::Enveloped { results } => results,
    };

    Ok(rows.into_iter().enumerate().map(normalize_row).collect())
}

fn normalize_row((index, row): (usize, RegistryRow)) -> CandidateRecord {
    let id = if row.id.is_empty() {
        format!("registry:row-{index}")
    } else {
        format!("registry:{}", row.id)
    };

    CandidateRecord {
        id,
        source: CandidateSource::Registry,
        make: row.make,
        model: row.model,
        variant: row.variant,
        model_year: row.first_registration_year,
        body_style: body_style_from_code(&row.body_style),
        fuel_type: mapping::fuel_from_registry_code(&row.fuel_code),
        transmission: transmission_from_code(&row.transmission),
        power_kw: row.power_kw,
        torque_nm: row.torque_nm,
        // Specification records, not used units.
        mileage_km: 0,
        asking_price: 0,
        seat_count: row.seat_count,
        has_third_row: row.seat_count >= 7,
        length_mm: row.length_mm,
        width_mm: row.width_mm,
        height_mm: row.height_mm,
        fuel_consumption_l_per_100km: row.fuel_consumption_l_per_100km,
        co2_g_per_km: row.co2_g_per_km,
        drive_type: super::drive_from_keyword(&row.drive),
    }
}

fn body_style_from_code(code: &str) -> crate::domain::BodyStyle {
    use crate::domain::BodyStyle;
    match mapping::normalize_key(code).as_str() {
        "ferdehatu" | "hatchback" => BodyStyle::Hatchback,
        "szedan" | "sedan" | "lepcsoshatu" => BodyStyle::Sedan,
        "kombi" | "estate" => BodyStyle::Estate,
        "suv" | "terepjaro" => BodyStyle::Suv,
        "egyteru" | "van" => BodyStyle::Van,
        "kupe" | "coupe" => BodyStyle::Coupe,
        "platos" | "pickup" => BodyStyle::Pickup,
        _ => BodyStyle::Unknown,
    }
}

fn transmission_from_code(code: &str) -> Transmission {
    match mapping::normalize_key(code).as_str() {
        "" => Transmission::Unknown,
        "manualis" | "manual" | "mechanikus" => Transmission::Manual,
        "automata" | "automatic" => Transmission::Automatic,
        _ => Transmission::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyStyle, DriveType, FuelType};

    fn query() -> ProfileQuery {
        ProfileQuery {
            region: Some("Győr-Moson-Sopron".to_string()),
            fuel: Some(FuelType::Diesel),
            budget: 40_000,
            min_power_kw: 110,
            segments: Vec::new(),
        }
    }

    #[test]
    fn query_includes_window_region_and_fuel() {
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date");
        let params = build_query(&query(), as_of);

        assert!(params.contains(&("registered_from", "2016-08-30".to_string())));
        assert!(params.contains(&("registered_to", "2026-08-30".to_string())));
        assert!(params.contains(&("region_code", "08".to_string())));
        assert!(params.contains(&("fuel_code", "DIZEL".to_string())));
    }

    #[test]
    fn unmapped_region_omits_the_filter_instead_of_failing() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        let mut q = query();
        q.region = Some("Narnia".to_string());
        q.fuel = None;

        let params = build_query(&q, as_of);
        assert_eq!(params.len(), 2, "only the date window remains");
    }

    #[test]
    fn leap_day_window_start_is_handled() {
        let as_of = NaiveDate::from_ymd_opt(2024, 2, 29).expect("leap day");
        let start = window_start(as_of);
        assert_eq!(start.year(), 2014);
    }

    #[test]
    fn payload_rows_normalize_with_sentinel_defaults() {
        let body = r#"{"results": [
            {"id": "t-1", "make": "Toyota", "model": "RAV4",
             "first_registration_year": 2022, "body_style": "terepjáró",
             "fuel_code": "HIBRID", "transmission": "automata",
             "power_kw": 160, "seat_count": 5, "drive": "AWD"},
            {"make": "Suzuki", "model": "Swift", "fuel_code": "BENZIN"}
        ]}"#;

        let records = normalize_payload(body).expect("payload parses");
        assert_eq!(records.len(), 2);

        let rav4 = &records[0];
        assert_eq!(rav4.id, "registry:t-1");
        assert_eq!(rav4.body_style, BodyStyle::Suv);
        assert_eq!(rav4.fuel_type, FuelType::Hybrid);
        assert_eq!(rav4.drive_type, DriveType::AllWheel);
        assert_eq!(rav4.mileage_km, 0, "registry records carry no mileage");

        let swift = &records[1];
        assert_eq!(swift.id, "registry:row-1");
        assert_eq!(swift.power_kw, 0, "missing power stays the unknown sentinel");
        assert_eq!(swift.transmission, Transmission::Unknown);
    }

    #[test]
    fn unparseable_payload_is_a_typed_error() {
        let err = normalize_payload("<html>oops</html>").expect_err("not json");
        assert!(matches!(err, GatewayError::DataUnavailable { .. }));
    }

    #[test]
    fn bare_array_payload_is_accepted() {
        let records = normalize_payload(r#"[{"id": "x", "make": "Opel"}]"#).expect("parses");
        assert_eq!(records.len(), 1);
    }
}
