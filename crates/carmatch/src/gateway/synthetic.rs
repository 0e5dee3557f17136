//! Deterministic fallback catalog used when live classifieds retrieval
//! fails. Five representative vehicles spanning the common segments, priced
//! proportionally to the caller's budget and tagged `synthetic` so no
//! consumer can mistake them for live listings.

use crate::domain::{BodyStyle, CandidateRecord, CandidateSource, DriveType, FuelType, Transmission};

/// Asking prices as percentages of the caller's budget, in catalog order.
pub const FALLBACK_PRICE_PERCENTAGES: [u32; 5] = [80, 85, 90, 95, 100];

struct CatalogEntry {
    make: &'static str,
    model: &'static str,
    variant: &'static str,
    model_year: i32,
    body_style: BodyStyle,
    fuel_type: FuelType,
    transmission: Transmission,
    power_kw: u32,
    torque_nm: u32,
    mileage_km: u32,
    seat_count: u32,
    length_mm: u32,
    width_mm: u32,
    height_mm: u32,
    fuel_consumption_l_per_100km: f32,
    co2_g_per_km: u32,
    drive_type: DriveType,
}

const CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        make: "Toyota",
        model: "Corolla",
        variant: "Touring Sports 1.8 Hybrid",
        model_year: 2021,
        body_style: BodyStyle::Estate,
        fuel_type: FuelType::Hybrid,
        transmission: Transmission::Automatic,
        power_kw: 90,
        torque_nm: 142,
        mileage_km: 72_000,
        seat_count: 5,
        length_mm: 4_650,
        width_mm: 1_790,
        height_mm: 1_460,
        fuel_consumption_l_per_100km: 4.5,
        co2_g_per_km: 102,
        drive_type: DriveType::FrontWheel,
    },
    CatalogEntry {
        make: "Skoda",
        model: "Octavia",
        variant: "Combi 2.0 TDI",
        model_year: 2019,
        body_style: BodyStyle::Estate,
        fuel_type: FuelType::Diesel,
        transmission: Transmission::Manual,
        power_kw: 110,
        torque_nm: 340,
        mileage_km: 98_000,
        seat_count: 5,
        length_mm: 4_689,
        width_mm: 1_829,
        height_mm: 1_470,
        fuel_consumption_l_per_100km: 4.8,
        co2_g_per_km: 119,
        drive_type: DriveType::FrontWheel,
    },
    CatalogEntry {
        make: "Hyundai",
        model: "Tucson",
        variant: "1.6 T-GDI 4WD",
        model_year: 2020,
        body_style: BodyStyle::Suv,
        fuel_type: FuelType::Petrol,
        transmission: Transmission::Automatic,
        power_kw: 130,
        torque_nm: 265,
        mileage_km: 64_000,
        seat_count: 5,
        length_mm: 4_480,
        width_mm: 1_850,
        height_mm: 1_650,
        fuel_consumption_l_per_100km: 7.5,
        co2_g_per_km: 170,
        drive_type: DriveType::AllWheel,
    },
    CatalogEntry {
        make: "Volkswagen",
        model: "Golf",
        variant: "1.5 TSI",
        model_year: 2020,
        body_style: BodyStyle::Hatchback,
        fuel_type: FuelType::Petrol,
        transmission: Transmission::Manual,
        power_kw: 96,
        torque_nm: 200,
        mileage_km: 58_000,
        seat_count: 5,
        length_mm: 4_284,
        width_mm: 1_789,
        height_mm: 1_456,
        fuel_consumption_l_per_100km: 5.6,
        co2_g_per_km: 127,
        drive_type: DriveType::FrontWheel,
    },
    CatalogEntry {
        make: "Kia",
        model: "Sorento",
        variant: "2.2 CRDi AWD",
        model_year: 2018,
        body_style: BodyStyle::Suv,
        fuel_type: FuelType::Diesel,
        transmission: Transmission::Automatic,
        power_kw: 147,
        torque_nm: 441,
        mileage_km: 121_000,
        seat_count: 7,
        length_mm: 4_800,
        width_mm: 1_890,
        height_mm: 1_690,
        fuel_consumption_l_per_100km: 6.9,
        co2_g_per_km: 179,
        drive_type: DriveType::AllWheel,
    },
];

/// Builds the catalog against a budget. Same budget in, same five records
/// out, always.
pub fn catalog(budget: u32) -> Vec<CandidateRecord> {
    CATALOG
        .iter()
        .zip(FALLBACK_PRICE_PERCENTAGES)
        .enumerate()
        .map(|(index, (entry, percentage))| CandidateRecord {
            id: format!("synthetic:{}", index + 1),
            source: CandidateSource::Synthetic,
            make: entry.make.to_string(),
            model: entry.model.to_string(),
            variant: entry.variant.to_string(),
            model_year: entry.model_year,
            body_style: entry.body_style,
            fuel_type: entry.fuel_type,
            transmission: entry.transmission,
            power_kw: entry.power_kw,
            torque_nm: entry.torque_nm,
            mileage_km: entry.mileage_km,
            // Multiply first so sub-hundred budget remainders are not lost.
            // Percentages never exceed 100, so the result fits back in u32.
            asking_price: (u64::from(budget) * u64::from(percentage) / 100) as u32,
            seat_count: entry.seat_count,
            has_third_row: entry.seat_count >= 7,
            length_mm: entry.length_mm,
            width_mm: entry.width_mm,
            height_mm: entry.height_mm,
            fuel_consumption_l_per_100km: entry.fuel_consumption_l_per_100km,
            co2_g_per_km: entry.co2_g_per_km,
            drive_type: entry.drive_type,
        })
        .collect()
}
