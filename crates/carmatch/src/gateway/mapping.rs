//! Static lookup tables for the external sources.
//!
//! Keys are normalized (lowercase, diacritics stripped, whitespace collapsed)
//! once at this boundary, so callers can pass region names exactly as users
//! typed them.

use crate::domain::{FuelType, Segment};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Lowercases, strips the Hungarian diacritic set plus the common Latin-1
/// accents, and collapses whitespace runs.
pub(crate) fn normalize_key(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    for ch in value.to_lowercase().chars() {
        let replacement = match ch {
            'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'ő' | 'õ' => 'o',
            'ú' | 'ù' | 'û' | 'ü' | 'ű' => 'u',
            other => other,
        };
        normalized.push(replacement);
    }
    normalized
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

static REGION_CODES: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Administrative code for a county name, matched case- and
/// diacritic-insensitively. Unmapped regions return `None` and the caller
/// omits the filter rather than failing.
pub(crate) fn region_code(name: &str) -> Option<&'static str> {
    region_map().get(normalize_key(name).as_str()).copied()
}

fn region_map() -> &'static HashMap<String, &'static str> {
    REGION_CODES.get_or_init(|| {
        const COUNTY_TO_CODE: &[(&str, &str)] = &[
            ("Budapest", "01"),
            ("Baranya", "02"),
            ("Bács-Kiskun", "03"),
            ("Békés", "04"),
            ("Borsod-Abaúj-Zemplén", "05"),
            ("Csongrád-Csanád", "06"),
            ("Fejér", "07"),
            ("Győr-Moson-Sopron", "08"),
            ("Hajdú-Bihar", "09"),
            ("Heves", "10"),
            ("Komárom-Esztergom", "11"),
            ("Nógrád", "12"),
            ("Pest", "13"),
            ("Somogy", "14"),
            ("Szabolcs-Szatmár-Bereg", "15"),
            ("Jász-Nagykun-Szolnok", "16"),
            ("Tolna", "17"),
            ("Vas", "18"),
            ("Veszprém", "19"),
            ("Zala", "20"),
        ];

        let mut map = HashMap::with_capacity(COUNTY_TO_CODE.len());
        for (county, code) in COUNTY_TO_CODE {
            map.insert(normalize_key(county), *code);
        }
        map
    })
}

/// Controlled vocabulary the registry endpoint accepts for its fuel filter.
pub(crate) fn registry_fuel_code(fuel: FuelType) -> Option<&'static str> {
    match fuel {
        FuelType::Petrol => Some("BENZIN"),
        FuelType::Diesel => Some("DIZEL"),
        FuelType::Hybrid => Some("HIBRID"),
        FuelType::PluginHybrid => Some("PLUGIN_HIBRID"),
        FuelType::Electric => Some("ELEKTROMOS"),
        FuelType::Unknown => None,
    }
}

/// Inverse mapping for registry payload values; unrecognized codes come back
/// as `Unknown` rather than failing normalization.
pub(crate) fn fuel_from_registry_code(code: &str) -> FuelType {
    match normalize_key(code).as_str() {
        "benzin" | "benzin/gaz" => FuelType::Petrol,
        "dizel" | "gazolaj" => FuelType::Diesel,
        "hibrid" => FuelType::Hybrid,
        "plugin_hibrid" | "plugin hibrid" => FuelType::PluginHybrid,
        "elektromos" => FuelType::Electric,
        _ => FuelType::Unknown,
    }
}

/// Marketplace category slug for a segment. Unmapped segments omit the
/// filter, widening the search instead of failing it.
pub(crate) fn classifieds_category(segment: Segment) -> Option<&'static str> {
    match segment {
        Segment::A | Segment::B => Some("kisauto"),
        Segment::C => Some("kompakt"),
        Segment::D => Some("szedan"),
        Segment::BSuv | Segment::CSuv | Segment::DSuv | Segment::LargeSuv => {
            Some("suv-terepjaro")
        }
        Segment::Van => Some("egyteru"),
    }
}
