//! Listing extraction layers for the classifieds payload.
//!
//! Layers form a chain of responsibility, each `&str -> Option<Vec<...>>`:
//! structured per-item attribute blocks first, then a class-name heuristic
//! with per-field regular expressions. Individual field extractors are
//! deliberately over-matchable and fall back to the most common category
//! instead of raising; a failed field never loses the listing.

use crate::domain::{BodyStyle, CandidateRecord, CandidateSource, FuelType, Transmission};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::mapping::normalize_key;

const HP_TO_KW: f32 = 0.7355;

fn item_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<(?:article|li|div)[^>]*?data-listing-id="([^"]+)"[^>]*>"#)
            .expect("item tag pattern compiles")
    })
}

fn data_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"data-([a-z-]+)="([^"]*)""#).expect("data attribute pattern compiles")
    })
}

fn container_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)class="[^"]*\b(?:listing|result|advert|hirdetes|talalati)[^"]*""#)
            .expect("container class pattern compiles")
    })
}

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Grouped thousands or a plain digit run; grouped first so "7 500"
        // is not read as two numbers.
        Regex::new(r"(?i)(\d{1,3}(?:[ .,\u{a0}]\d{3})+|\d{3,9})\s*(?:ft|huf|eur|€)")
            .expect("price pattern compiles")
    })
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(19[89]\d|20[0-4]\d)\b").expect("year pattern compiles"))
}

fn mileage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,3}(?:[ .,\u{a0}]\d{3})+|\d{1,9})\s*km\b")
            .expect("mileage pattern compiles")
    })
}

fn power_kw_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d{2,3})\s*kw\b").expect("power pattern compiles"))
}

fn power_hp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{2,4})\s*(?:le|hp|ps)\b").expect("horsepower pattern compiles")
    })
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<h\d[^>]*>\s*([^<]+?)\s*</h\d>").expect("title pattern compiles")
    })
}

/// Layer 1: items that carry machine-readable `data-*` attribute blocks.
pub(crate) fn extract_structured(body: &str) -> Option<Vec<CandidateRecord>> {
    let mut records = Vec::new();

    for captures in item_tag_re().captures_iter(body) {
        let id = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let tag = captures.get(0).map(|m| m.as_str()).unwrap_or_default();

        let attrs: HashMap<&str, &str> = data_attr_re()
            .captures_iter(tag)
            .filter_map(|attr| {
                Some((attr.get(1)?.as_str(), attr.get(2)?.as_str()))
            })
            .collect();

        let seat_count = attrs
            .get("seats")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(5);
        records.push(CandidateRecord {
            id: format!("classifieds:{id}"),
            source: CandidateSource::Classifieds,
            make: attrs.get("make").unwrap_or(&"").to_string(),
            model: attrs.get("model").unwrap_or(&"").to_string(),
            variant: attrs.get("variant").unwrap_or(&"").to_string(),
            model_year: digits(attrs.get("year").unwrap_or(&"")) as i32,
            body_style: parse_body_style(attrs.get("body").unwrap_or(&"")),
            fuel_type: parse_fuel(attrs.get("fuel").unwrap_or(&"")),
            transmission: parse_transmission(attrs.get("transmission").unwrap_or(&"")),
            power_kw: digits(attrs.get("power-kw").unwrap_or(&"")),
            torque_nm: 0,
            mileage_km: digits(attrs.get("mileage").unwrap_or(&"")),
            asking_price: digits(attrs.get("price").unwrap_or(&"")),
            seat_count,
            has_third_row: seat_count >= 7,
            length_mm: 0,
            width_mm: 0,
            height_mm: 0,
            fuel_consumption_l_per_100km: 0.0,
            co2_g_per_km: 0,
            drive_type: super::drive_from_keyword(attrs.get("drive").unwrap_or(&"")),
        });
    }

    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

/// Layer 2: generic containers matched by class-name heuristics, with
/// per-field regex extraction from each block's text.
pub(crate) fn extract_heuristic(body: &str) -> Option<Vec<CandidateRecord>> {
    let starts: Vec<usize> = container_re().find_iter(body).map(|m| m.start()).collect();
    if starts.is_empty() {
        return None;
    }

    let mut records = Vec::new();
    for (index, start) in starts.iter().enumerate() {
        let end = starts.get(index + 1).copied().unwrap_or(body.len());
        let block = &body[*start..end];

        let price = extract_price(block);
        let year = extract_year(block);
        // A block with neither a price nor a year is navigation chrome, not
        // a listing.
        if price == 0 && year == 0 {
            continue;
        }

        let (make, model) = extract_make_model(block);
        records.push(CandidateRecord {
            id: format!("classifieds:item-{index}"),
            source: CandidateSource::Classifieds,
            make,
            model,
            variant: String::new(),
            model_year: year,
            body_style: extract_body_style(block),
            fuel_type: extract_fuel(block),
            transmission: extract_transmission(block),
            power_kw: extract_power_kw(block),
            torque_nm: 0,
            mileage_km: extract_mileage(block),
            asking_price: price,
            seat_count: 0,
            has_third_row: false,
            length_mm: 0,
            width_mm: 0,
            height_mm: 0,
            fuel_consumption_l_per_100km: 0.0,
            co2_g_per_km: 0,
            drive_type: crate::domain::DriveType::Unknown,
        });
    }

    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

fn digits(raw: &str) -> u32 {
    let cleaned: String = raw.chars().filter(char::is_ascii_digit).collect();
    cleaned.parse().unwrap_or(0)
}

pub(crate) fn extract_price(block: &str) -> u32 {
    price_re()
        .captures(block)
        .and_then(|captures| captures.get(1))
        .map(|m| digits(m.as_str()))
        .unwrap_or(0)
}

pub(crate) fn extract_year(block: &str) -> i32 {
    year_re()
        .captures(block)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

pub(crate) fn extract_mileage(block: &str) -> u32 {
    mileage_re()
        .captures(block)
        .and_then(|captures| captures.get(1))
        .map(|m| digits(m.as_str()))
        .unwrap_or(0)
}

pub(crate) fn extract_power_kw(block: &str) -> u32 {
    if let Some(kw) = power_kw_re()
        .captures(block)
        .and_then(|captures| captures.get(1))
        .map(|m| digits(m.as_str()))
    {
        if kw > 0 {
            return kw;
        }
    }
    power_hp_re()
        .captures(block)
        .and_then(|captures| captures.get(1))
        .map(|m| (digits(m.as_str()) as f32 * HP_TO_KW).round() as u32)
        .unwrap_or(0)
}

/// Petrol is by far the most common listing, so it is the fallback.
pub(crate) fn extract_fuel(block: &str) -> FuelType {
    parse_fuel(block)
}

fn parse_fuel(raw: &str) -> FuelType {
    let normalized = normalize_key(raw);
    if normalized.contains("plug-in") || normalized.contains("plugin") {
        FuelType::PluginHybrid
    } else if normalized.contains("hibrid") || normalized.contains("hybrid") {
        FuelType::Hybrid
    } else if normalized.contains("dizel") || normalized.contains("diesel") {
        FuelType::Diesel
    } else if normalized.contains("elektromos") || normalized.contains("electric") {
        FuelType::Electric
    } else {
        FuelType::Petrol
    }
}

pub(crate) fn extract_transmission(block: &str) -> Transmission {
    parse_transmission(block)
}

fn parse_transmission(raw: &str) -> Transmission {
    let normalized = normalize_key(raw);
    if normalized.contains("automata")
        || normalized.contains("automatic")
        || normalized.contains("dsg")
        || normalized.contains("tiptronic")
    {
        Transmission::Automatic
    } else {
        // Manual dominates the used market.
        Transmission::Manual
    }
}

/// Hatchback is the most common style on the market, so it is the fallback.
pub(crate) fn extract_body_style(block: &str) -> BodyStyle {
    parse_body_style(block)
}

fn parse_body_style(raw: &str) -> BodyStyle {
    let normalized = normalize_key(raw);
    if normalized.contains("suv")
        || normalized.contains("terepjaro")
        || normalized.contains("crossover")
    {
        BodyStyle::Suv
    } else if normalized.contains("kombi")
        || normalized.contains("estate")
        || normalized.contains("wagon")
    {
        BodyStyle::Estate
    } else if normalized.contains("szedan") || normalized.contains("sedan") {
        BodyStyle::Sedan
    } else if normalized.contains("egyteru")
        || normalized.contains("minivan")
        || normalized.contains(" van")
    {
        BodyStyle::Van
    } else if normalized.contains("coupe") || normalized.contains("kupe") {
        BodyStyle::Coupe
    } else if normalized.contains("pickup") || normalized.contains("platos") {
        BodyStyle::Pickup
    } else {
        BodyStyle::Hatchback
    }
}

fn extract_make_model(block: &str) -> (String, String) {
    let title = title_re()
        .captures(block)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let mut words = title.split_whitespace();
    let make = words.next().unwrap_or("").to_string();
    let model = words.collect::<Vec<_>>().join(" ");
    (make, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED_PAGE: &str = r#"
        <section>
          <article class="listing-card" data-listing-id="a-101" data-make="Toyota"
                   data-model="Corolla" data-year="2021" data-price="21 500 EUR"
                   data-mileage="45 000" data-fuel="hybrid" data-transmission="automata"
                   data-power-kw="103" data-body="szedan" data-seats="5" data-drive="front">
          </article>
          <article class="listing-card" data-listing-id="a-102" data-make="Skoda"
                   data-model="Kodiaq" data-year="2019" data-price="27 900 EUR"
                   data-mileage="88 000" data-fuel="dizel" data-power-kw="140"
                   data-body="suv" data-seats="7" data-drive="4x4">
          </article>
        </section>
    "#;

    const HEURISTIC_PAGE: &str = r#"
        <div class="search-result-row">
          <h3>Opel Astra Sports Tourer</h3>
          <span>2018</span> <span>9 450 EUR</span> <span>126 000 km</span>
          <span>dízel, kombi, 100 kW</span>
        </div>
        <div class="search-result-row">
          <h3>Suzuki Vitara</h3>
          <span>2020</span> <span>13 900 EUR</span> <span>61 000 km</span>
          <span>benzin, automata, crossover, 95 LE</span>
        </div>
        <div class="footer-links">about | contact</div>
    "#;

    #[test]
    fn structured_layer_reads_attribute_blocks() {
        let records = extract_structured(STRUCTURED_PAGE).expect("items found");
        assert_eq!(records.len(), 2);

        let corolla = &records[0];
        assert_eq!(corolla.id, "classifieds:a-101");
        assert_eq!(corolla.asking_price, 21_500);
        assert_eq!(corolla.fuel_type, FuelType::Hybrid);
        assert_eq!(corolla.transmission, Transmission::Automatic);
        assert_eq!(corolla.body_style, BodyStyle::Sedan);

        let kodiaq = &records[1];
        assert_eq!(kodiaq.seat_count, 7);
        assert!(kodiaq.has_third_row);
        assert_eq!(kodiaq.drive_type, crate::domain::DriveType::AllWheel);
    }

    #[test]
    fn structured_layer_declines_pages_without_items() {
        assert!(extract_structured("<html><body>maintenance</body></html>").is_none());
    }

    #[test]
    fn heuristic_layer_extracts_fields_and_skips_chrome() {
        let records = extract_heuristic(HEURISTIC_PAGE).expect("listings found");
        assert_eq!(records.len(), 2, "footer block has no price or year");

        let astra = &records[0];
        assert_eq!(astra.make, "Opel");
        assert_eq!(astra.model, "Astra Sports Tourer");
        assert_eq!(astra.model_year, 2018);
        assert_eq!(astra.asking_price, 9_450);
        assert_eq!(astra.mileage_km, 126_000);
        assert_eq!(astra.fuel_type, FuelType::Diesel);
        assert_eq!(astra.body_style, BodyStyle::Estate);
        assert_eq!(astra.power_kw, 100);

        let vitara = &records[1];
        assert_eq!(vitara.transmission, Transmission::Automatic);
        assert_eq!(vitara.body_style, BodyStyle::Suv);
        assert_eq!(vitara.power_kw, 70, "95 hp converts to 70 kW");
    }

    #[test]
    fn extractors_default_without_matching_never_raise() {
        assert_eq!(extract_price("no numbers here"), 0);
        assert_eq!(extract_year(""), 0);
        assert_eq!(extract_mileage("garbage"), 0);
        assert_eq!(extract_power_kw("1 kW"), 0);
        assert_eq!(extract_fuel("plain text"), FuelType::Petrol);
        assert_eq!(extract_transmission(""), Transmission::Manual);
        assert_eq!(extract_body_style("???"), BodyStyle::Hatchback);
    }

    #[test]
    fn fuel_keywords_are_over_matchable_by_design() {
        assert_eq!(extract_fuel("great DIESEL family car"), FuelType::Diesel);
        assert_eq!(extract_fuel("plug-in hibrid"), FuelType::PluginHybrid);
    }
}
