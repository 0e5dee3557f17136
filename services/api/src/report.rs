use crate::infra::parse_date;
use crate::routes::DEFAULT_TOP;
use carmatch::config::AppConfig;
use carmatch::error::AppError;
use carmatch::gateway::{CandidateGateway, GatewaySource, ProfileQuery};
use carmatch::profile::{compile, RequirementProfile};
use carmatch::scoring::{rank, ScoredCandidate, ScoringStrategy, MATCH_THRESHOLD};
use carmatch::survey::SurveyAnswers;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AdviseArgs {
    /// JSON file with the completed survey answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Number of recommendations to print
    #[arg(long, default_value_t = DEFAULT_TOP)]
    pub(crate) top: usize,
    /// County used for the registry region filter
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Data source to query (registry or classifieds)
    #[arg(long, default_value = "classifieds", value_parser = parse_source)]
    pub(crate) source: GatewaySource,
    /// Evaluation date for candidate age scoring (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

fn parse_source(raw: &str) -> Result<GatewaySource, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "registry" => Ok(GatewaySource::Registry),
        "classifieds" => Ok(GatewaySource::Classifieds),
        other => Err(format!(
            "unknown source '{other}', expected registry or classifieds"
        )),
    }
}

pub(crate) async fn run_advise(args: AdviseArgs) -> Result<(), AppError> {
    let AdviseArgs {
        answers,
        top,
        region,
        source,
        as_of,
    } = args;

    let raw = std::fs::read_to_string(&answers)?;
    let answers: SurveyAnswers = serde_json::from_str(&raw).map_err(|err| {
        AppError::InvalidInput(format!("answers file is not a valid survey: {err}"))
    })?;

    let profile = compile(&answers)?;
    render_profile(&profile);

    let config = AppConfig::load()?;
    let gateway = CandidateGateway::new(&config.gateway)?;
    let query = ProfileQuery::from_profile(&profile, region);
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let records = gateway.fetch(&query, source, as_of).await?;
    let scored: Vec<ScoredCandidate> = records
        .iter()
        .map(|candidate| {
            ScoringStrategy::for_source(candidate.source).score(candidate, &profile, as_of.year())
        })
        .collect();
    let ranked = rank(scored, top);

    render_recommendations(&ranked, as_of);
    Ok(())
}

fn render_profile(profile: &RequirementProfile) {
    println!("Requirement profile");
    println!(
        "- Trunk: {} L minimum ({} L recommended)",
        profile.min_trunk_capacity_l, profile.recommended_trunk_capacity_l
    );
    print!("- Seats: at least {}", profile.min_seats);
    if profile.third_row_required {
        print!(" with a third row");
    }
    println!();
    println!(
        "- Power: {} kW minimum ({} kW recommended), 0-100 km/h under {:.1} s",
        profile.min_power_kw, profile.recommended_power_kw, profile.max_acceleration_sec
    );
    if profile.towing_capacity_kg > 0 {
        println!("- Towing: {} kg braked", profile.towing_capacity_kg);
    }
    if profile.all_wheel_drive_required {
        println!(
            "- All-wheel drive required, {} mm ground clearance",
            profile.min_ground_clearance_mm
        );
    }
    println!(
        "- Budget: up to {} ({} recommended), est. {} per month over {} km",
        profile.max_budget,
        profile.recommended_budget,
        profile.max_monthly_cost_estimate,
        profile.monthly_distance_km
    );
    println!(
        "- Fuel: {} preferred, max {:.1} l/100km",
        profile.recommended_fuel_type.label(),
        profile.max_fuel_consumption_l_per_100km
    );
    let segments: Vec<String> = profile
        .recommended_segments
        .iter()
        .map(|segment| format!("{segment:?}"))
        .collect();
    println!("- Segments: {}", segments.join(", "));

    if !profile.lifestyle_notes.is_empty() {
        println!("\nWhy these requirements");
        for note in &profile.lifestyle_notes {
            println!("  - {note}");
        }
    }
}

fn render_recommendations(ranked: &[ScoredCandidate], as_of: NaiveDate) {
    if ranked.is_empty() {
        println!("\nNo candidates matched the search filters.");
        return;
    }

    let source = ranked[0].candidate.source.label();
    println!("\nTop candidates as of {as_of} (data source: {source})");
    for (position, entry) in ranked.iter().enumerate() {
        println!("{}", recommendation_line(position + 1, entry));
        if entry.candidate.asking_price > 0 {
            println!(
                "   {} km | {} kW | asking {}",
                entry.candidate.mileage_km, entry.candidate.power_kw, entry.candidate.asking_price
            );
        }
        for warning in &entry.warnings {
            println!("   ! {warning}");
        }
    }
}

// Plain ASCII separators: the report goes to terminals and log files.
fn recommendation_line(position: usize, entry: &ScoredCandidate) -> String {
    let verdict = if entry.meets_threshold {
        "match"
    } else {
        "below threshold"
    };
    format!(
        "{position}. {} - {}/100 ({verdict}, threshold {MATCH_THRESHOLD})",
        entry.candidate.display_name(),
        entry.match_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use carmatch::domain::{
        BodyStyle, CandidateRecord, CandidateSource, DriveType, FuelType, Transmission,
    };

    #[test]
    fn recommendation_line_is_plain_ascii() {
        let candidate = CandidateRecord {
            id: "classifieds:1".to_string(),
            source: CandidateSource::Classifieds,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            variant: String::new(),
            model_year: 2021,
            body_style: BodyStyle::Hatchback,
            fuel_type: FuelType::Hybrid,
            transmission: Transmission::Automatic,
            power_kw: 90,
            torque_nm: 142,
            mileage_km: 72_000,
            asking_price: 16_000,
            seat_count: 5,
            has_third_row: false,
            length_mm: 0,
            width_mm: 0,
            height_mm: 0,
            fuel_consumption_l_per_100km: 4.5,
            co2_g_per_km: 102,
            drive_type: DriveType::FrontWheel,
        };

        let entry = ScoredCandidate {
            candidate,
            match_score: 74,
            meets_threshold: true,
            warnings: Vec::new(),
        };

        let line = recommendation_line(1, &entry);
        assert!(line.is_ascii(), "console output must stay ASCII: {line}");
        assert!(line.contains("74/100 (match, threshold 60)"));
    }
}
