//! Retrieval and normalization of candidate vehicles from external sources.
//!
//! The gateway is the only core component that performs network I/O, and the
//! only one whose failures are routine. Every failure path ends in either a
//! typed [`GatewayError::DataUnavailable`] (registry) or the deterministic
//! synthetic fallback (classifieds); raw transport errors never escape.

mod classifieds;
mod mapping;
mod parser;
mod registry;
mod synthetic;

pub use synthetic::{catalog as synthetic_catalog, FALLBACK_PRICE_PERCENTAGES};

use crate::config::GatewayConfig;
use crate::domain::{CandidateRecord, CandidateSource, DriveType, FuelType, Segment};
use crate::profile::RequirementProfile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// The reduced slice of a profile the external sources can filter on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileQuery {
    /// County name as the user typed it; mapped case- and
    /// diacritic-insensitively, unmapped names simply omit the filter.
    pub region: Option<String>,
    pub fuel: Option<FuelType>,
    /// Purchase ceiling in local price units.
    pub budget: u32,
    pub min_power_kw: u32,
    /// Preference-ranked segments; the first mappable one drives the
    /// marketplace category filter.
    pub segments: Vec<Segment>,
}

impl ProfileQuery {
    pub fn from_profile(profile: &RequirementProfile, region: Option<String>) -> Self {
        Self {
            region,
            fuel: Some(profile.recommended_fuel_type),
            budget: profile.max_budget,
            min_power_kw: profile.min_power_kw,
            segments: profile.recommended_segments.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewaySource {
    Registry,
    Classifieds,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The upstream returned nothing usable. Recovery is the caller's call:
    /// the classifieds path never surfaces this (it falls back to synthetic
    /// data), the registry path has no synthetic equivalent.
    #[error("{source_name} data unavailable: {reason}")]
    DataUnavailable {
        source_name: &'static str,
        reason: String,
    },
    #[error("failed to build http client: {0}")]
    Client(String),
}

impl GatewayError {
    pub(crate) fn unavailable(source: CandidateSource, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_name: source.label(),
            reason: reason.into(),
        }
    }
}

/// One outbound HTTP call per fetch, bounded by the configured timeout.
/// There is no retry policy: a failed attempt proceeds directly to fallback
/// or [`GatewayError::DataUnavailable`]; callers wanting retries wrap the
/// gateway externally.
pub struct CandidateGateway {
    client: reqwest::Client,
    registry_url: String,
    classifieds_url: String,
}

impl CandidateGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent("carmatch/0.1.0")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|err| GatewayError::Client(err.to_string()))?;

        Ok(Self {
            client,
            registry_url: config.registry_url.clone(),
            classifieds_url: config.classifieds_url.clone(),
        })
    }

    /// Retrieves and normalizes candidates from one source as of a given
    /// date. Record ids are unique within the returned set.
    pub async fn fetch(
        &self,
        query: &ProfileQuery,
        source: GatewaySource,
        as_of: NaiveDate,
    ) -> Result<Vec<CandidateRecord>, GatewayError> {
        match source {
            GatewaySource::Registry => {
                registry::fetch(&self.client, &self.registry_url, query, as_of).await
            }
            GatewaySource::Classifieds => Ok(self.fetch_classifieds(query).await),
        }
    }

    /// Classifieds retrieval is infallible from the caller's perspective:
    /// any transport error or a page yielding fewer than the minimum usable
    /// result count degrades to the synthetic catalog, tagged as such.
    async fn fetch_classifieds(&self, query: &ProfileQuery) -> Vec<CandidateRecord> {
        let url = classifieds::build_search_url(&self.classifieds_url, query);

        let listings = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => classifieds::extract_listings(&body),
                Err(err) => {
                    warn!(%err, "classifieds body read failed");
                    None
                }
            },
            Ok(response) => {
                warn!(status = %response.status(), "classifieds returned non-success status");
                None
            }
            Err(err) => {
                warn!(%err, "classifieds request failed");
                None
            }
        };

        match listings {
            Some(records) => records,
            None => {
                warn!(budget = query.budget, "falling back to synthetic catalog");
                synthetic::catalog(query.budget)
            }
        }
    }
}

/// Maps source-reported drivetrain keywords onto the controlled enum.
pub(crate) fn drive_from_keyword(raw: &str) -> DriveType {
    let normalized = mapping::normalize_key(raw);
    if normalized.contains("4x4")
        || normalized.contains("awd")
        || normalized.contains("osszkerek")
        || normalized.contains("all")
    {
        DriveType::AllWheel
    } else if normalized.contains("front") || normalized.contains("fwd") {
        DriveType::FrontWheel
    } else if normalized.contains("rear") || normalized.contains("rwd") {
        DriveType::RearWheel
    } else {
        DriveType::Unknown
    }
}
