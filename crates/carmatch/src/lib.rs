pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod profile;
pub mod scoring;
pub mod survey;
pub mod telemetry;
