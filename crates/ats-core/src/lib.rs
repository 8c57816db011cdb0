//! Search, relevance ranking and dashboard analytics for an applicant
//! tracking backend.

pub mod analytics;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod import;
pub mod search;
pub mod store;
pub mod telemetry;

#[cfg(test)]
mod tests;
