pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub(crate) mod league_api;
pub mod model;
pub mod performance;
pub mod validation;

pub use auth::{decode_claims, AuthMode, CredentialProvider, Credentials, Session};
pub use client::LeagueClient;
pub use crate::config::ClientSettings;
pub use error::{LeagueError, Result};
pub use league_api::api_url;
pub use model::*;
pub use performance::{matches_for_athlete, outcome_for, performance_history, record_summary};
pub use validation::{
    outcome, parse_field, validate, validate_parts, InputError, ScoreField, ScoreInput,
    ValidationError,
};
